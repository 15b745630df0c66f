pub mod kanban_view;
pub mod list_view;
pub mod popup;
pub mod stats_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use regex::Regex;

use super::app::{App, Mode};
use super::keymap::LIST_HINTS;
use crate::util::unicode;

/// Draw the whole screen for the current mode
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let hints = if app.show_key_hints && !matches!(app.mode(), Mode::Kanban | Mode::Stats) {
        key_hint_lines(app, area.width as usize)
    } else {
        Vec::new()
    };
    let hint_rows = hints.len() as u16;

    // Layout: title (1 row) | content | key hints | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(hint_rows),
            Constraint::Length(1),
        ])
        .split(area);

    render_title(frame, app, chunks[0]);

    match app.mode() {
        Mode::Kanban => kanban_view::render_kanban_view(frame, app, chunks[1]),
        Mode::Stats => stats_view::render_stats_view(frame, app, chunks[1]),
        _ => list_view::render_list_view(frame, app, chunks[1]),
    }

    if !hints.is_empty() {
        frame.render_widget(Paragraph::new(hints), chunks[2]);
    }

    // Modals are drawn over the list
    match app.mode() {
        Mode::TextInput(prompt) => popup::render_text_prompt(frame, app, prompt, area),
        Mode::DateInput(form) => popup::render_date_form(frame, app, form, area),
        Mode::RemoveTagSelect(list) => popup::render_tag_checklist(frame, app, list, area),
        _ => {}
    }

    status_row::render_status_row(frame, app, chunks[3]);
}

/// Title badge plus the context tabs
fn render_title(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title = match app.mode() {
        Mode::Kanban => "Kanban View (ESC to return)".to_string(),
        Mode::Stats => "Statistics (ESC to return)".to_string(),
        _ if app.search_query().is_some() => "Search Results (ESC to exit)".to_string(),
        _ => format!("Context: {}", app.current_context()),
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(app.theme.title_fg)
                .bg(app.theme.title_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default().bg(bg)),
    ];
    for name in app.contexts() {
        let style = if name == app.current_context() {
            Style::default()
                .fg(app.theme.context)
                .bg(bg)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(name.clone(), style));
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Footer listing the list-view key bindings, packed into as few rows of
/// `width` cells as possible without splitting a binding
fn key_hint_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    const SEPARATOR: &str = " • ";
    let key_style = Style::default().fg(app.theme.text).bg(app.theme.background);
    let desc_style = Style::default().fg(app.theme.dim).bg(app.theme.background);

    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for (key, cmd) in LIST_HINTS {
        let desc = format!(" {}", cmd.describe());
        let item_width = unicode::display_width(key) + unicode::display_width(&desc);
        let sep_width = unicode::display_width(SEPARATOR);
        if !spans.is_empty() && used + sep_width + item_width > width {
            lines.push(Line::from(std::mem::take(&mut spans)));
            used = 0;
        }
        if !spans.is_empty() {
            spans.push(Span::styled(SEPARATOR, desc_style));
            used += sep_width;
        }
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(desc, desc_style));
        used += item_width;
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

/// Push spans for text with regex match highlighting. If no regex or no matches,
/// pushes a single span with `base_style`. Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    search_re: Option<&Regex>,
) {
    let Some(re) = search_re else {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    };

    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.start() > last_end {
            spans.push(Span::styled(
                text[last_end..m.start()].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(m.as_str().to_string(), highlight_style));
        last_end = m.end();
    }
    if last_end < text.len() || text.is_empty() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit
pub(super) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
