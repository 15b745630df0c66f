use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Message, Mode};
use crate::util::unicode::display_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match app.message() {
        Some(Message::Error { text, .. }) => Line::from(Span::styled(
            text.clone(),
            Style::default()
                .fg(app.theme.error)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Some(Message::Info(text)) => Line::from(Span::styled(
            text.clone(),
            Style::default().fg(app.theme.info).bg(bg),
        )),
        None => mode_line(app, width),
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Left: what the list is showing. Right: a short hint for the mode.
fn mode_line(app: &App, width: usize) -> Line<'static> {
    let bg = app.theme.background;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let mut spans = Vec::new();
    if app.is_moving() {
        spans.push(Span::styled(
            " MOVE ",
            Style::default()
                .fg(app.theme.title_fg)
                .bg(app.theme.selection_fg)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(" ", dim));
    }

    let count = app.visible_tasks().len();
    let summary = match app.search_query() {
        Some(query) => format!("/{}  {} match{}", query, count, if count == 1 { "" } else { "es" }),
        None => {
            let done = app.visible_tasks().iter().filter(|t| t.checked).count();
            format!("{}/{} done", done, count)
        }
    };
    spans.push(Span::styled(summary, dim));

    let hint = match app.mode() {
        Mode::Kanban | Mode::Stats => "Esc back",
        Mode::TextInput(_) | Mode::DateInput(_) | Mode::RemoveTagSelect(_) => "",
        _ if app.is_moving() => "↑↓ move  m/Esc done",
        Mode::Search(_) => "Esc exit search",
        Mode::Normal => "",
    };
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if !hint.is_empty() && used + hint_width < width {
        spans.push(Span::styled(" ".repeat(width - used - hint_width), dim));
        spans.push(Span::styled(hint, dim));
    }
    Line::from(spans)
}
