use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::{App, DATE_FIELD_LABELS, DateForm, TagChecklist, TextPrompt};

use super::centered_rect;

const POPUP_WIDTH: u16 = 60;

/// Bordered box cleared over whatever is underneath
fn popup_block(app: &App) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.selection_fg))
        .style(Style::default().bg(app.theme.background))
}

/// Free-text modal: prompt, the draft with a terminal cursor, and a hint
pub fn render_text_prompt(frame: &mut Frame, app: &App, prompt: &TextPrompt, area: Rect) {
    let popup = centered_rect(POPUP_WIDTH, 6, area);
    frame.render_widget(Clear, popup);
    let block = popup_block(app);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    if inner.height < 2 || inner.width == 0 {
        return;
    }

    let label_style = Style::default()
        .fg(app.theme.context)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Span::styled(prompt.prompt.clone(), label_style)),
        Rect { height: 1, ..inner },
    );

    // Keep the caret in view on long drafts
    let caret = prompt.field.caret_column() as u16;
    let offset = (caret + 1).saturating_sub(inner.width);
    let field_area = Rect {
        y: inner.y + 1,
        height: 1,
        ..inner
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            prompt.field.value().to_string(),
            Style::default().fg(app.theme.text),
        ))
        .scroll((0, offset)),
        field_area,
    );
    frame.set_cursor_position((field_area.x + caret - offset, field_area.y));

    if inner.height >= 4 {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Enter confirm  Esc cancel",
                Style::default().fg(app.theme.dim),
            )),
            Rect {
                y: inner.y + 3,
                height: 1,
                ..inner
            },
        );
    }
}

/// Day/month/year modal with the focused field highlighted
pub fn render_date_form(frame: &mut Frame, app: &App, form: &DateForm, area: Rect) {
    let popup = centered_rect(40, 9, area);
    frame.render_widget(Clear, popup);
    let block = popup_block(app);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = vec![
        Line::from(Span::styled(
            "Set due date (YYYY-MM-DD):",
            Style::default()
                .fg(app.theme.context)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    let mut caret = None;
    for (i, (label, field)) in DATE_FIELD_LABELS.iter().zip(form.fields.iter()).enumerate() {
        let focused = i == form.focus;
        let style = if focused {
            Style::default()
                .fg(app.theme.selection_fg)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        let label = format!("{:<7}", format!("{}:", label));
        if focused {
            caret = Some((label.len() + field.caret_column(), lines.len()));
        }
        lines.push(Line::from(vec![
            Span::styled(label, Style::default().fg(app.theme.dim)),
            Span::styled(field.value().to_string(), style),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab next field  Enter save  Esc cancel",
        Style::default().fg(app.theme.dim),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
    if let Some((col, row)) = caret
        && (row as u16) < inner.height
    {
        frame.set_cursor_position((inner.x + col as u16, inner.y + row as u16));
    }
}

/// Checklist of the target task's tags
pub fn render_tag_checklist(frame: &mut Frame, app: &App, list: &TagChecklist, area: Rect) {
    let height = list.tags.len() as u16 + 6;
    let popup = centered_rect(40, height, area);
    frame.render_widget(Clear, popup);
    let block = popup_block(app);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = vec![
        Line::from(Span::styled(
            "Select tags to remove:",
            Style::default()
                .fg(app.theme.context)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, (tag, checked)) in list.tags.iter().zip(list.checked.iter()).enumerate() {
        let selected = i == list.cursor;
        let style = if selected {
            Style::default()
                .fg(app.theme.selection_fg)
                .bg(app.theme.selection_bg)
        } else {
            Style::default().fg(app.theme.text)
        };
        let mark = if *checked { "[✓]" } else { "[ ]" };
        let pointer = if selected { "▸ " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{}{} {}", pointer, mark, tag),
            style,
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Space toggle  Enter remove  Esc cancel",
        Style::default().fg(app.theme.dim),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
