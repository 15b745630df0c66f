use chrono::{Local, NaiveDate};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::Task;
use crate::ops::search::highlight_pattern;
use crate::tui::app::App;

use super::push_highlighted_spans;

/// Render the task list: the current context, or the search hits
pub fn render_list_view(frame: &mut Frame, app: &App, area: Rect) {
    render_list_view_on(frame, app, area, Local::now().date_naive());
}

/// Same as [`render_list_view`] with an explicit "today" for overdue marking
pub fn render_list_view_on(frame: &mut Frame, app: &App, area: Rect, today: NaiveDate) {
    let tasks = app.visible_tasks();
    let bg = app.theme.background;
    let height = area.height as usize;

    // Leave one blank row under the title
    let mut lines = vec![Line::from("")];

    if tasks.is_empty() {
        let text = if app.search_query().is_some() {
            "No matching tasks found."
        } else {
            "No tasks in this context. Press 'a' to add one."
        };
        lines.push(Line::from(Span::styled(
            format!("  {}", text),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    let search_re = app.search_query().and_then(highlight_pattern);
    let selected = app.selected_index();
    let visible_rows = height.saturating_sub(1).max(1);
    let scroll = (selected + 1).saturating_sub(visible_rows);

    for (i, task) in tasks.iter().enumerate().skip(scroll).take(visible_rows) {
        let is_selected = i == selected;
        let is_moving = app.moving_task() == Some(task.id);
        lines.push(task_line(app, task, is_selected, is_moving, search_re.as_ref(), today));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn task_line<'a>(
    app: &App,
    task: &Task,
    selected: bool,
    moving: bool,
    search_re: Option<&regex::Regex>,
    today: NaiveDate,
) -> Line<'a> {
    let theme = &app.theme;
    let row_bg = if selected { theme.selection_bg } else { theme.background };

    let mut base = Style::default().fg(theme.text).bg(row_bg);
    if task.checked {
        base = base.fg(theme.done).add_modifier(Modifier::CROSSED_OUT);
    }
    if selected {
        base = base.fg(theme.selection_fg);
    }
    if moving {
        base = base.add_modifier(Modifier::BOLD);
    }
    let plain = Style::default().bg(row_bg);

    let gutter = match (moving, selected) {
        (true, _) => "↕ ",
        (false, true) => "▸ ",
        (false, false) => "  ",
    };
    let mut spans = vec![Span::styled(gutter, plain.fg(theme.selection_fg))];

    if !task.priority.is_none() {
        spans.push(Span::styled(
            format!("{} ", task.priority.marker()),
            plain
                .fg(theme.priority_color(task.priority))
                .add_modifier(Modifier::BOLD),
        ));
    }

    let checkbox = if task.checked { "[✓] " } else { "[ ] " };
    spans.push(Span::styled(checkbox, plain.fg(if task.checked { theme.done } else { theme.text })));

    let highlight = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);
    push_highlighted_spans(&mut spans, &task.text, base, highlight, search_re);

    if !task.tags.is_empty() {
        spans.push(Span::styled(
            format!(" > {}", task.tag_line()),
            plain.fg(theme.context),
        ));
    }

    if let Some(due) = &task.due_date {
        let color = if !task.checked && due.is_overdue(today) {
            theme.error
        } else {
            theme.dim
        };
        spans.push(Span::styled(format!(" [Due: {}]", due), plain.fg(color)));
    }

    // Search hits come from every context
    if search_re.is_some() {
        spans.push(Span::styled(
            format!("  @{}", task.context),
            plain.fg(theme.dim),
        ));
    }

    Line::from(spans).style(plain)
}
