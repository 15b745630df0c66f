use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::model::task::Task;
use crate::ops::search::tasks_in_context;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

/// One bordered column per context, side by side
pub fn render_kanban_view(frame: &mut Frame, app: &App, area: Rect) {
    let contexts = app.contexts();
    let bg = app.theme.background;

    // One blank row under the title
    let area = Rect {
        y: area.y + 1,
        height: area.height.saturating_sub(1),
        ..area
    };

    if contexts.is_empty() {
        frame.render_widget(
            Paragraph::new("  No contexts available.").style(Style::default().fg(app.theme.dim).bg(bg)),
            area,
        );
        return;
    }

    let count = contexts.len() as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (name, column) in contexts.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme.dim).bg(bg))
            .title(Span::styled(
                format!(" {} ", name),
                Style::default()
                    .fg(app.theme.context)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner_width = column.width.saturating_sub(2) as usize;
        let lines: Vec<Line> = tasks_in_context(app.store().tasks(), name)
            .into_iter()
            .map(|task| card_line(app, task, inner_width))
            .collect();
        frame.render_widget(
            Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
            *column,
        );
    }
}

fn card_line(app: &App, task: &Task, width: usize) -> Line<'static> {
    let mut text = format!(
        "{} {}",
        if task.checked { "✓" } else { "•" },
        task.text
    );
    if !task.tags.is_empty() {
        text.push_str(" > ");
        text.push_str(&task.tag_line());
    }
    if let Some(due) = &task.due_date {
        text.push_str(&format!(" [Due: {}]", due));
    }

    let style = if task.checked {
        Style::default()
            .fg(app.theme.done)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(app.theme.text)
    };
    Line::from(Span::styled(truncate_to_width(&text, width), style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::command::Command;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn one_column_per_context() {
        let mut app = seeded_app();
        app.handle(Command::ShowKanban);
        let output = render_to_string(TERM_W, 12, |frame, area| {
            render_kanban_view(frame, &app, area);
        });
        assert!(output.contains(" Personal "), "{output}");
        assert!(output.contains(" Work "), "{output}");
        assert!(output.contains("✓ Press space to toggle"), "{output}");
        assert!(output.contains("• Welcome to your todo app!"), "{output}");
    }

    #[test]
    fn long_cards_are_truncated() {
        let long = "x".repeat(200);
        let app = app_with_tasks(&[long]);
        let output = render_to_string(40, 8, |frame, area| {
            render_kanban_view(frame, &app, area);
        });
        assert!(output.contains("…"), "{output}");
        assert!(output.lines().all(|l| l.chars().count() <= 40));
    }
}
