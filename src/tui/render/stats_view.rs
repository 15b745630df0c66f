use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Overall and per-context completion figures
pub fn render_stats_view(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();
    let text = Style::default().fg(app.theme.text).bg(app.theme.background);
    let heading = text.fg(app.theme.context).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("Total Tasks: {}", stats.total), text)),
        Line::from(Span::styled(
            format!("Completed: {} ({:.1}%)", stats.done, stats.percent()),
            text,
        )),
        Line::from(""),
        Line::from(Span::styled("Context Statistics:", heading)),
    ];
    for ctx in &stats.per_context {
        lines.push(Line::from(Span::styled(
            format!(
                "  {}: {}/{} ({:.1}%)",
                ctx.name,
                ctx.done,
                ctx.total,
                ctx.percent()
            ),
            text,
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seed_stats() {
        let app = seeded_app();
        let output = render_to_string(TERM_W, 10, |frame, area| {
            render_stats_view(frame, &app, area);
        });
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "",
                "Total Tasks: 4",
                "Completed: 1 (25.0%)",
                "",
                "Context Statistics:",
                "  Personal: 1/2 (50.0%)",
                "  Work: 0/2 (0.0%)",
            ]
        );
    }

    #[test]
    fn empty_store_reports_zero_percent() {
        let app = app_with_tasks(&[]);
        let output = render_to_string(TERM_W, 10, |frame, area| {
            render_stats_view(frame, &app, area);
        });
        assert!(output.contains("Completed: 0 (0.0%)"));
        assert!(output.contains("  Work: 0/0 (0.0%)"));
    }
}
