use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::document::Document;
use crate::model::task::{Task, TaskId};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// App over the first-run document, showing "Personal"
pub fn seeded_app() -> App {
    App::new(Document::seed())
}

/// App with one "Work" context holding `texts` in order
pub fn app_with_tasks(texts: &[String]) -> App {
    let tasks: Vec<Task> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| Task::new(TaskId(i as u64 + 1), text.as_str(), "Work"))
        .collect();
    App::new(Document { tasks, next_id: 0 })
}
