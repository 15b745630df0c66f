use serde::Serialize;

use crate::model::task::{Priority, Task};
use crate::ops::search::CompletionStats;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    pub text: String,
    pub checked: bool,
    pub context: String,
    #[serde(skip_serializing_if = "Priority::is_none")]
    pub priority: Priority,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Serialize)]
pub struct ContextJson {
    pub name: String,
    pub done: usize,
    pub total: usize,
}

#[derive(Serialize)]
pub struct StatsJson {
    pub total: usize,
    pub done: usize,
    pub percent: f64,
    pub contexts: Vec<ContextJson>,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.0,
        text: task.text.clone(),
        checked: task.checked,
        context: task.context.clone(),
        priority: task.priority,
        tags: task.tags.iter().cloned().collect(),
        due_date: task.due_date.as_ref().map(|d| d.to_string()),
    }
}

pub fn stats_to_json(stats: &CompletionStats) -> StatsJson {
    StatsJson {
        total: stats.total,
        done: stats.done,
        percent: stats.percent(),
        contexts: stats
            .per_context
            .iter()
            .map(|c| ContextJson {
                name: c.name.clone(),
                done: c.done,
                total: c.total,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Plain text
// ---------------------------------------------------------------------------

/// One task as a line: `  3 [x] !! Buy milk > home [Due: 2025-01-02]`
pub fn format_task_line(task: &Task) -> String {
    let mut line = format!(
        "{:>3} [{}] ",
        task.id.0,
        if task.checked { "x" } else { " " }
    );
    if !task.priority.is_none() {
        line.push_str(task.priority.marker());
        line.push(' ');
    }
    line.push_str(&task.text);
    if !task.tags.is_empty() {
        line.push_str(" > ");
        line.push_str(&task.tag_line());
    }
    if let Some(due) = &task.due_date {
        line.push_str(&format!(" [Due: {}]", due));
    }
    line
}
