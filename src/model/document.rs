use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::task::{Task, TaskId};

/// The persisted form of the task list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Next identity to assign. 0 or missing means "derive from tasks".
    #[serde(default)]
    pub next_id: u64,
}

impl Document {
    /// The document used on first run or when the data file is unreadable
    pub fn seed() -> Self {
        let task = |id: u64, text: &str, checked: bool, context: &str| {
            let mut task = Task::new(TaskId(id), text, context);
            task.checked = checked;
            task
        };
        Document {
            tasks: vec![
                task(1, "Welcome to your todo app!", false, "Work"),
                task(2, "Press 'a' to add a new task", false, "Work"),
                task(3, "Press space to toggle completion", true, "Personal"),
                task(4, "Use arrow keys to navigate", false, "Personal"),
            ],
            next_id: 5,
        }
    }

    /// Repair what a hand-edited or older file may get wrong: empty tags are
    /// dropped, `next_id` is raised above every existing ID, and a repeated
    /// ID is replaced by a fresh one on every copy after the first.
    pub fn normalized(mut self) -> Self {
        for task in &mut self.tasks {
            task.tags.retain(|tag| !tag.trim().is_empty());
        }
        let floor = self.tasks.iter().map(|t| t.id.0).max().unwrap_or(0) + 1;
        if self.next_id < floor {
            self.next_id = floor;
        }

        let mut seen = HashSet::new();
        for task in &mut self.tasks {
            if !seen.insert(task.id) {
                let fresh = TaskId(self.next_id);
                warn!(duplicate = %task.id, %fresh, "duplicate task id in document");
                task.id = fresh;
                self.next_id += 1;
            }
        }
        self
    }
}
