use regex::Regex;

use crate::model::task::Task;

// ---------------------------------------------------------------------------
// Projections
// ---------------------------------------------------------------------------

/// Tasks owned by `context`, in store order
pub fn tasks_in_context<'a>(tasks: &'a [Task], context: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.context == context).collect()
}

/// Tasks whose text contains `query`, ignoring case, across every context,
/// in store order
pub fn search_tasks<'a>(tasks: &'a [Task], query: &str) -> Vec<&'a Task> {
    let needle = query.to_lowercase();
    tasks
        .iter()
        .filter(|t| t.text.to_lowercase().contains(&needle))
        .collect()
}

/// Case-insensitive literal pattern for highlighting `query` in rendered text
pub fn highlight_pattern(query: &str) -> Option<Regex> {
    if query.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(query))).ok()
}

// ---------------------------------------------------------------------------
// Completion counts
// ---------------------------------------------------------------------------

/// Completion counts for one context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextStats {
    pub name: String,
    pub done: usize,
    pub total: usize,
}

impl ContextStats {
    pub fn percent(&self) -> f64 {
        percent(self.done, self.total)
    }
}

/// Global and per-context completion counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionStats {
    pub total: usize,
    pub done: usize,
    pub per_context: Vec<ContextStats>,
}

impl CompletionStats {
    pub fn percent(&self) -> f64 {
        percent(self.done, self.total)
    }
}

fn percent(done: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        done as f64 / total as f64 * 100.0
    }
}

/// Count completed tasks overall and for each of `contexts`, in that order
pub fn completion_stats<'a>(
    tasks: &[Task],
    contexts: impl IntoIterator<Item = &'a str>,
) -> CompletionStats {
    let per_context = contexts
        .into_iter()
        .map(|name| {
            let owned = tasks_in_context(tasks, name);
            ContextStats {
                name: name.to_string(),
                done: owned.iter().filter(|t| t.checked).count(),
                total: owned.len(),
            }
        })
        .collect();

    CompletionStats {
        total: tasks.len(),
        done: tasks.iter().filter(|t| t.checked).count(),
        per_context,
    }
}
