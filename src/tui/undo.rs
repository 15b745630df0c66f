use crate::model::task::Task;

/// Default maximum number of snapshots kept
pub const DEFAULT_UNDO_LIMIT: usize = 50;

/// Bounded stack of pre-mutation snapshots of the task sequence.
///
/// Each entry is an independent copy. Pushing past the limit evicts the
/// oldest entry. There is no redo: popped entries are gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoHistory {
    entries: Vec<Vec<Task>>,
    limit: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl UndoHistory {
    /// History holding at most `limit` snapshots (at least one)
    pub fn new(limit: usize) -> Self {
        UndoHistory {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, snapshot: Vec<Task>) {
        self.entries.push(snapshot);
        if self.entries.len() > self.limit {
            self.entries.drain(..self.entries.len() - self.limit);
        }
    }

    /// Take the most recent snapshot
    pub fn pop(&mut self) -> Option<Vec<Task>> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
