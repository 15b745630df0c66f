use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexSet;
use tracing::debug;

use crate::model::document::Document;
use crate::model::task::{DueDate, Priority, Task, TaskId, ValidationError, validate_text};

/// Context created when the task list is empty and no context survives a rebuild
pub const DEFAULT_CONTEXT: &str = "Work";

/// Coarse classification of recoverable failures, shown to the user as a
/// status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input: empty text or tag, malformed date, move past a list edge
    ValidationRejected,
    /// Duplicate context name
    NameConflict,
    /// The operation's precondition does not hold (last context, no tags, ...)
    PreconditionUnmet,
    /// The targeted task or context is gone
    NotFound,
}

/// Direction of a manual reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Error type for store mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Context name cannot be empty")]
    EmptyContextName,
    #[error("Context '{0}' already exists")]
    ContextExists(String),
    #[error("Cannot delete the only context")]
    LastContext,
    #[error("Context not found: {0}")]
    ContextNotFound(String),
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),
    #[error("Cannot move task further {0}")]
    AtBoundary(Direction),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Invalid(_) | StoreError::EmptyContextName | StoreError::AtBoundary(_) => {
                ErrorKind::ValidationRejected
            }
            StoreError::ContextExists(_) => ErrorKind::NameConflict,
            StoreError::LastContext => ErrorKind::PreconditionUnmet,
            StoreError::ContextNotFound(_) | StoreError::TaskNotFound(_) => ErrorKind::NotFound,
        }
    }
}

/// Owner of the ordered task sequence and the context registry.
///
/// Tasks are looked up by identity with a linear scan; lists are small.
/// Every method leaves the store consistent: each task's context is in the
/// registry and `current_context` names a registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    contexts: IndexSet<String>,
    current_context: String,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        TaskStore::from_document(Document {
            tasks: Vec::new(),
            next_id: 1,
        })
    }
}

impl TaskStore {
    pub fn from_document(doc: Document) -> Self {
        let doc = doc.normalized();
        let mut store = TaskStore {
            tasks: doc.tasks,
            contexts: IndexSet::new(),
            current_context: String::new(),
            next_id: doc.next_id,
        };
        store.rebuild_contexts();
        store
    }

    pub fn to_document(&self) -> Document {
        Document {
            tasks: self.tasks.clone(),
            next_id: self.next_id,
        }
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// All tasks in display (global sequence) order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Context names in display order
    pub fn contexts(&self) -> &IndexSet<String> {
        &self.contexts
    }

    pub fn current_context(&self) -> &str {
        &self.current_context
    }

    pub fn has_context(&self, name: &str) -> bool {
        self.contexts.contains(name)
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    fn position(&self, id: TaskId) -> Result<usize, StoreError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))
    }

    fn task_mut(&mut self, id: TaskId) -> Result<&mut Task, StoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))
    }

    // -----------------------------------------------------------------------
    // Task mutations
    // -----------------------------------------------------------------------

    /// Append a task to the end of the global sequence and return its new ID
    pub fn add_task(&mut self, text: &str, context: &str) -> Result<TaskId, StoreError> {
        let text = validate_text(text)?;
        if !self.contexts.contains(context) {
            return Err(StoreError::ContextNotFound(context.to_string()));
        }

        let max_existing = self.tasks.iter().map(|t| t.id.0).max().unwrap_or(0);
        let id = TaskId(self.next_id.max(max_existing + 1));
        self.next_id = id.0 + 1;
        self.tasks.push(Task::new(id, text, context));
        debug!(%id, context, "task added");
        Ok(id)
    }

    pub fn edit_task_text(&mut self, id: TaskId, text: &str) -> Result<(), StoreError> {
        let text = validate_text(text)?.to_string();
        self.task_mut(id)?.text = text;
        Ok(())
    }

    /// Flip the completion flag; returns the new value
    pub fn toggle_checked(&mut self, id: TaskId) -> Result<bool, StoreError> {
        let task = self.task_mut(id)?;
        task.checked = !task.checked;
        Ok(task.checked)
    }

    /// Advance the priority one step; returns the new value
    pub fn cycle_priority(&mut self, id: TaskId) -> Result<Priority, StoreError> {
        let task = self.task_mut(id)?;
        task.priority = task.priority.next();
        Ok(task.priority)
    }

    /// Add a tag; returns false when the task already had it
    pub fn add_tag(&mut self, id: TaskId, tag: &str) -> Result<bool, StoreError> {
        Ok(self.task_mut(id)?.add_tag(tag)?)
    }

    pub fn remove_tags(&mut self, id: TaskId, indices: &[usize]) -> Result<(), StoreError> {
        self.task_mut(id)?.remove_tags(indices);
        Ok(())
    }

    /// Set or clear (`None`) the due date
    pub fn set_due_date(&mut self, id: TaskId, date: Option<DueDate>) -> Result<(), StoreError> {
        self.task_mut(id)?.due_date = date;
        Ok(())
    }

    /// Remove a task, keeping the relative order of the rest
    pub fn delete_task(&mut self, id: TaskId) -> Result<Task, StoreError> {
        let idx = self.position(id)?;
        Ok(self.tasks.remove(idx))
    }

    /// Swap a task with its nearest neighbour in the same context.
    /// Returns the ID of the task it traded places with.
    pub fn move_task(&mut self, id: TaskId, direction: Direction) -> Result<TaskId, StoreError> {
        let idx = self.position(id)?;
        let context = &self.tasks[idx].context;
        let neighbour = match direction {
            Direction::Up => (0..idx).rev().find(|&j| self.tasks[j].context == *context),
            Direction::Down => (idx + 1..self.tasks.len()).find(|&j| self.tasks[j].context == *context),
        };
        let other = neighbour.ok_or(StoreError::AtBoundary(direction))?;
        self.tasks.swap(idx, other);
        Ok(self.tasks[idx].id)
    }

    /// Exchange the global positions of two tasks
    pub fn swap_tasks(&mut self, a: TaskId, b: TaskId) -> Result<(), StoreError> {
        let first = self.position(a)?;
        let second = self.position(b)?;
        self.tasks.swap(first, second);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Contexts
    // -----------------------------------------------------------------------

    /// Make an existing context current
    pub fn set_current_context(&mut self, name: &str) -> Result<(), StoreError> {
        if !self.contexts.contains(name) {
            return Err(StoreError::ContextNotFound(name.to_string()));
        }
        self.current_context = name.to_string();
        Ok(())
    }

    /// Step the current context forward (`step > 0`) or backward, wrapping
    pub fn cycle_context(&mut self, step: isize) {
        let len = self.contexts.len();
        if len == 0 {
            return;
        }
        let current = self.contexts.get_index_of(&self.current_context).unwrap_or(0) as isize;
        let next = (current + step).rem_euclid(len as isize) as usize;
        if let Some(name) = self.contexts.get_index(next) {
            self.current_context = name.clone();
        }
    }

    /// Register a new context and make it current
    pub fn add_context(&mut self, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyContextName);
        }
        if self.contexts.contains(name) {
            return Err(StoreError::ContextExists(name.to_string()));
        }
        self.contexts.insert(name.to_string());
        self.current_context = name.to_string();
        debug!(context = name, "context added");
        Ok(())
    }

    /// Rename a context in place, carrying every task that referenced it.
    /// Renaming to the same name is a no-op.
    pub fn rename_context(&mut self, old: &str, new: &str) -> Result<(), StoreError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(StoreError::EmptyContextName);
        }
        if !self.contexts.contains(old) {
            return Err(StoreError::ContextNotFound(old.to_string()));
        }
        if new == old {
            return Ok(());
        }
        if self.contexts.contains(new) {
            return Err(StoreError::ContextExists(new.to_string()));
        }

        self.contexts = self
            .contexts
            .iter()
            .map(|c| if c == old { new.to_string() } else { c.clone() })
            .collect();
        for task in self.tasks.iter_mut().filter(|t| t.context == old) {
            task.context = new.to_string();
        }
        if self.current_context == old {
            self.current_context = new.to_string();
        }
        debug!(old, new, "context renamed");
        Ok(())
    }

    /// Delete a context and every task in it. The first remaining context
    /// becomes current. Returns the number of tasks removed.
    pub fn delete_context(&mut self, name: &str) -> Result<usize, StoreError> {
        if !self.contexts.contains(name) {
            return Err(StoreError::ContextNotFound(name.to_string()));
        }
        if self.contexts.len() <= 1 {
            return Err(StoreError::LastContext);
        }

        let before = self.tasks.len();
        self.tasks.retain(|t| t.context != name);
        self.contexts.shift_remove(name);
        if let Some(first) = self.contexts.first() {
            self.current_context = first.clone();
        }
        let removed = before - self.tasks.len();
        debug!(context = name, removed, "context deleted");
        Ok(removed)
    }

    /// Recompute the registry from the task set: deduplicated and sorted.
    /// Keeps the current context if it survives, otherwise picks the first
    /// entry, or creates the default context when there are no tasks.
    pub fn rebuild_contexts(&mut self) {
        let names: BTreeSet<&str> = self.tasks.iter().map(|t| t.context.as_str()).collect();
        self.contexts = names.into_iter().map(str::to_string).collect();

        if self.current_context.is_empty() || !self.contexts.contains(&self.current_context) {
            match self.contexts.first() {
                Some(first) => self.current_context = first.clone(),
                None => {
                    self.current_context = DEFAULT_CONTEXT.to_string();
                    self.contexts.insert(DEFAULT_CONTEXT.to_string());
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// An independent copy of the task sequence
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Replace the whole task sequence and rebuild the registry.
    /// `next_id` is left alone so restored IDs are never handed out twice.
    pub fn restore(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.rebuild_contexts();
    }
}
