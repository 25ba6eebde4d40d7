//! In-memory, insertion-ordered task collection.
//!
//! The store lives for one session and is never written anywhere. Form
//! entries append; a JSON import replaces everything at once.

use super::{default_task_id, parse_task_list, Task, TaskForm};
use crate::error::{CoreError, ValidationError};

#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Ordered read-only view, in submission order.
    pub fn snapshot(&self) -> &[Task] {
        &self.tasks
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append a task built from the form, with id `T<new length>`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a blank title; the store is left
    /// unchanged.
    pub fn add_from_form(&mut self, form: &TaskForm) -> Result<&Task, ValidationError> {
        let task = form.into_task(default_task_id(self.tasks.len() + 1))?;
        tracing::debug!(id = ?task.id(), total = self.tasks.len() + 1, "task added");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Replace the whole collection with the tasks in `text`.
    ///
    /// Returns the new task count.
    ///
    /// # Errors
    ///
    /// Parse and shape errors leave the current tasks in place.
    pub fn load_from_json(&mut self, text: &str) -> Result<usize, CoreError> {
        let tasks = parse_task_list(text)?;
        self.replace(tasks);
        Ok(self.tasks.len())
    }

    pub fn replace(&mut self, tasks: Vec<Task>) {
        tracing::debug!(previous = self.tasks.len(), loaded = tasks.len(), "task store replaced");
        self.tasks = tasks;
    }

    pub fn clear(&mut self) {
        tracing::debug!(cleared = self.tasks.len(), "task store cleared");
        self.tasks.clear();
    }
}
