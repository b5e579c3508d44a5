//! Canonical task entity.

use super::TaskId;
use serde::{Deserialize, Serialize};

/// Text given to tasks added from the board.
pub const NEW_TASK_TEXT: &str = "New task";

/// Atomic unit of work within a task column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    text: String,
    completed: bool,
}

impl Task {
    /// Creates a task.
    #[must_use]
    pub fn new(id: TaskId, text: impl Into<String>, completed: bool) -> Self {
        Self {
            id,
            text: text.into(),
            completed,
        }
    }

    /// Creates an incomplete placeholder task with a fresh identifier.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(TaskId::generate(), NEW_TASK_TEXT, false)
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task description.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the task is done.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns a copy with new text.
    ///
    /// The text is trimmed; blank input keeps the previous text so a task
    /// never loses its description through an empty edit.
    #[must_use]
    pub fn with_text(self, text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self;
        }
        Self {
            text: trimmed.to_owned(),
            ..self
        }
    }

    /// Returns a copy with the completion flag flipped.
    #[must_use]
    pub fn toggled(self) -> Self {
        Self {
            completed: !self.completed,
            ..self
        }
    }

    /// Returns a copy with the given identifier.
    #[must_use]
    pub(crate) fn with_id(self, id: TaskId) -> Self {
        Self { id, ..self }
    }
}
