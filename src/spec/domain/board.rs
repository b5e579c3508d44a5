//! The five-column task board of a specification.

use super::{Task, TaskColumn, TaskId};
use serde::{Deserialize, Serialize};

/// Ordered task lists for each of the five fixed columns.
///
/// Every column always exists; a column with no work is an empty list.
/// Editing operations never modify a board in place. They return a new board
/// so a snapshot handed out earlier keeps its contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBoard {
    #[serde(default)]
    frontend: Vec<Task>,
    #[serde(default)]
    backend: Vec<Task>,
    #[serde(default)]
    database: Vec<Task>,
    #[serde(default)]
    testing: Vec<Task>,
    #[serde(default)]
    devops: Vec<Task>,
}

impl TaskBoard {
    /// Creates a board with five empty columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tasks of a column in board order.
    #[must_use]
    pub fn column(&self, column: TaskColumn) -> &[Task] {
        match column {
            TaskColumn::Frontend => &self.frontend,
            TaskColumn::Backend => &self.backend,
            TaskColumn::Database => &self.database,
            TaskColumn::Testing => &self.testing,
            TaskColumn::DevOps => &self.devops,
        }
    }

    const fn column_mut(&mut self, column: TaskColumn) -> &mut Vec<Task> {
        match column {
            TaskColumn::Frontend => &mut self.frontend,
            TaskColumn::Backend => &mut self.backend,
            TaskColumn::Database => &mut self.database,
            TaskColumn::Testing => &mut self.testing,
            TaskColumn::DevOps => &mut self.devops,
        }
    }

    /// Iterates over all columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = (TaskColumn, &[Task])> {
        TaskColumn::ALL
            .into_iter()
            .map(move |column| (column, self.column(column)))
    }

    /// Returns the number of tasks across all columns.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.columns().map(|(_, tasks)| tasks.len()).sum()
    }

    /// Finds a task by column and identifier.
    #[must_use]
    pub fn find(&self, column: TaskColumn, task_id: &TaskId) -> Option<&Task> {
        self.column(column).iter().find(|task| task.id() == task_id)
    }

    /// Returns a board with the column replaced by `tasks`.
    #[must_use]
    pub fn with_column(mut self, column: TaskColumn, tasks: Vec<Task>) -> Self {
        *self.column_mut(column) = tasks;
        self
    }

    /// Returns a board with the matching task replaced by `updater`'s result.
    ///
    /// Returns `None` when the column holds no task with that identifier.
    #[must_use]
    pub fn updating(
        &self,
        column: TaskColumn,
        task_id: &TaskId,
        updater: impl FnOnce(Task) -> Task,
    ) -> Option<Self> {
        let position = self
            .column(column)
            .iter()
            .position(|task| task.id() == task_id)?;
        let mut board = self.clone();
        let tasks = board.column_mut(column);
        let current = tasks.remove(position);
        tasks.insert(position, updater(current));
        Some(board)
    }

    /// Returns a board with `task` appended to the end of the column.
    #[must_use]
    pub fn appending(&self, column: TaskColumn, task: Task) -> Self {
        let mut board = self.clone();
        board.column_mut(column).push(task);
        board
    }

    /// Returns a board without the matching task.
    ///
    /// Returns `None` when the column holds no task with that identifier.
    #[must_use]
    pub fn removing(&self, column: TaskColumn, task_id: &TaskId) -> Option<Self> {
        self.find(column, task_id)?;
        let mut board = self.clone();
        board.column_mut(column).retain(|task| task.id() != task_id);
        Some(board)
    }

    /// Returns a board with the task at `source_index` of `source` spliced
    /// into `destination` at `destination_index`.
    ///
    /// The destination index is interpreted against the destination list
    /// after the task has been removed, so a same-column call behaves as a
    /// remove-then-insert. Returns `None` when either index is out of
    /// bounds. A moved task whose identifier already exists in the
    /// destination column is given a fresh identifier.
    #[must_use]
    pub fn moving(
        &self,
        source: TaskColumn,
        destination: TaskColumn,
        source_index: usize,
        destination_index: usize,
    ) -> Option<Self> {
        if source_index >= self.column(source).len() {
            return None;
        }
        let mut board = self.clone();
        let taken = board.column_mut(source).remove(source_index);
        let target = board.column_mut(destination);
        if destination_index > target.len() {
            return None;
        }
        // Positional ids repeat across columns; keep them unique per column.
        let moved = if target.iter().any(|task| task.id() == taken.id()) {
            taken.with_id(TaskId::generate())
        } else {
            taken
        };
        target.insert(destination_index, moved);
        Some(board)
    }
}
