//! Drag-and-drop reconciliation for the task board.

use crate::spec::{
    domain::{Task, TaskBoard, TaskColumn},
    ports::SpecGateway,
};
use mockable::Clock;

use super::SpecStore;

/// Position of a task on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragLocation {
    /// Column holding the position.
    pub column: TaskColumn,
    /// Index within the column.
    pub index: usize,
}

impl DragLocation {
    /// Creates a location.
    #[must_use]
    pub const fn new(column: TaskColumn, index: usize) -> Self {
        Self { column, index }
    }
}

/// Outcome of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragResult {
    /// Where the task was picked up.
    pub source: DragLocation,
    /// Where it was dropped; `None` when dropped outside every column.
    pub destination: Option<DragLocation>,
}

impl DragResult {
    /// Creates a drop onto `destination`.
    #[must_use]
    pub const fn dropped(source: DragLocation, destination: DragLocation) -> Self {
        Self {
            source,
            destination: Some(destination),
        }
    }

    /// Creates a drop outside the board.
    #[must_use]
    pub const fn cancelled(source: DragLocation) -> Self {
        Self {
            source,
            destination: None,
        }
    }
}

/// Store call chosen for a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    /// Replace a column with a permutation of itself.
    Reorder {
        /// Reordered column.
        column: TaskColumn,
        /// Full new ordering.
        tasks: Vec<Task>,
    },
    /// Splice a task from one column into another.
    Move {
        /// Column the task leaves.
        source: TaskColumn,
        /// Column the task joins.
        destination: TaskColumn,
        /// Index in the source column.
        source_index: usize,
        /// Index in the destination column.
        destination_index: usize,
    },
}

/// Board operations the engine needs from the store.
#[cfg_attr(test, mockall::automock)]
pub trait TaskBoardStore {
    /// Returns a snapshot of the open board, if any.
    fn board(&self) -> Option<TaskBoard>;

    /// Replaces a column with a permutation of itself.
    fn reorder_column(&self, column: TaskColumn, tasks: Vec<Task>);

    /// Moves a task between columns by index.
    fn move_task(
        &self,
        source: TaskColumn,
        destination: TaskColumn,
        source_index: usize,
        destination_index: usize,
    );
}

impl<G, C> TaskBoardStore for SpecStore<G, C>
where
    G: SpecGateway,
    C: Clock + Send + Sync,
{
    fn board(&self) -> Option<TaskBoard> {
        self.current().map(|spec| spec.tasks().clone())
    }

    fn reorder_column(&self, column: TaskColumn, tasks: Vec<Task>) {
        Self::reorder_column(self, column, tasks);
    }

    fn move_task(
        &self,
        source: TaskColumn,
        destination: TaskColumn,
        source_index: usize,
        destination_index: usize,
    ) {
        Self::move_task(self, source, destination, source_index, destination_index);
    }
}

/// Chooses the store call for a drag gesture against `board`.
///
/// Returns `None` for a drop outside the board and for a same-column drag
/// whose source index does not exist. A same-column drag removes the task
/// and reinserts it, clamping the destination to the end of the column.
/// A cross-column drag is passed through with its raw indices.
#[must_use]
pub fn plan_drop(board: &TaskBoard, drag: &DragResult) -> Option<BoardCommand> {
    let destination = drag.destination?;
    if destination.column == drag.source.column {
        reorder_within(board, drag.source, destination)
    } else {
        Some(move_between(drag.source, destination))
    }
}

fn reorder_within(
    board: &TaskBoard,
    source: DragLocation,
    destination: DragLocation,
) -> Option<BoardCommand> {
    let mut tasks = board.column(source.column).to_vec();
    if source.index >= tasks.len() {
        return None;
    }
    let moved = tasks.remove(source.index);
    let insert_at = destination.index.min(tasks.len());
    tasks.insert(insert_at, moved);
    Some(BoardCommand::Reorder {
        column: source.column,
        tasks,
    })
}

const fn move_between(source: DragLocation, destination: DragLocation) -> BoardCommand {
    BoardCommand::Move {
        source: source.column,
        destination: destination.column,
        source_index: source.index,
        destination_index: destination.index,
    }
}

/// Translates drag gestures into exactly one store call each.
#[derive(Debug, Clone)]
pub struct TaskBoardEngine<S: TaskBoardStore> {
    store: S,
}

impl<S: TaskBoardStore> TaskBoardEngine<S> {
    /// Creates an engine dispatching to `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the store the engine dispatches to.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Applies a drag gesture and returns the command that was dispatched.
    ///
    /// A drop outside the board makes no store call at all. A cross-column
    /// drop is dispatched without reading the board.
    #[must_use = "the returned command reports whether the drop changed the board"]
    pub fn handle_drop(&self, drag: &DragResult) -> Option<BoardCommand> {
        let destination = drag.destination?;
        let command = if destination.column == drag.source.column {
            reorder_within(&self.store.board()?, drag.source, destination)?
        } else {
            move_between(drag.source, destination)
        };

        match &command {
            BoardCommand::Reorder { column, tasks } => {
                self.store.reorder_column(*column, tasks.clone());
            }
            BoardCommand::Move {
                source,
                destination,
                source_index,
                destination_index,
            } => {
                self.store
                    .move_task(*source, *destination, *source_index, *destination_index);
            }
        }
        Some(command)
    }
}
