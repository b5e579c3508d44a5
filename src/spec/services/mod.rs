//! Application services: the specification store, the task board engine
//! and health polling.

mod board;
mod health;
mod store;

#[cfg(test)]
pub use board::MockTaskBoardStore;
pub use board::{
    BoardCommand, DragLocation, DragResult, TaskBoardEngine, TaskBoardStore, plan_drop,
};
pub use health::{HealthPoller, HealthState};
pub use store::{PersistenceAction, SpecStore, SpecStoreError, SpecStoreResult};
