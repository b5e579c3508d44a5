//! Shared world state for specification workflow scenarios.

use std::sync::Arc;

use eyre::eyre;
use mockable::DefaultClock;
use rstest::fixture;
use specforge::spec::{
    adapters::memory::InMemorySpecGateway,
    domain::{ExportDocument, Specification, Task, TaskColumn},
    services::{SpecStore, SpecStoreError},
};

/// Store type used by the BDD world.
pub type TestSpecStore = SpecStore<InMemorySpecGateway, DefaultClock>;

/// Scenario world for specification workflow tests.
pub struct SpecWorld {
    pub gateway: InMemorySpecGateway,
    pub store: TestSpecStore,
    pub snapshot: Option<Arc<Specification>>,
    pub standalone: Option<Specification>,
    pub last_create_result: Option<Result<Arc<Specification>, SpecStoreError>>,
    pub last_load_result: Option<Result<Arc<Specification>, SpecStoreError>>,
    pub export: Option<ExportDocument>,
}

impl SpecWorld {
    /// Creates a world backed by a fresh in-memory gateway.
    #[must_use]
    pub fn new() -> Self {
        let gateway = InMemorySpecGateway::new();
        let store = SpecStore::new(Arc::new(gateway.clone()), Arc::new(DefaultClock));
        Self {
            gateway,
            store,
            snapshot: None,
            standalone: None,
            last_create_result: None,
            last_load_result: None,
            export: None,
        }
    }

    /// Returns the tasks of `column` on the open specification.
    pub fn column(&self, column: &str) -> Result<Vec<Task>, eyre::Report> {
        let parsed = TaskColumn::try_from(column).map_err(|err| eyre!("{err}"))?;
        let spec = self
            .store
            .current()
            .ok_or_else(|| eyre!("no specification is open"))?;
        Ok(spec.tasks().column(parsed).to_vec())
    }
}

impl Default for SpecWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SpecWorld {
    SpecWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated step argument into trimmed items.
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
