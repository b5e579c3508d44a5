//! Owned state container for the open specification and the recent cache.

use crate::spec::{
    domain::{
        FeatureRequest, RecentSpecs, SpecId, Specification, Task, TaskBoard, TaskColumn, TaskId,
    },
    ports::{GatewayError, SpecGateway},
};
use mockable::Clock;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Remote persistence step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceAction {
    /// Saving a generated draft.
    Save,
    /// Fetching a stored specification.
    Fetch,
    /// Listing recent specifications.
    List,
}

impl fmt::Display for PersistenceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Save => "save",
            Self::Fetch => "fetch",
            Self::List => "list",
        })
    }
}

/// Store-level errors for specification operations.
#[derive(Debug, Error)]
pub enum SpecStoreError {
    /// The generation service failed or returned unusable data.
    #[error("specification generation failed: {0}")]
    Generation(#[source] GatewayError),

    /// Saving, fetching or listing failed at the remote store.
    #[error("failed to {action} specifications: {source}")]
    Persistence {
        /// Failed step.
        action: PersistenceAction,
        /// Gateway failure.
        #[source]
        source: GatewayError,
    },

    /// Neither the remote store nor the recent cache knows the identifier.
    #[error("specification {0} not found")]
    NotFound(SpecId),
}

impl SpecStoreError {
    const fn persistence(action: PersistenceAction, source: GatewayError) -> Self {
        Self::Persistence { action, source }
    }

    /// Returns the message shown to the user for this failure.
    ///
    /// A message supplied by the service takes precedence over the generic
    /// wording.
    #[must_use]
    pub fn user_message(&self) -> String {
        let (source, fallback) = match self {
            Self::Generation(source) => (Some(source), "Failed to generate spec"),
            Self::Persistence { action, source } => (
                Some(source),
                match action {
                    PersistenceAction::Save => "Failed to save spec",
                    PersistenceAction::Fetch => "Failed to load spec",
                    PersistenceAction::List => "Failed to load recent specs",
                },
            ),
            Self::NotFound(_) => (None, "Spec not found"),
        };
        source
            .and_then(GatewayError::service_message)
            .unwrap_or(fallback)
            .to_owned()
    }
}

/// Result type for store operations.
pub type SpecStoreResult<T> = Result<T, SpecStoreError>;

#[derive(Debug, Default)]
struct StoreState {
    current: Option<Arc<Specification>>,
    recent: RecentSpecs,
    last_error: Option<String>,
    in_flight: usize,
}

/// Marks a remote round trip as in flight until dropped.
struct InFlight {
    state: Arc<RwLock<StoreState>>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.in_flight = state.in_flight.saturating_sub(1);
    }
}

/// Authoritative holder of the open specification and recent cache.
///
/// Readers get `Arc` snapshots; every mutation publishes a new
/// [`Specification`] instead of editing the shared one. Locks are never
/// held across a gateway call, so published state does not change while a
/// request is outstanding. Clones share the same state.
pub struct SpecStore<G, C>
where
    G: SpecGateway,
    C: Clock + Send + Sync,
{
    gateway: Arc<G>,
    clock: Arc<C>,
    state: Arc<RwLock<StoreState>>,
}

impl<G, C> Clone for SpecStore<G, C>
where
    G: SpecGateway,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            clock: Arc::clone(&self.clock),
            state: Arc::clone(&self.state),
        }
    }
}

impl<G, C> SpecStore<G, C>
where
    G: SpecGateway,
    C: Clock + Send + Sync,
{
    /// Creates a store with an empty cache of the default size.
    #[must_use]
    pub fn new(gateway: Arc<G>, clock: Arc<C>) -> Self {
        Self {
            gateway,
            clock,
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }

    /// Sets the recent-cache size, discarding cached entries.
    #[must_use]
    pub fn with_recent_limit(self, limit: usize) -> Self {
        self.write().recent = RecentSpecs::with_limit(limit);
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_request(&self, clear_error: bool) -> InFlight {
        let mut state = self.write();
        state.in_flight += 1;
        if clear_error {
            state.last_error = None;
        }
        InFlight {
            state: Arc::clone(&self.state),
        }
    }

    fn fail(&self, err: SpecStoreError) -> SpecStoreError {
        warn!(error = %err, "specification request failed");
        self.write().last_error = Some(err.user_message());
        err
    }

    /// Returns a snapshot of the open specification.
    #[must_use]
    pub fn current(&self) -> Option<Arc<Specification>> {
        self.read().current.clone()
    }

    /// Returns a snapshot of the recent cache.
    #[must_use]
    pub fn recent(&self) -> RecentSpecs {
        self.read().recent.clone()
    }

    /// Returns the message of the last failed request, if not dismissed.
    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.read().last_error.clone()
    }

    /// Clears the last-error slot.
    pub fn dismiss_error(&self) {
        self.write().last_error = None;
    }

    /// Returns whether a remote request is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().in_flight > 0
    }

    /// Generates, saves and opens a new specification.
    ///
    /// The saved specification becomes current and is put at the front of
    /// the recent cache. Concurrent calls are not coalesced; the last one to
    /// finish stays open.
    ///
    /// # Errors
    ///
    /// Returns [`SpecStoreError::Generation`] when generation fails and
    /// [`SpecStoreError::Persistence`] when saving fails. State is left
    /// unchanged in both cases and the message is kept in
    /// [`Self::last_error`].
    pub async fn create_specification(
        &self,
        request: FeatureRequest,
    ) -> SpecStoreResult<Arc<Specification>> {
        let _in_flight = self.begin_request(true);
        info!(title = request.title(), "generating specification");

        let generated = match self.gateway.generate(&request).await {
            Ok(raw) => raw.or_request(&request),
            Err(err) => return Err(self.fail(SpecStoreError::Generation(err))),
        };
        let draft = Specification::from_raw(&generated);

        let saved = match self.gateway.save(&draft).await {
            Ok(raw) => raw,
            Err(err) => {
                return Err(self.fail(SpecStoreError::persistence(PersistenceAction::Save, err)));
            }
        };
        let spec = Arc::new(Specification::from_raw(&saved).ensure_created_at(&*self.clock));

        let mut state = self.write();
        state.current = Some(Arc::clone(&spec));
        state.recent = state.recent.remember(Arc::clone(&spec));
        info!(id = ?spec.id(), "specification created");
        Ok(spec)
    }

    /// Opens a stored specification.
    ///
    /// The remote store is asked first. When it has no match or cannot be
    /// reached, the recent cache is searched.
    ///
    /// # Errors
    ///
    /// Returns [`SpecStoreError::NotFound`] when the remote store reports no
    /// match and the cache has none either, or
    /// [`SpecStoreError::Persistence`] when the remote store failed and the
    /// cache has no match. The open specification is left unchanged.
    pub async fn load_specification(&self, id: &SpecId) -> SpecStoreResult<Arc<Specification>> {
        let _in_flight = self.begin_request(true);
        debug!(%id, "loading specification");

        let loaded = match self.gateway.fetch_by_id(id).await {
            Ok(Some(raw)) => {
                let spec = Specification::from_raw(&raw);
                Ok(Arc::new(if spec.id().is_some() {
                    spec
                } else {
                    spec.with_id(id.clone())
                }))
            }
            Ok(None) => self
                .cached(id)
                .ok_or_else(|| SpecStoreError::NotFound(id.clone())),
            Err(err) => {
                warn!(%id, error = %err, "remote fetch failed, trying recent cache");
                self.cached(id)
                    .ok_or_else(|| SpecStoreError::persistence(PersistenceAction::Fetch, err))
            }
        };

        let spec = loaded.map_err(|err| self.fail(err))?;
        self.write().current = Some(Arc::clone(&spec));
        Ok(spec)
    }

    fn cached(&self, id: &SpecId) -> Option<Arc<Specification>> {
        let found = self.read().recent.find(id);
        if found.is_some() {
            debug!(%id, "serving specification from recent cache");
        }
        found
    }

    /// Replaces the recent cache with the remote store's listing.
    ///
    /// # Errors
    ///
    /// Returns [`SpecStoreError::Persistence`] when listing fails. The
    /// existing cache is kept.
    pub async fn refresh_recent(&self) -> SpecStoreResult<RecentSpecs> {
        let _in_flight = self.begin_request(false);
        let listed = self.gateway.list_recent().await.map_err(|err| {
            warn!(error = %err, "listing recent specifications failed, keeping cache");
            SpecStoreError::persistence(PersistenceAction::List, err)
        })?;
        let specs = listed
            .iter()
            .map(|raw| Arc::new(Specification::from_raw(raw)));

        let mut state = self.write();
        state.recent = state.recent.replaced_with(specs);
        debug!(count = state.recent.len(), "recent specifications refreshed");
        Ok(state.recent.clone())
    }

    /// Publishes a specification whose board is `edit`'s result.
    ///
    /// Returns `false` without publishing when nothing is open or `edit`
    /// declines.
    fn edit_board(&self, edit: impl FnOnce(&TaskBoard) -> Option<TaskBoard>) -> bool {
        let mut state = self.write();
        let Some(current) = state.current.as_ref() else {
            return false;
        };
        let Some(board) = edit(current.tasks()) else {
            return false;
        };
        let updated = Specification::clone(current).with_tasks(board);
        state.current = Some(Arc::new(updated));
        true
    }

    /// Replaces a task with `updater`'s result.
    ///
    /// Does nothing when no specification is open or the task is gone, which
    /// happens when an edit races a delete.
    pub fn mutate_task(
        &self,
        column: TaskColumn,
        task_id: &TaskId,
        updater: impl FnOnce(Task) -> Task,
    ) {
        if !self.edit_board(|board| board.updating(column, task_id, updater)) {
            debug!(%column, %task_id, "task edit ignored");
        }
    }

    /// Sets a task's text; blank text keeps the previous value.
    pub fn edit_task_text(&self, column: TaskColumn, task_id: &TaskId, text: &str) {
        self.mutate_task(column, task_id, |task| task.with_text(text));
    }

    /// Flips a task's completion flag.
    pub fn toggle_task_completed(&self, column: TaskColumn, task_id: &TaskId) {
        self.mutate_task(column, task_id, Task::toggled);
    }

    /// Appends a placeholder task to a column.
    ///
    /// Returns the new task's identifier, or `None` when no specification is
    /// open.
    #[must_use]
    pub fn add_task(&self, column: TaskColumn) -> Option<TaskId> {
        let task = Task::placeholder();
        let task_id = task.id().clone();
        self.edit_board(|board| Some(board.appending(column, task)))
            .then_some(task_id)
    }

    /// Removes a task; does nothing when it is absent.
    pub fn delete_task(&self, column: TaskColumn, task_id: &TaskId) {
        self.edit_board(|board| board.removing(column, task_id));
    }

    /// Replaces a column with a caller-supplied ordering.
    ///
    /// `tasks` must be a permutation of the column's current tasks. This is
    /// not checked; the board engine is the only caller and guarantees it.
    pub fn reorder_column(&self, column: TaskColumn, tasks: Vec<Task>) {
        self.edit_board(|board| Some(board.clone().with_column(column, tasks)));
    }

    /// Moves the task at `source_index` of `source` to `destination_index`
    /// of `destination`.
    ///
    /// Out-of-bounds indices make the call a no-op.
    pub fn move_task(
        &self,
        source: TaskColumn,
        destination: TaskColumn,
        source_index: usize,
        destination_index: usize,
    ) {
        let moved = self.edit_board(|board| {
            board.moving(source, destination, source_index, destination_index)
        });
        if !moved {
            debug!(%source, %destination, source_index, destination_index, "task move ignored");
        }
    }

    /// Closes the open specification, keeping the recent cache.
    pub fn clear_current(&self) {
        self.write().current = None;
    }
}
