//! In-memory gateway for store tests and offline use.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::spec::{
    domain::{FeatureRequest, HealthReport, RawSpecification, SavePayload, SpecId, Specification},
    ports::{GatewayError, GatewayResult, SpecGateway},
};

/// Gateway operation selector used to script failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOperation {
    /// [`SpecGateway::generate`].
    Generate,
    /// [`SpecGateway::save`].
    Save,
    /// [`SpecGateway::list_recent`].
    ListRecent,
    /// [`SpecGateway::fetch_by_id`].
    FetchById,
    /// [`SpecGateway::health_check`].
    HealthCheck,
}

/// Thread-safe in-memory gateway.
///
/// Generation echoes the form input together with a scripted task payload,
/// saving assigns a random identifier and the current time, and any
/// operation can be made to fail with a chosen message.
#[derive(Debug, Clone, Default)]
pub struct InMemorySpecGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    generated: Option<RawSpecification>,
    generated_tasks: Option<Value>,
    persisted_tasks: Option<Value>,
    stored: Vec<RawSpecification>,
    failures: HashMap<GatewayOperation, String>,
    health: HealthReport,
    save_calls: usize,
}

fn lock_error(err: impl std::fmt::Display) -> GatewayError {
    GatewayError::transport(std::io::Error::other(err.to_string()))
}

impl InMemorySpecGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write_state<T>(&self, f: impl FnOnce(&mut InMemoryGatewayState) -> T) -> GatewayResult<T> {
        let mut state = self.state.write().map_err(lock_error)?;
        Ok(f(&mut state))
    }

    fn check_failure(state: &InMemoryGatewayState, operation: GatewayOperation) -> GatewayResult<()> {
        match state.failures.get(&operation) {
            Some(message) => Err(GatewayError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }

    /// Sets the task payload attached to generated drafts.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn set_generated_tasks(&self, tasks: Value) -> GatewayResult<()> {
        self.write_state(|state| state.generated_tasks = Some(tasks))
    }

    /// Replaces generation output with a fixed payload.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn set_generated(&self, raw: RawSpecification) -> GatewayResult<()> {
        self.write_state(|state| state.generated = Some(raw))
    }

    /// Makes saved records carry `tasks` instead of the submitted tasks,
    /// imitating a service that reshapes what it echoes back.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn set_persisted_tasks(&self, tasks: Value) -> GatewayResult<()> {
        self.write_state(|state| state.persisted_tasks = Some(tasks))
    }

    /// Adds a record to the store as if it had been saved earlier.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn insert(&self, raw: RawSpecification) -> GatewayResult<()> {
        self.write_state(|state| state.stored.push(raw))
    }

    /// Makes `operation` fail with `message` until cleared.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn fail(&self, operation: GatewayOperation, message: impl Into<String>) -> GatewayResult<()> {
        let message = message.into();
        self.write_state(|state| {
            state.failures.insert(operation, message);
        })
    }

    /// Removes a scripted failure.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn recover(&self, operation: GatewayOperation) -> GatewayResult<()> {
        self.write_state(|state| {
            state.failures.remove(&operation);
        })
    }

    /// Sets the report returned by health checks.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn set_health(&self, report: HealthReport) -> GatewayResult<()> {
        self.write_state(|state| state.health = report)
    }

    /// Returns how many times `save` succeeded.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn save_calls(&self) -> GatewayResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.save_calls)
    }
}

#[async_trait]
impl SpecGateway for InMemorySpecGateway {
    async fn generate(&self, request: &FeatureRequest) -> GatewayResult<RawSpecification> {
        let state = self.state.read().map_err(lock_error)?;
        Self::check_failure(&state, GatewayOperation::Generate)?;
        if let Some(raw) = &state.generated {
            return Ok(raw.clone());
        }
        let mut raw: RawSpecification = serde_json::to_value(request)
            .and_then(serde_json::from_value)
            .map_err(GatewayError::decode)?;
        raw.tasks.clone_from(&state.generated_tasks);
        Ok(raw)
    }

    async fn save(&self, spec: &Specification) -> GatewayResult<RawSpecification> {
        let mut state = self.state.write().map_err(lock_error)?;
        Self::check_failure(&state, GatewayOperation::Save)?;
        let mut raw: RawSpecification = serde_json::to_value(SavePayload::from(spec))
            .and_then(serde_json::from_value)
            .map_err(GatewayError::decode)?;
        raw.id = Some(Value::String(Uuid::new_v4().to_string()));
        raw.created_at = Some(Value::String(Utc::now().to_rfc3339()));
        if let Some(tasks) = &state.persisted_tasks {
            raw.tasks = Some(tasks.clone());
        }
        state.stored.push(raw.clone());
        state.save_calls += 1;
        Ok(raw)
    }

    async fn list_recent(&self) -> GatewayResult<Vec<RawSpecification>> {
        let state = self.state.read().map_err(lock_error)?;
        Self::check_failure(&state, GatewayOperation::ListRecent)?;
        Ok(state.stored.iter().rev().cloned().collect())
    }

    async fn fetch_by_id(&self, id: &SpecId) -> GatewayResult<Option<RawSpecification>> {
        let state = self.state.read().map_err(lock_error)?;
        Self::check_failure(&state, GatewayOperation::FetchById)?;
        Ok(state
            .stored
            .iter()
            .find(|raw| Specification::from_raw(raw).id() == Some(id))
            .cloned())
    }

    async fn health_check(&self) -> GatewayResult<HealthReport> {
        let state = self.state.read().map_err(lock_error)?;
        Self::check_failure(&state, GatewayOperation::HealthCheck)?;
        Ok(state.health.clone())
    }
}
