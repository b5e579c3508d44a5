//! Port to the remote generation and persistence service.

use crate::spec::domain::{FeatureRequest, HealthReport, RawSpecification, SpecId, Specification};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Contract of the external service that generates and stores
/// specifications.
///
/// Payloads are returned raw. Callers normalize them before use because the
/// service does not guarantee a canonical task shape.
#[async_trait]
pub trait SpecGateway: Send + Sync {
    /// Generates a specification draft from form input.
    async fn generate(&self, request: &FeatureRequest) -> GatewayResult<RawSpecification>;

    /// Persists a draft and returns it with an assigned identifier.
    async fn save(&self, spec: &Specification) -> GatewayResult<RawSpecification>;

    /// Lists recently stored specifications, newest first.
    async fn list_recent(&self) -> GatewayResult<Vec<RawSpecification>>;

    /// Fetches a stored specification.
    ///
    /// Returns `None` when the service has no specification with that
    /// identifier.
    async fn fetch_by_id(&self, id: &SpecId) -> GatewayResult<Option<RawSpecification>>;

    /// Reports service health.
    async fn health_check(&self) -> GatewayResult<HealthReport>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The bearer credential was missing or rejected.
    #[error("not authorized")]
    Unauthorized,

    /// The service answered with a non-success status.
    #[error("service returned status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, if any.
        message: Option<String>,
    },

    /// The service was unavailable for the requested operation.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// The request could not be delivered or the response not read.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The response body was not valid JSON of the expected shape.
    #[error("decode error: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wraps a decoding error.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }

    /// Returns the message the service supplied, if any.
    ///
    /// The store prefers this over its own generic wording when it reports a
    /// failure to the user.
    #[must_use]
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            Self::Unavailable(message) => Some(message.as_str()),
            _ => None,
        }
    }
}
