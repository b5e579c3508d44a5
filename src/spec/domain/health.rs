//! Health report published by the remote specification service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall service health.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallHealth {
    /// Every dependency is operational.
    Healthy,
    /// The service runs with reduced capability, such as template fallback.
    Degraded,
    /// The service cannot serve requests.
    Unhealthy,
    /// The service reported a status this client does not know.
    #[default]
    #[serde(other)]
    Unknown,
}

impl OverallHealth {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OverallHealth {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Health of one dependency of the remote service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Whether the dependency is operational.
    #[serde(default)]
    pub ok: bool,
    /// Optional detail supplied by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Whether the dependency is configured at all (reported for the LLM).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configured: Option<bool>,
}

impl ComponentHealth {
    /// Returns the service message, or a generic one matching `ok`.
    #[must_use]
    pub fn summary(&self) -> &str {
        match self.message.as_deref() {
            Some(message) if !message.trim().is_empty() => message,
            _ if self.ok => "Operational",
            _ => "Check configuration",
        }
    }
}

/// Snapshot returned by the service health endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall status.
    #[serde(default)]
    pub overall: OverallHealth,
    /// Service version, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// API process health.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<ComponentHealth>,
    /// Persistence health.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<ComponentHealth>,
    /// Language-model connection health.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<ComponentHealth>,
}

impl HealthReport {
    /// Returns whether the service reports itself healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.overall == OverallHealth::Healthy
    }

    /// Iterates over the reported components with their names.
    pub fn components(&self) -> impl Iterator<Item = (&'static str, &ComponentHealth)> {
        [
            ("backend", self.backend.as_ref()),
            ("database", self.database.as_ref()),
            ("llm", self.llm.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, component)| component.map(|health| (name, health)))
    }
}
