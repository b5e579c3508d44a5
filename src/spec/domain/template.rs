//! Generation template and complexity choices offered on the feature form.

use super::SpecDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of product the generator should tailor the specification to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateType {
    /// Browser-based application.
    #[default]
    #[serde(rename = "Web App")]
    WebApp,
    /// Native or hybrid mobile application.
    #[serde(rename = "Mobile App")]
    MobileApp,
    /// Tooling for internal staff.
    #[serde(rename = "Internal Tool")]
    InternalTool,
    /// Headless service exposing an API.
    #[serde(rename = "API Service")]
    ApiService,
}

impl TemplateType {
    /// All template types in form order.
    pub const ALL: [Self; 4] = [
        Self::WebApp,
        Self::MobileApp,
        Self::InternalTool,
        Self::ApiService,
    ];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WebApp => "Web App",
            Self::MobileApp => "Mobile App",
            Self::InternalTool => "Internal Tool",
            Self::ApiService => "API Service",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemplateType {
    type Error = SpecDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|template| template.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| SpecDomainError::UnknownTemplateType(value.to_owned()))
    }
}

/// Expected implementation effort of the feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Complexity {
    /// Small, contained change.
    Low,
    /// Typical feature.
    #[default]
    Medium,
    /// Large or cross-cutting feature.
    High,
}

impl Complexity {
    /// All complexity levels in ascending order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Complexity {
    type Error = SpecDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| SpecDomainError::UnknownComplexity(value.to_owned()))
    }
}
