//! Domain model for specifications and their task boards.
//!
//! Everything in this module is pure: no I/O, no locking and no clock reads
//! except through an injected [`mockable::Clock`].

mod board;
mod column;
mod error;
pub mod export;
mod health;
mod ids;
pub mod normalize;
mod recent;
mod specification;
mod task;
mod template;

pub use board::TaskBoard;
pub use column::TaskColumn;
pub use error::SpecDomainError;
pub use export::{ExportDocument, ExportFormat, export_file_name, spec_to_markdown};
pub use health::{ComponentHealth, HealthReport, OverallHealth};
pub use ids::{SpecId, TaskId};
pub use normalize::normalize_tasks;
pub use recent::{DEFAULT_RECENT_LIMIT, RecentSpecs};
pub use specification::{FeatureRequest, RawSpecification, SavePayload, Specification};
pub use task::{NEW_TASK_TEXT, Task};
pub use template::{Complexity, TemplateType};
