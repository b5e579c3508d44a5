//! Specification aggregate, feature-form input and wire shapes.

use super::normalize::{loose_id, normalize_tasks, scalar_text};
use super::{Complexity, SpecId, TaskBoard, TaskColumn, TemplateType};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Form input describing the feature to generate a specification for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRequest {
    title: String,
    goal: String,
    users: Vec<String>,
    constraints: String,
    template_type: TemplateType,
    complexity: Complexity,
}

impl FeatureRequest {
    /// Creates a request with the required title and default choices.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            goal: String::new(),
            users: Vec::new(),
            constraints: String::new(),
            template_type: TemplateType::default(),
            complexity: Complexity::default(),
        }
    }

    /// Sets the goal the feature should achieve.
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    /// Sets the target users.
    #[must_use]
    pub fn with_users(mut self, users: impl IntoIterator<Item = String>) -> Self {
        self.users = users.into_iter().collect();
        self
    }

    /// Sets the target users from the free-text form field.
    ///
    /// The whole text becomes a single entry; blank text clears the list.
    #[must_use]
    pub fn with_target_users(mut self, target_users: &str) -> Self {
        let trimmed = target_users.trim();
        self.users = if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_owned()]
        };
        self
    }

    /// Sets free-text constraints.
    #[must_use]
    pub fn with_constraints(mut self, constraints: impl Into<String>) -> Self {
        self.constraints = constraints.into();
        self
    }

    /// Sets the product template.
    #[must_use]
    pub const fn with_template_type(mut self, template_type: TemplateType) -> Self {
        self.template_type = template_type;
        self
    }

    /// Sets the complexity level.
    #[must_use]
    pub const fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    /// Returns the feature title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the feature goal.
    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Returns the target users.
    #[must_use]
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Returns the constraints text.
    #[must_use]
    pub fn constraints(&self) -> &str {
        &self.constraints
    }

    /// Returns the product template.
    #[must_use]
    pub const fn template_type(&self) -> TemplateType {
        self.template_type
    }

    /// Returns the complexity level.
    #[must_use]
    pub const fn complexity(&self) -> Complexity {
        self.complexity
    }
}

/// Specification aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specification {
    id: Option<SpecId>,
    title: String,
    overview: String,
    users: Vec<String>,
    constraints: String,
    template_type: TemplateType,
    complexity: Complexity,
    user_stories: Vec<String>,
    risks: Vec<String>,
    tasks: TaskBoard,
    created_at: Option<DateTime<Utc>>,
}

impl Specification {
    /// Creates an unsaved specification with the given title and no content.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            overview: String::new(),
            users: Vec::new(),
            constraints: String::new(),
            template_type: TemplateType::default(),
            complexity: Complexity::default(),
            user_stories: Vec::new(),
            risks: Vec::new(),
            tasks: TaskBoard::new(),
            created_at: None,
        }
    }

    /// Builds a specification from a raw service payload.
    ///
    /// Tasks are always run through the normalizer, so the result has all
    /// five columns whatever the payload contained. `goal` takes precedence
    /// over `overview` because the generator echoes the form's goal.
    #[must_use]
    pub fn from_raw(raw: &RawSpecification) -> Self {
        let id = [raw.mongo_id.as_ref(), raw.id.as_ref()]
            .into_iter()
            .flatten()
            .find_map(loose_id)
            .map(SpecId::new);
        let text = |value: Option<&Value>| value.and_then(scalar_text).unwrap_or_default();
        let overview = [raw.goal.as_ref(), raw.overview.as_ref()]
            .into_iter()
            .flatten()
            .find_map(scalar_text)
            .unwrap_or_default();
        let template_type = raw
            .template_type
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|value| TemplateType::try_from(value).ok())
            .unwrap_or_default();
        let complexity = raw
            .complexity
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|value| Complexity::try_from(value).ok())
            .unwrap_or_default();
        let created_at = raw
            .created_at
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|timestamp| timestamp.with_timezone(&Utc));

        Self {
            id,
            title: text(raw.title.as_ref()),
            overview,
            users: loose_list(raw.users.as_ref()),
            constraints: text(raw.constraints.as_ref()),
            template_type,
            complexity,
            user_stories: loose_list(raw.user_stories.as_ref()),
            risks: loose_list(raw.risks.as_ref()),
            tasks: normalize_tasks(raw.tasks.as_ref()),
            created_at,
        }
    }

    /// Sets the overview.
    #[must_use]
    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = overview.into();
        self
    }

    /// Sets the user stories.
    #[must_use]
    pub fn with_user_stories(mut self, stories: impl IntoIterator<Item = String>) -> Self {
        self.user_stories = stories.into_iter().collect();
        self
    }

    /// Sets the risks.
    #[must_use]
    pub fn with_risks(mut self, risks: impl IntoIterator<Item = String>) -> Self {
        self.risks = risks.into_iter().collect();
        self
    }

    /// Replaces the task board.
    #[must_use]
    pub fn with_tasks(mut self, tasks: TaskBoard) -> Self {
        self.tasks = tasks;
        self
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: SpecId) -> Self {
        self.id = Some(id);
        self
    }

    /// Fills in the creation timestamp from `clock` when it is missing.
    #[must_use]
    pub fn ensure_created_at(mut self, clock: &impl Clock) -> Self {
        if self.created_at.is_none() {
            self.created_at = Some(clock.utc());
        }
        self
    }

    /// Returns the identifier assigned by the remote store, if saved.
    #[must_use]
    pub const fn id(&self) -> Option<&SpecId> {
        self.id.as_ref()
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the overview.
    #[must_use]
    pub fn overview(&self) -> &str {
        &self.overview
    }

    /// Returns the target users.
    #[must_use]
    pub fn users(&self) -> &[String] {
        &self.users
    }

    /// Returns the constraints text.
    #[must_use]
    pub fn constraints(&self) -> &str {
        &self.constraints
    }

    /// Returns the product template.
    #[must_use]
    pub const fn template_type(&self) -> TemplateType {
        self.template_type
    }

    /// Returns the complexity level.
    #[must_use]
    pub const fn complexity(&self) -> Complexity {
        self.complexity
    }

    /// Returns the user stories in order.
    #[must_use]
    pub fn user_stories(&self) -> &[String] {
        &self.user_stories
    }

    /// Returns the risks in order.
    #[must_use]
    pub fn risks(&self) -> &[String] {
        &self.risks
    }

    /// Returns the task board.
    #[must_use]
    pub const fn tasks(&self) -> &TaskBoard {
        &self.tasks
    }

    /// Returns the creation timestamp, if known.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// Loosely typed specification payload as returned by the remote service.
///
/// Every field is optional and kept as raw JSON so that decoding never fails
/// on an unexpected shape. Use [`Specification::from_raw`] to obtain the
/// canonical form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpecification {
    /// Document-store identifier, preferred over `id`.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<Value>,
    /// Plain identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Specification title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    /// Goal supplied at generation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<Value>,
    /// Overview, used when no goal is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<Value>,
    /// Target users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Value>,
    /// Free-text constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Value>,
    /// Product template name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_type: Option<Value>,
    /// Complexity level name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Value>,
    /// User stories as strings or `{ "text": .. }` objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_stories: Option<Value>,
    /// Risks as strings or `{ "text": .. }` objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risks: Option<Value>,
    /// Task collection in any of the shapes the normalizer accepts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Value>,
    /// RFC 3339 creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Value>,
}

impl RawSpecification {
    /// Fills fields the generator left out with the values from the form.
    ///
    /// The generator is not required to echo the request, but the draft that
    /// gets saved should still carry the user's input.
    #[must_use]
    pub fn or_request(mut self, request: &FeatureRequest) -> Self {
        let text = |value: &str| Value::String(value.to_owned());
        self.title.get_or_insert_with(|| text(request.title()));
        self.goal.get_or_insert_with(|| text(request.goal()));
        self.users
            .get_or_insert_with(|| Value::from(request.users().to_vec()));
        self.constraints
            .get_or_insert_with(|| text(request.constraints()));
        self.template_type
            .get_or_insert_with(|| text(request.template_type().as_str()));
        self.complexity
            .get_or_insert_with(|| text(request.complexity().as_str()));
        self
    }
}

/// Body sent to the remote store when saving a specification.
///
/// Task identifiers are local to the board and are not persisted; the store
/// keeps only each task's text and completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    title: String,
    goal: String,
    users: Vec<String>,
    constraints: String,
    template_type: TemplateType,
    complexity: Complexity,
    user_stories: Vec<String>,
    tasks: Map<String, Value>,
    risks: Vec<String>,
}

impl From<&Specification> for SavePayload {
    fn from(spec: &Specification) -> Self {
        let tasks = TaskColumn::ALL
            .into_iter()
            .map(|column| {
                let entries = spec
                    .tasks()
                    .column(column)
                    .iter()
                    .map(|task| {
                        serde_json::json!({ "text": task.text(), "completed": task.completed() })
                    })
                    .collect();
                (column.as_str().to_owned(), Value::Array(entries))
            })
            .collect();

        Self {
            title: spec.title.clone(),
            goal: spec.overview.clone(),
            users: spec.users.clone(),
            constraints: spec.constraints.clone(),
            template_type: spec.template_type,
            complexity: spec.complexity,
            user_stories: spec.user_stories.clone(),
            tasks,
            risks: spec.risks.clone(),
        }
    }
}

fn loose_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Object(map) => map
                    .get("text")
                    .and_then(scalar_text)
                    .unwrap_or_else(|| item.to_string()),
                other => scalar_text(other).unwrap_or_else(|| other.to_string()),
            })
            .collect(),
        Some(other) => scalar_text(other).into_iter().collect(),
        None => Vec::new(),
    }
}
