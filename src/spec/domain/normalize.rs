//! Conversion of loosely shaped task payloads into the canonical board.
//!
//! The generation service and the persistence service do not agree on how
//! tasks are encoded: columns may be keyed in lower case or title case, and
//! entries may be bare strings or objects with optional `_id`, `id`, `text`
//! and `completed` fields. Everything here is total. Malformed input
//! degrades to defaults instead of failing.

use super::{Task, TaskBoard, TaskColumn, TaskId};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Recognized shapes of a whole task collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawTaskCollection<'a> {
    /// No collection was supplied.
    Absent,
    /// A mapping keyed by column name.
    Keyed(&'a Map<String, Value>),
    /// A flat list with no column keys.
    Flat(&'a [Value]),
    /// Any other JSON value.
    Scalar(&'a Value),
}

impl<'a> RawTaskCollection<'a> {
    /// Classifies an optional JSON value.
    #[must_use]
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self::Absent,
            Some(Value::Object(map)) => Self::Keyed(map),
            Some(Value::Array(items)) => Self::Flat(items),
            Some(other) => Self::Scalar(other),
        }
    }

    fn column_items(self, column: TaskColumn) -> &'a [Value] {
        let Self::Keyed(map) = self else {
            return &[];
        };
        column
            .lookup_keys()
            .iter()
            .find_map(|key| match map.get(*key) {
                Some(Value::Array(items)) => Some(items.as_slice()),
                _ => None,
            })
            .unwrap_or_default()
    }
}

/// Recognized shapes of a single raw task entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawTask<'a> {
    /// A bare description string.
    Text(&'a str),
    /// An object with optional identifier, text and completion fields.
    Object(&'a Map<String, Value>),
    /// A number, boolean or null.
    Scalar(&'a Value),
}

impl<'a> RawTask<'a> {
    /// Classifies a JSON value.
    #[must_use]
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Object(map) => Self::Object(map),
            other => Self::Scalar(other),
        }
    }

    /// Converts the entry into a canonical task.
    ///
    /// `index` is the entry's position within its column and seeds the
    /// synthesized identifier when the entry carries none.
    #[must_use]
    pub fn into_task(self, index: usize) -> Task {
        match self {
            Self::Text(text) => Task::new(TaskId::positional(index), text, false),
            Self::Object(map) => {
                let id = ["_id", "id"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(loose_id))
                    .map_or_else(|| TaskId::positional(index), TaskId::new);
                let text = map
                    .get("text")
                    .and_then(scalar_text)
                    .unwrap_or_else(|| Value::Object(map.clone()).to_string());
                let completed = map
                    .get("completed")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                Task::new(id, text, completed)
            }
            Self::Scalar(value) => Task::new(TaskId::positional(index), value.to_string(), false),
        }
    }
}

/// Normalizes an optional task payload into a five-column board.
///
/// Positional identifiers are stable within one pass only. Re-running the
/// normalizer over a reordered payload without server identifiers assigns
/// the same `t-<index>` values to different tasks.
#[must_use]
pub fn normalize_tasks(value: Option<&Value>) -> TaskBoard {
    let collection = RawTaskCollection::classify(value);
    TaskColumn::ALL
        .into_iter()
        .fold(TaskBoard::new(), |board, column| {
            board.with_column(column, normalize_column(collection.column_items(column)))
        })
}

/// Normalizes the entries of a single column.
///
/// Duplicate identifiers inside one column are replaced by positional ones,
/// keeping identifiers unique per column.
#[must_use]
pub fn normalize_column(items: &[Value]) -> Vec<Task> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let task = RawTask::classify(item).into_task(index);
            if seen.insert(task.id().clone()) {
                return task;
            }
            let id = unique_positional_id(index, &seen);
            seen.insert(id.clone());
            task.with_id(id)
        })
        .collect()
}

fn unique_positional_id(index: usize, seen: &HashSet<TaskId>) -> TaskId {
    let base = TaskId::positional(index);
    if !seen.contains(&base) {
        return base;
    }
    (1_usize..)
        .map(|suffix| TaskId::new(format!("{base}.{suffix}")))
        .find(|candidate| !seen.contains(candidate))
        .unwrap_or(base)
}

/// Reads an identifier that may be a string, a number or a `{ "$oid": .. }`
/// object.
pub(crate) fn loose_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.trim().is_empty() => Some(id.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Object(map) => map.get("$oid").and_then(loose_id),
        _ => None,
    }
}

/// Reads display text from a string, number or boolean.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
