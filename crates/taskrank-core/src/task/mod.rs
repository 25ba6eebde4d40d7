//! Candidate tasks, before scoring.
//!
//! A [`Task`] is kept as the JSON object that will be submitted to the
//! scoring service. Tasks entered through the form always carry the six
//! known fields; imported tasks carry whatever the import supplied, with
//! only `id` filled in when missing.

pub mod form;
pub mod import;
pub mod store;

pub use form::{coerce_number, parse_dependencies, TaskForm};
pub use import::parse_task_list;
pub use store::TaskStore;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default id for the task at `position` (1-based).
pub fn default_task_id(position: usize) -> String {
    format!("T{position}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Task {
    fields: Map<String, Value>,
}

impl Task {
    /// Build a task with every known field present.
    ///
    /// Non-finite numbers are stored as `null`, which is also how they go
    /// over the wire.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        due_date: Option<String>,
        estimated_hours: Option<f64>,
        importance: Option<f64>,
        dependencies: Vec<String>,
    ) -> Self {
        let mut fields = Map::new();
        fields.insert("id".into(), Value::String(id.into()));
        fields.insert("title".into(), Value::String(title.into()));
        fields.insert(
            "due_date".into(),
            due_date.map(Value::String).unwrap_or(Value::Null),
        );
        fields.insert("estimated_hours".into(), number_or_null(estimated_hours));
        fields.insert("importance".into(), number_or_null(importance));
        fields.insert(
            "dependencies".into(),
            Value::Array(dependencies.into_iter().map(Value::String).collect()),
        );
        Self { fields }
    }

    /// Wrap an imported record, defaulting `id` when the record has none.
    ///
    /// `id` stays the first key either way; a supplied `id` is kept
    /// verbatim, whatever its JSON type.
    pub fn from_record(record: Map<String, Value>, default_id: String) -> Self {
        let mut fields = Map::with_capacity(record.len() + 1);
        fields.insert("id".into(), Value::String(default_id));
        fields.extend(record);
        Self { fields }
    }

    /// Id as a string, when it is one.
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    /// Id in display form, whatever its JSON type.
    pub fn id_label(&self) -> String {
        self.fields
            .get("id")
            .map(crate::render::display_value)
            .unwrap_or_default()
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    pub fn due_date(&self) -> Option<&str> {
        self.fields.get("due_date").and_then(Value::as_str)
    }

    /// Raw field access; imported records may hold any JSON here.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Dependency ids, skipping entries that are not strings.
    pub fn dependencies(&self) -> Vec<&str> {
        self.fields
            .get("dependencies")
            .and_then(Value::as_array)
            .map(|deps| deps.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

fn number_or_null(value: Option<f64>) -> Value {
    value
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
