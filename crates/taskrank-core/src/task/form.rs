//! Manual task entry: raw text fields and their normalization.

use serde::{Deserialize, Serialize};

use super::Task;
use crate::error::ValidationError;

/// Raw text of the add-task form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub estimated_hours: String,
    #[serde(default)]
    pub importance: String,
    #[serde(default)]
    pub dependencies: String,
}

impl TaskForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    pub fn estimated_hours(mut self, hours: impl Into<String>) -> Self {
        self.estimated_hours = hours.into();
        self
    }

    pub fn importance(mut self, importance: impl Into<String>) -> Self {
        self.importance = importance.into();
        self
    }

    pub fn dependencies(mut self, dependencies: impl Into<String>) -> Self {
        self.dependencies = dependencies.into();
        self
    }

    /// Validate and normalize into a task with the given id.
    ///
    /// Only the title is validated. Numbers are never range-checked:
    /// text that does not parse becomes NaN.
    pub fn into_task(&self, id: String) -> Result<Task, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField { field: "title" });
        }

        let due_date = if self.due_date.is_empty() {
            None
        } else {
            Some(self.due_date.clone())
        };

        Ok(Task::new(
            id,
            title,
            due_date,
            coerce_number(&self.estimated_hours),
            coerce_number(&self.importance),
            parse_dependencies(&self.dependencies),
        ))
    }
}

/// Split a comma-separated id list, trimming each entry and dropping
/// empty ones.
pub fn parse_dependencies(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Numeric form field: `None` for an empty string, otherwise the parsed
/// number, with NaN for anything unparseable.
pub fn coerce_number(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    Some(parse_number(raw))
}

/// Standard numeric parsing of form text.
///
/// Surrounding whitespace is ignored and whitespace alone reads as zero.
/// Accepts decimal and exponent notation, `0x`/`0o`/`0b` integers and
/// signed `Infinity`.
fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust accepts "inf" and "nan" spellings; form text does not.
    if s
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}
