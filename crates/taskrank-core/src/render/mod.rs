//! Turn scored tasks into display cards.
//!
//! [`render_card`] is a pure function of one [`AnalyzedTask`]. Output
//! formats ([`html`], [`text`]) only lay out the resulting [`TaskCard`].
//!
//! Visual priority and printed label are decided separately: a label the
//! card cannot classify is drawn in the low bucket but printed verbatim.

pub mod html;
pub mod text;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::analysis::{AnalyzedTask, ScoreMetadata};
use crate::strategy::humanize_key;

/// Visual bucket for a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityClass {
    High,
    Medium,
    Low,
}

impl PriorityClass {
    /// Case-insensitive; anything unrecognized or absent is `Low`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::to_lowercase).as_deref() {
            Some("high") => PriorityClass::High,
            Some("medium") => PriorityClass::Medium,
            _ => PriorityClass::Low,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PriorityClass::High => "priority-high",
            PriorityClass::Medium => "priority-medium",
            PriorityClass::Low => "priority-low",
        }
    }
}

/// Everything a card shows, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCard {
    pub priority: PriorityClass,
    pub priority_class: &'static str,
    pub title: String,
    pub score: String,
    /// e.g. "MEDIUM priority"; the label is printed as supplied.
    pub priority_text: String,
    pub strategy: String,
    pub due: String,
    pub estimated_hours: String,
    pub importance: String,
    pub explanation: String,
    /// Metric badges, only for metadata fields that are present.
    pub badges: Vec<String>,
    /// Flag badges, only for flags that are true.
    pub flags: Vec<String>,
}

pub fn render_card(task: &AnalyzedTask) -> TaskCard {
    let label = task.priority_label.as_deref().filter(|l| !l.is_empty());
    let priority = PriorityClass::from_label(label);
    let metadata = task.metadata.clone().unwrap_or_default();

    TaskCard {
        priority,
        priority_class: priority.css_class(),
        title: task
            .task
            .get("title")
            .filter(|v| is_truthy(v))
            .map(display_value)
            .unwrap_or_else(|| "Untitled task".to_string()),
        score: task
            .calculated_score
            .map(format_number)
            .unwrap_or_else(|| "N/A".to_string()),
        priority_text: format!("{} priority", label.unwrap_or("Unknown")),
        strategy: humanize_key(task.strategy.as_deref().unwrap_or("")).to_uppercase(),
        due: format_due_date(task.task.get("due_date")),
        estimated_hours: display_or_na(task.task.get("estimated_hours")),
        importance: display_or_na(task.task.get("importance")),
        explanation: task.explanation.clone().unwrap_or_default(),
        badges: metric_badges(&metadata),
        flags: flag_badges(&metadata),
    }
}

pub fn render_cards(tasks: &[AnalyzedTask]) -> Vec<TaskCard> {
    tasks.iter().map(render_card).collect()
}

fn metric_badges(metadata: &ScoreMetadata) -> Vec<String> {
    [
        ("Urgency", &metadata.urgency),
        ("Importance", &metadata.importance),
        ("Quick-win", &metadata.effort_quick_win),
        ("Blocks", &metadata.dependency_breadth),
    ]
    .into_iter()
    .filter_map(|(name, value)| {
        value
            .as_ref()
            .map(|v| format!("{name} {}", display_value(v)))
    })
    .collect()
}

fn flag_badges(metadata: &ScoreMetadata) -> Vec<String> {
    let mut flags = Vec::new();
    if metadata.is_past_due == Some(true) {
        flags.push("Past due".to_string());
    }
    if metadata.is_in_circular_dependency == Some(true) {
        flags.push("Circular dependency".to_string());
    }
    flags
}

/// Due date as "Dec 1, 2025", or "N/A" when absent or not a date.
pub fn format_due_date(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .and_then(parse_date)
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(raw, format)
                    .ok()
                    .map(|dt| dt.date())
            })
        })
}

/// "N/A" for null or missing, the literal value otherwise (0 included).
pub fn display_or_na(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(v) => display_value(v),
    }
}

/// String form of an arbitrary JSON value, as a page would print it.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (_, Some(u)) => u.to_string(),
            _ => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Shortest decimal form: `80`, `82.5`, `NaN`, `Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analyzed(value: Value) -> AnalyzedTask {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn zero_breadth_still_renders_a_badge() {
        let card = render_card(&analyzed(json!({
            "title": "t",
            "metadata": {"dependency_breadth": 0}
        })));
        assert_eq!(card.badges, vec!["Blocks 0"]);
    }

    #[test]
    fn absent_metadata_fields_render_nothing() {
        let card = render_card(&analyzed(json!({
            "metadata": {"urgency": 0.25, "effort_quick_win": 1}
        })));
        assert_eq!(card.badges, vec!["Urgency 0.25", "Quick-win 1"]);
        assert!(card.flags.is_empty());
    }

    #[test]
    fn null_metric_still_renders_a_badge() {
        let card = render_card(&analyzed(json!({
            "metadata": {"urgency": null, "dependency_breadth": 0}
        })));
        assert_eq!(card.badges, vec!["Urgency null", "Blocks 0"]);
    }

    #[test]
    fn flags_only_when_true() {
        let card = render_card(&analyzed(json!({
            "metadata": {"is_past_due": true, "is_in_circular_dependency": false}
        })));
        assert_eq!(card.flags, vec!["Past due"]);

        let card = render_card(&analyzed(json!({
            "metadata": {"is_past_due": false, "is_in_circular_dependency": true}
        })));
        assert_eq!(card.flags, vec!["Circular dependency"]);
    }

    #[test]
    fn uppercase_medium_is_styled_medium_and_printed_verbatim() {
        let card = render_card(&analyzed(json!({"priority_label": "MEDIUM"})));
        assert_eq!(card.priority, PriorityClass::Medium);
        assert_eq!(card.priority_class, "priority-medium");
        assert_eq!(card.priority_text, "MEDIUM priority");
    }

    #[test]
    fn unknown_label_is_low_but_printed() {
        let card = render_card(&analyzed(json!({"priority_label": "Critical"})));
        assert_eq!(card.priority, PriorityClass::Low);
        assert_eq!(card.priority_text, "Critical priority");
    }

    #[test]
    fn absent_label_prints_unknown() {
        let card = render_card(&analyzed(json!({})));
        assert_eq!(card.priority, PriorityClass::Low);
        assert_eq!(card.priority_text, "Unknown priority");
        assert_eq!(card.title, "Untitled task");
        assert_eq!(card.explanation, "");
        assert_eq!(card.strategy, "");
    }

    #[test]
    fn strategy_first_underscore_becomes_space() {
        let card = render_card(&analyzed(json!({"strategy": "deadline_driven"})));
        assert_eq!(card.strategy, "DEADLINE DRIVEN");
    }

    #[test]
    fn numeric_fields_na_only_for_null() {
        let card = render_card(&analyzed(json!({
            "estimated_hours": 0,
            "importance": null
        })));
        assert_eq!(card.estimated_hours, "0");
        assert_eq!(card.importance, "N/A");

        let card = render_card(&analyzed(json!({"estimated_hours": 2.5})));
        assert_eq!(card.estimated_hours, "2.5");
        assert_eq!(card.importance, "N/A");
    }

    #[test]
    fn due_date_formats_or_falls_back() {
        assert_eq!(format_due_date(Some(&json!("2025-12-01"))), "Dec 1, 2025");
        assert_eq!(
            format_due_date(Some(&json!("2025-03-09T10:00:00Z"))),
            "Mar 9, 2025"
        );
        assert_eq!(
            format_due_date(Some(&json!("2025-12-01T10:00:00.123"))),
            "Dec 1, 2025"
        );
        assert_eq!(
            format_due_date(Some(&json!("2025-12-01 10:00:00"))),
            "Dec 1, 2025"
        );
        assert_eq!(
            format_due_date(Some(&json!("2025-12-01T10:00:00"))),
            "Dec 1, 2025"
        );
        assert_eq!(format_due_date(Some(&json!("someday"))), "N/A");
        assert_eq!(format_due_date(Some(&Value::Null)), "N/A");
        assert_eq!(format_due_date(None), "N/A");
    }

    #[test]
    fn score_prints_shortest_form() {
        let card = render_card(&analyzed(json!({"calculated_score": 80.0})));
        assert_eq!(card.score, "80");
        let card = render_card(&analyzed(json!({"calculated_score": 82.35})));
        assert_eq!(card.score, "82.35");
    }

    #[test]
    fn display_value_matches_page_printing() {
        assert_eq!(display_value(&json!(["a", null, 2])), "a,,2");
        assert_eq!(display_value(&json!({"k": 1})), "[object Object]");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(-0.0), "0");
    }
}
