//! Scoring service contract.
//!
//! Shapes here are consumed, never produced, by the client: scores,
//! labels and metadata are shown exactly as the service returned them.

pub mod client;

pub use client::{
    validate_suggest_limit, ScoringClient, DEFAULT_API_BASE, DEFAULT_SUGGEST_LIMIT,
    MAX_SUGGEST_LIMIT,
};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::strategy::Strategy;
use crate::task::Task;

/// A task as echoed back by the scoring service.
///
/// All submitted fields come back under `task`; the service adds the
/// rest. Every added field is optional so a partial record still renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedTask {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ScoreMetadata>,
    #[serde(flatten)]
    pub task: Task,
}

/// Per-signal breakdown behind a score.
///
/// A metric is present whenever its key is, `null` included; only a
/// missing key reads as `None`. Metrics keep their raw JSON so they are
/// shown as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreMetadata {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub importance: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub effort_quick_win: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub dependency_breadth: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_past_due: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_in_circular_dependency: Option<bool>,
}

/// `Some` for any value the key carries, `null` included.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Body of `POST /analyze/`.
#[derive(Debug, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub strategy: Strategy,
    pub tasks: &'a [Task],
}

/// Body of a successful `GET /suggest/`.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub tasks: Option<Vec<AnalyzedTask>>,
}

/// Optional body of any non-success response.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn analyzed_task_keeps_echoed_fields() {
        let raw = json!({
            "id": "T1",
            "title": "Pay rent",
            "due_date": "2025-12-01",
            "estimated_hours": 1.0,
            "importance": 8,
            "dependencies": [],
            "calculated_score": 81.5,
            "priority_label": "High",
            "strategy": "smart_balance",
            "explanation": "Pay rent is ranked as High priority because deadline is very close.",
            "metadata": {"urgency": 0.9, "dependency_breadth": 0, "is_past_due": false}
        });
        let task: AnalyzedTask = serde_json::from_value(raw).unwrap();
        assert_eq!(task.task.id(), Some("T1"));
        assert_eq!(task.task.title(), Some("Pay rent"));
        assert_eq!(task.task.get("calculated_score"), None);
        assert_eq!(task.calculated_score, Some(81.5));
        let metadata = task.metadata.unwrap();
        assert_eq!(metadata.dependency_breadth, Some(json!(0)));
        assert_eq!(metadata.importance, None);
        assert_eq!(metadata.is_past_due, Some(false));
    }

    #[test]
    fn null_metric_is_present_and_missing_is_absent() {
        let metadata: ScoreMetadata =
            serde_json::from_value(json!({"urgency": null, "effort_quick_win": 0.5})).unwrap();
        assert_eq!(metadata.urgency, Some(Value::Null));
        assert_eq!(metadata.effort_quick_win, Some(json!(0.5)));
        assert_eq!(metadata.importance, None);
        assert_eq!(metadata.dependency_breadth, None);
    }

    #[test]
    fn minimal_record_still_decodes() {
        let task: AnalyzedTask = serde_json::from_value(json!({"title": "bare"})).unwrap();
        assert_eq!(task.priority_label, None);
        assert_eq!(task.metadata, None);
    }

    #[test]
    fn analyze_request_shape() {
        let tasks = vec![Task::new("T1", "a", None, None, None, vec![])];
        let body = serde_json::to_value(AnalyzeRequest {
            strategy: Strategy::HighImpact,
            tasks: &tasks,
        })
        .unwrap();
        assert_eq!(body["strategy"], "high_impact");
        assert_eq!(body["tasks"][0]["id"], "T1");
    }

    #[test]
    fn suggest_response_without_tasks_key() {
        let resp: SuggestResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.tasks.is_none());
    }
}
