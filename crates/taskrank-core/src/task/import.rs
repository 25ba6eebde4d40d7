//! Bulk JSON import.
//!
//! Imported records are not validated: apart from filling
//! in a missing `id`, every field is passed to the scoring service as
//! supplied.

use serde_json::{Map, Value};

use super::{default_task_id, Task};
use crate::error::{CoreError, ParseError, ShapeError};

/// Parse pasted text into the task list that will replace the store.
///
/// # Errors
///
/// [`ParseError`] when the text is blank or not JSON, [`ShapeError`] when
/// it is JSON but not an array.
pub fn parse_task_list(text: &str) -> Result<Vec<Task>, CoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyInput.into());
    }

    let parsed: Value = serde_json::from_str(text).map_err(ParseError::InvalidJson)?;
    let Value::Array(items) = parsed else {
        return Err(ShapeError::NotAnArray {
            found: json_type_name(&parsed),
        }
        .into());
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| {
            let record = match item {
                Value::Object(record) => record,
                other => {
                    tracing::warn!(
                        index = idx,
                        kind = json_type_name(&other),
                        "import entry is not an object; keeping id only"
                    );
                    Map::new()
                }
            };
            Task::from_record(record, default_task_id(idx + 1))
        })
        .collect())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_record_gets_t1() {
        let tasks = parse_task_list(r#"[{"title":"X"}]"#).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id(), Some("T1"));
        assert_eq!(tasks[0].title(), Some("X"));
    }

    #[test]
    fn ids_default_by_position_and_duplicates_are_kept() {
        let tasks =
            parse_task_list(r#"[{"id":"A"},{"title":"no id"},{"id":"A"}]"#).unwrap();
        let ids: Vec<_> = tasks.iter().map(|t| t.id_label()).collect();
        assert_eq!(ids, vec!["A", "T2", "A"]);
    }

    #[test]
    fn fields_pass_through_unvalidated() {
        let tasks = parse_task_list(
            r#"[{"estimated_hours":"lots","dependencies":"A,B","importance":99,"owner":"sam"}]"#,
        )
        .unwrap();
        let task = &tasks[0];
        assert_eq!(task.get("estimated_hours"), Some(&json!("lots")));
        assert_eq!(task.get("dependencies"), Some(&json!("A,B")));
        assert_eq!(task.get("importance"), Some(&json!(99)));
        assert_eq!(task.get("owner"), Some(&json!("sam")));
    }

    #[test]
    fn blank_text_is_a_parse_error() {
        let err = parse_task_list("  \n").unwrap_err();
        assert!(matches!(err, CoreError::Parse(ParseError::EmptyInput)));
        assert_eq!(err.to_string(), "Please paste a JSON array first.");
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = parse_task_list("not json").unwrap_err();
        assert!(matches!(err, CoreError::Parse(ParseError::InvalidJson(_))));
        assert!(err.to_string().starts_with("Invalid JSON: "));
    }

    #[test]
    fn object_is_a_shape_error() {
        let err = parse_task_list(r#"{"a":1}"#).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Shape(ShapeError::NotAnArray { found: "object" })
        ));
    }

    #[test]
    fn non_object_entries_keep_only_an_id() {
        let tasks = parse_task_list("[1, null]").unwrap();
        assert_eq!(tasks[0].fields().len(), 1);
        assert_eq!(tasks[1].id(), Some("T2"));
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_task_list("[]").unwrap().is_empty());
    }
}
