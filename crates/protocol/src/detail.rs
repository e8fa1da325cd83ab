use serde_json::Value;

/// Shape of the `detail` field in a failure response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureDetail {
    Message(String),
    Entries(Vec<String>),
    Unrecognized,
}

impl FailureDetail {
    /// Classifies the `detail` field of a parsed failure body.
    pub fn from_body(body: &Value) -> Self {
        match body.get("detail") {
            Some(Value::String(message)) => Self::Message(message.clone()),
            Some(Value::Array(entries)) => Self::Entries(entries.iter().map(entry_text).collect()),
            _ => Self::Unrecognized,
        }
    }

    /// Display text for the detail, `None` when the shape was not recognized.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Message(message) => Some(message.clone()),
            Self::Entries(entries) => Some(entries.join("; ")),
            Self::Unrecognized => None,
        }
    }
}

// Prefer a present `msg`, else the entry itself.
fn entry_text(entry: &Value) -> String {
    match entry.get("msg") {
        Some(msg) if is_present(msg) => plain_text(msg),
        _ => plain_text(entry),
    }
}

// Null, false, zero and the empty string count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64() != Some(0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_detail_is_message() {
        let detail = FailureDetail::from_body(&json!({"detail": "location not found"}));
        assert_eq!(detail, FailureDetail::Message("location not found".to_string()));
        assert_eq!(detail.message().as_deref(), Some("location not found"));
    }

    #[test]
    fn array_detail_prefers_msg_and_joins() {
        let detail = FailureDetail::from_body(&json!({
            "detail": [
                {"loc": ["body", "location"], "msg": "field required", "type": "missing"},
                "plain entry",
                {"msg": ""},
            ]
        }));
        assert_eq!(
            detail.message().as_deref(),
            Some(r#"field required; plain entry; {"msg":""}"#)
        );
    }

    #[test]
    fn non_string_msg_is_shown_as_json_text() {
        let detail = FailureDetail::from_body(&json!({
            "detail": [
                {"msg": 5, "loc": ["body"]},
                {"msg": ["a", "b"]},
                {"msg": null},
            ]
        }));
        assert_eq!(
            detail.message().as_deref(),
            Some(r#"5; ["a","b"]; {"msg":null}"#)
        );
    }

    #[test]
    fn single_msg_entry_is_not_decorated() {
        let detail = FailureDetail::from_body(&json!({"detail": [{"msg": "field required"}]}));
        assert_eq!(detail.message().as_deref(), Some("field required"));
    }

    #[test]
    fn other_shapes_are_unrecognized() {
        for body in [
            json!({"detail": 42}),
            json!({"detail": null}),
            json!({"detail": {"msg": "nested"}}),
            json!({}),
            json!("not an object"),
        ] {
            let detail = FailureDetail::from_body(&body);
            assert_eq!(detail, FailureDetail::Unrecognized, "body: {body}");
            assert!(detail.message().is_none());
        }
    }

    #[test]
    fn empty_array_yields_empty_message() {
        let detail = FailureDetail::from_body(&json!({"detail": []}));
        assert_eq!(detail.message().as_deref(), Some(""));
    }
}
