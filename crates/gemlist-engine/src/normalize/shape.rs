use serde_json::Value;

/// Where a listing response keeps its item array.
///
/// Variants are tried in declaration order; anything unrecognized is
/// `Empty`, which normalizes to "no results" rather than an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseShape<'a> {
    /// `{"data": [...]}`
    DataList(&'a [Value]),
    /// `{"data": {"data": [...]}}`
    NestedDataList(&'a [Value]),
    Empty,
}

impl<'a> ResponseShape<'a> {
    pub fn detect(raw: &'a Value) -> Self {
        let data = raw.get("data");
        if let Some(Value::Array(items)) = data {
            return ResponseShape::DataList(items);
        }
        if let Some(Value::Array(items)) = data.and_then(|d| d.get("data")) {
            return ResponseShape::NestedDataList(items);
        }
        ResponseShape::Empty
    }

    pub fn items(&self) -> &'a [Value] {
        match self {
            ResponseShape::DataList(items) | ResponseShape::NestedDataList(items) => items,
            ResponseShape::Empty => &[],
        }
    }
}

/// Failure message of an envelope that reports `success: false`
pub fn envelope_failure(raw: &Value) -> Option<String> {
    match raw.get("success") {
        Some(Value::Bool(false)) => Some(
            raw.get("message")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or("request was not successful")
                .to_string(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_order() {
        let flat = json!({"data": [{"id": 1}], "meta": {}});
        assert!(matches!(ResponseShape::detect(&flat), ResponseShape::DataList(items) if items.len() == 1));

        let nested = json!({"data": {"data": [{"id": 1}, {"id": 2}]}});
        assert!(matches!(ResponseShape::detect(&nested), ResponseShape::NestedDataList(items) if items.len() == 2));
    }

    #[test]
    fn test_unrecognized_shapes_are_empty() {
        for raw in [
            json!({}),
            json!({"data": null}),
            json!({"data": {}}),
            json!({"data": {"data": "not-an-array"}}),
            json!("plain string"),
            json!([1, 2, 3]),
        ] {
            let shape = ResponseShape::detect(&raw);
            assert_eq!(shape, ResponseShape::Empty, "{}", raw);
            assert!(shape.items().is_empty());
        }
    }

    #[test]
    fn test_envelope_failure() {
        assert_eq!(
            envelope_failure(&json!({"success": false, "message": "Token expired"})),
            Some("Token expired".to_string())
        );
        assert_eq!(
            envelope_failure(&json!({"success": false})),
            Some("request was not successful".to_string())
        );
        assert_eq!(envelope_failure(&json!({"success": true, "data": []})), None);
        assert_eq!(envelope_failure(&json!({"data": []})), None);
    }
}
