//! Backend error bodies
//!
//! Non-2xx responses carry a user-facing message. Different endpoints
//! name the field differently, so extraction tries each known key.

use serde_json::Value;

/// Keys checked, in order, for a user-facing error message
const MESSAGE_KEYS: &[&str] = &["error", "message", "detail"];

/// Pull the user-facing message out of an error response body.
///
/// Falls back to the raw body text, or to `fallback` when the body is empty.
pub fn extract_error_message(body: &str, fallback: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => MESSAGE_KEYS
            .iter()
            .find_map(|key| match value.get(key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Object(inner)) => inner
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                Some(Value::Array(items)) => {
                    let joined = items
                        .iter()
                        .filter_map(|item| {
                            item.as_str()
                                .map(str::to_string)
                                .or_else(|| item.get("msg").and_then(Value::as_str).map(str::to_string))
                        })
                        .collect::<Vec<_>>()
                        .join("; ");
                    (!joined.is_empty()).then_some(joined)
                }
                _ => None,
            })
            .unwrap_or_else(|| trimmed.to_string()),
        Err(_) => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_known_keys() {
        assert_eq!(
            extract_error_message(r#"{"error": "Ordem não encontrada"}"#, "x"),
            "Ordem não encontrada"
        );
        assert_eq!(extract_error_message(r#"{"message": "boom"}"#, "x"), "boom");
        assert_eq!(extract_error_message(r#"{"detail": "bad id"}"#, "x"), "bad id");
    }

    #[test]
    fn test_extract_validation_array() {
        let body = r#"{"detail": [{"msg": "field required"}, {"msg": "not an int"}]}"#;
        assert_eq!(extract_error_message(body, "x"), "field required; not an int");
    }

    #[test]
    fn test_extract_fallbacks() {
        assert_eq!(extract_error_message("", "Erro 500"), "Erro 500");
        assert_eq!(extract_error_message("Bad Gateway", "x"), "Bad Gateway");
        assert_eq!(extract_error_message(r#"{"ok": false}"#, "x"), r#"{"ok": false}"#);
    }
}
