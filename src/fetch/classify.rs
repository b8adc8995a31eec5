//! Content-based classification of fetched response bodies.
//!
//! The declared content type is ignored; only the body text decides what the
//! script receives.

use crate::engine::GuestValue;

/// The value a `fetch` call hands back to the script.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// The body parsed as a JSON object or array.
    Json(GuestValue),
    /// The body was `true` or `false`.
    Boolean(bool),
    /// The body was a finite number.
    Number(f64),
    /// Anything else.
    RawString(String),
}

/// Classifies a fully buffered response body.
///
/// Checked in order against the trimmed body: JSON object or array, the
/// literals `true`/`false`, a finite number. A body that looks like JSON but
/// does not parse comes back as the trimmed text; anything else comes back as
/// the untouched body.
pub fn classify_response(body: &str) -> FetchResult {
    let trimmed = body.trim();

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<GuestValue>(trimmed) {
            Ok(value) => FetchResult::Json(value),
            Err(_) => FetchResult::RawString(trimmed.to_string()),
        };
    }

    match trimmed {
        "true" => return FetchResult::Boolean(true),
        "false" => return FetchResult::Boolean(false),
        _ => {}
    }

    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => FetchResult::Number(number),
        _ => FetchResult::RawString(body.to_string()),
    }
}

impl From<FetchResult> for GuestValue {
    fn from(result: FetchResult) -> Self {
        match result {
            FetchResult::Json(value) => value,
            FetchResult::Boolean(b) => GuestValue::Bool(b),
            // classify_response only yields finite numbers.
            FetchResult::Number(n) => {
                serde_json::Number::from_f64(n).map_or(GuestValue::Null, GuestValue::Number)
            }
            FetchResult::RawString(s) => GuestValue::String(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_classify_json_object() {
        assert_eq!(
            classify_response(r#"{"a":1}"#),
            FetchResult::Json(GuestValue::from(json!({"a": 1})))
        );
    }

    #[test]
    fn test_classify_json_array_with_whitespace() {
        assert_eq!(
            classify_response("\n  [1, 2, 3]\r\n"),
            FetchResult::Json(GuestValue::from(json!([1, 2, 3])))
        );
    }

    #[test]
    fn test_classify_malformed_json_falls_back_to_trimmed_text() {
        assert_eq!(classify_response("{bad"), FetchResult::RawString("{bad".to_string()));
        assert_eq!(classify_response("  [1, 2 "), FetchResult::RawString("[1, 2".to_string()));
    }

    #[test]
    fn test_classify_booleans_are_case_sensitive() {
        assert_eq!(classify_response("true"), FetchResult::Boolean(true));
        assert_eq!(classify_response(" false\n"), FetchResult::Boolean(false));
        assert_eq!(classify_response("True"), FetchResult::RawString("True".to_string()));
    }

    #[test]
    fn test_classify_numbers() {
        assert_eq!(classify_response("12.5"), FetchResult::Number(12.5));
        assert_eq!(classify_response("42"), FetchResult::Number(42.0));
        assert_eq!(classify_response("-1e3"), FetchResult::Number(-1000.0));
    }

    #[test]
    fn test_classify_non_finite_numbers_stay_text() {
        assert_eq!(classify_response("NaN"), FetchResult::RawString("NaN".to_string()));
        assert_eq!(classify_response("inf"), FetchResult::RawString("inf".to_string()));
    }

    #[test]
    fn test_classify_plain_text_keeps_untrimmed_body() {
        assert_eq!(classify_response("hello"), FetchResult::RawString("hello".to_string()));
        assert_eq!(classify_response(" hello \n"), FetchResult::RawString(" hello \n".to_string()));
        assert_eq!(classify_response(""), FetchResult::RawString(String::new()));
    }

    #[test]
    fn test_fetch_result_into_guest_value() {
        assert_eq!(GuestValue::from(FetchResult::Boolean(true)), GuestValue::Bool(true));
        assert_eq!(GuestValue::from(FetchResult::Number(2.5)), GuestValue::from(json!(2.5)));
        assert_eq!(GuestValue::from(FetchResult::RawString("x".into())), GuestValue::from("x"));
        assert_eq!(
            GuestValue::from(FetchResult::Json(GuestValue::from(json!([1])))),
            GuestValue::from(json!([1]))
        );
    }
}
