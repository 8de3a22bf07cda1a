//! Assertion runner implementation.
//!
//! Checks assertions against HTTP responses and produces assertion results.

use apiprobe_domain::response::ResponseSpec;
use apiprobe_domain::testing::{Assertion, AssertionResult};
use serde_json::{Map, Value};

/// Runner that checks assertions against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssertionRunner;

impl AssertionRunner {
    /// Create a new assertion runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run every assertion against a response, in order.
    #[must_use]
    pub fn run(&self, assertions: &[Assertion], response: &ResponseSpec) -> Vec<AssertionResult> {
        assertions
            .iter()
            .map(|assertion| self.run_assertion(assertion, response))
            .collect()
    }

    /// Run a single assertion against a response.
    #[must_use]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => {
                self.check_status_code(assertion, response, *expected)
            }
            Assertion::HeaderExists { name, value } => {
                self.check_header_exists(assertion, response, name, value.as_deref())
            }
            Assertion::JsonPath { path, expected } => {
                self.check_json_path(assertion, response, path, expected)
            }
            Assertion::JsonPathNotEmpty { path } => {
                self.check_json_path_not_empty(assertion, response, path)
            }
            Assertion::IsJsonArray => self.check_is_json_array(assertion, response),
            Assertion::ArrayEntry {
                key,
                value,
                expected,
            } => self.check_array_entry(assertion, response, key, value, expected),
        }
    }

    fn check_status_code(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: u16,
    ) -> AssertionResult {
        let actual = response.status;
        if actual == expected {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual.to_string(),
                format!(
                    "Expected status {expected}, got {} (body: {})",
                    response.status_code(),
                    response.body_preview()
                ),
            )
        }
    }

    fn check_header_exists(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        name: &str,
        expected_value: Option<&str>,
    ) -> AssertionResult {
        match (response.get_header(name), expected_value) {
            (Some(actual), Some(expected)) if actual != expected => {
                AssertionResult::fail_with_value(
                    assertion.clone(),
                    actual.clone(),
                    format!(
                        "Header '{name}' value mismatch: expected '{expected}', got '{actual}'"
                    ),
                )
            }
            (Some(actual), _) => AssertionResult::pass_with_value(assertion.clone(), actual.clone()),
            (None, _) => {
                AssertionResult::fail(assertion.clone(), format!("Header '{name}' not found"))
            }
        }
    }

    fn check_json_path(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        expected: &Value,
    ) -> AssertionResult {
        let json = match parse_body(assertion, response) {
            Ok(json) => json,
            Err(result) => return result,
        };

        match query_json_path(&json, path) {
            Ok(Some(value)) if value != expected => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!("JSON path '{path}' value mismatch: expected {expected}, got {value}"),
            ),
            Ok(Some(value)) => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
            Ok(None) => {
                AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found"))
            }
            Err(e) => AssertionResult::fail(
                assertion.clone(),
                format!("Invalid JSON path '{path}': {e}"),
            ),
        }
    }

    fn check_json_path_not_empty(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
    ) -> AssertionResult {
        let json = match parse_body(assertion, response) {
            Ok(json) => json,
            Err(result) => return result,
        };

        match query_json_path(&json, path) {
            Ok(Some(value)) if is_empty_value(value) => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!("JSON path '{path}' is empty"),
            ),
            Ok(Some(value)) => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
            Ok(None) => {
                AssertionResult::fail(assertion.clone(), format!("JSON path '{path}' not found"))
            }
            Err(e) => AssertionResult::fail(
                assertion.clone(),
                format!("Invalid JSON path '{path}': {e}"),
            ),
        }
    }

    fn check_is_json_array(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match parse_body(assertion, response) {
            Ok(Value::Array(items)) => {
                AssertionResult::pass_with_value(assertion.clone(), format!("{} items", items.len()))
            }
            Ok(other) => AssertionResult::fail_with_value(
                assertion.clone(),
                json_kind(&other),
                format!("Expected a JSON array, got {}", json_kind(&other)),
            ),
            Err(result) => result,
        }
    }

    fn check_array_entry(
        &self,
        assertion: &Assertion,
        response: &ResponseSpec,
        key: &str,
        value: &Value,
        expected: &Map<String, Value>,
    ) -> AssertionResult {
        let items = match parse_body(assertion, response) {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                return AssertionResult::fail(
                    assertion.clone(),
                    format!("Expected a JSON array, got {}", json_kind(&other)),
                );
            }
            Err(result) => return result,
        };

        let Some(entry) = items.iter().find(|item| item.get(key) == Some(value)) else {
            return AssertionResult::fail(
                assertion.clone(),
                format!(
                    "Could not find our test entry with {} {}",
                    key.to_uppercase(),
                    display_value(value)
                ),
            );
        };

        let mismatches: Vec<String> = expected
            .iter()
            .filter(|(field, want)| entry.get(field.as_str()) != Some(*want))
            .map(|(field, want)| {
                let got = entry.get(field.as_str()).map_or_else(
                    || "nothing".to_string(),
                    ToString::to_string,
                );
                format!("{field}: expected {want}, got {got}")
            })
            .collect();

        if mismatches.is_empty() {
            AssertionResult::pass_with_value(assertion.clone(), entry.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                entry.to_string(),
                format!(
                    "Entry with {key} {} does not match ({})",
                    display_value(value),
                    mismatches.join(", ")
                ),
            )
        }
    }
}

/// Parses the body, turning a parse error into a failed result.
fn parse_body(assertion: &Assertion, response: &ResponseSpec) -> Result<Value, AssertionResult> {
    response.json().map_err(|e| {
        AssertionResult::fail_with_value(
            assertion.clone(),
            response.body_preview(),
            format!("Failed to parse body as JSON: {e}"),
        )
    })
}

/// Strings are shown without quotes so ids read naturally in messages.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Query a JSON value using a simple JSONPath-like syntax.
/// Supports: $.field, $.field.nested, $.array[0], $[0].field
fn query_json_path<'a>(json: &'a Value, path: &str) -> Result<Option<&'a Value>, String> {
    let Some(rest) = path.trim().strip_prefix('$') else {
        return Err("JSON path must start with '$'".to_string());
    };

    let mut current = json;
    for segment in split_path_segments(rest) {
        let next = if let Some((name, index)) = parse_array_access(&segment) {
            let base = if name.is_empty() {
                Some(current)
            } else {
                current.get(name)
            };
            let idx: usize = index
                .parse()
                .map_err(|_| format!("Invalid array index: {index}"))?;
            base.and_then(|v| v.get(idx))
        } else {
            current.get(segment.as_str())
        };

        match next {
            Some(value) => current = value,
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parse array access like "field[0]" into ("field", "0").
fn parse_array_access(segment: &str) -> Option<(&str, &str)> {
    let bracket_start = segment.find('[')?;
    let inner = segment[bracket_start + 1..].strip_suffix(']')?;
    Some((&segment[..bracket_start], inner))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn create_response(status: u16, body: &str, headers: HashMap<String, String>) -> ResponseSpec {
        ResponseSpec::new(status, headers, body.as_bytes(), Duration::from_millis(50))
    }

    fn json_response(status: u16, body: &str) -> ResponseSpec {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        create_response(status, body, headers)
    }

    #[test]
    fn test_status_code_exact() {
        let runner = AssertionRunner::new();
        let response = create_response(200, "", HashMap::new());

        assert!(runner.run_assertion(&Assertion::status(200), &response).passed);

        let result = runner.run_assertion(&Assertion::status(404), &response);
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("200"));
        assert_eq!(
            result.error.as_deref(),
            Some("Expected status 404, got 200 OK (body: )")
        );
    }

    #[test]
    fn test_header_exists() {
        let runner = AssertionRunner::new();
        let mut headers = HashMap::new();
        headers.insert(
            "access-control-allow-methods".to_string(),
            "GET, POST".to_string(),
        );
        let response = create_response(200, "", headers);

        let assertion = Assertion::header_present("Access-Control-Allow-Methods");
        assert!(runner.run_assertion(&assertion, &response).passed);

        let assertion = Assertion::header_present("Access-Control-Allow-Headers");
        let result = runner.run_assertion(&assertion, &response);
        assert!(!result.passed);
        assert_eq!(
            result.error.as_deref(),
            Some("Header 'Access-Control-Allow-Headers' not found")
        );
    }

    #[test]
    fn test_header_value_must_match_exactly() {
        let runner = AssertionRunner::new();
        let mut headers = HashMap::new();
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        let response = create_response(200, "", headers);

        let assertion =
            Assertion::header_equals("access-control-allow-origin", "http://example.com");
        let result = runner.run_assertion(&assertion, &response);
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("*"));
    }

    #[test]
    fn test_json_path() {
        let runner = AssertionRunner::new();
        let response = json_response(200, r#"{"user": {"id": 123, "tags": ["a", "b"]}}"#);

        let assertion = Assertion::json_equals("$.user.id", 123);
        assert!(runner.run_assertion(&assertion, &response).passed);

        let assertion = Assertion::json_equals("$.user.tags[1]", "b");
        assert!(runner.run_assertion(&assertion, &response).passed);

        let assertion = Assertion::json_equals("$.user.id", 456);
        assert!(!runner.run_assertion(&assertion, &response).passed);

        let assertion = Assertion::json_equals("$.user.email", "a@example.com");
        let result = runner.run_assertion(&assertion, &response);
        assert_eq!(
            result.error.as_deref(),
            Some("JSON path '$.user.email' not found")
        );
    }

    #[test]
    fn test_json_path_requires_dollar() {
        let runner = AssertionRunner::new();
        let response = json_response(200, r#"{"message": "Hello World"}"#);

        let result = runner.run_assertion(&Assertion::json_equals("message", "Hello World"), &response);
        assert!(!result.passed);
        assert!(result.error.unwrap().starts_with("Invalid JSON path"));
    }

    #[test]
    fn test_json_path_on_invalid_body_fails() {
        let runner = AssertionRunner::new();
        let response = create_response(200, "<html>oops</html>", HashMap::new());

        let result = runner.run_assertion(&Assertion::json_equals("$.message", "Hello World"), &response);
        assert!(!result.passed);
        assert!(result.error.unwrap().starts_with("Failed to parse body as JSON"));
    }

    #[test]
    fn test_json_path_not_empty() {
        let runner = AssertionRunner::new();
        let response = json_response(200, r#"{"id": "", "timestamp": "2025-01-01T00:00:00", "n": null}"#);

        assert!(!runner.run_assertion(&Assertion::json_not_empty("$.id"), &response).passed);
        assert!(!runner.run_assertion(&Assertion::json_not_empty("$.n"), &response).passed);
        assert!(!runner.run_assertion(&Assertion::json_not_empty("$.missing"), &response).passed);
        assert!(
            runner
                .run_assertion(&Assertion::json_not_empty("$.timestamp"), &response)
                .passed
        );
    }

    #[test]
    fn test_is_json_array() {
        let runner = AssertionRunner::new();

        let result = runner.run_assertion(&Assertion::IsJsonArray, &json_response(200, "[1, 2]"));
        assert!(result.passed);
        assert_eq!(result.actual.as_deref(), Some("2 items"));

        let result = runner.run_assertion(&Assertion::IsJsonArray, &json_response(200, "{}"));
        assert!(!result.passed);
        assert_eq!(
            result.error.as_deref(),
            Some("Expected a JSON array, got an object")
        );
    }

    #[test]
    fn test_array_entry() {
        let runner = AssertionRunner::new();
        let response = json_response(
            200,
            r#"[{"id": "a1", "client_name": "Other"}, {"id": "b2", "client_name": "BitSafe Test Client"}]"#,
        );

        let mut expected = Map::new();
        expected.insert("client_name".to_string(), json!("BitSafe Test Client"));
        let found = Assertion::ArrayEntry {
            key: "id".to_string(),
            value: json!("b2"),
            expected: expected.clone(),
        };
        assert!(runner.run_assertion(&found, &response).passed);

        let missing = Assertion::ArrayEntry {
            key: "id".to_string(),
            value: json!("zz"),
            expected: expected.clone(),
        };
        let result = runner.run_assertion(&missing, &response);
        assert!(!result.passed);
        assert_eq!(
            result.error.as_deref(),
            Some("Could not find our test entry with ID zz")
        );

        let mismatched = Assertion::ArrayEntry {
            key: "id".to_string(),
            value: json!("a1"),
            expected,
        };
        let result = runner.run_assertion(&mismatched, &response);
        assert!(!result.passed);
        assert_eq!(
            result.error.as_deref(),
            Some(
                r#"Entry with id a1 does not match (client_name: expected "BitSafe Test Client", got "Other")"#
            )
        );
    }

    #[test]
    fn test_run_keeps_order() {
        let runner = AssertionRunner::new();
        let response = json_response(200, r#"{"message": "Hello World"}"#);
        let results = runner.run(
            &[
                Assertion::status(200),
                Assertion::json_equals("$.message", "Hello World"),
                Assertion::status(201),
            ],
            &response,
        );

        let passed: Vec<bool> = results.iter().map(|r| r.passed).collect();
        assert_eq!(passed, vec![true, true, false]);
    }

    #[test]
    fn test_query_root_and_index() {
        let json = json!([{"id": 1}]);
        assert_eq!(query_json_path(&json, "$").unwrap(), Some(&json));
        assert_eq!(query_json_path(&json, "$[0].id").unwrap(), Some(&json!(1)));
        assert_eq!(query_json_path(&json, "$[3]").unwrap(), None);
        assert!(query_json_path(&json, "$[x]").is_err());
    }
}
