//! Response assertions.
//!
//! This module provides the types a scenario uses to describe what it
//! expects from an HTTP response, and the result of checking each one.

use serde_json::{Map, Value};

/// A test assertion to run against a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Assertion {
    /// Check response status code.
    StatusCode {
        /// Expected status code.
        expected: u16,
    },
    /// Check header exists and optionally its value.
    HeaderExists {
        /// Header name (case-insensitive).
        name: String,
        /// Optional expected value, compared exactly.
        value: Option<String>,
    },
    /// Check the JSON value at a path.
    JsonPath {
        /// JSONPath expression (e.g., "$.data.id").
        path: String,
        /// Expected value (as JSON).
        expected: Value,
    },
    /// Check JSON path exists and holds a non-empty value.
    ///
    /// `null`, `""`, `[]` and `{}` count as empty.
    JsonPathNotEmpty {
        /// JSONPath expression.
        path: String,
    },
    /// Check body is a JSON array.
    IsJsonArray,
    /// Check a JSON array body contains an element identified by `key`,
    /// and that the element carries the `expected` fields.
    ArrayEntry {
        /// Field used to find the element (e.g., "id").
        key: String,
        /// Value the identifying field must hold.
        value: Value,
        /// Fields the found element must hold.
        expected: Map<String, Value>,
    },
}

impl Assertion {
    /// Status code must equal `code`.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::StatusCode { expected: code }
    }

    /// Header `name` must be present.
    #[must_use]
    pub fn header_present(name: impl Into<String>) -> Self {
        Self::HeaderExists {
            name: name.into(),
            value: None,
        }
    }

    /// Header `name` must be present and equal `value`.
    #[must_use]
    pub fn header_equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::HeaderExists {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// JSON value at `path` must equal `expected`.
    #[must_use]
    pub fn json_equals(path: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self::JsonPath {
            path: path.into(),
            expected: expected.into(),
        }
    }

    /// JSON value at `path` must exist and be non-empty.
    #[must_use]
    pub fn json_not_empty(path: impl Into<String>) -> Self {
        Self::JsonPathNotEmpty { path: path.into() }
    }

    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusCode { expected } => format!("Status code {expected}"),
            Self::HeaderExists {
                name,
                value: Some(v),
            } => format!("Header '{name}' equals '{v}'"),
            Self::HeaderExists { name, value: None } => format!("Header '{name}' exists"),
            Self::JsonPath { path, expected } => format!("JSON {path} equals {expected}"),
            Self::JsonPathNotEmpty { path } => format!("JSON {path} is not empty"),
            Self::IsJsonArray => "Body is a JSON array".to_string(),
            Self::ArrayEntry { key, value, .. } => {
                format!("Array contains entry with {key} = {value}")
            }
        }
    }
}

/// Result of running a single assertion.
#[derive(Debug, Clone)]
pub struct AssertionResult {
    /// The assertion that was run.
    pub assertion: Assertion,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    pub actual: Option<String>,
    /// Error message if failed.
    pub error: Option<String>,
}

impl AssertionResult {
    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(assertion: Assertion, actual: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(assertion: Assertion, error: impl Into<String>) -> Self {
        Self {
            assertion,
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed result with actual value.
    #[must_use]
    pub fn fail_with_value(
        assertion: Assertion,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            assertion,
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }

    /// Failure message, falling back to the assertion description.
    #[must_use]
    pub fn message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| self.assertion.description())
    }
}
