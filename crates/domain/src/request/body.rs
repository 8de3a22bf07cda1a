//! HTTP Request body types

use serde::Serialize;

use crate::error::{DomainError, DomainResult};

/// HTTP request body with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    /// Content type sent with the body, `None` for an empty body
    pub content_type: Option<String>,
    /// The body content as a string
    pub content: String,
}

impl RequestBody {
    /// Creates an empty body.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            content_type: None,
            content: String::new(),
        }
    }

    /// Creates a JSON body from raw text.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self {
            content_type: Some("application/json".to_string()),
            content: content.into(),
        }
    }

    /// Serializes a value into a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    pub fn from_serializable<T: Serialize>(value: &T) -> DomainResult<Self> {
        let content =
            serde_json::to_string(value).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        Ok(Self::json(content))
    }

    /// Returns whether the body is empty.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // String::is_empty is not const
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the content type if applicable.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}
