//! Probe configuration value.

use url::Url;

use crate::error::{DomainError, DomainResult};

/// Path segment under which the backend mounts its API.
pub const API_PREFIX: &str = "/api";

/// Validated configuration for a probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    base_url: String,
}

impl ProbeConfig {
    /// Validates a base URL such as `https://backend.example.com`.
    ///
    /// Surrounding whitespace and trailing slashes are removed.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the value is empty, does not
    /// parse, or is not an `http`/`https` URL.
    pub fn new(base_url: &str) -> DomainResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(DomainError::InvalidUrl("base URL is empty".to_string()));
        }

        let parsed =
            Url::parse(trimmed).map_err(|e| DomainError::InvalidUrl(format!("{e}: {trimmed}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DomainError::InvalidUrl(format!(
                "unsupported scheme '{}': {trimmed}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// The configured base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The API root, `{base}/api`.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("{}{API_PREFIX}", self.base_url)
    }

    /// Absolute URL of an API endpoint; `path` starts with `/`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_url())
    }
}
