//! Probe configuration loading.
//!
//! The backend base URL is read from `REACT_APP_BACKEND_URL`. Values come
//! from the process environment and, failing that, from an optional
//! dotenv file (`export` prefixes, quotes and trailing comments allowed).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use apiprobe_domain::{DomainError, ProbeConfig};
use config::{Config, Environment};
use thiserror::Error;
use tracing::debug;

/// Variable holding the backend base URL.
pub const BACKEND_URL_VAR: &str = "REACT_APP_BACKEND_URL";

/// Variable overriding the location of the env file.
pub const ENV_FILE_VAR: &str = "APIPROBE_ENV_FILE";

/// Env file read when [`ENV_FILE_VAR`] is unset.
pub const DEFAULT_ENV_FILE: &str = "/app/frontend/.env";

/// Errors that can occur while resolving the probe configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No (or an empty) base URL was found in any source.
    #[error("{BACKEND_URL_VAR} not found in environment variables")]
    MissingBaseUrl,

    /// The base URL was found but is not usable.
    #[error("invalid {BACKEND_URL_VAR}: {0}")]
    InvalidBaseUrl(#[from] DomainError),

    /// A configuration source could not be read or parsed.
    #[error("failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),

    /// The env file exists but is not valid dotenv syntax.
    #[error("failed to read env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// Resolves a [`ProbeConfig`] from the env file and the environment.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    env_file: Option<PathBuf>,
    environment: Option<HashMap<String, String>>,
}

impl SettingsLoader {
    /// Creates a loader reading the env file named by [`ENV_FILE_VAR`]
    /// (or [`DEFAULT_ENV_FILE`]) and the process environment.
    #[must_use]
    pub fn new() -> Self {
        let env_file = std::env::var(ENV_FILE_VAR)
            .map_or_else(|_| PathBuf::from(DEFAULT_ENV_FILE), PathBuf::from);
        Self {
            env_file: Some(env_file),
            environment: None,
        }
    }

    /// Reads the given env file instead of the default one.
    #[must_use]
    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Skips the env file entirely.
    #[must_use]
    pub fn without_env_file(mut self) -> Self {
        self.env_file = None;
        self
    }

    /// Uses the given variables in place of the process environment.
    #[must_use]
    pub fn with_environment(mut self, vars: HashMap<String, String>) -> Self {
        self.environment = Some(vars);
        self
    }

    /// Resolves the configuration.
    ///
    /// The environment is consulted first; the env file only when the
    /// environment has no non-empty value. A missing env file is not an
    /// error; a missing base URL is.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingBaseUrl`] when no source provides a
    /// non-empty value, [`ConfigError::InvalidBaseUrl`] when the value is
    /// not an absolute http(s) URL, and [`ConfigError::EnvFile`] when the
    /// env file exists but cannot be parsed.
    pub fn load(&self) -> Result<ProbeConfig, ConfigError> {
        let environment = vars_config(self.environment.clone())?;

        let mut base_url = lookup(&environment, BACKEND_URL_VAR)?;
        if base_url.is_none()
            && let Some(path) = &self.env_file
            && let Some(vars) = read_env_file(path)?
        {
            base_url = lookup(&vars_config(Some(vars))?, BACKEND_URL_VAR)?;
        }

        let base_url = base_url.ok_or(ConfigError::MissingBaseUrl)?;
        let config = ProbeConfig::new(&base_url)?;
        debug!(base_url = config.base_url(), "configuration resolved");
        Ok(config)
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a config from a set of variables; `None` reads the process
/// environment.
fn vars_config(vars: Option<HashMap<String, String>>) -> Result<Config, ConfigError> {
    Ok(Config::builder()
        .add_source(Environment::default().source(vars))
        .build()?)
}

/// Parses a dotenv file. A missing file yields `None`.
fn read_env_file(path: &Path) -> Result<Option<HashMap<String, String>>, ConfigError> {
    debug!(path = %path.display(), "reading env file");
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let vars = entries.collect::<Result<HashMap<_, _>, _>>()?;
    Ok(Some(vars))
}

/// Reads a non-empty string key, accepting it in either the lowercased form
/// sources may normalise to or as written.
fn lookup(settings: &Config, key: &str) -> Result<Option<String>, ConfigError> {
    for candidate in [key.to_lowercase(), key.to_string()] {
        match settings.get_string(&candidate) {
            Ok(value) if value.trim().is_empty() => {}
            Ok(value) => return Ok(Some(value)),
            Err(config::ConfigError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(None)
}
