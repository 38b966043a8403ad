//! Request queue configuration.

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`QueueConfig::max_concurrent`].
pub const ENV_MAX_CONCURRENT: &str = "REQUEST_QUEUE_MAX_CONCURRENT";
/// Environment variable overriding [`QueueConfig::retries`].
pub const ENV_RETRIES: &str = "REQUEST_QUEUE_RETRIES";

const DEFAULT_MAX_CONCURRENT: usize = 3;
const DEFAULT_RETRIES: u32 = 3;

/// Limits fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Maximum tasks holding a slot at once.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Retries after the first attempt of each task.
    #[serde(default = "default_retries")]
    pub retries: u32,
}

const fn default_max_concurrent() -> usize {
    DEFAULT_MAX_CONCURRENT
}

const fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            retries: DEFAULT_RETRIES,
        }
    }
}

impl QueueConfig {
    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent == 0 {
            return Err("max_concurrent must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a description of the parse or validation failure.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the process environment, loading a `.env`
    /// file first if one exists. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns a description of an unparsable variable or a validation failure.
    pub fn from_env() -> Result<Self, String> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("failed to load .env file: {e}");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(ENV_MAX_CONCURRENT) {
            cfg.max_concurrent = raw
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_MAX_CONCURRENT}={raw:?}: {e}"))?;
        }
        if let Some(raw) = lookup(ENV_RETRIES) {
            cfg.retries = raw
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_RETRIES}={raw:?}: {e}"))?;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
