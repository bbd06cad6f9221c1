use std::env;

use crate::error::ConfigError;

/// Trait for types that can retrieve their configuration key from environment
/// variables, checking the process environment first and then a `.env` file.
pub trait KeyFromEnv {
    /// The environment variable name for this client's API key.
    const KEY_NAME: &'static str;

    /// Find the API key. A present-but-blank value counts as absent.
    fn find_key() -> Option<String> {
        // Load .env silently if there is one
        let _ = dotenvy::dotenv();

        env::var(Self::KEY_NAME)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Find the API key or fail with a startup configuration error. The
    /// caller is expected to surface this before any quiz functionality runs.
    fn require_key() -> Result<String, ConfigError> {
        Self::find_key().ok_or(ConfigError::MissingApiKey {
            var: Self::KEY_NAME,
        })
    }
}
