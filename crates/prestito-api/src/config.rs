//! Configuration loader.
//!
//! Reads `config.toml` and deserializes it into
//! [`prestito_types::config::BotConfig`]. Falls back to defaults when the
//! file is missing or malformed -- the bot must come up with an empty
//! working directory. The transport API token is environment-provided
//! (`PRESTITO_API_TOKEN`) and never read from the file.

use prestito_types::config::BotConfig;
use secrecy::SecretString;

use std::path::Path;

/// Environment variable holding the transport bearer token.
pub const API_TOKEN_ENV: &str = "PRESTITO_API_TOKEN";

/// Load configuration from `path`.
///
/// - Missing file: returns [`BotConfig::default()`] quietly.
/// - Unreadable or unparsable file: logs a warning, returns the default.
pub async fn load_config(path: &Path) -> BotConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("no config file at {}, using defaults", path.display());
            return BotConfig::default();
        }
        Err(err) => {
            tracing::warn!("failed to read {}: {err}, using defaults", path.display());
            return BotConfig::default();
        }
    };

    match toml::from_str::<BotConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("failed to parse {}: {err}, using defaults", path.display());
            BotConfig::default()
        }
    }
}

/// Read the transport token from the environment, if configured.
pub fn api_token_from_env() -> Option<SecretString> {
    std::env::var(API_TOKEN_ENV)
        .ok()
        .filter(|token| !token.is_empty())
        .map(SecretString::from)
}
