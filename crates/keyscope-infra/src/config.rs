//! Configuration loader for keyscope.
//!
//! Reads `config.toml` (an explicit path, or the config directory,
//! `~/.keyscope/` by default) and deserializes it into [`ConsoleConfig`].
//! Falls back to defaults when the file is missing or malformed, then applies
//! the `REDIS_*` environment overrides.

use std::path::{Path, PathBuf};

use keyscope_types::config::ConsoleConfig;

/// Resolve the config directory.
///
/// Priority: `KEYSCOPE_CONFIG_DIR`, then `~/.keyscope`, then `./.keyscope`.
pub fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("KEYSCOPE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".keyscope");
    }

    PathBuf::from(".keyscope")
}

/// Load configuration from `path`, or from `{config_dir}/config.toml` when
/// no path is given, and apply environment overrides.
pub async fn load_config(path: Option<&Path>) -> ConsoleConfig {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => resolve_config_dir().join("config.toml"),
    };

    let mut config = read_config_file(&config_path).await;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config
}

/// Read and parse a config file.
///
/// - If the file does not exist, returns [`ConsoleConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
pub async fn read_config_file(config_path: &Path) -> ConsoleConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ConsoleConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ConsoleConfig::default();
        }
    };

    match toml::from_str::<ConsoleConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ConsoleConfig::default()
        }
    }
}

/// Apply `REDIS_URL`, `REDIS_HOST`, `REDIS_PORT`, `REDIS_USERNAME` and
/// `REDIS_PASSWORD` on top of the file settings. Empty values are ignored.
pub fn apply_env_overrides(config: &mut ConsoleConfig, lookup: impl Fn(&str) -> Option<String>) {
    let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

    if let Some(url) = var("REDIS_URL") {
        config.store.url = url;
    }
    if let Some(host) = var("REDIS_HOST") {
        config.store.host = Some(host);
    }
    if let Some(port) = var("REDIS_PORT") {
        match port.parse::<u16>() {
            Ok(port) => config.store.port = Some(port),
            Err(err) => tracing::warn!("Ignoring REDIS_PORT={port}: {err}"),
        }
    }
    if let Some(username) = var("REDIS_USERNAME") {
        config.store.username = Some(username);
    }
    if let Some(password) = var("REDIS_PASSWORD") {
        config.store.password = Some(password);
    }
}
