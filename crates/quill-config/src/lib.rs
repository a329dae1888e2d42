//! Quill configuration system.
//!
//! TOML-based configuration with full validation. All config sections use
//! defaults so partial configs work out of the box. The API credential is
//! resolved separately from the environment, see [`resolve_api_key`].

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ApiConfig, LogLevel, QuillConfig, UiConfig};

use std::path::Path;

use quill_common::ConfigError;

/// Load and validate the config.
///
/// Reads `path` when given, otherwise the platform default location
/// (created with a commented template on first run).
pub fn load_config(path: Option<&Path>) -> Result<QuillConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    tracing::info!(model = %config.api.model, "Config loaded");
    Ok(config)
}

/// Read the API credential named by `api.api_key_env` from the environment.
///
/// Blank values count as missing.
pub fn resolve_api_key(api: &ApiConfig) -> Result<String, ConfigError> {
    match std::env::var(&api.api_key_env) {
        Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(ConfigError::MissingCredential(api.api_key_env.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\ntemperature = 9.0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_config_reads_override_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn resolve_api_key_missing_and_present() {
        let api = ApiConfig {
            api_key_env: "QUILL_TEST_KEY_UNSET_7F3A".into(),
            ..ApiConfig::default()
        };
        let err = resolve_api_key(&api).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(ref v) if v == "QUILL_TEST_KEY_UNSET_7F3A"));

        let api = ApiConfig {
            api_key_env: "PATH".into(),
            ..ApiConfig::default()
        };
        assert!(resolve_api_key(&api).is_ok());
    }
}
