//! Reading `config.toml` into a [`QuillConfig`].
//!
//! Nothing here validates values; [`crate::load_config`] does that once
//! after the file is parsed.

use std::io::ErrorKind;
use std::path::Path;

use quill_common::ConfigError;
use tracing::debug;

use super::paths::{create_default_config, default_config_path};
use crate::schema::QuillConfig;

/// Parse TOML text. Missing sections and fields take their defaults.
pub(super) fn parse_config(content: &str) -> Result<QuillConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))
}

/// Read and parse the config file at `path`.
pub fn load_from_path(path: &Path) -> Result<QuillConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to read {}: {e}",
                path.display()
            )));
        }
    };

    let config = parse_config(&content)?;
    debug!(path = %path.display(), "Config file parsed");
    Ok(config)
}

/// Load `config.toml` from the platform config directory.
///
/// A missing file is replaced by the commented template and the defaults
/// are returned.
pub fn load_default() -> Result<QuillConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(&path)?;
            Ok(QuillConfig::default())
        }
        other => other,
    }
}
