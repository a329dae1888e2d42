//! Where the config file lives, and writing the first one.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use quill_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

const APP_DIR: &str = "quill";
const FILE_NAME: &str = "config.toml";

/// `<platform config dir>/quill/config.toml`.
pub(super) fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))
}

/// Write the commented template to `path`, creating parent directories.
///
/// An existing file is left untouched.
pub(super) fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_failure = |what: &str, e: std::io::Error| {
        ConfigError::ParseError(format!("failed to {what} {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_failure("create directory for", e))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(()),
        Err(e) => return Err(io_failure("create", e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_failure("write", e))?;

    info!(path = %path.display(), "Created default config");
    Ok(())
}
