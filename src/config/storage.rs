//! Persistence for the settings file.

use super::ConfigFile;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Settings file used when `--config-file` is not given
pub const DEFAULT_CONFIG_FILE: &str = "./cv-pull-request.toml";

/// Load the settings file.
///
/// Returns an empty `ConfigFile` if the file doesn't exist. A file that
/// exists but cannot be read or parsed is an error, so a later save never
/// overwrites a file the user is still editing.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        debug!(path = %path.display(), "settings file not found, using defaults");
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let file: ConfigFile = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    Ok(file)
}

/// Save the settings file.
///
/// Creates the parent directory if it doesn't exist.
pub fn save_config(path: &Path, file: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir)
            .map_err(|e| Error::Config(format!("failed to create {}: {e}", dir.display())))?;
    }

    let content = toml::to_string_pretty(file)
        .map_err(|e| Error::Config(format!("failed to serialize settings: {e}")))?;

    let content_with_header = format!(
        "# cv-pull-request settings\n# Rewritten after every run - comments will not be kept\n\n{content}"
    );

    fs::write(path, content_with_header)
        .map_err(|e| Error::Config(format!("failed to write {}: {e}", path.display())))?;

    debug!(path = %path.display(), "saved settings");
    Ok(())
}
