//! CLI configuration management.

use skinsystem_store::StorageSettings;
use std::path::{Path, PathBuf};

/// Default configuration file path.
pub fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let dirs = directories::ProjectDirs::from("net", "skinsystem", "skinsystem")
        .ok_or("Could not determine config directory")?;
    Ok(dirs.config_dir().join("storage.toml"))
}

/// Load storage settings from `path` or the default location, then the
/// environment.
pub fn load(path: Option<&Path>) -> Result<StorageSettings, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    Ok(StorageSettings::load(Some(&path))?)
}
