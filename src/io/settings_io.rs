use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::paths;
use crate::model::Settings;

/// Error type for loading settings.toml
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read settings from `path`. A missing file yields the defaults; a present
/// but broken file is an error so typos are not silently ignored.
pub fn read_settings(path: &Path) -> Result<Settings, SettingsError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let mut settings: Settings = toml::from_str(&text).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    settings.tasks_file = settings.tasks_file.as_deref().map(paths::expand_home);
    settings.ui.background = settings.ui.background.as_deref().map(paths::expand_home);
    Ok(settings)
}

/// Resolve the tasks file: explicit override, then settings, then the default.
pub fn resolve_tasks_path(explicit: Option<&Path>, settings: &Settings) -> PathBuf {
    explicit
        .map(paths::expand_home)
        .or_else(|| settings.tasks_file.clone())
        .unwrap_or_else(paths::default_tasks_path)
}
