use std::path::{Path, PathBuf};

const APP_DIR: &str = "tasklist";

fn config_root() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Directory holding tasks.json and the log file.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

pub fn default_settings_path() -> PathBuf {
    config_root().join("settings.toml")
}

pub fn default_tasks_path() -> PathBuf {
    data_dir().join("tasks.json")
}

pub fn log_path() -> PathBuf {
    data_dir().join("tasklist.log")
}

/// Expand a leading `~/` to the home directory. Other paths are returned as is.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
