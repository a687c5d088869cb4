use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::io::recovery::{RecoveryEntry, atomic_write, log_recovery};
use crate::model::TaskStore;

/// Error type for reading and writing the tasks file
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not encode tasks for {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Tasks persisted as a pretty-printed JSON array of strings.
#[derive(Debug, Clone)]
pub struct JsonTaskStore {
    path: PathBuf,
}

impl JsonTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonTaskStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the tasks file. A missing file is an empty list.
    pub fn read(&self) -> Result<Vec<String>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|e| StoreError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    pub fn write(&self, tasks: &[String]) -> Result<(), StoreError> {
        let write_err = |e: io::Error| StoreError::Write {
            path: self.path.clone(),
            source: e,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let mut content =
            serde_json::to_string_pretty(tasks).map_err(|e| StoreError::Serialize {
                path: self.path.clone(),
                source: e,
            })?;
        content.push('\n');
        atomic_write(&self.path, content.as_bytes()).map_err(write_err)
    }
}

impl TaskStore for JsonTaskStore {
    fn load(&mut self) -> Vec<String> {
        match self.read() {
            Ok(tasks) => {
                info!(path = %self.path.display(), count = tasks.len(), "tasks loaded");
                tasks
            }
            Err(e) => {
                warn!(error = %e, "starting with an empty list");
                // Keep the unreadable file's text before the next save replaces it.
                if let StoreError::Parse { .. } = e
                    && let Ok(raw) = fs::read_to_string(&self.path)
                {
                    log_recovery(&self.path, &RecoveryEntry::raw(e.to_string(), raw));
                }
                Vec::new()
            }
        }
    }

    fn save(&mut self, tasks: &[String]) {
        if let Err(e) = self.write(tasks) {
            warn!(error = %e, "tasks not saved");
            log_recovery(&self.path, &RecoveryEntry::unsaved(e.to_string(), tasks));
        }
    }
}
