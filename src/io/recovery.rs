use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tempfile::NamedTempFile;
use tracing::warn;

/// Header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
# tasklist recovery log
# Task lists that could not be saved normally are appended here.
# Copy an entry's JSON array back into the tasks file to restore it.
# Safe to delete once you have what you need.

";

/// Data that could not go where it belonged.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub reason: String,
    pub body: String,
}

impl RecoveryEntry {
    /// A task list that failed to save, kept as a JSON array.
    pub fn unsaved(reason: impl Into<String>, tasks: &[String]) -> Self {
        let body = serde_json::to_string_pretty(tasks).unwrap_or_else(|_| tasks.join("\n"));
        RecoveryEntry::raw(reason, body)
    }

    /// Arbitrary text, e.g. a tasks file that no longer parses.
    pub fn raw(reason: impl Into<String>, body: impl Into<String>) -> Self {
        RecoveryEntry {
            timestamp: Utc::now(),
            reason: reason.into(),
            body: body.into(),
        }
    }

    fn to_text(&self) -> String {
        let mut out = format!(
            "## {} {}\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.reason
        );
        out.push_str(&self.body);
        if !self.body.ends_with('\n') {
            out.push('\n');
        }
        out.push('\n');
        out
    }
}

/// Recovery log sitting next to the tasks file: `tasks.json.recovery.log`.
pub fn recovery_log_path(tasks_path: &Path) -> PathBuf {
    let mut name = tasks_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "tasks.json".into());
    name.push(".recovery.log");
    tasks_path.with_file_name(name)
}

/// Append an entry. Failures are logged and otherwise ignored.
pub fn log_recovery(tasks_path: &Path, entry: &RecoveryEntry) {
    let path = recovery_log_path(tasks_path);
    if let Err(e) = append_entry(&path, entry) {
        warn!(path = %path.display(), error = %e, "could not write recovery log");
    }
}

fn append_entry(path: &Path, entry: &RecoveryEntry) -> io::Result<()> {
    let needs_header = std::fs::metadata(path).map_or(true, |m| m.len() == 0);
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_text().as_bytes())
}

/// Replace `path` with `content` via a temp file in the same directory and
/// a rename, so readers never see a half-written file.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
