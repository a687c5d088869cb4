use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::geometry::ListMetrics;

/// Contents of settings.toml. Every field has a default, so an empty or
/// missing file is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Where tasks are stored. Defaults to the platform data directory.
    #[serde(default)]
    pub tasks_file: Option<PathBuf>,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub list: ListConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Draw task text in bold
    #[serde(default)]
    pub bold: bool,
    /// Text file tiled behind the list (the backdrop)
    #[serde(default)]
    pub background: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot, e.g. `text = "#00FF7F"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            bold: false,
            background: None,
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_row_height")]
    pub row_height: u16,
    #[serde(default)]
    pub drag_threshold: u16,
    #[serde(default = "default_one")]
    pub auto_scroll_margin: u16,
    #[serde(default = "default_auto_scroll_interval_ms")]
    pub auto_scroll_interval_ms: u64,
    #[serde(default = "default_one")]
    pub wheel_step: u16,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            row_height: default_row_height(),
            drag_threshold: 0,
            auto_scroll_margin: default_one(),
            auto_scroll_interval_ms: default_auto_scroll_interval_ms(),
            wheel_step: default_one(),
        }
    }
}

/// Rows taller than this stop looking like a list in a terminal.
const MAX_ROW_HEIGHT: u16 = 5;

impl ListConfig {
    pub fn metrics(&self) -> ListMetrics {
        ListMetrics {
            row_height: self.row_height.clamp(1, MAX_ROW_HEIGHT),
            drag_threshold: self.drag_threshold,
            auto_scroll_margin: self.auto_scroll_margin,
            auto_scroll_interval: Duration::from_millis(self.auto_scroll_interval_ms.max(10)),
            wheel_step: self.wheel_step.max(1),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_one() -> u16 {
    1
}

fn default_row_height() -> u16 {
    1
}

fn default_auto_scroll_interval_ms() -> u64 {
    100
}
