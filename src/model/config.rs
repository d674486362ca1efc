use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from taskrow.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    /// Tasks to seed the list with, in order
    #[serde(default)]
    pub tasks: Vec<TaskSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSeed {
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot (e.g. `done = "#1DB863"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Glyph overrides keyed by name: check, edit, cancel, trash
    #[serde(default)]
    pub glyphs: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
            glyphs: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
