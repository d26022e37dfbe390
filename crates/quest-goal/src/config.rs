// config.rs — Quest configuration.
//
// QuestConfig determines where a project keeps its quest state: the save
// file and the activity history. `for_project()` gives the standard
// `.quest/` layout; `load()` applies overrides from `.quest/quest.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Where a project's quest lives on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestConfig {
    /// Root directory of the project.
    pub project_root: PathBuf,

    /// Save file holding score, level and goals.
    pub save_file: PathBuf,

    /// Append-only JSONL activity history.
    pub events_log: PathBuf,

    /// Whether the CLI appends to `events_log`.
    pub record_history: bool,
}

/// Optional overrides read from `.quest/quest.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    save_file: Option<PathBuf>,
    events_log: Option<PathBuf>,
    #[serde(default = "default_record_history")]
    record_history: bool,
}

fn default_record_history() -> bool {
    true
}

impl QuestConfig {
    /// Create a config with the standard `.quest/` layout for a project.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let root = project_root.as_ref().to_path_buf();
        let quest_dir = root.join(".quest");
        Self {
            project_root: root,
            save_file: quest_dir.join("goals.txt"),
            events_log: quest_dir.join("events.jsonl"),
            record_history: true,
        }
    }

    /// Path of the optional config file for a project.
    pub fn config_path(project_root: impl AsRef<Path>) -> PathBuf {
        project_root.as_ref().join(".quest").join("quest.toml")
    }

    /// Standard layout plus any overrides from `.quest/quest.toml`.
    ///
    /// A missing config file is not an error. Relative paths in the file
    /// resolve against the project root.
    pub fn load(project_root: impl AsRef<Path>) -> Result<Self, GoalError> {
        let root = project_root.as_ref();
        let mut config = Self::for_project(root);
        let path = Self::config_path(root);
        if !path.exists() {
            return Ok(config);
        }

        let content = fs::read_to_string(&path).map_err(|source| GoalError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| GoalError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if let Some(save_file) = file.save_file {
            config.save_file = root.join(save_file);
        }
        if let Some(events_log) = file.events_log {
            config.events_log = root.join(events_log);
        }
        config.record_history = file.record_history;
        tracing::debug!(path = %path.display(), "loaded quest config");
        Ok(config)
    }
}
