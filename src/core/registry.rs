//! Quest File Registry
//!
//! Discovers quest documents in the data directory and resolves
//! client-supplied names to paths inside it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::error::{EditorError, Result};
use super::models::DEFAULT_QUEST_FILE;

/// Reject names that could point outside the data directory.
///
/// Empty names are refused as well: they would resolve to the directory
/// itself.
pub fn check_file_name(name: &str) -> Result<&str> {
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(EditorError::InvalidFileName(name.to_string()));
    }
    Ok(name)
}

/// Whether a file name follows the quest naming convention.
pub fn is_quest_file(name: &str) -> bool {
    name.ends_with(".json") && (name == DEFAULT_QUEST_FILE || name.starts_with("quest"))
}

/// View over the quest files in one data directory.
#[derive(Debug, Clone)]
pub struct QuestFiles {
    data_dir: PathBuf,
}

impl QuestFiles {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// List quest files, `quests.json` first and the rest in name order.
    ///
    /// Subdirectories are not searched. A missing data directory lists as
    /// empty.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // Non-UTF-8 names can't be requested back through the API anyway.
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if is_quest_file(&name) {
                names.push(name);
            }
        }

        names.sort_by(|a, b| {
            (a != DEFAULT_QUEST_FILE, a.as_str()).cmp(&(b != DEFAULT_QUEST_FILE, b.as_str()))
        });
        Ok(names)
    }

    /// Resolve a requested name (default `quests.json`) to a path in the
    /// data directory.
    pub fn resolve(&self, name: Option<&str>) -> Result<(String, PathBuf)> {
        let name = check_file_name(name.unwrap_or(DEFAULT_QUEST_FILE))?;
        Ok((name.to_string(), self.data_dir.join(name)))
    }
}
