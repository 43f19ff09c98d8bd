//! Editor operations, one per API endpoint.
//!
//! Everything here is synchronous filesystem work. The HTTP layer moves
//! calls onto the blocking pool and maps the returned [`EditorError`] to a
//! response.

use serde_json::Value;

use super::error::{EditorError, Result};
use super::models::CharacterData;
use super::publisher::{PublishReport, Publisher};
use super::registry::QuestFiles;
use super::store;
use super::validation;
use crate::config::Paths;

#[derive(Debug, Clone)]
pub struct QuestEditor {
    paths: Paths,
    quest_files: QuestFiles,
}

impl QuestEditor {
    pub fn new(paths: Paths) -> Self {
        let quest_files = QuestFiles::new(&paths.data_dir);
        Self { paths, quest_files }
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn list_quest_files(&self) -> Result<Vec<String>> {
        self.quest_files.list()
    }

    /// Load a quest file exactly as stored.
    pub fn load_quests(&self, file: Option<&str>) -> Result<Value> {
        let (name, path) = self.quest_files.resolve(file)?;
        if !path.exists() {
            return Err(EditorError::not_found(format!("Quest file not found: {name}")));
        }
        store::read_json(&path)?.ok_or_else(|| EditorError::not_found("Quests file not found"))
    }

    /// Validate and store a quest list. Returns the file name written.
    pub fn save_quests(&self, file: Option<&str>, body: &[u8]) -> Result<String> {
        let (name, path) = self.quest_files.resolve(file)?;
        let data = validation::parse_body(body)?;
        let quests = validation::validate_quests(&data)?;

        store::write_json(&path, &data)?;
        tracing::info!(file = %name, quests = quests.len(), "Saved quests");
        Ok(name)
    }

    /// Load character data, or the empty document if none is stored yet.
    pub fn load_character(&self) -> Result<Value> {
        Ok(store::read_json(&self.paths.character_file)?
            .unwrap_or_else(CharacterData::empty_document))
    }

    pub fn save_character(&self, body: &[u8]) -> Result<CharacterData> {
        let data = validation::parse_body(body)?;
        let character = validation::validate_character(&data)?;

        store::write_json(&self.paths.character_file, &data)?;
        tracing::info!(
            traits = character.traits.len(),
            curses = character.curses.len(),
            "Saved character data"
        );
        Ok(character)
    }

    pub fn publish(&self, file: Option<&str>) -> Result<PublishReport> {
        Publisher::new(&self.paths).publish(file)
    }
}
