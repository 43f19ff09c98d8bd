//! Publisher
//!
//! Builds the standalone guide page by splicing the current quest and
//! character documents into the HTML template. All inputs are read and the
//! page text is fully built before anything is written.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use super::error::{EditorError, Result};
use super::models::CharacterData;
use super::registry::QuestFiles;
use super::store;
use crate::config::Paths;

pub const QUESTS_PLACEHOLDER: &str = "/* {{QUESTS_DATA}} */";
pub const CHARACTER_PLACEHOLDER: &str = "/* {{CHARACTER_DATA}} */";

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    /// The page that was written.
    pub output: PathBuf,
    /// Quest file the page was built from.
    pub source: String,
    /// Previous page content, if there was one to back up.
    pub backup: Option<PathBuf>,
}

pub struct Publisher<'a> {
    paths: &'a Paths,
    quest_files: QuestFiles,
}

impl<'a> Publisher<'a> {
    pub fn new(paths: &'a Paths) -> Self {
        Self {
            paths,
            quest_files: QuestFiles::new(&paths.data_dir),
        }
    }

    /// Render the page from `quest_file` (default `quests.json`) and write it.
    pub fn publish(&self, quest_file: Option<&str>) -> Result<PublishReport> {
        let (source, quest_path) = self.quest_files.resolve(quest_file)?;

        if !quest_path.exists() {
            return Err(EditorError::not_found(format!(
                "Quest file not found: {source}"
            )));
        }
        if !self.paths.template_file.exists() {
            return Err(EditorError::not_found("Template file not found"));
        }

        let template = fs::read_to_string(&self.paths.template_file)?;
        let quests = store::read_json(&quest_path)?
            .ok_or_else(|| EditorError::not_found("Quests data not found"))?;
        let character = store::read_json(&self.paths.character_file)?
            .unwrap_or_else(CharacterData::empty_document);

        let page = render(&template, &quests, &character)?;

        let backup = store::snapshot(&self.paths.output_file, "html")?;
        fs::write(&self.paths.output_file, page)?;

        tracing::info!(
            source = %source,
            output = %self.paths.output_file.display(),
            backup = ?backup,
            "Published guide page"
        );

        Ok(PublishReport {
            output: self.paths.output_file.clone(),
            source,
            backup,
        })
    }
}

/// Substitute both placeholders in `template`.
///
/// A placeholder missing from the template is left alone, not an error.
pub fn render(template: &str, quests: &Value, character: &Value) -> Result<String> {
    let quests_js = format!("const quests = {};", to_script_literal(quests)?);
    let character_js = format!("const characterData = {};", to_script_literal(character)?);

    Ok(template
        .replace(QUESTS_PLACEHOLDER, &quests_js)
        .replace(CHARACTER_PLACEHOLDER, &character_js))
}

/// Pretty JSON with every non-ASCII character written as a `\uXXXX` escape.
fn to_script_literal<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    Ok(escape_non_ascii(&store::to_pretty_json(data)?))
}

/// Non-ASCII characters only ever occur inside JSON strings, so escaping
/// them in place keeps the document valid.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for ch in json.chars() {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }
        for unit in ch.encode_utf16(&mut units) {
            out.push_str(&format!("\\u{:04x}", unit));
        }
    }
    out
}
