//! Domain types for quest and character documents.
//!
//! Quest lists stay as raw `serde_json::Value` arrays end to end so fields
//! the editor UI adds later survive a save untouched; only the shape checks
//! in [`super::validation`] look inside them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys every quest object must carry. A `null` value still counts.
pub const REQUIRED_QUEST_FIELDS: [&str; 9] = [
    "id",
    "title",
    "questType",
    "level",
    "description",
    "tools",
    "xpGained",
    "monstersDefeated",
    "lootDropped",
];

/// Name of the default quest file; always listed first.
pub const DEFAULT_QUEST_FILE: &str = "quests.json";

/// Whether a quest belongs to the main storyline or is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestType {
    Main,
    Side,
}

impl QuestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestType::Main => "main",
            QuestType::Side => "side",
        }
    }
}

impl fmt::Display for QuestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(QuestType::Main),
            "side" => Ok(QuestType::Side),
            other => Err(other.to_string()),
        }
    }
}

/// Player-facing traits and curses.
///
/// Entries are opaque to the backend. Unknown top-level keys are kept so a
/// round trip through this type never drops data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterData {
    pub traits: Vec<Value>,
    pub curses: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CharacterData {
    /// The document served when no character file exists yet.
    pub fn empty_document() -> Value {
        serde_json::json!({ "traits": [], "curses": [] })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quest_type_parsing() {
        assert_eq!("main".parse::<QuestType>(), Ok(QuestType::Main));
        assert_eq!("side".parse::<QuestType>(), Ok(QuestType::Side));
        assert_eq!("Main".parse::<QuestType>(), Err("Main".to_string()));
        assert!("".parse::<QuestType>().is_err());
    }

    #[test]
    fn test_quest_type_serde() {
        let json = serde_json::to_string(&QuestType::Side).unwrap();
        assert_eq!(json, "\"side\"");
        let parsed: QuestType = serde_json::from_str("\"main\"").unwrap();
        assert_eq!(parsed, QuestType::Main);
    }

    #[test]
    fn test_empty_character_document() {
        let doc = CharacterData::empty_document();
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"traits":[],"curses":[]}"#);

        let data: CharacterData = serde_json::from_value(doc).unwrap();
        assert_eq!(data, CharacterData::default());
    }

    #[test]
    fn test_character_keeps_unknown_keys() {
        let doc = serde_json::json!({
            "traits": [{"name": "Night Owl"}],
            "curses": [],
            "portrait": "owl.png"
        });
        let data: CharacterData = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(data.extra.get("portrait"), Some(&Value::from("owl.png")));
        assert_eq!(serde_json::to_value(&data).unwrap(), doc);
    }
}
