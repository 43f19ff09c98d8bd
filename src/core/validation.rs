//! Payload validation.
//!
//! Both validators run before anything touches the disk; a failure here
//! leaves the stored file exactly as it was.

use serde_json::Value;
use thiserror::Error;

use super::models::{CharacterData, QuestType, REQUIRED_QUEST_FIELDS};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("Data must be an array")]
    NotAnArray,

    /// Carries the quest title, or `unknown` when the title is absent.
    #[error("Quest missing required fields: {0}")]
    MissingFields(String),

    #[error("Invalid quest type: {0}")]
    InvalidQuestType(String),

    #[error("Invalid character data structure")]
    InvalidCharacterStructure,

    #[error("Traits and curses must be arrays")]
    CharacterListsNotArrays,
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Parse a raw request body as JSON.
pub fn parse_body(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(|e| ValidationError::MalformedBody(e.to_string()))
}

/// Check a quest list and return its entries.
///
/// The first offending quest aborts validation of the whole list.
pub fn validate_quests(data: &Value) -> Result<&[Value]> {
    let quests = data.as_array().ok_or(ValidationError::NotAnArray)?;

    for quest in quests {
        let Some(fields) = quest.as_object() else {
            return Err(ValidationError::MissingFields("unknown".to_string()));
        };

        if !REQUIRED_QUEST_FIELDS.iter().all(|f| fields.contains_key(*f)) {
            return Err(ValidationError::MissingFields(display_value(
                fields.get("title"),
            )));
        }

        let quest_type = &fields["questType"];
        let valid = quest_type
            .as_str()
            .is_some_and(|s| s.parse::<QuestType>().is_ok());
        if !valid {
            return Err(ValidationError::InvalidQuestType(display_value(Some(
                quest_type,
            ))));
        }
    }

    Ok(quests.as_slice())
}

/// Check the top-level shape of a character document.
///
/// List entries are not inspected.
pub fn validate_character(data: &Value) -> Result<CharacterData> {
    let fields = data
        .as_object()
        .ok_or(ValidationError::InvalidCharacterStructure)?;

    let (Some(traits), Some(curses)) = (fields.get("traits"), fields.get("curses")) else {
        return Err(ValidationError::InvalidCharacterStructure);
    };

    let (Some(traits), Some(curses)) = (traits.as_array(), curses.as_array()) else {
        return Err(ValidationError::CharacterListsNotArrays);
    };

    let extra = fields
        .iter()
        .filter(|(k, _)| k.as_str() != "traits" && k.as_str() != "curses")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(CharacterData {
        traits: traits.clone(),
        curses: curses.clone(),
        extra,
    })
}

/// Render a value for an error message: strings bare, everything else as JSON.
fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn quest(title: &str, quest_type: &str) -> Value {
        json!({
            "id": title.to_lowercase(),
            "title": title,
            "questType": quest_type,
            "level": 1,
            "description": "",
            "tools": [],
            "xpGained": 10,
            "monstersDefeated": [],
            "lootDropped": []
        })
    }

    #[test]
    fn test_valid_quest_list() {
        let data = json!([quest("Boot Camp", "main"), quest("Side Gig", "side")]);
        let quests = validate_quests(&data).unwrap();
        assert_eq!(quests.len(), 2);
    }

    #[test]
    fn test_empty_quest_list_is_valid() {
        assert!(validate_quests(&json!([])).unwrap().is_empty());
    }

    #[test]
    fn test_single_object_rejected() {
        let err = validate_quests(&quest("Solo", "main")).unwrap_err();
        assert_eq!(err, ValidationError::NotAnArray);
    }

    #[rstest]
    #[case("id")]
    #[case("questType")]
    #[case("tools")]
    #[case("lootDropped")]
    fn test_missing_field_names_quest(#[case] field: &str) {
        let mut q = quest("Broken Build", "main");
        q.as_object_mut().unwrap().remove(field);
        let err = validate_quests(&json!([q])).unwrap_err();
        assert_eq!(err.to_string(), "Quest missing required fields: Broken Build");
    }

    #[test]
    fn test_missing_title_falls_back_to_unknown() {
        let mut q = quest("x", "main");
        q.as_object_mut().unwrap().remove("title");
        let err = validate_quests(&json!([q])).unwrap_err();
        assert_eq!(err.to_string(), "Quest missing required fields: unknown");
    }

    #[test]
    fn test_non_object_entry_rejected() {
        let err = validate_quests(&json!([42])).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields("unknown".into()));
    }

    #[test]
    fn test_null_field_counts_as_present() {
        let mut q = quest("Nullable", "side");
        q["description"] = Value::Null;
        assert!(validate_quests(&json!([q])).is_ok());
    }

    #[rstest]
    #[case(json!("epic"), "Invalid quest type: epic")]
    #[case(json!("MAIN"), "Invalid quest type: MAIN")]
    #[case(json!(1), "Invalid quest type: 1")]
    #[case(Value::Null, "Invalid quest type: null")]
    fn test_invalid_quest_type(#[case] quest_type: Value, #[case] expected: &str) {
        let mut q = quest("Typed", "main");
        q["questType"] = quest_type;
        let err = validate_quests(&json!([q])).unwrap_err();
        assert_eq!(err.to_string(), expected);
    }

    #[test]
    fn test_first_violation_wins() {
        let mut missing = quest("First", "main");
        missing.as_object_mut().unwrap().remove("level");
        let data = json!([quest("Ok", "main"), missing, quest("Later", "bogus")]);
        let err = validate_quests(&data).unwrap_err();
        assert_eq!(err, ValidationError::MissingFields("First".into()));
    }

    #[test]
    fn test_valid_character() {
        let data = json!({"traits": [{"name": "Caffeinated"}], "curses": [], "mood": "ok"});
        let character = validate_character(&data).unwrap();
        assert_eq!(character.traits.len(), 1);
        assert!(character.curses.is_empty());
        assert_eq!(character.extra["mood"], "ok");
    }

    #[rstest]
    #[case(json!([]))]
    #[case(json!("traits"))]
    #[case(json!({"traits": []}))]
    #[case(json!({"curses": []}))]
    fn test_character_structure_rejected(#[case] data: Value) {
        assert_eq!(
            validate_character(&data).unwrap_err(),
            ValidationError::InvalidCharacterStructure
        );
    }

    #[rstest]
    #[case(json!({"traits": {}, "curses": []}))]
    #[case(json!({"traits": [], "curses": null}))]
    #[case(json!({"traits": "none", "curses": "none"}))]
    fn test_character_lists_must_be_arrays(#[case] data: Value) {
        assert_eq!(
            validate_character(&data).unwrap_err(),
            ValidationError::CharacterListsNotArrays
        );
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(b"[1, 2]").unwrap(), json!([1, 2]));
        assert!(matches!(
            parse_body(b"not json"),
            Err(ValidationError::MalformedBody(_))
        ));
        assert!(parse_body(b"").is_err());
    }
}
