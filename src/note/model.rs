//! Note record

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single stored note, keyed by its caller-supplied `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub cover_url: String,
}

impl Note {
    pub fn new(id: impl Into<String>, text: impl Into<String>, cover_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            cover_url: cover_url.into(),
        }
    }
}

/// On-disk and in-memory shape of the store: id -> note.
///
/// Ordered so the persisted file is stable across rewrites.
pub type NoteMap = BTreeMap<String, Note>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let note = Note::new("a1", "hello", "");
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "a1", "text": "hello", "cover_url": ""})
        );
    }

    #[test]
    fn test_missing_optional_fields_default_to_empty() {
        let note: Note = serde_json::from_str(r#"{"id":"a1"}"#).unwrap();
        assert_eq!(note, Note::new("a1", "", ""));
    }

    #[test]
    fn test_map_shape() {
        let map: NoteMap =
            serde_json::from_str(r#"{"a1":{"id":"a1","text":"t","cover_url":"c"}}"#).unwrap();
        assert_eq!(map.get("a1"), Some(&Note::new("a1", "t", "c")));
    }
}
