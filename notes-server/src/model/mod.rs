//! Domain models
//!
//! The store assigns `id`, `created_at` and `updated_at`; callers only
//! ever supply a [`NoteInput`].

pub mod validation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub use validation::ValidationError;

/// Store-assigned note identifier (always positive)
pub type NoteId = i64;

/// A persisted note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create/update payload.
///
/// Missing fields decode to empty strings and unknown fields are ignored,
/// so a client echoing back a full [`Note`] is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn input_ignores_store_assigned_fields() {
        let input: NoteInput = serde_json::from_value(json!({
            "id": 42,
            "title": "t",
            "content": "c",
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(input, NoteInput::new("t", "c"));
    }

    #[test]
    fn input_missing_fields_are_empty() {
        let input: NoteInput = serde_json::from_value(json!({ "title": "only" })).unwrap();
        assert_eq!(input.title, "only");
        assert!(input.content.is_empty());
    }

    #[test]
    fn note_serializes_with_wire_field_names() {
        let now = Utc::now();
        let note = Note {
            id: 1,
            title: "t".into(),
            content: "c".into(),
            created_at: now,
            updated_at: Some(now),
        };

        let value = serde_json::to_value(&note).unwrap();
        for field in ["id", "title", "content", "created_at", "updated_at"] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(value["id"], 1);
    }
}
