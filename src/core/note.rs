use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub type NoteId = String;
pub type UserId = String;

/// Card colors offered by the editor, neutral default first.
pub const PALETTE: [&str; 10] = [
    "#ffffff", "#f28b82", "#fbbc04", "#fff475", "#ccff90", "#a7ffeb", "#cbf0f8", "#aecbfa",
    "#d7aefb", "#fdcfe8",
];

/// Color a note is given when its draft never picked one.
pub const DEFAULT_COLOR: &str = "#ffffff";

/// Lifecycle state derived from the two stored flags.
///
/// `is_deleted` dominates `is_archived`: a note carrying both flags is
/// `Deleted`, and restoring it later lands in `Active`, not `Archived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Archived,
    Deleted,
}

/// A note document as the store keeps it, camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub user_id: UserId,
    /// Creation timestamp as stored. Documents written without one, or with
    /// a string chrono cannot parse, carry `None` and sort as oldest.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// Accepts an RFC 3339 timestamp and maps anything else (null, a number, a
/// malformed string) to `None` instead of failing the whole document.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Parsed(DateTime<Utc>),
        Unparsed(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Parsed(ts) => Some(ts),
        Raw::Unparsed(_) => None,
    })
}

impl Note {
    pub fn lifecycle(&self) -> Lifecycle {
        if self.is_deleted {
            Lifecycle::Deleted
        } else if self.is_archived {
            Lifecycle::Archived
        } else {
            Lifecycle::Active
        }
    }

    /// Case-insensitive substring search over title and text. An empty
    /// query matches every note.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.text.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Note {
        Note {
            id: "note-1".to_string(),
            title: "Groceries".to_string(),
            text: "Milk and Bread".to_string(),
            is_list: false,
            image_url: None,
            color: DEFAULT_COLOR.to_string(),
            is_pinned: false,
            is_archived: false,
            is_deleted: false,
            completed: false,
            completed_at: None,
            user_id: "user-1".to_string(),
            created_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_lifecycle_derivation() {
        let mut note = sample();
        assert_eq!(note.lifecycle(), Lifecycle::Active);

        note.is_archived = true;
        assert_eq!(note.lifecycle(), Lifecycle::Archived);

        note.is_deleted = true;
        assert_eq!(note.lifecycle(), Lifecycle::Deleted, "is_deleted dominates");

        note.is_archived = false;
        assert_eq!(note.lifecycle(), Lifecycle::Deleted);
    }

    #[test]
    fn test_query_matches_title_and_text_case_insensitively() {
        let note = sample();
        assert!(note.matches_query("grocer"));
        assert!(note.matches_query("MILK"));
        assert!(note.matches_query(""));
        assert!(!note.matches_query("receipts"));
    }

    #[test]
    fn test_document_keys_are_camel_case() {
        let doc = serde_json::to_value(sample()).unwrap();
        assert!(doc.get("imageUrl").is_some());
        assert!(doc.get("isPinned").is_some());
        assert!(doc.get("completedAt").is_some());
        assert!(doc.get("userId").is_some());
        assert!(doc.get("createdAt").is_some());
        assert!(doc.get("image_url").is_none());
    }

    #[test]
    fn test_created_at_round_trips_through_json() {
        let note = sample();
        let doc = serde_json::to_string(&note).unwrap();
        let back: Note = serde_json::from_str(&doc).unwrap();
        assert_eq!(back.created_at, note.created_at);
    }

    #[test]
    fn test_sparse_legacy_document_still_loads() {
        let doc = r#"{"id": "old-1", "userId": "user-1"}"#;
        let note: Note = serde_json::from_str(doc).unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.color, DEFAULT_COLOR);
        assert!(!note.is_pinned);
        assert!(note.created_at.is_none());
    }

    #[test]
    fn test_unparseable_created_at_becomes_none() {
        for raw in [r#""yesterday""#, "1700000000", "null"] {
            let doc = format!(r#"{{"id": "x", "userId": "u", "createdAt": {raw}}}"#);
            let note: Note = serde_json::from_str(&doc).unwrap();
            assert!(note.created_at.is_none(), "createdAt {raw} should be dropped");
        }
    }
}
