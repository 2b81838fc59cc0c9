//! Error types for the Leo Keep core library.

use thiserror::Error;

/// All errors that can occur within the Leo Keep core library.
#[derive(Debug, Error)]
pub enum KeepError {
    /// An operation that touches the note store was attempted while signed out.
    #[error("No user is signed in")]
    Unauthenticated,

    /// The note store rejected or could not complete an operation.
    #[error("Store error: {0}")]
    Store(String),

    /// An image could not be uploaded to the asset host.
    #[error("Image upload failed: {0}")]
    Upload(String),

    /// A note ID was requested that does not exist.
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// Permanent deletion was requested for a note that is not in the trash.
    #[error("Note is not in the trash: {0}")]
    NotInTrash(String),

    /// A trashed note was opened for editing.
    #[error("Note is in the trash: {0}")]
    NoteTrashed(String),

    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored note document could not be serialized or deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias that pins the error type to [`KeepError`].
pub type Result<T> = std::result::Result<T, KeepError>;

impl KeepError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthenticated => "You are signed out — please sign in again".to_string(),
            Self::Store(_) => "Could not reach the notes service. Please try again".to_string(),
            Self::Upload(_) => "Image upload failed. The note was not saved".to_string(),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::NotInTrash(_) => "Only notes in the trash can be deleted forever".to_string(),
            Self::NoteTrashed(_) => "This note is in the trash. Restore it to edit".to_string(),
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
            Self::Io(e) => format!("File error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_message_mentions_signing_in() {
        let e = KeepError::Unauthenticated;
        assert!(e.user_message().contains("sign in"));
    }

    #[test]
    fn test_upload_failure_keeps_the_note_unsaved() {
        let e = KeepError::Upload("host returned 500".to_string());
        assert!(e.to_string().contains("host returned 500"));
        assert!(e.user_message().contains("not saved"));
    }

    #[test]
    fn test_not_in_trash_names_the_note() {
        let e = KeepError::NotInTrash("abc123".to_string());
        assert!(e.to_string().contains("abc123"));
    }
}
