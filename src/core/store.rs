//! The note store seam and its value types.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::Result;
use super::note::{Note, NoteId};

/// Fields the caller controls when a note is first persisted.
///
/// Everything else is assigned by the store: a fresh id, the owning user,
/// `created_at = now`, and every flag cleared. New notes are never born
/// pinned, archived, trashed or completed.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub image_url: Option<String>,
    pub color: String,
    pub is_list: bool,
}

impl NewNote {
    /// Materializes the document to store, applying the creation defaults.
    pub fn into_note(self, id: NoteId, user_id: &str) -> Note {
        Note {
            id,
            title: self.title,
            text: self.text,
            is_list: self.is_list,
            image_url: self.image_url,
            color: self.color,
            is_pinned: false,
            is_archived: false,
            is_deleted: false,
            completed: false,
            completed_at: None,
            user_id: user_id.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}

/// A partial update. `None` leaves a field untouched; on the
/// double-`Option` fields, `Some(None)` is an explicit clear.
///
/// The field list is closed. An update cannot invent document keys, and
/// `id`, `user_id` and `created_at` are not here at all, so no update can
/// reassign a note or rewrite its creation time.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub text: Option<String>,
    pub image_url: Option<Option<String>>,
    pub color: Option<String>,
    pub is_list: Option<bool>,
    pub is_pinned: Option<bool>,
    pub is_archived: Option<bool>,
    pub is_deleted: Option<bool>,
    pub completed: Option<bool>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl NoteUpdate {
    /// Merges the update into `note`, field by field. Every shipped store
    /// funnels updates through here, so partial-update semantics cannot
    /// drift between backends.
    pub fn apply(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(text) = &self.text {
            note.text = text.clone();
        }
        if let Some(image_url) = &self.image_url {
            note.image_url = image_url.clone();
        }
        if let Some(color) = &self.color {
            note.color = color.clone();
        }
        if let Some(is_list) = self.is_list {
            note.is_list = is_list;
        }
        if let Some(is_pinned) = self.is_pinned {
            note.is_pinned = is_pinned;
        }
        if let Some(is_archived) = self.is_archived {
            note.is_archived = is_archived;
        }
        if let Some(is_deleted) = self.is_deleted {
            note.is_deleted = is_deleted;
        }
        if let Some(completed) = self.completed {
            note.completed = completed;
        }
        if let Some(completed_at) = self.completed_at {
            note.completed_at = completed_at;
        }
    }
}

/// Where note documents live.
///
/// Implementations persist whole documents keyed by id and owner, impose no
/// ordering on [`list_notes`](NoteStore::list_notes), and apply updates
/// exactly as [`NoteUpdate::apply`] describes. Every method takes a
/// resolved user id; producing one is the caller's job (see
/// [`Session`](super::identity::Session)).
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Every note owned by `user_id`, in no particular order.
    async fn list_notes(&self, user_id: &str) -> Result<Vec<Note>>;

    /// Persists a new note and returns its assigned id.
    async fn create_note(&self, user_id: &str, new_note: NewNote) -> Result<NoteId>;

    /// Applies a partial update to an existing note.
    ///
    /// # Errors
    ///
    /// [`NoteNotFound`](super::error::KeepError::NoteNotFound) if no note
    /// has this id.
    async fn update_note(&self, id: &str, update: NoteUpdate) -> Result<()>;

    /// Permanently removes a note. Not idempotent: deleting the same id
    /// twice reports `NoteNotFound` the second time.
    async fn delete_note(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl<S: NoteStore + ?Sized> NoteStore for Arc<S> {
    async fn list_notes(&self, user_id: &str) -> Result<Vec<Note>> {
        (**self).list_notes(user_id).await
    }

    async fn create_note(&self, user_id: &str, new_note: NewNote) -> Result<NoteId> {
        (**self).create_note(user_id, new_note).await
    }

    async fn update_note(&self, id: &str, update: NoteUpdate) -> Result<()> {
        (**self).update_note(id, update).await
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        (**self).delete_note(id).await
    }
}
