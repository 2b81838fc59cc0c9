//! In-process note store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use uuid::Uuid;

use super::error::{KeepError, Result};
use super::note::{Note, NoteId};
use super::store::{NewNote, NoteStore, NoteUpdate};

/// A [`NoteStore`] living entirely in process memory.
///
/// The reference implementation of the store contract and the double used
/// throughout this crate's tests. Nothing survives a restart. The offline
/// switch makes every call fail, for exercising failure handling without a
/// real outage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    notes: Mutex<HashMap<NoteId, Note>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every call fails with [`KeepError::Store`], as if the
    /// backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<NoteId, Note>> {
        self.notes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(KeepError::Store("backend unreachable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn list_notes(&self, user_id: &str) -> Result<Vec<Note>> {
        self.ensure_online()?;
        let notes = self.lock();
        Ok(notes
            .values()
            .filter(|note| note.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_note(&self, user_id: &str, new_note: NewNote) -> Result<NoteId> {
        self.ensure_online()?;
        let id = Uuid::new_v4().to_string();
        let note = new_note.into_note(id.clone(), user_id);
        self.lock().insert(id.clone(), note);
        Ok(id)
    }

    async fn update_note(&self, id: &str, update: NoteUpdate) -> Result<()> {
        self.ensure_online()?;
        let mut notes = self.lock();
        let note = notes
            .get_mut(id)
            .ok_or_else(|| KeepError::NoteNotFound(id.to_string()))?;
        update.apply(note);
        Ok(())
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        self.ensure_online()?;
        match self.lock().remove(id) {
            Some(_) => Ok(()),
            None => Err(KeepError::NoteNotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(text: &str) -> NewNote {
        NewNote {
            title: String::new(),
            text: text.to_string(),
            image_url: None,
            color: "#ffffff".to_string(),
            is_list: false,
        }
    }

    #[tokio::test]
    async fn test_listing_is_scoped_to_the_owner() {
        let store = MemoryStore::new();
        store.create_note("alice", draft("hers")).await.unwrap();
        store.create_note("bob", draft("his")).await.unwrap();

        let notes = store.list_notes("alice").await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "hers");
        assert_eq!(notes[0].user_id, "alice");
    }

    #[tokio::test]
    async fn test_update_applies_only_named_fields() {
        let store = MemoryStore::new();
        let id = store.create_note("alice", draft("before")).await.unwrap();

        store
            .update_note(
                &id,
                NoteUpdate {
                    text: Some("after".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let notes = store.list_notes("alice").await.unwrap();
        assert_eq!(notes[0].text, "after");
        assert_eq!(notes[0].color, "#ffffff");
    }

    #[tokio::test]
    async fn test_update_of_unknown_id_reports_note_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_note("missing", NoteUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, KeepError::NoteNotFound(_)));
    }

    #[tokio::test]
    async fn test_second_delete_of_the_same_id_fails() {
        let store = MemoryStore::new();
        let id = store.create_note("alice", draft("gone")).await.unwrap();

        store.delete_note(&id).await.unwrap();
        let err = store.delete_note(&id).await.unwrap_err();
        assert!(matches!(err, KeepError::NoteNotFound(_)));
    }

    #[tokio::test]
    async fn test_offline_store_rejects_everything_and_keeps_nothing() {
        let store = MemoryStore::new();
        store.set_offline(true);

        assert!(store.create_note("alice", draft("lost")).await.is_err());
        assert!(store.list_notes("alice").await.is_err());

        store.set_offline(false);
        assert!(store.list_notes("alice").await.unwrap().is_empty());
    }
}
