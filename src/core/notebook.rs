//! The operations hub tying store, uploader and identity together.
//!
//! [`Notebook`] owns what a running app needs to show and change notes:
//! the last fetched list, the selected [`View`], the live search query,
//! and the three collaborators behind them. Screens stay thin: they render
//! [`visible_notes`](Notebook::visible_notes) and call one method per user
//! action.
//!
//! Every mutating action follows the same shape. Resolve the session,
//! write through the store, then re-fetch the owner's notes so the cached
//! list reflects whatever the store now holds. There is no optimistic
//! patching; the store is the single source of truth, and a failed write
//! leaves the cached list exactly as it was.

use log::{error, info};

use super::editor::EditBuffer;
use super::error::{KeepError, Result};
use super::identity::{Identity, Session};
use super::note::{Lifecycle, Note, NoteId};
use super::store::{NewNote, NoteStore, NoteUpdate};
use super::uploader::{is_local_reference, AssetUploader};
use super::view::{filter_notes, sort_notes, View};

/// What [`Notebook::save`] did with a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new note was persisted under this id.
    Created(NoteId),

    /// The draft's target note was updated in place.
    Updated(NoteId),

    /// The draft had no content. Nothing was stored, nothing failed.
    DiscardedEmpty,
}

/// The caller's answer to the "delete forever?" prompt.
///
/// Permanent deletion is the one action the app double-checks with the
/// user. The core cannot raise a dialog, so the answer arrives as an
/// argument; a `Cancelled` answer never reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// What [`Notebook::delete_forever`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The note is gone from the store.
    Deleted,

    /// The caller cancelled; nothing was touched.
    Cancelled,
}

/// One signed-in user's notes and the actions the app offers on them.
pub struct Notebook<S, U, I> {
    store: S,
    uploader: U,
    identity: I,
    notes: Vec<Note>,
    view: View,
    query: String,
}

impl<S, U, I> Notebook<S, U, I>
where
    S: NoteStore,
    U: AssetUploader,
    I: Identity,
{
    /// A notebook with nothing fetched yet, showing the main view.
    pub fn new(store: S, uploader: U, identity: I) -> Self {
        Self {
            store,
            uploader,
            identity,
            notes: Vec::new(),
            view: View::Notes,
            query: String::new(),
        }
    }

    fn session(&self) -> Result<Session> {
        Session::resolve(&self.identity)
    }

    /// Replaces the cached list with a fresh fetch of the current user's
    /// notes, already in display order.
    ///
    /// # Errors
    ///
    /// [`KeepError::Unauthenticated`] when nobody is signed in; store
    /// errors pass through. The cached list is left untouched on failure.
    pub async fn refresh(&mut self) -> Result<()> {
        let session = self.session()?;
        let mut notes = self.store.list_notes(session.user_id()).await?;
        sort_notes(&mut notes);
        self.notes = notes;
        Ok(())
    }

    // A mutation that succeeded must not be reported as failed just
    // because the follow-up fetch broke; the caller would retry and apply
    // it twice. The cached list stays stale until the next refresh.
    async fn refresh_after_mutation(&mut self) {
        if let Err(err) = self.refresh().await {
            error!("Refresh after a successful mutation failed: {err}");
        }
    }

    /// The cached list, pinned notes first, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Looks a note up in the cached list.
    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Sets the live search query; it applies to whichever view is shown.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The notes the current screen should render: the cached list run
    /// through the search query, the selected view and the shared order.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(&self.notes, &self.query, self.view)
    }

    /// A blank draft for a brand-new note.
    pub fn new_draft(&self) -> EditBuffer {
        EditBuffer::new()
    }

    /// A draft pre-filled from a cached note.
    ///
    /// # Errors
    ///
    /// [`KeepError::NoteTrashed`] for notes in the trash; they must be
    /// restored before editing. [`KeepError::NoteNotFound`] for ids the
    /// cached list does not know.
    pub fn open_note(&self, id: &str) -> Result<EditBuffer> {
        let note = self
            .note(id)
            .ok_or_else(|| KeepError::NoteNotFound(id.to_string()))?;
        if note.lifecycle() == Lifecycle::Deleted {
            return Err(KeepError::NoteTrashed(id.to_string()));
        }
        Ok(EditBuffer::from_note(note))
    }

    /// Persists a draft.
    ///
    /// An empty draft is discarded without touching anything, signed in or
    /// not. Otherwise: a local image reference is uploaded first and the
    /// durable URL stored in its place; then the draft either creates a
    /// note (flags all start cleared) or partially updates its target,
    /// touching only editor-owned fields so lifecycle flags and completion
    /// state survive an edit. A pin change is dropped unless the target is
    /// Active.
    ///
    /// On any error the store is unchanged and the draft still holds the
    /// user's content, ready to retry. After success the caller should
    /// drop the draft; `save` does not consume it.
    pub async fn save(&mut self, draft: &EditBuffer) -> Result<SaveOutcome> {
        if draft.is_empty() {
            info!("Discarding an empty draft");
            return Ok(SaveOutcome::DiscardedEmpty);
        }

        let session = self.session()?;

        let image_url = match &draft.image {
            Some(reference) if is_local_reference(reference) => {
                Some(self.uploader.upload(reference).await?)
            }
            other => other.clone(),
        };

        let outcome = match draft.target() {
            None => {
                let new_note = NewNote {
                    title: draft.title.clone(),
                    text: draft.text.clone(),
                    image_url,
                    color: draft.color.clone(),
                    is_list: draft.is_list,
                };
                let id = self.store.create_note(session.user_id(), new_note).await?;
                info!("Created note {id}");
                SaveOutcome::Created(id)
            }
            Some(id) => {
                let is_pinned = match self.note(id) {
                    Some(stored) if stored.lifecycle() == Lifecycle::Active => {
                        Some(draft.is_pinned)
                    }
                    _ => None,
                };
                let update = NoteUpdate {
                    title: Some(draft.title.clone()),
                    text: Some(draft.text.clone()),
                    image_url: Some(image_url),
                    color: Some(draft.color.clone()),
                    is_list: Some(draft.is_list),
                    is_pinned,
                    ..Default::default()
                };
                self.store.update_note(id, update).await?;
                info!("Updated note {id}");
                SaveOutcome::Updated(id.to_string())
            }
        };

        self.refresh_after_mutation().await;
        Ok(outcome)
    }

    /// Moves an active note to the archive. Archived notes cannot stay
    /// pinned, so the pin is cleared in the same write.
    pub async fn archive(&mut self, id: &str) -> Result<()> {
        let update = NoteUpdate {
            is_archived: Some(true),
            is_pinned: Some(false),
            ..Default::default()
        };
        self.transition(id, update, "Archived").await
    }

    /// Moves an archived note back to the main list.
    pub async fn unarchive(&mut self, id: &str) -> Result<()> {
        let update = NoteUpdate {
            is_archived: Some(false),
            ..Default::default()
        };
        self.transition(id, update, "Unarchived").await
    }

    /// Moves a note to the trash from wherever it is. Trashed notes are
    /// neither pinned nor archived, so both flags are cleared in the same
    /// write; that is why a later restore lands in the main list.
    pub async fn trash(&mut self, id: &str) -> Result<()> {
        let update = NoteUpdate {
            is_deleted: Some(true),
            is_pinned: Some(false),
            is_archived: Some(false),
            ..Default::default()
        };
        self.transition(id, update, "Trashed").await
    }

    /// Brings a trashed note back to the main list.
    pub async fn restore(&mut self, id: &str) -> Result<()> {
        let update = NoteUpdate {
            is_deleted: Some(false),
            ..Default::default()
        };
        self.transition(id, update, "Restored").await
    }

    async fn transition(&mut self, id: &str, update: NoteUpdate, verb: &str) -> Result<()> {
        self.session()?;
        self.store.update_note(id, update).await?;
        info!("{verb} note {id}");
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Flips a note's completed flag, setting or clearing the completion
    /// timestamp in the same write.
    pub async fn toggle_completed(&mut self, id: &str) -> Result<()> {
        self.session()?;
        let note = self
            .note(id)
            .ok_or_else(|| KeepError::NoteNotFound(id.to_string()))?;
        let completed = !note.completed;
        let update = NoteUpdate {
            completed: Some(completed),
            completed_at: Some(completed.then(chrono::Utc::now)),
            ..Default::default()
        };
        self.store.update_note(id, update).await?;
        info!("Marked note {id} completed={completed}");
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Permanently removes a trashed note, if the caller confirmed.
    ///
    /// Not retryable after success: the id is gone, and a second call
    /// reports [`KeepError::NoteNotFound`].
    ///
    /// # Errors
    ///
    /// [`KeepError::NotInTrash`] when the note is anywhere but the trash;
    /// trashing first is the only road to permanent deletion.
    pub async fn delete_forever(
        &mut self,
        id: &str,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome> {
        if confirmation == Confirmation::Cancelled {
            info!("Permanent deletion of note {id} cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.session()?;
        let note = self
            .note(id)
            .ok_or_else(|| KeepError::NoteNotFound(id.to_string()))?;
        if note.lifecycle() != Lifecycle::Deleted {
            return Err(KeepError::NotInTrash(id.to_string()));
        }

        self.store.delete_note(id).await?;
        info!("Permanently deleted note {id}");
        self.refresh_after_mutation().await;
        Ok(DeleteOutcome::Deleted)
    }
}
