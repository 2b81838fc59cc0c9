//! The draft behind the note editor screen.

use super::note::{Note, NoteId, DEFAULT_COLOR};

/// An in-memory draft of one note.
///
/// Opening the editor fills a buffer: [`EditBuffer::new`] for a blank
/// draft, [`EditBuffer::from_note`] to edit a stored note. The screen
/// mutates the fields freely and hands the buffer to
/// [`Notebook::save`](super::notebook::Notebook::save), which only borrows
/// it. After a failed save the draft is still here, untouched, ready for a
/// retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    target: Option<NoteId>,
    pub title: String,
    pub text: String,
    /// Either a durable URL or a local picker reference (`file://…`,
    /// `content://…`). Saving uploads the latter before persisting.
    pub image: Option<String>,
    pub color: String,
    pub is_pinned: bool,
    pub is_list: bool,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self {
            target: None,
            title: String::new(),
            text: String::new(),
            image: None,
            color: DEFAULT_COLOR.to_string(),
            is_pinned: false,
            is_list: false,
        }
    }
}

impl EditBuffer {
    /// A blank draft for a brand-new note.
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft pre-filled from a stored note; saving it updates that note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            target: Some(note.id.clone()),
            title: note.title.clone(),
            text: note.text.clone(),
            image: note.image_url.clone(),
            color: note.color.clone(),
            is_pinned: note.is_pinned,
            is_list: note.is_list,
        }
    }

    /// The note this draft edits, or `None` for a new-note draft.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// A draft with nothing worth keeping: whitespace-only title and text
    /// and no image. Saving such a draft is a silent no-op.
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.text.trim().is_empty() && self.image.is_none()
    }
}
