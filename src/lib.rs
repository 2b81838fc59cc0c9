//! Core library for Leo Keep — a Keep-style note-taking application.
//!
//! The primary entry point is [`Notebook`], which holds one signed-in
//! user's notes and the actions the app offers on them. It is generic over
//! three seams: a [`NoteStore`] for documents, an [`AssetUploader`] for
//! images, and an [`Identity`] provider for the current user. The crate
//! ships an in-memory store, a SQLite store, and (behind the `cloudinary`
//! feature) a Cloudinary uploader.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core`
//! module.
//!
//! ```rust
//! use leokeep_core::{FixedUploader, MemoryStore, Notebook, SaveOutcome, StaticIdentity};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> leokeep_core::Result<()> {
//! let mut notebook = Notebook::new(
//!     MemoryStore::new(),
//!     FixedUploader::new("https://img.example"),
//!     StaticIdentity::signed_in("demo-user"),
//! );
//!
//! let mut draft = notebook.new_draft();
//! draft.title = "Groceries".to_string();
//! draft.text = "Milk, bread".to_string();
//! let outcome = notebook.save(&draft).await?;
//!
//! assert!(matches!(outcome, SaveOutcome::Created(_)));
//! assert_eq!(notebook.visible_notes().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    editor::EditBuffer,
    error::{KeepError, Result},
    identity::{Identity, Session, StaticIdentity},
    memory_store::MemoryStore,
    note::{Lifecycle, Note, NoteId, UserId, DEFAULT_COLOR, PALETTE},
    notebook::{Confirmation, DeleteOutcome, Notebook, SaveOutcome},
    sqlite_store::SqliteStore,
    store::{NewNote, NoteStore, NoteUpdate},
    uploader::{is_local_reference, AssetUploader, FixedUploader},
    view::{filter_notes, sort_notes, View},
};

#[cfg(feature = "cloudinary")]
#[doc(inline)]
pub use core::cloudinary::{CloudinaryConfig, CloudinaryUploader};
