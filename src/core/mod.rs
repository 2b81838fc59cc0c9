//! Internal domain modules for the Leo Keep core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

#[cfg(feature = "cloudinary")]
pub mod cloudinary;
pub mod editor;
pub mod error;
pub mod identity;
pub mod memory_store;
pub mod note;
pub mod notebook;
pub mod sqlite_store;
pub mod store;
pub mod uploader;
pub mod view;

#[cfg(feature = "cloudinary")]
#[doc(inline)]
pub use cloudinary::{CloudinaryConfig, CloudinaryUploader};
#[doc(inline)]
pub use editor::EditBuffer;
#[doc(inline)]
pub use error::{KeepError, Result};
#[doc(inline)]
pub use identity::{Identity, Session, StaticIdentity};
#[doc(inline)]
pub use memory_store::MemoryStore;
#[doc(inline)]
pub use note::{Lifecycle, Note, NoteId, UserId, DEFAULT_COLOR, PALETTE};
#[doc(inline)]
pub use notebook::{Confirmation, DeleteOutcome, Notebook, SaveOutcome};
#[doc(inline)]
pub use sqlite_store::SqliteStore;
#[doc(inline)]
pub use store::{NewNote, NoteStore, NoteUpdate};
#[doc(inline)]
pub use uploader::{is_local_reference, AssetUploader, FixedUploader};
#[doc(inline)]
pub use view::{filter_notes, sort_notes, View};
