//! Views and the deterministic ordering of the note list.
//!
//! The app presents three screens over one collection: the main list, the
//! archive and the trash. [`View`] names them, [`View::includes`] decides
//! membership from a note's [`Lifecycle`], and [`filter_notes`] applies the
//! full list contract: search filter, view membership, then the shared
//! ordering.
//!
//! ## Ordering
//!
//! Every view sorts the same way: pinned notes first, then newest
//! `created_at` first. The sort is stable, so notes that tie (both pinned,
//! same timestamp) keep the order the store returned them in, and a note
//! without a parsable `created_at` sorts as oldest.
//!
//! ## Serialization
//!
//! `View` serializes as a PascalCase string (`"Notes"`, `"Archive"`,
//! `"Trash"`) so a front-end can send it over an IPC boundary without a
//! mapping layer.
//!
//! ## Examples
//!
//! ```rust
//! use leokeep_core::View;
//!
//! let json = serde_json::to_string(&View::Archive).unwrap();
//! assert_eq!(json, r#""Archive""#);
//! ```

// Rust guideline compliant 2026-08-12

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::note::{Lifecycle, Note};

/// The screen a note list is being built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum View {
    /// Active notes: neither archived nor trashed.
    Notes,

    /// Archived notes that have not been trashed.
    Archive,

    /// Trashed notes, whatever their archived flag says.
    Trash,
}

impl View {
    /// Whether `note` belongs to this view, ignoring any search query.
    pub fn includes(self, note: &Note) -> bool {
        match self {
            View::Notes => note.lifecycle() == Lifecycle::Active,
            View::Archive => note.lifecycle() == Lifecycle::Archived,
            View::Trash => note.lifecycle() == Lifecycle::Deleted,
        }
    }
}

/// The comparator every view shares: pinned before unpinned, then newest
/// `created_at` first.
pub(crate) fn note_order(a: &Note, b: &Note) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| sort_key(b).cmp(&sort_key(a)))
}

fn sort_key(note: &Note) -> DateTime<Utc> {
    note.created_at.unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Sorts a fetched batch in place with the shared comparator. Stable, so
/// equal keys keep the order the store returned them in.
pub fn sort_notes(notes: &mut [Note]) {
    notes.sort_by(note_order);
}

/// Builds the visible list for one screen: notes matching `query` that
/// belong to `view`, in the shared order. Pure; the same input always
/// yields the same list.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str, view: View) -> Vec<&'a Note> {
    let mut visible: Vec<&Note> = notes
        .iter()
        .filter(|note| note.matches_query(query) && view.includes(note))
        .collect();
    visible.sort_by(|a, b| note_order(a, b));
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            title: String::new(),
            text: String::new(),
            is_list: false,
            image_url: None,
            color: "#ffffff".to_string(),
            is_pinned: false,
            is_archived: false,
            is_deleted: false,
            completed: false,
            completed_at: None,
            user_id: "user-1".to_string(),
            created_at: None,
        }
    }

    fn at(id: &str, secs: i64) -> Note {
        let mut n = note(id);
        n.created_at = Some(Utc.timestamp_opt(secs, 0).unwrap());
        n
    }

    fn ids(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn test_each_view_selects_one_lifecycle_state() {
        let active = note("a");
        let mut archived = note("b");
        archived.is_archived = true;
        let mut trashed = note("c");
        trashed.is_deleted = true;

        assert!(View::Notes.includes(&active));
        assert!(!View::Notes.includes(&archived));
        assert!(!View::Notes.includes(&trashed));
        assert!(View::Archive.includes(&archived));
        assert!(View::Trash.includes(&trashed));
    }

    #[test]
    fn test_trashed_note_leaves_archive_even_with_flag_set() {
        let mut n = note("a");
        n.is_archived = true;
        n.is_deleted = true;
        assert!(!View::Archive.includes(&n));
        assert!(View::Trash.includes(&n));
    }

    #[test]
    fn test_pinned_notes_sort_first_then_newest() {
        let mut batch = vec![at("old", 100), at("new", 300), at("pinned", 200)];
        batch[2].is_pinned = true;
        sort_notes(&mut batch);
        let order: Vec<&str> = batch.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, ["pinned", "new", "old"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut batch = vec![at("first", 100), at("second", 100), at("third", 100)];
        for n in &mut batch {
            n.is_pinned = true;
        }
        sort_notes(&mut batch);
        let order: Vec<&str> = batch.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, ["first", "second", "third"]);
    }

    #[test]
    fn test_missing_created_at_sorts_as_oldest() {
        let mut batch = vec![note("undated"), at("dated", 100)];
        sort_notes(&mut batch);
        assert_eq!(batch[0].id, "dated");
        assert_eq!(batch[1].id, "undated");
    }

    #[test]
    fn test_filter_applies_search_view_and_order() {
        let mut a = at("a", 100);
        a.title = "Shopping list".to_string();
        let mut b = at("b", 200);
        b.text = "shopping for shoes".to_string();
        let mut c = at("c", 300);
        c.title = "Shopping (archived)".to_string();
        c.is_archived = true;
        let notes = vec![a, b, c];

        let visible = filter_notes(&notes, "SHOP", View::Notes);
        assert_eq!(ids(&visible), ["b", "a"]);

        let archived = filter_notes(&notes, "shop", View::Archive);
        assert_eq!(ids(&archived), ["c"]);
    }

    #[test]
    fn test_filter_is_deterministic() {
        let notes = vec![at("a", 100), at("b", 100), note("c")];
        let first = ids(&filter_notes(&notes, "", View::Notes));
        let second = ids(&filter_notes(&notes, "", View::Notes));
        assert_eq!(first, second);
    }
}
