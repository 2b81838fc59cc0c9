//! Embedded note store on SQLite.
//!
//! Notes are stored as whole documents: one row per note holding the full
//! camelCase JSON in a `doc` column, plus the owner id for lookups. That is
//! the same shape a hosted document store keeps per note, so documents can
//! move between backends unchanged.
//!
//! rusqlite connections cannot be shared across threads, so the connection
//! lives on a dedicated worker thread and [`SqliteStore`] is a cheap
//! cloneable handle that ships closures to it, with replies coming back
//! over a oneshot channel.

use std::path::Path;
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};

use async_trait::async_trait;
use log::error;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::oneshot;
use uuid::Uuid;

use super::error::{KeepError, Result};
use super::note::{Note, NoteId};
use super::store::{NewNote, NoteStore, NoteUpdate};

type StoreTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum StoreCommand {
    Execute(StoreTask),
    Shutdown,
}

struct SqliteStoreInner {
    sender: mpsc::Sender<StoreCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for SqliteStoreInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(StoreCommand::Shutdown) {
                error!("Failed to send shutdown to store thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join store thread: {join_err:?}");
            }
        }
    }
}

/// A [`NoteStore`] backed by a local SQLite file.
#[derive(Clone)]
pub struct SqliteStore {
    inner: Arc<SqliteStoreInner>,
}

impl SqliteStore {
    /// Opens the store at `path`, creating the file and schema if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (command_tx, command_rx) = mpsc::channel::<StoreCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("leokeep-store".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path) {
                    Ok(conn) => conn,
                    Err(err) => {
                        let _ = ready_tx.send(Err(KeepError::from(err)));
                        return;
                    }
                };

                if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                    error!("Failed to enable WAL mode: {err}");
                }

                let init = conn
                    .execute_batch(include_str!("schema.sql"))
                    .map_err(KeepError::from);
                if ready_tx.send(init).is_err() {
                    error!("Store initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        StoreCommand::Execute(task) => task(&mut conn),
                        StoreCommand::Shutdown => break,
                    }
                }
            })?;

        ready_rx.recv().map_err(|_| {
            KeepError::Store("store worker exited before signaling readiness".to_string())
        })??;

        Ok(Self {
            inner: Arc::new(SqliteStoreInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
        })
    }

    async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = StoreCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("Store caller dropped before receiving result");
            }
        }));

        sender
            .send(command)
            .map_err(|err| KeepError::Store(format!("failed to reach store thread: {err}")))?;

        reply_rx
            .await
            .map_err(|_| KeepError::Store("store thread terminated unexpectedly".to_string()))?
    }
}

fn load_note(conn: &Connection, id: &str) -> Result<Note> {
    let doc: String = conn
        .query_row("SELECT doc FROM notes WHERE id = ?1", params![id], |row| {
            row.get(0)
        })
        .optional()?
        .ok_or_else(|| KeepError::NoteNotFound(id.to_string()))?;
    Ok(serde_json::from_str(&doc)?)
}

#[async_trait]
impl NoteStore for SqliteStore {
    async fn list_notes(&self, user_id: &str) -> Result<Vec<Note>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare("SELECT doc FROM notes WHERE user_id = ?1")?;
            let mut rows = stmt.query(params![user_id])?;
            let mut notes = Vec::new();
            while let Some(row) = rows.next()? {
                let doc: String = row.get(0)?;
                notes.push(serde_json::from_str(&doc)?);
            }
            Ok(notes)
        })
        .await
    }

    async fn create_note(&self, user_id: &str, new_note: NewNote) -> Result<NoteId> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let id = Uuid::new_v4().to_string();
            let note = new_note.into_note(id.clone(), &user_id);
            let doc = serde_json::to_string(&note)?;
            conn.execute(
                "INSERT INTO notes (id, user_id, doc) VALUES (?1, ?2, ?3)",
                params![note.id, note.user_id, doc],
            )?;
            Ok(id)
        })
        .await
    }

    async fn update_note(&self, id: &str, update: NoteUpdate) -> Result<()> {
        let id = id.to_string();
        self.execute(move |conn| {
            // The worker serializes all access, so read-modify-write needs
            // no transaction.
            let mut note = load_note(conn, &id)?;
            update.apply(&mut note);
            let doc = serde_json::to_string(&note)?;
            conn.execute("UPDATE notes SET doc = ?1 WHERE id = ?2", params![doc, id])?;
            Ok(())
        })
        .await
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.execute(move |conn| {
            let deleted = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
            if deleted == 0 {
                return Err(KeepError::NoteNotFound(id));
            }
            Ok(())
        })
        .await
    }
}
