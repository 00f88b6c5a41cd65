//! Command execution with autosave.

use crate::book::Book;
use crate::commands::{Command, Outcome};
use crate::config::BookConfig;
use crate::error::{BookError, Result};
use crate::storage::JsonStorage;
use crate::store::RecordStore;
use crate::types::Clock;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A book bound to its file.
pub struct Session {
    config: BookConfig,
    storage: JsonStorage,
    book: Book,
    unsaved: bool,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("storage", &self.storage)
            .field("unsaved", &self.unsaved)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Load the book named by `config`.
    ///
    /// A corrupted file is an error. Any other load failure is logged and
    /// the session starts empty, leaving the file alone until the next save.
    /// Failing to create a missing file is logged too.
    pub fn open(config: BookConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let storage = JsonStorage::new(&config.path);

        let store = match storage.read() {
            Ok(Some(store)) => store,
            Ok(None) => {
                tracing::info!(path = %config.path.display(), "no saved book, starting empty");
                let store = RecordStore::new();
                if config.create_if_missing {
                    if let Err(error) = storage.save(&store) {
                        tracing::warn!(
                            path = %config.path.display(),
                            error = %error,
                            "could not create book file, starting empty"
                        );
                    }
                }
                store
            }
            Err(BookError::Corruption(reason)) => {
                return Err(BookError::Corruption(reason));
            }
            Err(error) => {
                tracing::warn!(
                    path = %config.path.display(),
                    error = %error,
                    "could not load book, starting empty"
                );
                RecordStore::new()
            }
        };

        Ok(Self {
            config,
            storage,
            book: Book::with_store(store, clock),
            unsaved: false,
        })
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut Book {
        &mut self.book
    }

    /// Whether the book has changes its file does not hold yet.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Run `command`, saving afterwards if it changed the book.
    ///
    /// The command has already been applied when the autosave runs, so a
    /// failed save is logged and left pending rather than reported as a
    /// command error.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let outcome = command.execute(&mut self.book)?;
        if outcome.mutated() {
            self.unsaved = true;
            if self.config.autosave {
                let _ = self.save();
            }
        }
        Ok(outcome)
    }

    /// Write the book to its file now.
    pub fn save(&mut self) -> Result<()> {
        match self.storage.save(self.book.store()) {
            Ok(()) => {
                self.unsaved = false;
                Ok(())
            }
            Err(error) => {
                tracing::error!(
                    path = %self.storage.path().display(),
                    error = %error,
                    kind = ?error.kind(),
                    "failed to save book"
                );
                Err(error)
            }
        }
    }
}

/// A session behind one lock, for hosts that share it across threads.
///
/// Reads and writes both take the lock.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn execute(&self, command: Command) -> Result<Outcome> {
        self.inner.lock().execute(command)
    }

    /// Run `f` with the session locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
