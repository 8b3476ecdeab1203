//! Durable message store.
//!
//! Every operation works on the full collection: queries load it and filter
//! in memory, writes go through a [`MessageBackend`]. A single mutex
//! serializes operations inside one process; cross-process safety is the
//! backend's business (see [`SqliteBackend`]).

pub mod backend;
pub mod error;
pub mod json_file;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod sqlite;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;

pub use backend::MessageBackend;
pub use error::{Result, StoreError};
pub use json_file::JsonFileBackend;
pub use sqlite::SqliteBackend;

/// Default document location when the caller configures nothing.
pub const DEFAULT_STORE_PATH: &str = "messages.json";

pub struct MessageStore {
    backend: Mutex<Box<dyn MessageBackend>>,
}

impl MessageStore {
    /// Wrap `backend` and make sure its collection exists.
    pub fn new(backend: impl MessageBackend + 'static) -> Result<Self> {
        let mut backend: Box<dyn MessageBackend> = Box::new(backend);
        backend.initialize()?;

        info!("Message store ready ({})", backend.describe());
        Ok(Self {
            backend: Mutex::new(backend),
        })
    }

    pub fn open_json(path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(JsonFileBackend::new(path))
    }

    pub fn open_sqlite(path: &Path) -> Result<Self> {
        Self::new(SqliteBackend::open(path)?)
    }

    /// Recreate the empty collection if it has gone missing. No-op otherwise.
    pub fn initialize(&self) -> Result<()> {
        self.with_backend(|backend| backend.initialize())
    }

    pub fn describe(&self) -> Result<String> {
        self.with_backend(|backend| Ok(backend.describe()))
    }

    /// Run `f` with exclusive access to the backend. The lock spans the whole
    /// closure, so a load-mutate-replace inside it is not interleaved.
    fn with_backend<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Box<dyn MessageBackend>) -> Result<T>,
    {
        let mut backend = self.backend.lock().map_err(|_| StoreError::Poisoned)?;
        f(&mut backend)
    }
}
