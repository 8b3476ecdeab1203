use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use postbox_types::Message;
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::backend::MessageBackend;
use crate::error::{Result, StoreError};

/// The whole collection as one pretty-printed JSON array in a single file.
///
/// Each write goes to a uniquely named temp file in the same directory, which
/// is synced and then renamed over the target. Readers and concurrent writers
/// only ever see a complete document; a crash mid-write leaves the previous
/// one intact.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }

    fn write_document(&self, messages: &[Message]) -> Result<()> {
        let body = serde_json::to_vec_pretty(messages).map_err(io::Error::from)?;

        // Dropping the temp file on any error path removes it.
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(&body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }
}

impl MessageBackend for JsonFileBackend {
    fn initialize(&mut self) -> Result<()> {
        if self.path.try_exists()? {
            return Ok(());
        }

        fs::create_dir_all(self.dir())?;
        self.write_document(&[])?;

        info!("Created empty message document at {}", self.path.display());
        Ok(())
    }

    fn load(&mut self) -> Result<Vec<Message>> {
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<Value> =
            serde_json::from_str(&text).map_err(|source| StoreError::Document {
                path: self.path.clone(),
                source,
            })?;

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Message::from_record(record).map_err(|source| StoreError::Format { index, source })
            })
            .collect()
    }

    fn replace(&mut self, messages: &[Message]) -> Result<()> {
        self.write_document(messages)?;
        debug!("Wrote {} messages to {}", messages.len(), self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json:{}", self.path.display())
    }
}
