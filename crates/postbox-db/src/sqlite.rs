use std::path::{Path, PathBuf};
use std::time::Duration;

use postbox_types::Message;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::backend::MessageBackend;
use crate::error::{Result, StoreError};
use crate::migrations;
use crate::models::MessageRow;

/// How long a writer waits on another process's lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Transactional backend for when more than one process shares the store.
///
/// Appends and mark-read are single statements; a full replace runs inside
/// one transaction.
pub struct SqliteBackend {
    conn: Connection,
    location: PathBuf,
}

impl SqliteBackend {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        info!("Message database opened at {} (journal={})", path.display(), mode);
        Ok(Self {
            conn,
            location: path.to_path_buf(),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            location: PathBuf::from(":memory:"),
        })
    }
}

impl MessageBackend for SqliteBackend {
    fn initialize(&mut self) -> Result<()> {
        migrations::run(&self.conn)
    }

    fn load(&mut self) -> Result<Vec<Message>> {
        let mut stmt = self.conn.prepare(
            "SELECT sender, recipient, content, timestamp, read
             FROM messages
             ORDER BY seq",
        )?;

        let rows = stmt
            .query_map([], MessageRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .enumerate()
            .map(|(index, row)| {
                row.into_message()
                    .map_err(|source| StoreError::Format { index, source })
            })
            .collect()
    }

    fn replace(&mut self, messages: &[Message]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM messages", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO messages (sender, recipient, content, timestamp, read)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for m in messages {
                insert.execute(rusqlite::params![
                    m.sender(),
                    m.recipient(),
                    m.content(),
                    m.timestamp(),
                    m.is_read()
                ])?;
            }
        }
        tx.commit()?;

        debug!("Replaced message table with {} rows", messages.len());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.location.display())
    }

    fn append(&mut self, message: &Message) -> Result<()> {
        self.conn.execute(
            "INSERT INTO messages (sender, recipient, content, timestamp, read)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                message.sender(),
                message.recipient(),
                message.content(),
                message.timestamp(),
                message.is_read()
            ],
        )?;
        Ok(())
    }

    fn mark_first_read(&mut self, recipient: &str, timestamp: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE messages SET read = 1
             WHERE seq = (
                 SELECT seq FROM messages
                 WHERE recipient = ?1 AND timestamp = ?2
                 ORDER BY seq
                 LIMIT 1
             )",
            [recipient, timestamp],
        )?;
        Ok(changed > 0)
    }
}
