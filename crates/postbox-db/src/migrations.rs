use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Message DB: running migration v1 (initial schema)");
        // Rolled back on drop if any statement fails.
        let tx = conn.unchecked_transaction()?;
        // `seq` carries append order; AUTOINCREMENT keeps it monotonic even
        // after a full replace.
        tx.execute_batch(
            "
            CREATE TABLE messages (
                seq         INTEGER PRIMARY KEY AUTOINCREMENT,
                sender      TEXT NOT NULL,
                recipient   TEXT NOT NULL,
                content     TEXT NOT NULL,
                timestamp   TEXT NOT NULL,
                read        INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX idx_messages_recipient
                ON messages(recipient, timestamp);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
        tx.commit()?;
    }

    Ok(())
}
