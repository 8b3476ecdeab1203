//! Database row types. These map directly to SQLite rows and are kept apart
//! from `postbox_types::Message` so the schema can drift independently.

use postbox_types::{FormatError, Message};

/// Every column is `NOT NULL`, so the row is typed to match.
pub struct MessageRow {
    pub sender: String,
    pub recipient: String,
    pub content: String,
    pub timestamp: String,
    pub read: bool,
}

impl MessageRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            sender: row.get(0)?,
            recipient: row.get(1)?,
            content: row.get(2)?,
            timestamp: row.get(3)?,
            read: row.get(4)?,
        })
    }

    /// Same record rules as the JSON document.
    pub fn into_message(self) -> Result<Message, FormatError> {
        Message::from_record(serde_json::json!({
            "sender": self.sender,
            "recipient": self.recipient,
            "content": self.content,
            "timestamp": self.timestamp,
            "read": self.read,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn row_reads_typed_columns_in_select_order() {
        let conn = Connection::open_in_memory().unwrap();
        let row = conn
            .query_row(
                "SELECT 'alice', 'bob', '   ', '2024-01-01T10:00:00.000000', 1",
                [],
                MessageRow::from_row,
            )
            .unwrap();

        let message = row.into_message().unwrap();
        assert_eq!(message.sender(), "alice");
        assert_eq!(message.recipient(), "bob");
        assert_eq!(message.content(), "   ");
        assert!(message.is_read());
    }

    #[test]
    fn null_column_is_a_row_error() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.query_row(
            "SELECT 'alice', NULL, 'hi', 't1', 0",
            [],
            MessageRow::from_row,
        );
        assert!(result.is_err());
    }
}
