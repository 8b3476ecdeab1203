use std::collections::HashMap;

use postbox_types::{ConversationSummary, Message};
use tracing::{debug, info};

use crate::MessageStore;
use crate::error::Result;

impl MessageStore {
    // -- Writes --

    pub fn append(&self, message: &Message) -> Result<()> {
        self.with_backend(|backend| backend.append(message))?;
        debug!("Stored {}", message);
        Ok(())
    }

    /// Flag the first message for `recipient` stamped `timestamp` as read.
    ///
    /// A miss is not an error: the store is left untouched and `false` comes
    /// back. Marking an already-read message again is harmless.
    pub fn mark_read(&self, recipient: &str, timestamp: &str) -> Result<bool> {
        let found =
            self.with_backend(|backend| backend.mark_first_read(recipient, timestamp))?;

        if found {
            info!("Marked message to {} at {} as read", recipient, timestamp);
        } else {
            debug!("No message to {} at {}; nothing marked", recipient, timestamp);
        }
        Ok(found)
    }

    // -- Reads --

    /// The whole collection in append order.
    pub fn all(&self) -> Result<Vec<Message>> {
        self.with_backend(|backend| backend.load())
    }

    /// Messages addressed to `username`, in append order.
    pub fn inbox(&self, username: &str, unread_only: bool) -> Result<Vec<Message>> {
        let messages = self
            .all()?
            .into_iter()
            .filter(|m| m.recipient() == username)
            .filter(|m| !unread_only || !m.is_read())
            .collect();
        Ok(messages)
    }

    /// Messages exchanged between `a` and `b` in either direction, oldest
    /// first. Equal timestamps keep append order.
    pub fn conversation(&self, a: &str, b: &str) -> Result<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .all()?
            .into_iter()
            .filter(|m| m.is_between(a, b))
            .collect();

        messages.sort_by(|x, y| x.timestamp().cmp(y.timestamp()));
        Ok(messages)
    }

    /// One entry per partner `username` has exchanged messages with, most
    /// recent conversation first. Partners whose latest timestamps are equal
    /// keep first-seen order; on an equal timestamp the later-stored message
    /// becomes `last_message`.
    pub fn conversations(&self, username: &str) -> Result<Vec<ConversationSummary>> {
        let mut summaries: Vec<ConversationSummary> = Vec::new();
        let mut by_partner: HashMap<String, usize> = HashMap::new();

        for message in self.all()? {
            let Some(partner) = message.partner_of(username).map(str::to_owned) else {
                continue;
            };
            let unread = usize::from(message.recipient() == username && !message.is_read());

            match by_partner.get(&partner).copied() {
                Some(idx) => {
                    let summary = &mut summaries[idx];
                    summary.unread += unread;
                    if message.timestamp() >= summary.last_message.timestamp() {
                        summary.last_message = message;
                    }
                }
                None => {
                    by_partner.insert(partner.clone(), summaries.len());
                    summaries.push(ConversationSummary {
                        partner,
                        last_message: message,
                        unread,
                    });
                }
            }
        }

        summaries.sort_by(|x, y| y.last_message.timestamp().cmp(x.last_message.timestamp()));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SqliteBackend;

    fn store() -> MessageStore {
        MessageStore::new(SqliteBackend::open_in_memory().unwrap()).unwrap()
    }

    fn send(store: &MessageStore, from: &str, to: &str, content: &str, ts: &str) -> Message {
        let msg = Message::with_timestamp(from, to, content, ts).unwrap();
        store.append(&msg).unwrap();
        msg
    }

    #[test]
    fn inbox_filters_by_recipient() {
        let store = store();
        send(&store, "alice", "bob", "Hi Bob!", "t1");
        send(&store, "charlie", "bob", "Hey Bob!", "t2");
        send(&store, "bob", "alice", "Hi Alice!", "t3");

        assert_eq!(store.inbox("bob", false).unwrap().len(), 2);
        assert_eq!(store.inbox("alice", false).unwrap().len(), 1);
        assert!(store.inbox("nobody", false).unwrap().is_empty());
    }

    #[test]
    fn conversation_excludes_third_parties() {
        let store = store();
        send(&store, "alice", "bob", "Hi Bob!", "t1");
        send(&store, "bob", "alice", "Hi Alice!", "t2");
        send(&store, "charlie", "bob", "Hey Bob!", "t3");
        send(&store, "alice", "bob", "How are you?", "t4");

        let convo = store.conversation("alice", "bob").unwrap();
        assert_eq!(convo.len(), 3);
        assert!(convo.iter().all(|m| m.sender() != "charlie"));
    }

    #[test]
    fn conversation_ties_keep_append_order() {
        let store = store();
        send(&store, "alice", "bob", "first", "t5");
        send(&store, "bob", "alice", "second", "t5");
        send(&store, "alice", "bob", "earlier", "t1");

        let contents: Vec<String> = store
            .conversation("bob", "alice")
            .unwrap()
            .iter()
            .map(|m| m.content().to_string())
            .collect();
        assert_eq!(contents, ["earlier", "first", "second"]);
    }

    #[test]
    fn conversations_track_latest_and_unread() {
        let store = store();
        send(&store, "alice", "bob", "a1", "2024-01-01T10:00:00.000000");
        send(&store, "carol", "bob", "c1", "2024-01-01T11:00:00.000000");
        send(&store, "bob", "alice", "b1", "2024-01-01T12:00:00.000000");
        send(&store, "alice", "bob", "a2", "2024-01-01T09:00:00.000000");
        send(&store, "dave", "erin", "unrelated", "2024-01-01T13:00:00.000000");
        store.mark_read("bob", "2024-01-01T10:00:00.000000").unwrap();

        let list = store.conversations("bob").unwrap();
        assert_eq!(list.len(), 2);

        assert_eq!(list[0].partner, "alice");
        assert_eq!(list[0].last_message.content(), "b1");
        assert_eq!(list[0].unread, 1);

        assert_eq!(list[1].partner, "carol");
        assert_eq!(list[1].last_message.content(), "c1");
        assert_eq!(list[1].unread, 1);
    }

    #[test]
    fn conversations_with_equal_timestamps_keep_first_seen_order() {
        let store = store();
        send(&store, "carol", "bob", "c", "same");
        send(&store, "bob", "alice", "a", "same");
        send(&store, "dave", "bob", "d", "same");
        send(&store, "erin", "bob", "older", "earlier");

        let partners: Vec<String> = store
            .conversations("bob")
            .unwrap()
            .into_iter()
            .map(|s| s.partner)
            .collect();
        assert_eq!(partners, ["carol", "alice", "dave", "erin"]);
    }

    #[test]
    fn conversations_latest_tie_goes_to_later_append() {
        let store = store();
        send(&store, "alice", "bob", "first", "same");
        send(&store, "bob", "alice", "second", "same");
        send(&store, "alice", "bob", "stale", "before");

        let list = store.conversations("alice").unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].last_message.content(), "second");
    }

    #[test]
    fn conversations_empty_for_stranger() {
        let store = store();
        send(&store, "alice", "bob", "hi", "t1");
        assert!(store.conversations("zed").unwrap().is_empty());
    }

    #[test]
    fn mark_read_reports_hit_and_miss() {
        let store = store();
        let msg = send(&store, "alice", "bob", "Test", "t1");

        assert!(!store.mark_read("bob", "nope").unwrap());
        assert!(store.mark_read("bob", msg.timestamp()).unwrap());
        assert!(store.inbox("bob", false).unwrap()[0].is_read());
    }
}
