//! Human-readable output. Pure functions so the layout is testable without
//! touching stdout.

use std::fmt::Write;

use postbox_types::{ConversationSummary, Message};

const RULE_WIDTH: usize = 60;

pub fn sent(message: &Message) -> String {
    format!(
        "✓ Message sent from {} to {}\n  Timestamp: {}\n",
        message.sender(),
        message.recipient(),
        message.timestamp()
    )
}

pub fn inbox(username: &str, messages: &[Message], unread_only: bool) -> String {
    if messages.is_empty() {
        let status = if unread_only { "unread " } else { "" };
        return format!("No {}messages in inbox for {}\n", status, username);
    }

    let rule = "-".repeat(RULE_WIDTH);
    let mut out = format!("Inbox for {}:\n{}\n", username, rule);
    for msg in messages {
        let status = if msg.is_read() { "📭" } else { "📩" };
        let _ = writeln!(out, "{} From: {}", status, msg.sender());
        let _ = writeln!(out, "  Time: {}", msg.timestamp());
        let _ = writeln!(out, "  Message: {}", msg.content());
        let _ = writeln!(out, "{}", rule);
    }
    out
}

pub fn conversation(user1: &str, user2: &str, messages: &[Message]) -> String {
    if messages.is_empty() {
        return format!("No conversation found between {} and {}\n", user1, user2);
    }

    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!("Conversation between {} and {}:\n{}\n", user1, user2, rule);
    for msg in messages {
        let _ = writeln!(out, "[{}] {}: {}", msg.timestamp(), msg.sender(), msg.content());
    }
    let _ = writeln!(out, "{}", rule);
    out
}

pub fn mark_read(found: bool) -> String {
    if found {
        "✓ Message marked as read\n".to_string()
    } else {
        "No matching message; nothing marked\n".to_string()
    }
}

pub fn conversations(username: &str, summaries: &[ConversationSummary]) -> String {
    if summaries.is_empty() {
        return format!("No conversations for {}\n", username);
    }

    let mut out = format!("Conversations for {}:\n", username);
    for s in summaries {
        let last = &s.last_message;
        let unread = if s.unread > 0 {
            format!(" ({} unread)", s.unread)
        } else {
            String::new()
        };
        let _ = writeln!(out, "• {}{}", s.partner, unread);
        let _ = writeln!(out, "  [{}] {}: {}", last.timestamp(), last.sender(), last.content());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(from: &str, to: &str, content: &str, ts: &str) -> Message {
        Message::with_timestamp(from, to, content, ts).unwrap()
    }

    #[test]
    fn sent_shows_timestamp() {
        let out = sent(&msg("alice", "bob", "hi", "2024-01-01T12:00:00.000000"));
        assert_eq!(
            out,
            "✓ Message sent from alice to bob\n  Timestamp: 2024-01-01T12:00:00.000000\n"
        );
    }

    #[test]
    fn empty_inbox_wording() {
        assert_eq!(inbox("bob", &[], false), "No messages in inbox for bob\n");
        assert_eq!(inbox("bob", &[], true), "No unread messages in inbox for bob\n");
    }

    #[test]
    fn inbox_marks_read_state() {
        let unread = msg("alice", "bob", "new", "t2");
        let mut read = msg("carol", "bob", "old", "t1");
        read.mark_read();

        let out = inbox("bob", &[read, unread], false);
        assert!(out.starts_with("Inbox for bob:\n"));
        assert!(out.contains("📭 From: carol"));
        assert!(out.contains("📩 From: alice"));
        assert!(out.contains("  Message: new"));
        assert_eq!(out.matches(&"-".repeat(RULE_WIDTH)).count(), 3);
    }

    #[test]
    fn conversation_lines() {
        let messages = [msg("alice", "bob", "hi", "t1"), msg("bob", "alice", "yo", "t2")];
        let out = conversation("alice", "bob", &messages);
        assert!(out.contains("[t1] alice: hi\n[t2] bob: yo\n"));
        assert_eq!(
            conversation("alice", "bob", &[]),
            "No conversation found between alice and bob\n"
        );
    }

    #[test]
    fn mark_read_wording() {
        assert_eq!(mark_read(true), "✓ Message marked as read\n");
        assert_eq!(mark_read(false), "No matching message; nothing marked\n");
    }

    #[test]
    fn conversation_list_shows_unread_counts() {
        let summaries = [
            ConversationSummary {
                partner: "alice".into(),
                last_message: msg("alice", "bob", "ping", "t3"),
                unread: 2,
            },
            ConversationSummary {
                partner: "carol".into(),
                last_message: msg("bob", "carol", "done", "t1"),
                unread: 0,
            },
        ];

        let out = conversations("bob", &summaries);
        assert!(out.contains("• alice (2 unread)\n  [t3] alice: ping\n"));
        assert!(out.contains("• carol\n  [t1] bob: done\n"));
        assert_eq!(conversations("bob", &[]), "No conversations for bob\n");
    }
}
