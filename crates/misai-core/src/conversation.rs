//! Append-only conversation log for MisBot

use crate::model::{FactCheck, HistoryEntry, Sender};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Greeting seeded as the first message of every session
pub const GREETING_TEXT: &str =
    "Hello! I'm MisBot, your misinformation detection assistant. How can I help you today?";

/// Bot text shown when a chat request fails
pub const CONNECTION_ERROR_TEXT: &str =
    "I'm sorry, I couldn't connect to the server. Please try again later.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fact_check: Option<FactCheck>,
}

impl ConversationMessage {
    /// Wall-clock time of the message as `HH:MM`
    pub fn local_time(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%H:%M").to_string()
    }
}

/// Message contents before the log assigns an id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDraft {
    pub text: String,
    pub sender: Sender,
    pub is_error: bool,
    pub fact_check: Option<FactCheck>,
}

impl MessageDraft {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            is_error: false,
            fact_check: None,
        }
    }

    pub fn bot(text: impl Into<String>, fact_check: Option<FactCheck>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            is_error: false,
            fact_check,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            is_error: true,
            fact_check: None,
        }
    }
}

/// Ordered message history owned by one chat page
///
/// Ids are assigned from a counter, never from the current length, so they
/// stay strictly increasing and are never reused. Messages cannot be edited
/// or removed once appended.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    messages: Vec<ConversationMessage>,
    next_id: u64,
}

impl ConversationLog {
    /// New log holding only the bot greeting (id 1)
    pub fn new() -> Self {
        let mut log = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        log.append(MessageDraft::bot(GREETING_TEXT, None));
        log
    }

    /// Insert at the tail and return the assigned id
    pub fn append(&mut self, draft: MessageDraft) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.messages.push(ConversationMessage {
            id,
            text: draft.text,
            sender: draft.sender,
            timestamp: Utc::now(),
            is_error: draft.is_error,
            fact_check: draft.fact_check,
        });
        id
    }

    /// `(text, sender)` projection used as context for the next request
    pub fn snapshot_for_request(&self) -> Vec<HistoryEntry> {
        self.messages
            .iter()
            .map(|m| HistoryEntry {
                text: m.text.clone(),
                sender: m.sender,
            })
            .collect()
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_with_greeting() {
        let log = ConversationLog::new();
        assert_eq!(log.len(), 1);
        let greeting = &log.messages()[0];
        assert_eq!(greeting.id, 1);
        assert_eq!(greeting.sender, Sender::Bot);
        assert_eq!(greeting.text, GREETING_TEXT);
    }

    #[test]
    fn test_ids_strictly_increase_across_errors() {
        let mut log = ConversationLog::new();
        let a = log.append(MessageDraft::user("first"));
        let b = log.append(MessageDraft::error(CONNECTION_ERROR_TEXT));
        let c = log.append(MessageDraft::user("second"));
        assert!(1 < a && a < b && b < c);

        let ids: Vec<u64> = log.messages().iter().map(|m| m.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert!(log.messages()[2].is_error);
    }

    #[test]
    fn test_snapshot_strips_metadata_and_does_not_mutate() {
        let mut log = ConversationLog::new();
        log.append(MessageDraft::user("Is the earth flat?"));
        let snapshot = log.snapshot_for_request();

        assert_eq!(
            snapshot,
            vec![
                HistoryEntry {
                    text: GREETING_TEXT.to_string(),
                    sender: Sender::Bot
                },
                HistoryEntry {
                    text: "Is the earth flat?".to_string(),
                    sender: Sender::User
                },
            ]
        );
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_local_time_format() {
        let log = ConversationLog::new();
        let time = log.messages()[0].local_time();
        assert_eq!(time.len(), 5);
        assert_eq!(&time[2..3], ":");
    }
}
