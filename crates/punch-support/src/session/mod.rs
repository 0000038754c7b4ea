//! Per-session conversation transcripts
//!
//! Transcripts live in memory only and grow until the session is reset.

use dashmap::DashMap;

use crate::types::ChatMessage;

/// Keyed store of ordered conversation turns
pub trait SessionStore: Send + Sync {
    /// Full transcript, empty for unknown sessions
    fn get(&self, session_id: &str) -> Vec<ChatMessage>;

    /// Append one turn, creating the session if needed
    fn append(&self, session_id: &str, turn: ChatMessage);

    /// Append several turns so that they stay adjacent in the transcript
    fn append_all(&self, session_id: &str, turns: Vec<ChatMessage>) {
        for turn in turns {
            self.append(session_id, turn);
        }
    }

    /// Drop a session's transcript; returns whether it existed
    fn reset(&self, session_id: &str) -> bool;

    /// The last `n` turns, oldest first
    fn recent(&self, session_id: &str, n: usize) -> Vec<ChatMessage> {
        let mut turns = self.get(session_id);
        let skip = turns.len().saturating_sub(n);
        turns.drain(..skip);
        turns
    }
}

/// `SessionStore` over a sharded concurrent map
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, Vec<ChatMessage>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, session_id: &str) -> Vec<ChatMessage> {
        self.sessions
            .get(session_id)
            .map(|turns| turns.clone())
            .unwrap_or_default()
    }

    fn append(&self, session_id: &str, turn: ChatMessage) {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .push(turn);
    }

    fn append_all(&self, session_id: &str, turns: Vec<ChatMessage>) {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .extend(turns);
    }

    fn reset(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    fn recent(&self, session_id: &str, n: usize) -> Vec<ChatMessage> {
        self.sessions
            .get(session_id)
            .map(|turns| {
                let start = turns.len().saturating_sub(n);
                turns[start..].to_vec()
            })
            .unwrap_or_default()
    }
}
