//! Per-chat session registry.
//!
//! One [`SessionEntry`] per active conversation, keyed by the transport's
//! chat identifier. Entries are created on first contact, mutated under an
//! exclusive per-key lock (so events for one session are handled strictly
//! sequentially), and removed when a conversation completes or resets to
//! idle with no collected data.
//!
//! Nothing here is persisted; a process restart forgets every session.

use dashmap::DashMap;
use prestito_types::session::{ConversationState, LoanSession};

/// Conversation state plus accumulated inputs for one chat.
#[derive(Debug, Clone, Default)]
pub struct SessionEntry {
    pub state: ConversationState,
    pub session: LoanSession,
}

/// Registry of all live conversations.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    entries: DashMap<String, SessionEntry>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Run `f` with exclusive access to the chat's entry, creating an idle
    /// entry on first contact.
    ///
    /// The entry lock is held for the duration of `f`, which is what makes
    /// event handling for a single session strictly sequential.
    pub fn with_entry<T>(&self, chat_id: &str, f: impl FnOnce(&mut SessionEntry) -> T) -> T {
        let mut entry = self.entries.entry(chat_id.to_string()).or_default();
        f(entry.value_mut())
    }

    /// Drop a chat's entry entirely.
    pub fn remove(&self, chat_id: &str) {
        self.entries.remove(chat_id);
    }

    /// Drop the entry if the conversation is back at rest with nothing
    /// collected (after completion or cancellation).
    pub fn prune_idle(&self, chat_id: &str) {
        self.entries.remove_if(chat_id, |_, entry| {
            entry.state.is_idle() && entry.session == LoanSession::default()
        });
    }

    /// Current state of a chat, `Idle` if unknown.
    pub fn state_of(&self, chat_id: &str) -> ConversationState {
        self.entries
            .get(chat_id)
            .map(|entry| entry.state)
            .unwrap_or_default()
    }

    /// Number of chats currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_created_on_first_contact() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty());

        let state = registry.with_entry("chat-1", |entry| entry.state);
        assert_eq!(state, ConversationState::Idle);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_mutations_persist_across_calls() {
        let registry = SessionRegistry::new();
        registry.with_entry("chat-1", |entry| {
            entry.state = ConversationState::AwaitingAmount;
            entry.session.customer_name = Some("Mario Rossi".to_string());
        });

        registry.with_entry("chat-1", |entry| {
            assert_eq!(entry.state, ConversationState::AwaitingAmount);
            assert_eq!(entry.session.customer_name.as_deref(), Some("Mario Rossi"));
        });
    }

    #[test]
    fn test_sessions_are_independent() {
        let registry = SessionRegistry::new();
        registry.with_entry("chat-1", |entry| {
            entry.state = ConversationState::AwaitingName;
        });

        assert_eq!(registry.state_of("chat-1"), ConversationState::AwaitingName);
        assert_eq!(registry.state_of("chat-2"), ConversationState::Idle);
    }

    #[test]
    fn test_prune_idle_only_removes_at_rest() {
        let registry = SessionRegistry::new();
        registry.with_entry("busy", |entry| {
            entry.state = ConversationState::AwaitingAmount;
        });
        registry.with_entry("done", |_| {});

        registry.prune_idle("busy");
        registry.prune_idle("done");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.state_of("busy"), ConversationState::AwaitingAmount);
    }

    #[test]
    fn test_remove() {
        let registry = SessionRegistry::new();
        registry.with_entry("chat-1", |entry| {
            entry.state = ConversationState::AwaitingAmount;
        });
        registry.remove("chat-1");

        assert!(registry.is_empty());
        assert_eq!(registry.state_of("chat-1"), ConversationState::Idle);
    }
}
