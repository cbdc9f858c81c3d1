//! Per-user bounded conversation history.
//!
//! Each user gets an ordered buffer of role-tagged messages, capped at
//! `max_history` entries. When an append would exceed the cap the oldest
//! entries are dropped first, so the buffer is always a recency window
//! over the conversation.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::groq::{Message, Role};

/// In-memory conversation store, one bounded history per user.
///
/// Histories are created lazily on first append and removed on clear.
/// Inactive users are never evicted; only messages within a user are.
pub struct ConversationStore {
    max_history: usize,
    histories: Mutex<HashMap<i64, VecDeque<Message>>>,
}

impl ConversationStore {
    pub fn new(max_history: usize) -> Self {
        Self {
            max_history,
            histories: Mutex::new(HashMap::new()),
        }
    }

    /// Append a message to `user`'s history, dropping the oldest entries
    /// if the cap is exceeded. Always succeeds.
    pub fn append(&self, user: i64, role: Role, content: String) {
        let mut histories = self.histories.lock().expect("history lock poisoned");
        let history = histories.entry(user).or_default();

        history.push_back(Message { role, content });
        while history.len() > self.max_history {
            history.pop_front();
        }
    }

    /// Snapshot of `user`'s history, oldest first. Empty if unknown.
    pub fn get(&self, user: i64) -> Vec<Message> {
        let histories = self.histories.lock().expect("history lock poisoned");
        histories
            .get(&user)
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Reset `user`'s history to empty. Idempotent.
    pub fn clear(&self, user: i64) {
        let mut histories = self.histories.lock().expect("history lock poisoned");
        histories.remove(&user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_msg(store: &ConversationStore, user: i64, text: &str) {
        store.append(user, Role::User, text.to_string());
    }

    #[test]
    fn test_empty_history_for_unknown_user() {
        let store = ConversationStore::new(10);
        assert!(store.get(42).is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let store = ConversationStore::new(10);
        user_msg(&store, 1, "first");
        store.append(1, Role::Assistant, "second".to_string());
        user_msg(&store, 1, "third");

        let history = store.get(1);
        let texts: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[1].role, Role::Assistant);
    }

    #[test]
    fn test_bounded_to_max_history() {
        let store = ConversationStore::new(3);
        for i in 0..10 {
            user_msg(&store, 1, &format!("msg {i}"));
        }

        let history = store.get(1);
        assert_eq!(history.len(), 3);
        // The most recent 3, in original relative order.
        let texts: Vec<&str> = history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(texts, vec!["msg 7", "msg 8", "msg 9"]);
    }

    #[test]
    fn test_capacity_one_keeps_newest() {
        let store = ConversationStore::new(1);
        user_msg(&store, 1, "old");
        user_msg(&store, 1, "new");

        let history = store.get(1);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "new");
    }

    #[test]
    fn test_users_are_isolated() {
        let store = ConversationStore::new(10);
        user_msg(&store, 1, "for one");
        user_msg(&store, 2, "for two");

        assert_eq!(store.get(1).len(), 1);
        assert_eq!(store.get(2).len(), 1);
        assert_eq!(store.get(1)[0].content, "for one");
        assert_eq!(store.get(2)[0].content, "for two");

        store.clear(1);
        assert!(store.get(1).is_empty());
        assert_eq!(store.get(2).len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = ConversationStore::new(10);
        user_msg(&store, 1, "hello");

        store.clear(1);
        assert!(store.get(1).is_empty());
        store.clear(1);
        assert!(store.get(1).is_empty());
    }

    #[test]
    fn test_get_does_not_mutate() {
        let store = ConversationStore::new(10);
        user_msg(&store, 1, "hello");

        let _ = store.get(1);
        let _ = store.get(1);
        assert_eq!(store.get(1).len(), 1);
    }
}
