//! Dialogue router - turns one inbound message into one reply.
//!
//! Canned content (jokes, stories) is served without touching the
//! conversation store. Everything else becomes a completion exchange:
//! append the user turn, send the full history, record the assistant
//! turn on success. Upstream failures degrade to a fixed fallback reply
//! and leave no assistant turn behind.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::bot::content;
use crate::bot::store::ConversationStore;
use crate::classifier::{classify, Intent};
use crate::groq::{CompletionBackend, Role};

/// Reply when the completion call fails for any reason.
pub const FALLBACK_REPLY: &str = "I didn't understand. Try asking something else!";

/// Reply confirming a conversation reset.
pub const RESET_REPLY: &str = "Conversation history cleared. Let's start fresh!";

pub struct DialogueRouter<C> {
    store: ConversationStore,
    backend: C,
    model_id: String,
    /// Serializes concurrent messages from the same user; different users
    /// proceed in parallel. Entries are never evicted, same as histories.
    user_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl<C: CompletionBackend> DialogueRouter<C> {
    pub fn new(backend: C, model_id: String, max_history: usize) -> Self {
        Self {
            store: ConversationStore::new(max_history),
            backend,
            model_id,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Handle one inbound message and produce the reply text.
    ///
    /// Never fails: upstream errors are logged and mapped to
    /// [`FALLBACK_REPLY`] at this boundary.
    pub async fn handle(&self, user: i64, text: &str) -> String {
        let lock = self.user_lock(user).await;
        let _guard = lock.lock().await;

        match classify(text) {
            Intent::Joke => content::random_joke().to_string(),
            Intent::Story => content::random_story().to_string(),
            Intent::Dialogue => self.dialogue(user, text).await,
        }
    }

    /// Clear `user`'s history and confirm.
    pub async fn reset(&self, user: i64) -> String {
        let lock = self.user_lock(user).await;
        let _guard = lock.lock().await;

        self.store.clear(user);
        info!("Cleared history for user {user}");
        RESET_REPLY.to_string()
    }

    async fn dialogue(&self, user: i64, text: &str) -> String {
        self.store.append(user, Role::User, text.to_string());
        let history = self.store.get(user);

        info!("Calling Groq ({}) with {} message(s)", self.model_id, history.len());
        match self.backend.complete(&self.model_id, &history).await {
            Ok(reply) => {
                // Only successful completions are recorded.
                self.store.append(user, Role::Assistant, reply.clone());
                reply
            }
            Err(e) => {
                warn!("Completion failed for user {user}: {e}");
                FALLBACK_REPLY.to_string()
            }
        }
    }

    async fn user_lock(&self, user: i64) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks.entry(user).or_default().clone()
    }

    #[cfg(test)]
    pub fn history(&self, user: i64) -> Vec<crate::groq::Message> {
        self.store.get(user)
    }
}
