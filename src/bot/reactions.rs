//! Random reaction emoji for inbound messages.

use rand::Rng;

/// Subset of the reaction emoji Telegram accepts.
pub const REACTIONS: &[&str] = &["👍", "❤️", "🔥", "🥰", "👏", "😁", "🤔", "🎉", "🤩"];

/// Pick a random reaction emoji.
pub fn random_reaction() -> &'static str {
    REACTIONS[rand::thread_rng().gen_range(0..REACTIONS.len())]
}
