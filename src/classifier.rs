/// Intent of one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Joke,
    Story,
    Dialogue,
}

/// Classify a message by case-insensitive substring match.
///
/// Joke wins over story when a message contains both tokens.
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();

    if lowered.contains("joke") {
        Intent::Joke
    } else if lowered.contains("story") {
        Intent::Story
    } else {
        Intent::Dialogue
    }
}
