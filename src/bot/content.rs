//! Canned jokes and short stories.

use rand::Rng;

pub const JOKES: &[&str] = &[
    "Why don't scientists trust atoms? Because they make up everything!",
    "I told my computer I needed a break, and it said: \"no problem, I'll go to sleep.\"",
    "Why did the scarecrow win an award? Because he was outstanding in his field!",
    "What do you call a fake noodle? An impasta!",
    "Why do programmers prefer dark mode? Because light attracts bugs!",
    "I asked the librarian if the library had books on paranoia. She whispered: \"they're right behind you.\"",
    "Why did the math book look sad? Because it had too many problems.",
    "What do you call a bear with no teeth? A gummy bear!",
];

pub const STORIES: &[&str] = &[
    "Once upon a time, a tiny robot was built to sort screws in a factory. One night it found a window and saw the stars for the first time. From then on it sorted screws by day and mapped constellations by night, and the factory never knew it employed an astronomer.",
    "A lighthouse keeper kept a journal of every ship she guided home. On her last night before retiring, a bottle washed ashore holding a single note: \"We counted your light every crossing. Thank you.\" It was signed by forty-seven captains.",
    "In a quiet village lived a baker whose bread could make people remember their happiest day. Travelers came from far away, not for the taste, but for the memories. The baker never told anyone the secret ingredient was simply baking before sunrise, when the world is still kind.",
    "A young fox found a mirror abandoned in the forest and thought it was another fox. Every day it brought the stranger berries, and every day the stranger offered berries back but never took any. The fox decided this was the most generous friend it had ever met.",
];

/// One random canned joke.
pub fn random_joke() -> &'static str {
    JOKES[rand::thread_rng().gen_range(0..JOKES.len())]
}

/// One random canned story.
pub fn random_story() -> &'static str {
    STORIES[rand::thread_rng().gen_range(0..STORIES.len())]
}
