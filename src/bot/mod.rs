//! Bot module - conversation memory, dialogue routing, canned content.

pub mod content;
pub mod reactions;
pub mod router;
pub mod store;


pub use router::DialogueRouter;
