//! Scripted support chatbot for the TrakShip backend.
//!
//! Classifies incoming messages into intents (greeting, goodbye, tracking,
//! help) and falls back to keyword-scored FAQ matching. No model inference;
//! every reply comes from a fixed phrase list or the FAQ catalog.

pub mod catalog;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod matcher;

pub use catalog::{default_faqs, quick_replies, WELCOME_MESSAGE};
pub use classifier::{extract_tracking_number, Intent};
pub use engine::{generate_session_id, PhrasePicker, RandomPicker, ResponseEngine};
pub use error::ChatError;
pub use matcher::find_best_match;
