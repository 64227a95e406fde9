//! Intent classification for incoming chat messages.
//!
//! Matching is case-insensitive substring containment against fixed phrase
//! lists, checked in a strict order: greeting, goodbye, tracking, help.
//! Anything else falls through to FAQ matching.

use regex::Regex;
use std::sync::LazyLock;

/// What the user appears to be asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Goodbye,
    Tracking,
    Help,
    Other,
}

const GREETINGS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "good morning",
    "good afternoon",
    "good evening",
    "greetings",
];

const GOODBYES: &[&str] = &["bye", "goodbye", "see you", "farewell", "thanks", "thank you"];

const TRACKING_KEYWORDS: &[&str] = &["track", "tracking", "where is my", "status", "package"];

const HELP_KEYWORDS: &[&str] = &["help", "support", "assistance", "problem", "issue"];

// Domestic format first so SW...IN ids match as a unit.
static TRACKING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(SW\d{9}IN|[A-Z]{2}\d{8,12}[A-Z]{2})").expect("Invalid tracking number regex")
});

fn contains_any(message: &str, phrases: &[&str]) -> bool {
    let lower = message.to_lowercase();
    phrases.iter().any(|p| lower.contains(p))
}

/// Classify a message into an [`Intent`].
///
/// Checks are ordered: a message containing both "hi" and "track" is a
/// greeting, and "thanks" beats any later category. Substring containment
/// is deliberate, so "this is a big deal" classifies as a greeting ("hi").
pub fn classify(message: &str) -> Intent {
    if contains_any(message, GREETINGS) {
        Intent::Greeting
    } else if contains_any(message, GOODBYES) {
        Intent::Goodbye
    } else if contains_any(message, TRACKING_KEYWORDS) {
        Intent::Tracking
    } else if contains_any(message, HELP_KEYWORDS) {
        Intent::Help
    } else {
        Intent::Other
    }
}

/// Extract the first tracking number from a message, if any.
///
/// Matches the domestic `SW<9 digits>IN` format or the generic
/// two-letter/8-12 digit/two-letter carrier format. Case-sensitive:
/// tracking ids are uppercase on labels and lowercased input is not
/// treated as an id.
pub fn extract_tracking_number(message: &str) -> Option<&str> {
    TRACKING_NUMBER.find(message).map(|m| m.as_str())
}
