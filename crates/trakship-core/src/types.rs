//! Core data types shared across the TrakShip crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Stable string form used in the database `sender` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }

    /// Parse the database string form. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Sender::User),
            "bot" => Some(Sender::Bot),
            _ => None,
        }
    }
}

/// A single chat message. Immutable once appended to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A chat engagement identified by an opaque session id.
///
/// Created on the first message for a given id and never deleted in normal
/// operation. `last_activity` is bumped whenever a message is appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub session_id: String,
    /// Owning user, when the visitor is signed in. Anonymous otherwise.
    pub user_id: Option<Uuid>,
    /// Message log in append order.
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

/// Category of an FAQ entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaqCategory {
    Shipping,
    Tracking,
    Delivery,
    Pricing,
    Account,
    General,
    Support,
}

impl FaqCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaqCategory::Shipping => "shipping",
            FaqCategory::Tracking => "tracking",
            FaqCategory::Delivery => "delivery",
            FaqCategory::Pricing => "pricing",
            FaqCategory::Account => "account",
            FaqCategory::General => "general",
            FaqCategory::Support => "support",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "shipping" => Some(FaqCategory::Shipping),
            "tracking" => Some(FaqCategory::Tracking),
            "delivery" => Some(FaqCategory::Delivery),
            "pricing" => Some(FaqCategory::Pricing),
            "account" => Some(FaqCategory::Account),
            "general" => Some(FaqCategory::General),
            "support" => Some(FaqCategory::Support),
            _ => None,
        }
    }
}

/// A canned question/answer record used for heuristic matching.
///
/// Read-mostly; the catalog is seeded once at startup when empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: Uuid,
    pub question: String,
    /// Keywords matched as case-insensitive substrings of the user message.
    pub keywords: Vec<String>,
    pub answer: String,
    pub category: FaqCategory,
    pub priority: i64,
    pub active: bool,
}

impl FaqEntry {
    /// Convenience constructor for seed entries (priority 1, active).
    pub fn seed(
        question: &str,
        keywords: &[&str],
        answer: &str,
        category: FaqCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: question.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            answer: answer.to_string(),
            category,
            priority: 1,
            active: true,
        }
    }
}

/// A registered account. The password hash lives only in storage and is
/// never part of this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub created_at: DateTime<Utc>,
}
