//! # Domain Types
//!
//! The entities persisted by the store and the inputs accepted by the
//! coaching services. Timestamps are always UTC.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user-submitted swing-issue description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// AI-generated coaching text linked to exactly one `Question`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub id: String,
    pub question_id: String,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}

/// A question joined with its feedback, in the shape of the swing log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwingLog {
    pub id: String,
    pub swing_issue: String,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}

/// The player profile a training plan is generated from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanInput {
    pub years_played: i64,
    pub handicap: f64,
    pub strengths: String,
    pub weaknesses: String,
    pub goals: String,
}

/// A generated plan stored together with the inputs that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingPlan {
    pub id: String,
    pub plan: String,
    pub years_played: i64,
    pub handicap: f64,
    pub strengths: String,
    pub weaknesses: String,
    pub goals: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// An opaque progress payload recorded by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressMetric {
    pub id: String,
    pub user_id: Option<String>,
    pub metric: Value,
    pub created_at: DateTime<Utc>,
}

/// A suggested online resource. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceSuggestion {
    pub id: Value,
    pub title: String,
    pub description: String,
    pub url: String,
}

/// The current UTC time at the precision the store keeps (microseconds).
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// A fresh UUIDv4 identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
