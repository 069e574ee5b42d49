//! # API Payloads
//!
//! Request and response bodies shared by the handlers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use swingsense::{Feedback, ProgressMetric, Question};

/// `?limit=` on the listing endpoints.
#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionCreate {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionOut {
    pub id: String,
    pub question: String,
    pub created_at: DateTime<Utc>,
}

impl From<Question> for QuestionOut {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            created_at: q.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackOut {
    pub id: String,
    pub feedback: String,
    pub created_at: DateTime<Utc>,
}

impl From<Feedback> for FeedbackOut {
    fn from(f: Feedback) -> Self {
        Self {
            id: f.id,
            feedback: f.feedback,
            created_at: f.created_at,
        }
    }
}

/// Body of the swing-log `POST /feedback`.
#[derive(Debug, Deserialize)]
pub struct SwingIssueRequest {
    pub swing_issue: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SwingIssueResponse {
    pub feedback: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlanCreatedResponse {
    pub plan: String,
    pub id: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct ResourceParams {
    pub issue: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ProgressParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressRecorded {
    pub message: String,
    pub data: Value,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressList {
    pub progress: Vec<ProgressMetric>,
    pub user_id: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub user_id: String,
    pub email: Option<String>,
}
