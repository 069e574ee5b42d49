use crate::errors::StorageError;
use crate::types::{Feedback, ProgressMetric, Question, SwingLog, TrainingPlan};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Storage for submitted questions and the feedback generated for them.
///
/// Listings are ordered newest first, ties broken by identifier descending.
#[async_trait]
pub trait QuestionStore: Send + Sync + Debug {
    /// Writes a question and its feedback as one unit. The question row is
    /// written first; either both rows exist afterwards or neither does.
    async fn insert_question_with_feedback(
        &self,
        question: &Question,
        feedback: &Feedback,
    ) -> Result<(), StorageError>;

    async fn list_questions(&self, limit: u32) -> Result<Vec<Question>, StorageError>;

    async fn list_feedback(&self, limit: u32) -> Result<Vec<Feedback>, StorageError>;

    /// Questions joined with their feedback.
    async fn list_logs(&self, limit: u32) -> Result<Vec<SwingLog>, StorageError>;

    /// Deletes a question together with all of its feedback.
    /// Returns `false` if no such question exists.
    async fn delete_question(&self, question_id: &str) -> Result<bool, StorageError>;
}

/// Append-only storage for generated training plans.
#[async_trait]
pub trait PlanStore: Send + Sync + Debug {
    async fn insert_training_plan(&self, plan: &TrainingPlan) -> Result<(), StorageError>;

    /// The most recently created plan, if any.
    async fn latest_training_plan(&self) -> Result<Option<TrainingPlan>, StorageError>;
}

/// Storage for user progress metrics.
#[async_trait]
pub trait ProgressStore: Send + Sync + Debug {
    async fn insert_progress_metric(&self, metric: &ProgressMetric) -> Result<(), StorageError>;

    /// A user's metrics created within `[from, until)`, newest first.
    /// Either bound may be open.
    async fn list_progress_metrics(
        &self,
        user_id: &str,
        from: Option<DateTime<Utc>>,
        until: Option<DateTime<Utc>>,
    ) -> Result<Vec<ProgressMetric>, StorageError>;
}
