//! # SwingSense
//!
//! Golf-swing coaching backed by a chat-completion model. This crate holds the
//! domain types, the AI completion client, the SQLite store and the feature
//! services that tie them together:
//!
//! - [`feedback`]: submit a swing question and list stored questions, feedback and logs.
//! - [`plans`]: generate and fetch training plans.
//! - [`resources`]: suggest online resources for a swing issue.
//! - [`progress`]: record and query progress metrics.

pub mod constants;
pub mod errors;
pub mod feedback;
pub mod plans;
pub mod progress;
pub mod prompts;
pub mod providers;
pub mod resources;
pub mod types;

pub use errors::{AiError, CoachError, StorageError};
pub use prompts::PromptTask;
pub use providers::ai::{openai::OpenAiProvider, AiProvider, CompletionOptions};
pub use providers::db::sqlite::SqliteProvider;
pub use providers::db::storage::{PlanStore, ProgressStore, QuestionStore};
pub use types::{
    Feedback, PlanInput, ProgressMetric, Question, ResourceSuggestion, SwingLog, TrainingPlan,
};
