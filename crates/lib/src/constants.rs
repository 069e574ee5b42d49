//! # Shared Constants
//!
//! Limits and defaults shared by the library and the server.

/// The default path for the main application SQLite database.
pub const DEFAULT_DB_FILE: &str = "db/swingsense.db";

/// Inclusive character bounds for a submitted question.
pub const QUESTION_MIN_CHARS: usize = 3;
pub const QUESTION_MAX_CHARS: usize = 2000;

/// Inclusive bounds for training plan inputs.
pub const YEARS_PLAYED_MAX: i64 = 80;
pub const HANDICAP_MAX: f64 = 54.0;
pub const PLAN_TEXT_MIN_CHARS: usize = 3;
pub const PLAN_TEXT_MAX_CHARS: usize = 500;

/// Number of rows returned by the listing endpoints when no limit is given.
pub const DEFAULT_LIST_LIMIT: u32 = 50;
/// Hard upper bound on a listing limit.
pub const MAX_LIST_LIMIT: u32 = 200;

/// How much of an unparseable AI response is echoed back for diagnostics.
pub const MALFORMED_SNIPPET_CHARS: usize = 200;

/// Task names, used as keys in the server configuration.
pub const TASK_SWING_FEEDBACK: &str = "swing_feedback";
pub const TASK_SWING_LOG_FEEDBACK: &str = "swing_log_feedback";
pub const TASK_TRAINING_PLAN: &str = "training_plan";
pub const TASK_RESOURCE_SUGGESTIONS: &str = "resource_suggestions";
