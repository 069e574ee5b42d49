//! # SQLite Specific SQL Queries
//!
//! This module centralizes SQL query strings for the SQLite provider.
//! Timestamps are stored as fixed-width RFC 3339 text, so ordering by the
//! column is chronological.

pub const CREATE_SWING_QUESTIONS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS swing_questions (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        question TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
";

/// `question_id` links to `swing_questions`. The store keeps the link: the
/// pair is inserted in one transaction and `DELETE_FEEDBACK_FOR_QUESTION`
/// runs before `DELETE_QUESTION`.
pub const CREATE_SWING_FEEDBACK_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS swing_feedback (
        id TEXT PRIMARY KEY,
        question_id TEXT NOT NULL,
        feedback TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
";

pub const CREATE_TRAINING_PLANS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS training_plans (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        plan TEXT NOT NULL,
        years_played INTEGER NOT NULL,
        handicap REAL NOT NULL,
        strengths TEXT NOT NULL,
        weaknesses TEXT NOT NULL,
        goals TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
";

pub const CREATE_PROGRESS_METRICS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS progress_metrics (
        id TEXT PRIMARY KEY,
        user_id TEXT,
        metric TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
";

pub const CREATE_SWING_QUESTIONS_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_swing_questions_created_at ON swing_questions (created_at);";
pub const CREATE_SWING_FEEDBACK_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_swing_feedback_created_at ON swing_feedback (created_at);";
pub const CREATE_SWING_FEEDBACK_QUESTION_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_swing_feedback_question_id ON swing_feedback (question_id);";
pub const CREATE_TRAINING_PLANS_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_training_plans_created_at ON training_plans (created_at);";
pub const CREATE_PROGRESS_METRICS_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_progress_metrics_user_id ON progress_metrics (user_id);";

/// Every statement needed to bring an empty database up to the current schema.
/// All statements are idempotent.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[
    CREATE_SWING_QUESTIONS_TABLE,
    CREATE_SWING_FEEDBACK_TABLE,
    CREATE_TRAINING_PLANS_TABLE,
    CREATE_PROGRESS_METRICS_TABLE,
    CREATE_SWING_QUESTIONS_CREATED_AT_INDEX,
    CREATE_SWING_FEEDBACK_CREATED_AT_INDEX,
    CREATE_SWING_FEEDBACK_QUESTION_INDEX,
    CREATE_TRAINING_PLANS_CREATED_AT_INDEX,
    CREATE_PROGRESS_METRICS_USER_INDEX,
];

// --- Questions & Feedback ---

pub const INSERT_QUESTION: &str =
    "INSERT INTO swing_questions (id, user_id, question, created_at) VALUES (?, ?, ?, ?)";

pub const INSERT_FEEDBACK: &str =
    "INSERT INTO swing_feedback (id, question_id, feedback, created_at) VALUES (?, ?, ?, ?)";

pub const LIST_QUESTIONS: &str = "
    SELECT id, question, created_at, user_id
    FROM swing_questions
    ORDER BY created_at DESC, id DESC
    LIMIT ?
";

pub const LIST_FEEDBACK: &str = "
    SELECT id, question_id, feedback, created_at
    FROM swing_feedback
    ORDER BY created_at DESC, id DESC
    LIMIT ?
";

pub const LIST_LOGS: &str = "
    SELECT q.id, q.question, f.feedback, q.created_at
    FROM swing_questions q
    JOIN swing_feedback f ON f.question_id = q.id
    ORDER BY q.created_at DESC, q.id DESC
    LIMIT ?
";

pub const DELETE_FEEDBACK_FOR_QUESTION: &str = "DELETE FROM swing_feedback WHERE question_id = ?";

pub const DELETE_QUESTION: &str = "DELETE FROM swing_questions WHERE id = ?";

// --- Training Plans ---

pub const INSERT_TRAINING_PLAN: &str = "
    INSERT INTO training_plans
        (id, user_id, plan, years_played, handicap, strengths, weaknesses, goals, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

pub const LATEST_TRAINING_PLAN: &str = "
    SELECT id, plan, years_played, handicap, strengths, weaknesses, goals, created_at, user_id
    FROM training_plans
    ORDER BY created_at DESC, id DESC
    LIMIT 1
";

// --- Progress Metrics ---

pub const INSERT_PROGRESS_METRIC: &str =
    "INSERT INTO progress_metrics (id, user_id, metric, created_at) VALUES (?, ?, ?, ?)";

/// Open bounds are passed as the empty string (lower) and `'~'` (upper),
/// which sort before and after every stored timestamp respectively.
pub const LIST_PROGRESS_METRICS: &str = "
    SELECT id, user_id, metric, created_at
    FROM progress_metrics
    WHERE user_id = ? AND created_at >= ? AND created_at < ?
    ORDER BY created_at DESC, id DESC
";
