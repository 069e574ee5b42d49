//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `swingsense-server`.
//! The handlers are split into sub-modules by feature.

pub mod general;
pub mod legacy;
pub mod me;
pub mod plans;
pub mod progress;
pub mod questions;
pub mod resources;

// Re-export all handlers to make them accessible to the router under a
// single `handlers::` path.
pub use general::*;
pub use legacy::*;
pub use me::*;
pub use plans::*;
pub use progress::*;
pub use questions::*;
pub use resources::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};
