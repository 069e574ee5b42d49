use super::{handlers, state::AppState};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Builds the CORS layer from the configured origins. `*` allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{origin}': {e}");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config.allowed_origins);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        // Questions & feedback.
        .route(
            "/questions/",
            get(handlers::list_questions_handler).post(handlers::create_question_handler),
        )
        .route(
            "/questions/questions/",
            get(handlers::list_questions_handler).post(handlers::create_question_handler),
        )
        .route("/feedback/", get(handlers::list_feedback_handler))
        .route("/questions/feedback/", get(handlers::list_feedback_handler))
        // Swing log.
        .route("/feedback", post(handlers::swing_issue_handler))
        .route("/logs", get(handlers::list_logs_handler))
        // Training plans.
        .route("/plans/generate", post(handlers::generate_plan_handler))
        .route("/plans/current", get(handlers::current_plan_handler))
        // Resources.
        .route("/resources", get(handlers::resources_handler))
        .route("/resources/", get(handlers::resources_handler))
        // Progress.
        .route(
            "/progress",
            get(handlers::list_progress_handler).post(handlers::record_progress_handler),
        )
        .route(
            "/progress/",
            get(handlers::list_progress_handler).post(handlers::record_progress_handler),
        )
        // Identity.
        .route("/me", get(handlers::me_handler))
        .route("/me/", get(handlers::me_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
