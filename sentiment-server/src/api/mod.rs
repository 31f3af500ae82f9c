pub mod error;
pub mod sentiment;
pub mod status;

pub use error::{ApiError, ApiResult};

use axum::{routing::get, Json, Router};
use sentiment_types::MessageResponse;

use crate::state::AppState;

/// Build the API router, nested under `prefix` unless it is empty or `/`
pub fn router(state: AppState, prefix: &str) -> Router {
    let api = Router::new()
        .route("/", get(root))
        .route(
            "/status",
            get(status::list_status_checks).post(status::create_status_check),
        )
        .route("/sentiment/overview", get(sentiment::get_overview))
        .route("/sentiment/airlines", get(sentiment::get_airlines))
        .route("/sentiment/airlines/list", get(sentiment::get_airlines_list))
        .route(
            "/sentiment/negative-reasons",
            get(sentiment::get_negative_reasons),
        )
        .route("/sentiment/tweets", get(sentiment::get_tweets));

    let prefix = prefix.trim_matches('/');
    let app = if prefix.is_empty() {
        api
    } else {
        // Nesting maps the inner "/" to "/{prefix}" only; keep the slash form too
        Router::new()
            .nest(&format!("/{}", prefix), api)
            .route(&format!("/{}/", prefix), get(root))
    };

    app.with_state(state)
}

/// GET / - Liveness message
async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Airline Sentiment Analysis API".to_string(),
    })
}
