use axum::{extract::State, Json};

use crate::{api::ApiResult, db::repositories::STATUS_LIST_CAP, state::AppState};
use sentiment_types::{StatusCheck, StatusCheckCreate};

/// POST /status - Record a status check
pub async fn create_status_check(
    State(state): State<AppState>,
    Json(payload): Json<StatusCheckCreate>,
) -> ApiResult<Json<StatusCheck>> {
    let check = state.status_store.append(&payload)?;
    Ok(Json(check))
}

/// GET /status - List recorded status checks
pub async fn list_status_checks(State(state): State<AppState>) -> ApiResult<Json<Vec<StatusCheck>>> {
    let checks = state.status_store.list(STATUS_LIST_CAP)?;
    Ok(Json(checks))
}
