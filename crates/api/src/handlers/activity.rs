//! Handlers for the `/activity` resource, plus the shared recording helper.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use filetrail_core::types::DbId;
use filetrail_db::models::activity::CreateActivityLog;
use filetrail_db::repositories::ActivityLogRepo;
use filetrail_db::DbPool;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the activity listing.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/activity
///
/// Returns the activity trail, newest first. Admin only.
pub async fn list(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ActivityQuery>,
) -> AppResult<impl IntoResponse> {
    let entries = ActivityLogRepo::list(&state.pool, params.limit).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// Record an activity entry, logging (not propagating) failures.
///
/// The trail is best-effort: a failed insert must not fail the request
/// that triggered it.
pub(crate) async fn record(
    pool: &DbPool,
    user_id: Option<DbId>,
    action_type: &str,
    entity_type: Option<&str>,
    entity_id: Option<DbId>,
    details: Option<serde_json::Value>,
) {
    let entry = CreateActivityLog {
        user_id,
        action_type: action_type.to_string(),
        entity_type: entity_type.map(str::to_string),
        entity_id,
        details,
    };
    if let Err(e) = ActivityLogRepo::insert(pool, &entry).await {
        tracing::warn!(error = %e, action_type, "Failed to record activity entry");
    }
}
