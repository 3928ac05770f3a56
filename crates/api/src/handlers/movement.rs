//! Handlers for the `/movements` resource: the file custody lifecycle.
//!
//! Every transition endpoint applies the same guard order: 404 when the
//! record does not exist, 409 when the current status is not the required
//! predecessor, 403 when the caller's role is not authorized (enforced by
//! the extractor before the handler body runs).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use filetrail_core::audit::action_types;
use filetrail_core::error::CoreError;
use filetrail_core::movement::{MovementStatus, DEFAULT_MOVE_TYPE};
use filetrail_core::types::DbId;
use filetrail_db::models::movement::{
    CreateMovement, CreateMovementRequest, DepartmentFile, Movement, MovementWithFiles,
    RejectMovementRequest,
};
use filetrail_db::repositories::{FolderRepo, MovementRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::activity;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/movements
///
/// File a movement request. Every requested file must be filed in a folder
/// of the requester's department; any mismatch aborts the whole request.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMovementRequest>,
) -> AppResult<impl IntoResponse> {
    if input.file_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one file must be selected".into(),
        )));
    }

    let requester_dept = auth.department_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "User has no department assigned".into(),
        ))
    })?;

    // Resolve each file to the department of its containing folder. Files
    // missing from the result are unknown or unfiled.
    let rows = MovementRepo::file_departments(&state.pool, &input.file_ids).await?;

    let missing: Vec<DbId> = input
        .file_ids
        .iter()
        .copied()
        .filter(|id| !rows.iter().any(|r| r.file_id == *id))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid file(s): {}",
            join_ids(&missing)
        ))));
    }

    let wrong_dept: Vec<DbId> = rows
        .iter()
        .filter(|r| r.department_id != requester_dept)
        .map(|r| r.file_id)
        .collect();
    if !wrong_dept.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Files outside your department: {}",
            join_ids(&wrong_dept)
        ))));
    }

    if let Some(folder_id) = input.folder_id {
        FolderRepo::find_by_id(&state.pool, folder_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Folder",
                id: folder_id,
            }))?;
    }

    // Advisory duplicate check: best effort, not a uniqueness guarantee.
    if MovementRepo::has_open_movement_for_files(&state.pool, auth.user_id, &input.file_ids)
        .await?
    {
        return Err(AppError::Core(CoreError::Conflict(
            "An open movement request already covers one of these files".into(),
        )));
    }

    let create = CreateMovement {
        move_type: input
            .move_type
            .unwrap_or_else(|| DEFAULT_MOVE_TYPE.to_string()),
        remark: input.remark,
        requester_id: auth.user_id,
        folder_id: input.folder_id,
        file_ids: input.file_ids,
    };

    let movement = MovementRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = auth.user_id,
        movement_id = movement.id,
        file_count = create.file_ids.len(),
        "Movement request created"
    );

    activity::record(
        &state.pool,
        Some(auth.user_id),
        action_types::MOVEMENT_REQUEST,
        Some("movement"),
        Some(movement.id),
        None,
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: movement })))
}

/// GET /api/v1/movements
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let movements = MovementRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: movements }))
}

/// GET /api/v1/movements/pending
///
/// The approval queue, oldest first.
pub async fn list_pending(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let movements = MovementRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse { data: movements }))
}

/// GET /api/v1/movements/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MovementWithFiles>>> {
    let movement = MovementRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movement",
            id,
        }))?;
    Ok(Json(DataResponse { data: movement }))
}

/// POST /api/v1/movements/{id}/approve
///
/// Pending -> Approved. Sets the approver and `approved_at`.
pub async fn approve(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_status(&state, id, MovementStatus::Pending).await?;

    let movement = MovementRepo::approve(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| conflict(id, MovementStatus::Pending))?;

    tracing::info!(
        user_id = user.user_id,
        movement_id = id,
        "Movement approved"
    );

    activity::record(
        &state.pool,
        Some(user.user_id),
        action_types::MOVEMENT_APPROVE,
        Some("movement"),
        Some(id),
        None,
    )
    .await;

    Ok(Json(DataResponse { data: movement }))
}

/// POST /api/v1/movements/{id}/reject
///
/// Pending -> Rejected. A rejection reason is mandatory.
pub async fn reject(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RejectMovementRequest>,
) -> AppResult<impl IntoResponse> {
    let remark = input
        .remark
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "A rejection remark is required".into(),
            ))
        })?;

    ensure_status(&state, id, MovementStatus::Pending).await?;

    let movement = MovementRepo::reject(&state.pool, id, user.user_id, remark)
        .await?
        .ok_or_else(|| conflict(id, MovementStatus::Pending))?;

    tracing::info!(
        user_id = user.user_id,
        movement_id = id,
        "Movement rejected"
    );

    activity::record(
        &state.pool,
        Some(user.user_id),
        action_types::MOVEMENT_REJECT,
        Some("movement"),
        Some(id),
        Some(serde_json::json!({ "remark": remark })),
    )
    .await;

    Ok(Json(DataResponse { data: movement }))
}

/// POST /api/v1/movements/{id}/take-out
///
/// Approved -> TakenOut. Sets `taken_out_at`.
pub async fn take_out(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_status(&state, id, MovementStatus::Approved).await?;

    let movement = MovementRepo::mark_taken_out(&state.pool, id)
        .await?
        .ok_or_else(|| conflict(id, MovementStatus::Approved))?;

    activity::record(
        &state.pool,
        Some(user.user_id),
        action_types::MOVEMENT_TAKE_OUT,
        Some("movement"),
        Some(id),
        None,
    )
    .await;

    Ok(Json(DataResponse { data: movement }))
}

/// POST /api/v1/movements/{id}/return
///
/// TakenOut -> Returned. Sets `returned_at`; the request is then terminal.
pub async fn return_movement(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_status(&state, id, MovementStatus::TakenOut).await?;

    let movement = MovementRepo::mark_returned(&state.pool, id)
        .await?
        .ok_or_else(|| conflict(id, MovementStatus::TakenOut))?;

    activity::record(
        &state.pool,
        Some(user.user_id),
        action_types::MOVEMENT_RETURN,
        Some("movement"),
        Some(id),
        None,
    )
    .await;

    Ok(Json(DataResponse { data: movement }))
}

/// GET /api/v1/movements/files/my-department
///
/// Files selectable on the request form: active files filed in folders of
/// the caller's department.
pub async fn my_department_files(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DepartmentFile>>>> {
    let department_id = user.department_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "User has no department assigned".into(),
        ))
    })?;
    let files = MovementRepo::department_files(&state.pool, department_id).await?;
    Ok(Json(DataResponse { data: files }))
}

/// GET /api/v1/movements/folders/my-department
///
/// Folders of the caller's department.
pub async fn my_department_folders(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let department_id = user.department_id.ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "User has no department assigned".into(),
        ))
    })?;
    let folders = FolderRepo::list_with_files(&state.pool, Some(department_id)).await?;
    Ok(Json(DataResponse { data: folders }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 404 when the movement does not exist, 409 when its status is not
/// `expected`. The subsequent guarded UPDATE re-checks the status so a
/// concurrent transition still cannot slip through.
async fn ensure_status(
    state: &AppState,
    id: DbId,
    expected: MovementStatus,
) -> AppResult<Movement> {
    let movement = MovementRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movement",
            id,
        }))?;

    let status = MovementStatus::from_id(movement.status_id).ok_or_else(|| {
        AppError::InternalError(format!(
            "Movement {id} has unknown status id {}",
            movement.status_id
        ))
    })?;

    if status != expected {
        return Err(conflict_with_status(id, expected, status));
    }
    Ok(movement)
}

fn conflict(id: DbId, expected: MovementStatus) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Movement {id} is no longer {expected}"
    )))
}

fn conflict_with_status(id: DbId, expected: MovementStatus, actual: MovementStatus) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Movement {id} is {actual}, expected {expected}"
    )))
}

fn join_ids(ids: &[DbId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
