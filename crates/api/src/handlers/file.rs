//! Handlers for the `/files` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use filetrail_core::audit::action_types;
use filetrail_core::error::CoreError;
use filetrail_core::types::DbId;
use filetrail_db::models::file::{CreateFile, File, FileDetail, SetFileActive, UpdateFile};
use filetrail_db::repositories::{FileRepo, FolderRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::activity;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::state::AppState;

/// POST /api/v1/files
///
/// Create a file and assign it to its folder in one transaction.
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateFile>,
) -> AppResult<(StatusCode, Json<File>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "File name is required".into(),
        )));
    }

    FolderRepo::find_by_id(&state.pool, input.folder_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Folder",
            id: input.folder_id,
        }))?;

    let file = FileRepo::create(&state.pool, &input, user.user_id).await?;

    activity::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_CREATE,
        Some("file"),
        Some(file.id),
        None,
    )
    .await;

    Ok((StatusCode::CREATED, Json(file)))
}

/// GET /api/v1/files
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FileDetail>>> {
    let files = FileRepo::list(&state.pool).await?;
    Ok(Json(files))
}

/// GET /api/v1/files/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FileDetail>> {
    let file = FileRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "File", id }))?;
    Ok(Json(file))
}

/// PUT /api/v1/files/{id}
///
/// Rename a file and/or re-assign it to another folder. Re-assignment is an
/// upsert on the association, so a file filed elsewhere is moved.
pub async fn update(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFile>,
) -> AppResult<Json<FileDetail>> {
    FileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "File", id }))?;

    if let Some(name) = &input.name {
        if name.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "File name must not be empty".into(),
            )));
        }
        FileRepo::rename(&state.pool, id, name).await?;
    }

    if let Some(folder_id) = input.folder_id {
        FolderRepo::find_by_id(&state.pool, folder_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Folder",
                id: folder_id,
            }))?;
        FolderRepo::attach_file(&state.pool, folder_id, id).await?;
    }

    let file = FileRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "File", id }))?;

    activity::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_UPDATE,
        Some("file"),
        Some(id),
        None,
    )
    .await;

    Ok(Json(file))
}

/// POST /api/v1/files/{id}/unlink
///
/// Remove the file's folder association, leaving it unfiled.
pub async fn unlink(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    FileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "File", id }))?;

    FolderRepo::detach_file(&state.pool, id).await?;

    activity::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_UPDATE,
        Some("file"),
        Some(id),
        Some(serde_json::json!({ "unlinked": true })),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/files/{id}/status
///
/// Activate or deactivate a file.
pub async fn set_status(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetFileActive>,
) -> AppResult<StatusCode> {
    let updated = FileRepo::set_active(&state.pool, id, input.is_active).await?;
    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "File", id }))
    }
}
