//! Handlers for the `/folders` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use filetrail_core::audit::action_types;
use filetrail_core::error::CoreError;
use filetrail_core::roles::ROLE_STAFF;
use filetrail_core::types::DbId;
use filetrail_db::models::folder::{CreateFolder, Folder, FolderWithFiles, UpdateFolder};
use filetrail_db::repositories::{DepartmentRepo, FolderRepo, LocationRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::activity;
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireStaff};
use crate::state::AppState;

/// POST /api/v1/folders
///
/// Create a folder with a generated serial number and link the initial
/// files. Staff callers are pinned to their own department regardless of
/// the submitted `department_id`.
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateFolder>,
) -> AppResult<(StatusCode, Json<Folder>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Folder name is required".into(),
        )));
    }

    let department_id = if user.role == ROLE_STAFF {
        user.department_id.ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "User has no department assigned".into(),
            ))
        })?
    } else {
        input.department_id.ok_or_else(|| {
            AppError::Core(CoreError::Validation("department_id is required".into()))
        })?
    };

    let department = DepartmentRepo::find_by_id(&state.pool, department_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Department",
            id: department_id,
        }))?;

    LocationRepo::find_by_id(&state.pool, input.location_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id: input.location_id,
        }))?;

    let folder =
        FolderRepo::create(&state.pool, &input, department.id, &department.name, user.user_id)
            .await?;

    tracing::info!(
        user_id = user.user_id,
        folder_id = folder.id,
        serial_num = %folder.serial_num,
        "Folder created"
    );

    activity::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_CREATE,
        Some("folder"),
        Some(folder.id),
        None,
    )
    .await;

    Ok((StatusCode::CREATED, Json(folder)))
}

/// GET /api/v1/folders
///
/// List folders with their files. Staff only see their own department.
pub async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FolderWithFiles>>> {
    let department_scope = if user.role == ROLE_STAFF {
        user.department_id
    } else {
        None
    };
    let folders = FolderRepo::list_with_files(&state.pool, department_scope).await?;
    Ok(Json(folders))
}

/// GET /api/v1/folders/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FolderWithFiles>> {
    let folder = FolderRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Folder",
            id,
        }))?;
    Ok(Json(folder))
}

/// PUT /api/v1/folders/{id}
///
/// Update name, department, or location. The serial number is never
/// regenerated.
pub async fn update(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFolder>,
) -> AppResult<Json<Folder>> {
    if let Some(department_id) = input.department_id {
        DepartmentRepo::find_by_id(&state.pool, department_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Department",
                id: department_id,
            }))?;
    }
    if let Some(location_id) = input.location_id {
        LocationRepo::find_by_id(&state.pool, location_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Location",
                id: location_id,
            }))?;
    }

    let folder = FolderRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Folder",
            id,
        }))?;

    activity::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_UPDATE,
        Some("folder"),
        Some(folder.id),
        None,
    )
    .await;

    Ok(Json(folder))
}

/// DELETE /api/v1/folders/{id}
///
/// Removes the folder and cascades its file associations.
pub async fn delete(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FolderRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Folder",
            id,
        }));
    }

    activity::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_DELETE,
        Some("folder"),
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
