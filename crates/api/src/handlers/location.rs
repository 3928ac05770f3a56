//! Handlers for the `/locations` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use filetrail_core::error::CoreError;
use filetrail_core::types::DbId;
use filetrail_db::models::location::{
    CreateLocation, Location, LocationWithFolders, UpdateLocation,
};
use filetrail_db::repositories::{FolderRepo, LocationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// POST /api/v1/locations
pub async fn create(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateLocation>,
) -> AppResult<(StatusCode, Json<Location>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Location name is required".into(),
        )));
    }
    let location = LocationRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

/// GET /api/v1/locations
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Location>>> {
    let locations = LocationRepo::list(&state.pool).await?;
    Ok(Json(locations))
}

/// GET /api/v1/locations/with-folders
///
/// Locations with their folders (and files) nested, backing the admin
/// location view. Staff only see folders of their own department.
pub async fn list_with_folders(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LocationWithFolders>>> {
    let department_scope = if user.role == filetrail_core::roles::ROLE_STAFF {
        user.department_id
    } else {
        None
    };

    let locations = LocationRepo::list(&state.pool).await?;
    let folders = FolderRepo::list_with_files(&state.pool, department_scope).await?;

    let mut nested: Vec<LocationWithFolders> = locations
        .into_iter()
        .map(|l| LocationWithFolders {
            id: l.id,
            name: l.name,
            folders: Vec::new(),
        })
        .collect();

    for folder in folders {
        if let Some(location) = nested
            .iter_mut()
            .find(|l| l.id == folder.folder.location_id)
        {
            location.folders.push(folder);
        }
    }

    Ok(Json(nested))
}

/// GET /api/v1/locations/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Location>> {
    let location = LocationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;
    Ok(Json(location))
}

/// PUT /api/v1/locations/{id}
pub async fn update(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLocation>,
) -> AppResult<Json<Location>> {
    let location = LocationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))?;
    Ok(Json(location))
}

/// DELETE /api/v1/locations/{id}
///
/// Fails with 409 while folders still reference the location.
pub async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LocationRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Location",
            id,
        }))
    }
}
