pub mod activity;
pub mod auth;
pub mod department;
pub mod file;
pub mod folder;
pub mod health;
pub mod location;
pub mod movement;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                         login (public)
/// /auth/refresh                       refresh (public)
/// /auth/logout                        logout (requires auth)
/// /auth/me                            current principal (requires auth)
///
/// /departments                        list, create
/// /departments/{id}                   get, update, delete
///
/// /locations                          list, create
/// /locations/with-folders             nested folders + files per location
/// /locations/{id}                     get, update, delete
///
/// /folders                            list (staff scoped to own dept), create
/// /folders/{id}                       get, update, delete
///
/// /files                              list, create
/// /files/{id}                         get, update
/// /files/{id}/unlink                  remove folder association (POST)
/// /files/{id}/status                  activate / deactivate (PUT)
///
/// /movements                          list, create
/// /movements/pending                  approval queue (admin)
/// /movements/{id}                     get
/// /movements/{id}/approve             Pending -> Approved (POST, admin)
/// /movements/{id}/reject              Pending -> Rejected (POST, admin)
/// /movements/{id}/take-out            Approved -> TakenOut (POST, staff+)
/// /movements/{id}/return              TakenOut -> Returned (POST, staff+)
/// /movements/files/my-department      request-form file lookup
/// /movements/folders/my-department    request-form folder lookup
///
/// /activity                           activity trail (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Organizational registry.
        .nest("/departments", department::router())
        .nest("/locations", location::router())
        // Folder / file registry.
        .nest("/folders", folder::router())
        .nest("/files", file::router())
        // Movement request lifecycle.
        .nest("/movements", movement::router())
        // Activity trail.
        .nest("/activity", activity::router())
}
