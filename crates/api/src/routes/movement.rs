//! Route definitions for the movement request lifecycle.
//!
//! The static `/pending`, `/files/...` and `/folders/...` segments are
//! registered before the `/{id}` matcher so they are not captured as ids.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::movement;
use crate::state::AppState;

/// Routes mounted at `/movements`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /pending                   -> list_pending (admin)
/// GET    /files/my-department       -> my_department_files
/// GET    /folders/my-department     -> my_department_folders
/// GET    /{id}                      -> get_by_id
/// POST   /{id}/approve              -> approve (admin)
/// POST   /{id}/reject               -> reject (admin)
/// POST   /{id}/take-out             -> take_out (staff+)
/// POST   /{id}/return               -> return_movement (staff+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movement::list).post(movement::create))
        .route("/pending", get(movement::list_pending))
        .route("/files/my-department", get(movement::my_department_files))
        .route(
            "/folders/my-department",
            get(movement::my_department_folders),
        )
        .route("/{id}", get(movement::get_by_id))
        .route("/{id}/approve", post(movement::approve))
        .route("/{id}/reject", post(movement::reject))
        .route("/{id}/take-out", post(movement::take_out))
        .route("/{id}/return", post(movement::return_movement))
}
