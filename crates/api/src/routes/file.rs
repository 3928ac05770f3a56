//! Route definitions for the `/files` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::file;
use crate::state::AppState;

/// Routes mounted at `/files`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create (staff+)
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update (staff+)
/// POST   /{id}/unlink     -> unlink (staff+)
/// PUT    /{id}/status     -> set_status (staff+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(file::list).post(file::create))
        .route("/{id}", get(file::get_by_id).put(file::update))
        .route("/{id}/unlink", post(file::unlink))
        .route("/{id}/status", put(file::set_status))
}
