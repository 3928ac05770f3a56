//! Route definitions for the `/folders` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::folder;
use crate::state::AppState;

/// Routes mounted at `/folders`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (staff+)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update (staff+)
/// DELETE /{id}    -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(folder::list).post(folder::create))
        .route(
            "/{id}",
            get(folder::get_by_id)
                .put(folder::update)
                .delete(folder::delete),
        )
}
