//! Route definitions for the `/locations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::location;
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// The static `/with-folders` segment is registered before the `/{id}`
/// matcher so it is not captured as an id.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create (admin)
/// GET    /with-folders    -> list_with_folders
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update (admin)
/// DELETE /{id}            -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(location::list).post(location::create))
        .route("/with-folders", get(location::list_with_folders))
        .route(
            "/{id}",
            get(location::get_by_id)
                .put(location::update)
                .delete(location::delete),
        )
}
