//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `filetrail_db` and
//! map errors via [`AppError`](crate::error::AppError).

pub mod activity;
pub mod auth;
pub mod department;
pub mod file;
pub mod folder;
pub mod location;
pub mod movement;
