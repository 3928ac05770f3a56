//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for updates

pub mod activity;
pub mod department;
pub mod file;
pub mod folder;
pub mod location;
pub mod movement;
pub mod session;
pub mod user;
