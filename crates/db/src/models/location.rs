//! Storage location entity model and DTOs.

use filetrail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `locations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new location.
#[derive(Debug, Deserialize)]
pub struct CreateLocation {
    pub name: String,
}

/// DTO for updating a location.
#[derive(Debug, Deserialize)]
pub struct UpdateLocation {
    pub name: Option<String>,
}

/// A location with its folders, for the nested admin listing.
#[derive(Debug, Serialize)]
pub struct LocationWithFolders {
    pub id: DbId,
    pub name: String,
    pub folders: Vec<crate::models::folder::FolderWithFiles>,
}
