//! File entity model and DTOs.

use filetrail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct File {
    pub id: DbId,
    pub name: String,
    pub created_by: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A file joined with its containing folder, if any.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FileDetail {
    pub id: DbId,
    pub name: String,
    pub is_active: bool,
    pub folder_id: Option<DbId>,
    pub folder_name: Option<String>,
    pub created_by_name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new file. A file is always filed into a folder.
#[derive(Debug, Deserialize)]
pub struct CreateFile {
    pub name: String,
    pub folder_id: DbId,
}

/// DTO for updating a file.
#[derive(Debug, Deserialize)]
pub struct UpdateFile {
    pub name: Option<String>,
    /// When present, the file is re-assigned to this folder.
    pub folder_id: Option<DbId>,
}

/// Request body for the activate/deactivate endpoint.
#[derive(Debug, Deserialize)]
pub struct SetFileActive {
    pub is_active: bool,
}
