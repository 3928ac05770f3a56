//! Folder entity model and DTOs.

use filetrail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `folders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Folder {
    pub id: DbId,
    pub name: String,
    pub serial_num: String,
    pub serial_seq: i32,
    pub department_id: DbId,
    pub location_id: DbId,
    pub created_by: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A folder joined with its department/location/creator names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FolderDetail {
    pub id: DbId,
    pub name: String,
    pub serial_num: String,
    pub department_id: DbId,
    pub department_name: String,
    pub location_id: DbId,
    pub location_name: String,
    pub created_by_name: String,
    pub created_at: Timestamp,
}

/// A folder detail with the files it contains.
#[derive(Debug, Serialize)]
pub struct FolderWithFiles {
    #[serde(flatten)]
    pub folder: FolderDetail,
    pub files: Vec<FolderFileEntry>,
}

/// One file contained in a folder.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FolderFileEntry {
    #[serde(skip)]
    pub folder_id: DbId,
    pub file_id: DbId,
    pub file_name: String,
}

/// DTO for creating a new folder.
#[derive(Debug, Deserialize)]
pub struct CreateFolder {
    pub name: String,
    /// Optional for staff callers, who are pinned to their own department.
    pub department_id: Option<DbId>,
    pub location_id: DbId,
    /// Files to place into the folder at creation time.
    #[serde(default)]
    pub file_ids: Vec<DbId>,
}

/// DTO for updating a folder. The serial number is never regenerated.
#[derive(Debug, Deserialize)]
pub struct UpdateFolder {
    pub name: Option<String>,
    pub department_id: Option<DbId>,
    pub location_id: Option<DbId>,
}
