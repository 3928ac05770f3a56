//! Movement request models and DTOs.

use filetrail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `movements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movement {
    pub id: DbId,
    pub move_type: String,
    pub requester_id: DbId,
    pub folder_id: Option<DbId>,
    pub status_id: i16,
    pub remark: Option<String>,
    pub approver_id: Option<DbId>,
    pub requested_at: Timestamp,
    pub approved_at: Option<Timestamp>,
    pub taken_out_at: Option<Timestamp>,
    pub returned_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A movement row joined with status and user names for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovementDetail {
    pub id: DbId,
    pub move_type: String,
    pub requester_id: DbId,
    pub requester_name: String,
    pub folder_id: Option<DbId>,
    pub status_id: i16,
    pub status_name: String,
    pub remark: Option<String>,
    pub approver_id: Option<DbId>,
    pub approver_name: Option<String>,
    pub requested_at: Timestamp,
    pub approved_at: Option<Timestamp>,
    pub taken_out_at: Option<Timestamp>,
    pub returned_at: Option<Timestamp>,
}

/// A movement detail with the files it covers.
#[derive(Debug, Serialize)]
pub struct MovementWithFiles {
    #[serde(flatten)]
    pub movement: MovementDetail,
    pub files: Vec<MovementFileEntry>,
}

/// One file covered by a movement request, with its folder if still filed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovementFileEntry {
    #[serde(skip)]
    pub movement_id: DbId,
    pub file_id: DbId,
    pub file_name: String,
    pub folder_id: Option<DbId>,
    pub folder_name: Option<String>,
}

/// Request body for creating a movement.
#[derive(Debug, Deserialize)]
pub struct CreateMovementRequest {
    pub move_type: Option<String>,
    pub remark: Option<String>,
    pub folder_id: Option<DbId>,
    #[serde(default)]
    pub file_ids: Vec<DbId>,
}

/// Validated insert input assembled by the handler.
#[derive(Debug)]
pub struct CreateMovement {
    pub move_type: String,
    pub remark: Option<String>,
    pub requester_id: DbId,
    pub folder_id: Option<DbId>,
    pub file_ids: Vec<DbId>,
}

/// Request body for the reject endpoint. A reason is mandatory.
#[derive(Debug, Deserialize)]
pub struct RejectMovementRequest {
    pub remark: Option<String>,
}

/// Result row of the department-membership check run at creation time.
#[derive(Debug, Clone, FromRow)]
pub struct FileDepartmentRow {
    pub file_id: DbId,
    pub department_id: DbId,
}

/// A file selectable on the request form (filed in the caller's department).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DepartmentFile {
    pub file_id: DbId,
    pub file_name: String,
    pub folder_id: DbId,
    pub folder_name: String,
}
