//! Repository for the `movements` and `movement_files` tables.
//!
//! Transition updates are status-guarded at the SQL level
//! (`WHERE id = $1 AND status_id = <predecessor>`): a concurrent transition
//! makes the guarded UPDATE match zero rows, so a lost race surfaces as
//! "no row updated" instead of silently overwriting the newer status.

use filetrail_core::movement::MovementStatus;
use filetrail_core::types::DbId;
use sqlx::PgPool;

use crate::models::movement::{
    CreateMovement, DepartmentFile, FileDepartmentRow, Movement, MovementDetail,
    MovementFileEntry, MovementWithFiles,
};

/// Column list for `movements` queries.
const COLUMNS: &str = "id, move_type, requester_id, folder_id, status_id, remark, \
    approver_id, requested_at, approved_at, taken_out_at, returned_at, \
    created_at, updated_at";

/// SELECT joining status and user names.
const DETAIL_SELECT: &str = "SELECT m.id, m.move_type, \
        m.requester_id, r.name AS requester_name, \
        m.folder_id, m.status_id, s.name AS status_name, m.remark, \
        m.approver_id, a.name AS approver_name, \
        m.requested_at, m.approved_at, m.taken_out_at, m.returned_at \
     FROM movements m \
     JOIN movement_status s ON s.id = m.status_id \
     JOIN users r ON r.id = m.requester_id \
     LEFT JOIN users a ON a.id = m.approver_id";

/// Provides operations for the movement request lifecycle.
pub struct MovementRepo;

impl MovementRepo {
    /// Insert a movement request and its file links in one transaction.
    ///
    /// The request starts in `pending`; any insert failure rolls back the
    /// whole request (no partial creation).
    pub async fn create(pool: &PgPool, input: &CreateMovement) -> Result<Movement, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO movements (move_type, remark, requester_id, folder_id, status_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let movement = sqlx::query_as::<_, Movement>(&query)
            .bind(&input.move_type)
            .bind(&input.remark)
            .bind(input.requester_id)
            .bind(input.folder_id)
            .bind(MovementStatus::Pending.id())
            .fetch_one(&mut *tx)
            .await?;

        for file_id in &input.file_ids {
            sqlx::query("INSERT INTO movement_files (movement_id, file_id) VALUES ($1, $2)")
                .bind(movement.id)
                .bind(file_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(movement)
    }

    /// Find a movement row by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movements WHERE id = $1");
        sqlx::query_as::<_, Movement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movement with names and its files.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MovementWithFiles>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE m.id = $1");
        let detail = sqlx::query_as::<_, MovementDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match detail {
            None => Ok(None),
            Some(movement) => {
                let files = Self::files_for_movements(pool, &[id]).await?;
                Ok(Some(MovementWithFiles { movement, files }))
            }
        }
    }

    /// List all movements with their files, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<MovementWithFiles>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY m.id DESC");
        let movements = sqlx::query_as::<_, MovementDetail>(&query)
            .fetch_all(pool)
            .await?;
        Self::with_files(pool, movements).await
    }

    /// List pending movements with their files, oldest first (approval queue).
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<MovementWithFiles>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE m.status_id = $1 ORDER BY m.requested_at ASC");
        let movements = sqlx::query_as::<_, MovementDetail>(&query)
            .bind(MovementStatus::Pending.id())
            .fetch_all(pool)
            .await?;
        Self::with_files(pool, movements).await
    }

    /// Pending -> Approved. Sets the approver and `approved_at`.
    ///
    /// Returns `None` when the row is missing or no longer pending.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        approver_id: DbId,
    ) -> Result<Option<Movement>, sqlx::Error> {
        let query = format!(
            "UPDATE movements
             SET status_id = $3, approver_id = $2, approved_at = NOW()
             WHERE id = $1 AND status_id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movement>(&query)
            .bind(id)
            .bind(approver_id)
            .bind(MovementStatus::Approved.id())
            .bind(MovementStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }

    /// Pending -> Rejected. Sets the approver, `approved_at`, and the remark.
    ///
    /// Returns `None` when the row is missing or no longer pending.
    pub async fn reject(
        pool: &PgPool,
        id: DbId,
        approver_id: DbId,
        remark: &str,
    ) -> Result<Option<Movement>, sqlx::Error> {
        let query = format!(
            "UPDATE movements
             SET status_id = $3, approver_id = $2, approved_at = NOW(), remark = $5
             WHERE id = $1 AND status_id = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movement>(&query)
            .bind(id)
            .bind(approver_id)
            .bind(MovementStatus::Rejected.id())
            .bind(MovementStatus::Pending.id())
            .bind(remark)
            .fetch_optional(pool)
            .await
    }

    /// Approved -> TakenOut. Sets `taken_out_at`.
    pub async fn mark_taken_out(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Movement>, sqlx::Error> {
        let query = format!(
            "UPDATE movements
             SET status_id = $2, taken_out_at = NOW()
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movement>(&query)
            .bind(id)
            .bind(MovementStatus::TakenOut.id())
            .bind(MovementStatus::Approved.id())
            .fetch_optional(pool)
            .await
    }

    /// TakenOut -> Returned. Sets `returned_at`.
    pub async fn mark_returned(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Movement>, sqlx::Error> {
        let query = format!(
            "UPDATE movements
             SET status_id = $2, returned_at = NOW()
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movement>(&query)
            .bind(id)
            .bind(MovementStatus::Returned.id())
            .bind(MovementStatus::TakenOut.id())
            .fetch_optional(pool)
            .await
    }

    /// Resolve each file id to the department of its containing folder.
    ///
    /// Files without a folder are absent from the result, which the caller
    /// treats as invalid.
    pub async fn file_departments(
        pool: &PgPool,
        file_ids: &[DbId],
    ) -> Result<Vec<FileDepartmentRow>, sqlx::Error> {
        sqlx::query_as::<_, FileDepartmentRow>(
            "SELECT ff.file_id, fo.department_id
             FROM folder_files ff
             JOIN folders fo ON fo.id = ff.folder_id
             WHERE ff.file_id = ANY($1)",
        )
        .bind(file_ids)
        .fetch_all(pool)
        .await
    }

    /// Advisory duplicate check: does the requester already have an open
    /// (pending, approved, or taken-out) movement covering any of the files?
    pub async fn has_open_movement_for_files(
        pool: &PgPool,
        requester_id: DbId,
        file_ids: &[DbId],
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1
                FROM movements m
                JOIN movement_files mf ON mf.movement_id = m.id
                WHERE m.requester_id = $1
                  AND mf.file_id = ANY($2)
                  AND m.status_id = ANY($3)
             )",
        )
        .bind(requester_id)
        .bind(file_ids)
        .bind(vec![
            MovementStatus::Pending.id(),
            MovementStatus::Approved.id(),
            MovementStatus::TakenOut.id(),
        ])
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Files filed in folders of the given department (request form lookup).
    pub async fn department_files(
        pool: &PgPool,
        department_id: DbId,
    ) -> Result<Vec<DepartmentFile>, sqlx::Error> {
        sqlx::query_as::<_, DepartmentFile>(
            "SELECT f.id AS file_id, f.name AS file_name,
                    fo.id AS folder_id, fo.name AS folder_name
             FROM files f
             JOIN folder_files ff ON ff.file_id = f.id
             JOIN folders fo ON fo.id = ff.folder_id
             WHERE fo.department_id = $1 AND f.is_active = true
             ORDER BY fo.name ASC, f.name ASC",
        )
        .bind(department_id)
        .fetch_all(pool)
        .await
    }

    async fn with_files(
        pool: &PgPool,
        movements: Vec<MovementDetail>,
    ) -> Result<Vec<MovementWithFiles>, sqlx::Error> {
        let ids: Vec<DbId> = movements.iter().map(|m| m.id).collect();
        let mut by_movement: std::collections::HashMap<DbId, Vec<MovementFileEntry>> =
            std::collections::HashMap::new();
        for entry in Self::files_for_movements(pool, &ids).await? {
            by_movement.entry(entry.movement_id).or_default().push(entry);
        }

        Ok(movements
            .into_iter()
            .map(|movement| {
                let files = by_movement.remove(&movement.id).unwrap_or_default();
                MovementWithFiles { movement, files }
            })
            .collect())
    }

    async fn files_for_movements(
        pool: &PgPool,
        movement_ids: &[DbId],
    ) -> Result<Vec<MovementFileEntry>, sqlx::Error> {
        if movement_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, MovementFileEntry>(
            "SELECT mf.movement_id, f.id AS file_id, f.name AS file_name,
                    ff.folder_id, fo.name AS folder_name
             FROM movement_files mf
             JOIN files f ON f.id = mf.file_id
             LEFT JOIN folder_files ff ON ff.file_id = f.id
             LEFT JOIN folders fo ON fo.id = ff.folder_id
             WHERE mf.movement_id = ANY($1)
             ORDER BY f.name ASC",
        )
        .bind(movement_ids)
        .fetch_all(pool)
        .await
    }
}
