//! Repository for the `files` table.

use filetrail_core::types::DbId;
use sqlx::PgPool;

use crate::models::file::{CreateFile, File, FileDetail};

/// Column list for `files` queries.
const COLUMNS: &str = "id, name, created_by, is_active, created_at, updated_at";

/// SELECT joining the containing folder and creator name.
const DETAIL_SELECT: &str = "SELECT f.id, f.name, f.is_active, \
        ff.folder_id, fo.name AS folder_name, u.name AS created_by_name, f.created_at \
     FROM files f \
     LEFT JOIN folder_files ff ON ff.file_id = f.id \
     LEFT JOIN folders fo ON fo.id = ff.folder_id \
     JOIN users u ON u.id = f.created_by";

/// Provides CRUD operations for files.
pub struct FileRepo;

impl FileRepo {
    /// Insert a new file and assign it to its folder in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFile,
        created_by: DbId,
    ) -> Result<File, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO files (name, created_by) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let file = sqlx::query_as::<_, File>(&query)
            .bind(&input.name)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO folder_files (folder_id, file_id) VALUES ($1, $2)")
            .bind(input.folder_id)
            .bind(file.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(file)
    }

    /// Find a file row by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<File>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM files WHERE id = $1");
        sqlx::query_as::<_, File>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a file with folder and creator info.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<FileDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE f.id = $1");
        sqlx::query_as::<_, FileDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all files with folder info, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<FileDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY f.id DESC");
        sqlx::query_as::<_, FileDetail>(&query).fetch_all(pool).await
    }

    /// Rename a file. Returns `None` if no row with the given `id` exists.
    ///
    /// Folder re-assignment is handled separately via
    /// [`FolderRepo::attach_file`](crate::repositories::FolderRepo::attach_file).
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<File>, sqlx::Error> {
        let query = format!("UPDATE files SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, File>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Toggle the active flag. Returns `true` if the row was updated.
    pub async fn set_active(pool: &PgPool, id: DbId, active: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE files SET is_active = $2 WHERE id = $1")
            .bind(id)
            .bind(active)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
