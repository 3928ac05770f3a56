//! Repository for the `folders` and `folder_files` tables.
//!
//! Folder creation allocates the per-department serial sequence and links the
//! initial files inside a single transaction. The folder<->file association
//! enforces "a file belongs to at most one folder" via the
//! `uq_folder_files_file` unique constraint, so re-assignment is an upsert.

use chrono::Datelike;
use filetrail_core::serial;
use filetrail_core::types::DbId;
use sqlx::PgPool;

use crate::models::folder::{
    CreateFolder, Folder, FolderDetail, FolderFileEntry, FolderWithFiles, UpdateFolder,
};

/// Column list for `folders` queries.
const COLUMNS: &str = "id, name, serial_num, serial_seq, department_id, location_id, \
    created_by, created_at, updated_at";

/// SELECT joining department/location/creator names.
const DETAIL_SELECT: &str = "SELECT f.id, f.name, f.serial_num, \
        f.department_id, d.name AS department_name, \
        f.location_id, l.name AS location_name, \
        u.name AS created_by_name, f.created_at \
     FROM folders f \
     JOIN departments d ON d.id = f.department_id \
     JOIN locations l ON l.id = f.location_id \
     JOIN users u ON u.id = f.created_by";

/// Provides CRUD operations for folders and their file associations.
pub struct FolderRepo;

impl FolderRepo {
    /// Insert a new folder with a freshly allocated serial number and link
    /// the initial files, all in one transaction.
    ///
    /// `department_name` is used to derive the serial's department code.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFolder,
        department_id: DbId,
        department_name: &str,
        created_by: DbId,
    ) -> Result<Folder, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (seq,): (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(serial_seq), 0) + 1 FROM folders WHERE department_id = $1",
        )
        .bind(department_id)
        .fetch_one(&mut *tx)
        .await?;

        let year = chrono::Utc::now().year();
        let serial_num = serial::folder_serial(year, department_name, seq as u32);

        let query = format!(
            "INSERT INTO folders (name, serial_num, serial_seq, department_id, location_id, created_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let folder = sqlx::query_as::<_, Folder>(&query)
            .bind(&input.name)
            .bind(&serial_num)
            .bind(seq)
            .bind(department_id)
            .bind(input.location_id)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;

        for file_id in &input.file_ids {
            Self::attach_file_tx(&mut tx, folder.id, *file_id).await?;
        }

        tx.commit().await?;
        Ok(folder)
    }

    /// Find a folder row by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Folder>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM folders WHERE id = $1");
        sqlx::query_as::<_, Folder>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a folder with names and contained files.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FolderWithFiles>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE f.id = $1");
        let detail = sqlx::query_as::<_, FolderDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match detail {
            None => Ok(None),
            Some(folder) => {
                let files = Self::files_for_folders(pool, &[id]).await?;
                Ok(Some(FolderWithFiles { folder, files }))
            }
        }
    }

    /// List folders with their files, newest first.
    ///
    /// When `department_id` is given the listing is restricted to that
    /// department (staff callers only see their own).
    pub async fn list_with_files(
        pool: &PgPool,
        department_id: Option<DbId>,
    ) -> Result<Vec<FolderWithFiles>, sqlx::Error> {
        let folders = match department_id {
            Some(dept) => {
                let query = format!(
                    "{DETAIL_SELECT} WHERE f.department_id = $1 ORDER BY f.id DESC"
                );
                sqlx::query_as::<_, FolderDetail>(&query)
                    .bind(dept)
                    .fetch_all(pool)
                    .await?
            }
            None => {
                let query = format!("{DETAIL_SELECT} ORDER BY f.id DESC");
                sqlx::query_as::<_, FolderDetail>(&query).fetch_all(pool).await?
            }
        };

        let ids: Vec<DbId> = folders.iter().map(|f| f.id).collect();
        let mut by_folder: std::collections::HashMap<DbId, Vec<FolderFileEntry>> =
            std::collections::HashMap::new();
        for entry in Self::files_for_folders(pool, &ids).await? {
            by_folder.entry(entry.folder_id).or_default().push(entry);
        }

        Ok(folders
            .into_iter()
            .map(|folder| {
                let files = by_folder.remove(&folder.id).unwrap_or_default();
                FolderWithFiles { folder, files }
            })
            .collect())
    }

    /// Update a folder's name, department, or location. The serial number is
    /// intentionally left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFolder,
    ) -> Result<Option<Folder>, sqlx::Error> {
        let query = format!(
            "UPDATE folders SET
                name = COALESCE($2, name),
                department_id = COALESCE($3, department_id),
                location_id = COALESCE($4, location_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Folder>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.department_id)
            .bind(input.location_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a folder. Returns `true` if a row was removed.
    ///
    /// `folder_files` rows cascade, so no dangling associations remain.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Assign a file to a folder. A file already filed elsewhere is moved.
    pub async fn attach_file(
        pool: &PgPool,
        folder_id: DbId,
        file_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO folder_files (folder_id, file_id) VALUES ($1, $2)
             ON CONFLICT (file_id) DO UPDATE SET folder_id = EXCLUDED.folder_id",
        )
        .bind(folder_id)
        .bind(file_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove a file's folder association. Returns `true` if one existed.
    pub async fn detach_file(pool: &PgPool, file_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM folder_files WHERE file_id = $1")
            .bind(file_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count association rows pointing at a folder (used by tests to verify
    /// cascade behaviour).
    pub async fn count_file_links(pool: &PgPool, folder_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM folder_files WHERE folder_id = $1")
                .bind(folder_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    async fn attach_file_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        folder_id: DbId,
        file_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO folder_files (folder_id, file_id) VALUES ($1, $2)
             ON CONFLICT (file_id) DO UPDATE SET folder_id = EXCLUDED.folder_id",
        )
        .bind(folder_id)
        .bind(file_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn files_for_folders(
        pool: &PgPool,
        folder_ids: &[DbId],
    ) -> Result<Vec<FolderFileEntry>, sqlx::Error> {
        if folder_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, FolderFileEntry>(
            "SELECT ff.folder_id, fi.id AS file_id, fi.name AS file_name
             FROM folder_files ff
             JOIN files fi ON fi.id = ff.file_id
             WHERE ff.folder_id = ANY($1)
             ORDER BY fi.name ASC",
        )
        .bind(folder_ids)
        .fetch_all(pool)
        .await
    }
}
