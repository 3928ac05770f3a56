//! Repository for the append-only `activity_logs` table.

use sqlx::PgPool;

use crate::models::activity::{ActivityLog, CreateActivityLog};

/// Column list for `activity_logs` queries.
const COLUMNS: &str = "id, user_id, action_type, entity_type, entity_id, details, created_at";

/// Default page size for the activity listing.
const DEFAULT_LIMIT: i64 = 100;

/// Provides insert and query operations for the activity trail.
pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Insert a new activity entry, returning the created row.
    pub async fn insert(
        pool: &PgPool,
        input: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs (user_id, action_type, entity_type, entity_id, details)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(input.user_id)
            .bind(&input.action_type)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// List activity entries, newest first.
    pub async fn list(pool: &PgPool, limit: Option<i64>) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs ORDER BY id DESC LIMIT $1"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(limit.unwrap_or(DEFAULT_LIMIT))
            .fetch_all(pool)
            .await
    }
}
