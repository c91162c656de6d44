use crate::core::UserBehavior;
use crate::models::{InteractionKind, InteractionRecord};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the interaction store
#[derive(Debug, Error)]
pub enum InteractionStoreError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// PostgreSQL-backed log of user interactions with listings
///
/// One row per (user, property, kind). This is the behavior source the
/// popularity factor is computed from.
pub struct InteractionStore {
    pool: PgPool,
}

impl InteractionStore {
    /// Connect and run migrations
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, InteractionStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Record an interaction
    ///
    /// Repeated interactions of the same kind refresh the timestamp.
    pub async fn record(
        &self,
        user_id: &str,
        property_id: &str,
        kind: InteractionKind,
    ) -> Result<(), InteractionStoreError> {
        if user_id.is_empty() || property_id.is_empty() {
            return Err(InteractionStoreError::InvalidInput(
                "user_id and property_id must be non-empty".to_string(),
            ));
        }

        let query = r#"
            INSERT INTO property_interactions (user_id, property_id, kind, recorded_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id, property_id, kind)
            DO UPDATE SET recorded_at = EXCLUDED.recorded_at
        "#;

        sqlx::query(query)
            .bind(user_id)
            .bind(property_id)
            .bind(kind)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Recorded interaction: {} -> {} ({})", user_id, property_id, kind);

        Ok(())
    }

    /// All interactions of a user, newest first
    pub async fn interactions(
        &self,
        user_id: &str,
    ) -> Result<Vec<InteractionRecord>, InteractionStoreError> {
        let query = r#"
            SELECT user_id, property_id, kind, recorded_at
            FROM property_interactions
            WHERE user_id = $1
            ORDER BY recorded_at DESC
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let records = rows
            .iter()
            .map(|row| {
                Ok(InteractionRecord {
                    user_id: row.try_get("user_id")?,
                    property_id: row.try_get("property_id")?,
                    kind: row.try_get("kind")?,
                    recorded_at: row.try_get("recorded_at")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        tracing::debug!("User {} has {} interactions", user_id, records.len());

        Ok(records)
    }

    /// Behavior snapshot for scoring
    pub async fn user_behavior(&self, user_id: &str) -> Result<UserBehavior, InteractionStoreError> {
        let records = self.interactions(user_id).await?;
        Ok(UserBehavior::from_records(&records))
    }

    /// Clear all interactions for a user
    pub async fn clear(&self, user_id: &str) -> Result<u64, InteractionStoreError> {
        let query = r#"
            DELETE FROM property_interactions
            WHERE user_id = $1
        "#;

        let result = sqlx::query(query).bind(user_id).execute(&self.pool).await?;

        tracing::info!(
            "Cleared {} interactions for user {}",
            result.rows_affected(),
            user_id
        );

        Ok(result.rows_affected())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, InteractionStoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
