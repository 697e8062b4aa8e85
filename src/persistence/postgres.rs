//! PostgreSQL implementation of the submission repository.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::SubmissionRepository;
use crate::config::ServerConfig;
use crate::domain::{MailingAddress, NewSubmission, Submission, SubmissionId};
use crate::error::PostboxError;

/// Raw `submissions` row as returned by `sqlx`.
type SubmissionRow = (i64, String, DateTime<Utc>);

/// PostgreSQL-backed repository using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresSubmissionRepository {
    pool: PgPool,
}

impl PostgresSubmissionRepository {
    /// Creates a repository over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the configured database and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`PostboxError::StorageFailure`] if the database cannot be
    /// reached or a migration fails.
    pub async fn connect(config: &ServerConfig) -> Result<Self, PostboxError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| PostboxError::StorageFailure(e.to_string()))?;

        tracing::info!(
            max_connections = config.database_max_connections,
            "connected to postgres"
        );
        Ok(Self::new(pool))
    }
}

/// Maps a raw row into a [`Submission`]. An empty `address` column is an
/// internal error.
fn row_to_submission((id, address, created_at): SubmissionRow) -> Result<Submission, PostboxError> {
    let address = MailingAddress::parse(address)
        .map_err(|_| PostboxError::Internal(format!("submission {id} has an empty address")))?;
    Ok(Submission {
        id: SubmissionId::new(id),
        address,
        created_at,
    })
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn create(&self, new: NewSubmission) -> Result<Submission, PostboxError> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            "INSERT INTO submissions (address) VALUES ($1) RETURNING id, address, created_at",
        )
        .bind(new.address.as_str())
        .fetch_one(&self.pool)
        .await?;

        row_to_submission(row)
    }

    async fn list(&self) -> Result<Vec<Submission>, PostboxError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            "SELECT id, address, created_at FROM submissions ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_submission).collect()
    }

    async fn ping(&self) -> Result<(), PostboxError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| PostboxError::Unavailable(e.to_string()))?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
