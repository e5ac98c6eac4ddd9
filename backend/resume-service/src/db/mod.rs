/// Database access layer
///
/// - `ResumeStore`: the read seam used by hot ranking and listing. Services
///   receive it as `Arc<dyn ResumeStore>`, so tests can swap in an in-memory
///   store.
/// - `*_repo` modules: sqlx queries against PostgreSQL, one function per
///   statement.
/// - Pool construction and embedded migrations.
pub mod comment_repo;
pub mod like_repo;
pub mod profile_repo;
pub mod resume_repo;
pub mod vote_repo;

pub use resume_repo::PgResumeStore;

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{ResumeRecord, ResumeScoreRow};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Read access to the resume collection.
///
/// Every listing method returns rows newest first (`created_at DESC`, then
/// `id DESC` so that offsets are stable between calls).
#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// One chunk of score rows starting at `offset`.
    async fn fetch_score_chunk(&self, offset: i64, limit: i64) -> Result<Vec<ResumeScoreRow>>;

    /// Full records for the given ids, in no particular order.
    async fn fetch_resumes_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ResumeRecord>>;

    /// One page of records, optionally filtered by a name/blurb substring.
    async fn fetch_page(
        &self,
        offset: i64,
        limit: i64,
        query: Option<&str>,
    ) -> Result<Vec<ResumeRecord>>;

    /// Number of records matching the same filter as `fetch_page`.
    async fn count_resumes(&self, query: Option<&str>) -> Result<i64>;
}

/// Build the PostgreSQL pool and verify it with a round trip.
pub async fn create_pool(config: &DatabaseConfig) -> std::result::Result<PgPool, sqlx::Error> {
    debug!(
        "Creating database pool: max={}, min={}, acquire_timeout={}s",
        config.max_connections, config.min_connections, config.acquire_timeout_secs
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .test_before_acquire(true)
        .connect(&config.url)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    info!("Database pool created and verified successfully");

    Ok(pool)
}

/// Apply the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
