use crate::db::ResumeStore;
use crate::error::Result;
use crate::models::{ResumeRecord, ResumeScoreRow};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Escape `q` for use inside `ILIKE ... ESCAPE '\'` and wrap it in wildcards.
pub fn ilike_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for ch in query.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Score projection for one chunk of the hot ranking scan
pub async fn fetch_score_rows(
    pool: &PgPool,
    offset: i64,
    limit: i64,
) -> std::result::Result<Vec<ResumeScoreRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeScoreRow>(
        r#"
        SELECT id, likes_count, comments_count, created_at
        FROM resumes
        ORDER BY created_at DESC, id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Fetch full records for a set of resume ids
pub async fn find_resumes_by_ids(
    pool: &PgPool,
    ids: &[Uuid],
) -> std::result::Result<Vec<ResumeRecord>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRecord>(
        r#"
        SELECT r.id, r.user_id, r.name, r.blurb, r.file_url, r.file_type,
               r.likes_count, r.comments_count, r.created_at, r.updated_at,
               p.name AS author_name, p.avatar_url AS author_avatar
        FROM resumes r
        LEFT JOIN profiles p ON p.id = r.user_id
        WHERE r.id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await
}

/// One page of resumes, newest first, optionally filtered on name/blurb
pub async fn find_resumes_page(
    pool: &PgPool,
    offset: i64,
    limit: i64,
    query: Option<&str>,
) -> std::result::Result<Vec<ResumeRecord>, sqlx::Error> {
    let pattern = query.map(ilike_pattern);

    sqlx::query_as::<_, ResumeRecord>(
        r#"
        SELECT r.id, r.user_id, r.name, r.blurb, r.file_url, r.file_type,
               r.likes_count, r.comments_count, r.created_at, r.updated_at,
               p.name AS author_name, p.avatar_url AS author_avatar
        FROM resumes r
        LEFT JOIN profiles p ON p.id = r.user_id
        WHERE $3::text IS NULL
           OR r.name ILIKE $3 ESCAPE '\'
           OR r.blurb ILIKE $3 ESCAPE '\'
        ORDER BY r.created_at DESC, r.id DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .bind(pattern)
    .fetch_all(pool)
    .await
}

/// Count resumes matching the same filter as `find_resumes_page`
pub async fn count_resumes(
    pool: &PgPool,
    query: Option<&str>,
) -> std::result::Result<i64, sqlx::Error> {
    let pattern = query.map(ilike_pattern);

    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM resumes r
        WHERE $1::text IS NULL
           OR r.name ILIKE $1 ESCAPE '\'
           OR r.blurb ILIKE $1 ESCAPE '\'
        "#,
    )
    .bind(pattern)
    .fetch_one(pool)
    .await
}

/// Find a resume by ID
pub async fn find_resume_by_id(
    pool: &PgPool,
    resume_id: Uuid,
) -> std::result::Result<Option<ResumeRecord>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRecord>(
        r#"
        SELECT r.id, r.user_id, r.name, r.blurb, r.file_url, r.file_type,
               r.likes_count, r.comments_count, r.created_at, r.updated_at,
               p.name AS author_name, p.avatar_url AS author_avatar
        FROM resumes r
        LEFT JOIN profiles p ON p.id = r.user_id
        WHERE r.id = $1
        "#,
    )
    .bind(resume_id)
    .fetch_optional(pool)
    .await
}

/// All resumes owned by a user, newest first
pub async fn find_resumes_by_user(
    pool: &PgPool,
    user_id: &str,
) -> std::result::Result<Vec<ResumeRecord>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRecord>(
        r#"
        SELECT r.id, r.user_id, r.name, r.blurb, r.file_url, r.file_type,
               r.likes_count, r.comments_count, r.created_at, r.updated_at,
               p.name AS author_name, p.avatar_url AS author_avatar
        FROM resumes r
        LEFT JOIN profiles p ON p.id = r.user_id
        WHERE r.user_id = $1
        ORDER BY r.created_at DESC, r.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Owner of a resume, `None` when it does not exist
pub async fn find_resume_owner(
    pool: &PgPool,
    resume_id: Uuid,
) -> std::result::Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT user_id FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(pool)
        .await
}

/// Insert a resume with zeroed counters
pub async fn create_resume(
    pool: &PgPool,
    user_id: &str,
    name: &str,
    blurb: Option<&str>,
    file_url: Option<&str>,
    file_type: Option<&str>,
) -> std::result::Result<ResumeRecord, sqlx::Error> {
    sqlx::query_as::<_, ResumeRecord>(
        r#"
        WITH inserted AS (
            INSERT INTO resumes (user_id, name, blurb, file_url, file_type, likes_count, comments_count)
            VALUES ($1, $2, $3, $4, $5, 0, 0)
            RETURNING *
        )
        SELECT i.id, i.user_id, i.name, i.blurb, i.file_url, i.file_type,
               i.likes_count, i.comments_count, i.created_at, i.updated_at,
               p.name AS author_name, p.avatar_url AS author_avatar
        FROM inserted i
        LEFT JOIN profiles p ON p.id = i.user_id
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(blurb)
    .bind(file_url)
    .bind(file_type)
    .fetch_one(pool)
    .await
}

/// Replace the editable fields of a resume
pub async fn update_resume(
    pool: &PgPool,
    resume_id: Uuid,
    name: &str,
    blurb: Option<&str>,
    file_url: Option<&str>,
    file_type: Option<&str>,
) -> std::result::Result<Option<ResumeRecord>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRecord>(
        r#"
        WITH updated AS (
            UPDATE resumes
            SET name = $2, blurb = $3, file_url = $4, file_type = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING *
        )
        SELECT u.id, u.user_id, u.name, u.blurb, u.file_url, u.file_type,
               u.likes_count, u.comments_count, u.created_at, u.updated_at,
               p.name AS author_name, p.avatar_url AS author_avatar
        FROM updated u
        LEFT JOIN profiles p ON p.id = u.user_id
        "#,
    )
    .bind(resume_id)
    .bind(name)
    .bind(blurb)
    .bind(file_url)
    .bind(file_type)
    .fetch_optional(pool)
    .await
}

/// Hard delete; likes, comments and votes cascade
pub async fn delete_resume(pool: &PgPool, resume_id: Uuid) -> std::result::Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1")
        .bind(resume_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// `ResumeStore` backed by PostgreSQL
#[derive(Clone)]
pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn fetch_score_chunk(&self, offset: i64, limit: i64) -> Result<Vec<ResumeScoreRow>> {
        Ok(fetch_score_rows(&self.pool, offset, limit).await?)
    }

    async fn fetch_resumes_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ResumeRecord>> {
        Ok(find_resumes_by_ids(&self.pool, ids).await?)
    }

    async fn fetch_page(
        &self,
        offset: i64,
        limit: i64,
        query: Option<&str>,
    ) -> Result<Vec<ResumeRecord>> {
        Ok(find_resumes_page(&self.pool, offset, limit, query).await?)
    }

    async fn count_resumes(&self, query: Option<&str>) -> Result<i64> {
        Ok(count_resumes(&self.pool, query).await?)
    }
}
