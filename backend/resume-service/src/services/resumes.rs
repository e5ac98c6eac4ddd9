/// Resume service - creation, retrieval, ownership-checked updates
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, like_repo, profile_repo, resume_repo};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{FileType, ResumeRecord};
use crate::services::listing::filter_by_query;

/// Editable resume fields after request validation
#[derive(Debug, Clone)]
pub struct ResumeInput {
    pub name: String,
    pub blurb: Option<String>,
    pub file_url: Option<String>,
    pub file_type: Option<FileType>,
}

impl ResumeInput {
    /// Names are stored trimmed and upper-cased; blank optionals become NULL.
    fn normalized(&self) -> Result<(String, Option<String>, Option<String>)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::ValidationError("Name is required".into()));
        }

        let blank_to_none = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Ok((
            name.to_uppercase(),
            blank_to_none(&self.blurb),
            blank_to_none(&self.file_url),
        ))
    }
}

/// A resume with exact like and top-level comment counts
#[derive(Debug, Clone)]
pub struct ResumeDetails {
    pub record: ResumeRecord,
    pub likes: i64,
    pub comments: i64,
}

pub struct ResumeService {
    pool: PgPool,
}

impl ResumeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn with_counts(&self, record: ResumeRecord) -> Result<ResumeDetails> {
        let (likes, comments) = tokio::try_join!(
            like_repo::count_likes(&self.pool, record.id),
            comment_repo::count_top_level_comments(&self.pool, record.id),
        )?;

        Ok(ResumeDetails {
            record,
            likes,
            comments,
        })
    }

    /// Ensure the resume exists and belongs to `user_id`.
    async fn check_owner(&self, resume_id: Uuid, user_id: &str, action: &str) -> Result<()> {
        let owner = resume_repo::find_resume_owner(&self.pool, resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Resume not found".into()))?;

        if owner != user_id {
            return Err(AppError::Forbidden(format!(
                "Forbidden - You can only {} your own resumes",
                action
            )));
        }

        Ok(())
    }

    pub async fn get_resume(&self, resume_id: Uuid) -> Result<ResumeDetails> {
        let record = resume_repo::find_resume_by_id(&self.pool, resume_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Resume not found".into()))?;

        self.with_counts(record).await
    }

    pub async fn create_resume(&self, user: &AuthUser, input: &ResumeInput) -> Result<ResumeRecord> {
        let (name, blurb, file_url) = input.normalized()?;

        profile_repo::ensure_profile(
            &self.pool,
            &user.id,
            &user.email,
            user.name.as_deref(),
            user.picture.as_deref(),
        )
        .await?;

        let record = resume_repo::create_resume(
            &self.pool,
            &user.id,
            &name,
            blurb.as_deref(),
            file_url.as_deref(),
            input.file_type.map(|t| t.as_str()),
        )
        .await?;

        tracing::info!(resume_id = %record.id, user_id = %user.id, "resume created");
        Ok(record)
    }

    pub async fn update_resume(
        &self,
        user_id: &str,
        resume_id: Uuid,
        input: &ResumeInput,
    ) -> Result<ResumeDetails> {
        let (name, blurb, file_url) = input.normalized()?;
        self.check_owner(resume_id, user_id, "edit").await?;

        let record = resume_repo::update_resume(
            &self.pool,
            resume_id,
            &name,
            blurb.as_deref(),
            file_url.as_deref(),
            input.file_type.map(|t| t.as_str()),
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".into()))?;

        self.with_counts(record).await
    }

    pub async fn delete_resume(&self, user_id: &str, resume_id: Uuid) -> Result<()> {
        self.check_owner(resume_id, user_id, "delete").await?;

        if !resume_repo::delete_resume(&self.pool, resume_id).await? {
            return Err(AppError::NotFound("Resume not found".into()));
        }

        tracing::info!(%resume_id, %user_id, "resume deleted");
        Ok(())
    }

    /// The caller's own resumes, newest first, filtered in-process.
    pub async fn my_resumes(&self, user_id: &str, query: Option<&str>) -> Result<Vec<ResumeRecord>> {
        let records = resume_repo::find_resumes_by_user(&self.pool, user_id).await?;
        Ok(filter_by_query(records, query))
    }
}
