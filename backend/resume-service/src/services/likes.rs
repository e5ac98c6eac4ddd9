use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{like_repo, resume_repo};
use crate::error::{AppError, Result};
use crate::models::LikeOutcome;

pub struct LikeService {
    pool: PgPool,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Like the resume if the user has not, unlike it otherwise.
    pub async fn toggle_like(&self, resume_id: Uuid, user_id: &str) -> Result<LikeOutcome> {
        if resume_repo::find_resume_owner(&self.pool, resume_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Resume not found".into()));
        }

        let liked = like_repo::toggle_like(&self.pool, resume_id, user_id).await?;
        let likes_count = like_repo::count_likes(&self.pool, resume_id).await?;

        tracing::debug!(%resume_id, %user_id, liked, likes_count, "like toggled");
        Ok(LikeOutcome { liked, likes_count })
    }
}
