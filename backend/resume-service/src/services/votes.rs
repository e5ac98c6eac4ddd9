use sqlx::PgPool;
use uuid::Uuid;

use crate::db::vote_repo;
use crate::error::{AppError, Result};
use crate::models::{VoteOutcome, VoteType};

pub struct VoteService {
    pool: PgPool,
}

impl VoteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Toggle the user's vote on a comment in one transaction.
    ///
    /// Same type again removes the vote; the other type switches it.
    pub async fn vote(&self, comment_id: Uuid, user_id: &str, vote_type: VoteType) -> Result<VoteOutcome> {
        let mut tx = self.pool.begin().await?;

        if vote_repo::lock_comment_counts(&mut *tx, comment_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Comment not found".into()));
        }

        let existing = vote_repo::find_vote(&mut *tx, comment_id, user_id).await?;
        let current = match existing {
            None => {
                vote_repo::insert_vote(&mut *tx, comment_id, user_id, vote_type.as_str()).await?;
                Some(vote_type)
            }
            Some(vote) if vote.vote_type == vote_type.as_str() => {
                vote_repo::delete_vote(&mut *tx, vote.id).await?;
                None
            }
            Some(vote) => {
                vote_repo::update_vote(&mut *tx, vote.id, vote_type.as_str()).await?;
                Some(vote_type)
            }
        };

        let (upvotes, downvotes) = vote_repo::comment_counts(&mut *tx, comment_id).await?;
        tx.commit().await?;

        tracing::debug!(%comment_id, %user_id, ?current, upvotes, downvotes, "vote toggled");
        Ok(VoteOutcome {
            voted: current.is_some(),
            vote_type: current,
            upvotes,
            downvotes,
        })
    }
}
