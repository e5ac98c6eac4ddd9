/// Comment service - threaded comments, one level of replies
use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, profile_repo, resume_repo};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::CommentRecord;

pub const MAX_COMMENT_CHARS: usize = 2000;

/// A top-level comment with its replies, both oldest first
#[derive(Debug, Clone)]
pub struct CommentThread {
    pub comment: CommentRecord,
    pub replies: Vec<CommentRecord>,
}

/// Trim comment text and enforce presence and length.
pub fn clean_text(raw: &str, missing_message: &str) -> Result<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest(missing_message.to_string()));
    }
    if text.chars().count() > MAX_COMMENT_CHARS {
        return Err(AppError::BadRequest(format!(
            "Comment text must be at most {} characters",
            MAX_COMMENT_CHARS
        )));
    }
    Ok(text.to_string())
}

/// Group replies under their parents, keeping both lists in input order.
pub fn assemble_threads(parents: Vec<CommentRecord>, replies: Vec<CommentRecord>) -> Vec<CommentThread> {
    let mut by_parent: HashMap<Uuid, Vec<CommentRecord>> = HashMap::new();
    for reply in replies {
        if let Some(parent_id) = reply.parent_id {
            by_parent.entry(parent_id).or_default().push(reply);
        }
    }

    parents
        .into_iter()
        .map(|comment| {
            let replies = by_parent.remove(&comment.id).unwrap_or_default();
            CommentThread { comment, replies }
        })
        .collect()
}

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_author(&self, user: &AuthUser) -> Result<()> {
        profile_repo::ensure_profile(
            &self.pool,
            &user.id,
            &user.email,
            user.name.as_deref(),
            user.picture.as_deref(),
        )
        .await?;
        Ok(())
    }

    async fn find_owned(&self, comment_id: Uuid, user_id: &str, action: &str) -> Result<CommentRecord> {
        let comment = comment_repo::find_comment_by_id(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;

        if comment.user_id != user_id {
            return Err(AppError::Forbidden(format!(
                "Forbidden - You can only {} your own comments",
                action
            )));
        }

        Ok(comment)
    }

    pub async fn list_for_resume(&self, resume_id: Uuid) -> Result<Vec<CommentThread>> {
        let parents = comment_repo::find_top_level_comments(&self.pool, resume_id).await?;
        let parent_ids: Vec<Uuid> = parents.iter().map(|c| c.id).collect();
        let replies = comment_repo::find_replies_for_parents(&self.pool, &parent_ids).await?;

        Ok(assemble_threads(parents, replies))
    }

    pub async fn create_comment(
        &self,
        resume_id: Uuid,
        user: &AuthUser,
        raw_text: &str,
    ) -> Result<CommentRecord> {
        let text = clean_text(raw_text, "Comment text is required")?;

        if resume_repo::find_resume_owner(&self.pool, resume_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Resume not found".into()));
        }

        self.ensure_author(user).await?;
        let comment = comment_repo::create_comment(&self.pool, resume_id, &user.id, &text, None).await?;

        tracing::debug!(comment_id = %comment.id, %resume_id, "comment created");
        Ok(comment)
    }

    pub async fn update_comment(
        &self,
        comment_id: Uuid,
        user_id: &str,
        raw_text: &str,
    ) -> Result<CommentRecord> {
        let text = clean_text(raw_text, "Comment text is required")?;
        self.find_owned(comment_id, user_id, "edit").await?;

        comment_repo::update_comment_text(&self.pool, comment_id, &text)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".into()))
    }

    pub async fn delete_comment(&self, comment_id: Uuid, user_id: &str) -> Result<()> {
        self.find_owned(comment_id, user_id, "delete").await?;

        if !comment_repo::delete_comment(&self.pool, comment_id).await? {
            return Err(AppError::NotFound("Comment not found".into()));
        }
        Ok(())
    }

    pub async fn list_replies(&self, comment_id: Uuid) -> Result<Vec<CommentRecord>> {
        Ok(comment_repo::find_replies_for_parents(&self.pool, &[comment_id]).await?)
    }

    /// Replies always hang off a top-level comment: replying to a reply
    /// attaches to that reply's parent.
    pub async fn create_reply(
        &self,
        parent_id: Uuid,
        user: &AuthUser,
        raw_text: &str,
    ) -> Result<CommentRecord> {
        let text = clean_text(raw_text, "Reply text is required")?;

        let parent = comment_repo::find_comment_by_id(&self.pool, parent_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Parent comment not found".into()))?;
        let thread_root = parent.parent_id.unwrap_or(parent.id);

        self.ensure_author(user).await?;
        let reply = comment_repo::create_comment(
            &self.pool,
            parent.resume_id,
            &user.id,
            &text,
            Some(thread_root),
        )
        .await?;

        tracing::debug!(reply_id = %reply.id, %thread_root, "reply created");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn comment(parent_id: Option<Uuid>, offset_secs: i64) -> CommentRecord {
        let at = Utc::now() + Duration::seconds(offset_secs);
        CommentRecord {
            id: Uuid::new_v4(),
            resume_id: Uuid::nil(),
            user_id: "u".into(),
            parent_id,
            text: "t".into(),
            upvotes_count: 0,
            downvotes_count: 0,
            created_at: at,
            updated_at: at,
            author_name: None,
            author_avatar: None,
        }
    }

    #[test]
    fn replies_are_grouped_under_parents_in_order() {
        let a = comment(None, 0);
        let b = comment(None, 1);
        let r1 = comment(Some(a.id), 2);
        let r2 = comment(Some(b.id), 3);
        let r3 = comment(Some(a.id), 4);

        let threads = assemble_threads(
            vec![a.clone(), b.clone()],
            vec![r1.clone(), r2.clone(), r3.clone()],
        );

        assert_eq!(threads.len(), 2);
        assert_eq!(threads[0].comment.id, a.id);
        let a_replies: Vec<Uuid> = threads[0].replies.iter().map(|r| r.id).collect();
        assert_eq!(a_replies, vec![r1.id, r3.id]);
        assert_eq!(threads[1].replies[0].id, r2.id);
    }

    #[test]
    fn text_is_trimmed_and_required() {
        assert_eq!(clean_text("  nice  ", "x").unwrap(), "nice");
        let err = clean_text("   ", "Reply text is required").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Reply text is required"));
        assert!(clean_text(&"a".repeat(MAX_COMMENT_CHARS + 1), "x").is_err());
    }
}
