use crate::models::CommentRecord;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Insert a comment (or reply when `parent_id` is set) and return it with
/// its author's display fields.
pub async fn create_comment(
    pool: &PgPool,
    resume_id: Uuid,
    user_id: &str,
    text: &str,
    parent_id: Option<Uuid>,
) -> Result<CommentRecord, sqlx::Error> {
    let comment = sqlx::query_as::<_, CommentRecord>(
        r#"
        WITH inserted AS (
            INSERT INTO comments (resume_id, user_id, text, parent_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
        )
        SELECT c.id, c.resume_id, c.user_id, c.parent_id, c.text,
               c.upvotes_count, c.downvotes_count, c.created_at, c.updated_at,
               p.name AS author_name, p.avatar_url AS author_avatar
        FROM inserted c
        LEFT JOIN profiles p ON p.id = c.user_id
        "#,
    )
    .bind(resume_id)
    .bind(user_id)
    .bind(text)
    .bind(parent_id)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Get a single comment by ID
pub async fn find_comment_by_id(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<CommentRecord>, sqlx::Error> {
    let comment = sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT c.id, c.resume_id, c.user_id, c.parent_id, c.text,
               c.upvotes_count, c.downvotes_count, c.created_at, c.updated_at,
               p.name AS author_name, p.avatar_url AS author_avatar
        FROM comments c
        LEFT JOIN profiles p ON p.id = c.user_id
        WHERE c.id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Top-level comments of a resume, oldest first
pub async fn find_top_level_comments(
    pool: &PgPool,
    resume_id: Uuid,
) -> Result<Vec<CommentRecord>, sqlx::Error> {
    let comments = sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT c.id, c.resume_id, c.user_id, c.parent_id, c.text,
               c.upvotes_count, c.downvotes_count, c.created_at, c.updated_at,
               p.name AS author_name, p.avatar_url AS author_avatar
        FROM comments c
        LEFT JOIN profiles p ON p.id = c.user_id
        WHERE c.resume_id = $1 AND c.parent_id IS NULL
        ORDER BY c.created_at ASC, c.id ASC
        "#,
    )
    .bind(resume_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Replies for a batch of parent comments, oldest first
pub async fn find_replies_for_parents(
    pool: &PgPool,
    parent_ids: &[Uuid],
) -> Result<Vec<CommentRecord>, sqlx::Error> {
    if parent_ids.is_empty() {
        return Ok(Vec::new());
    }

    let replies = sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT c.id, c.resume_id, c.user_id, c.parent_id, c.text,
               c.upvotes_count, c.downvotes_count, c.created_at, c.updated_at,
               p.name AS author_name, p.avatar_url AS author_avatar
        FROM comments c
        LEFT JOIN profiles p ON p.id = c.user_id
        WHERE c.parent_id = ANY($1)
        ORDER BY c.created_at ASC, c.id ASC
        "#,
    )
    .bind(parent_ids)
    .fetch_all(pool)
    .await?;

    Ok(replies)
}

/// Update the text of a comment
pub async fn update_comment_text(
    pool: &PgPool,
    comment_id: Uuid,
    text: &str,
) -> Result<Option<CommentRecord>, sqlx::Error> {
    let comment = sqlx::query_as::<_, CommentRecord>(
        r#"
        WITH updated AS (
            UPDATE comments
            SET text = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
        )
        SELECT c.id, c.resume_id, c.user_id, c.parent_id, c.text,
               c.upvotes_count, c.downvotes_count, c.created_at, c.updated_at,
               p.name AS author_name, p.avatar_url AS author_avatar
        FROM updated c
        LEFT JOIN profiles p ON p.id = c.user_id
        "#,
    )
    .bind(comment_id)
    .bind(text)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Hard delete; replies and votes cascade
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Exact number of top-level comments on a resume
pub async fn count_top_level_comments(pool: &PgPool, resume_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        "SELECT COUNT(*) AS count FROM comments WHERE resume_id = $1 AND parent_id IS NULL",
    )
    .bind(resume_id)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("count"))
}
