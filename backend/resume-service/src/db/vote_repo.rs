use crate::models::CommentVote;
use sqlx::{PgConnection, Row};
use uuid::Uuid;

/// Lock the comment row and return its current vote counters.
///
/// `None` when the comment does not exist.
pub async fn lock_comment_counts(
    conn: &mut PgConnection,
    comment_id: Uuid,
) -> Result<Option<(i64, i64)>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT upvotes_count, downvotes_count
        FROM comments
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(comment_id)
    .fetch_optional(conn)
    .await?;

    Ok(row.map(|r| {
        (
            i64::from(r.get::<i32, _>("upvotes_count")),
            i64::from(r.get::<i32, _>("downvotes_count")),
        )
    }))
}

/// The user's current vote on a comment
pub async fn find_vote(
    conn: &mut PgConnection,
    comment_id: Uuid,
    user_id: &str,
) -> Result<Option<CommentVote>, sqlx::Error> {
    sqlx::query_as::<_, CommentVote>(
        r#"
        SELECT id, comment_id, user_id, vote_type, created_at
        FROM comment_votes
        WHERE comment_id = $1 AND user_id = $2
        "#,
    )
    .bind(comment_id)
    .bind(user_id)
    .fetch_optional(conn)
    .await
}

pub async fn insert_vote(
    conn: &mut PgConnection,
    comment_id: Uuid,
    user_id: &str,
    vote_type: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO comment_votes (comment_id, user_id, vote_type)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(comment_id)
    .bind(user_id)
    .bind(vote_type)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn update_vote(conn: &mut PgConnection, vote_id: Uuid, vote_type: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE comment_votes SET vote_type = $2 WHERE id = $1")
        .bind(vote_id)
        .bind(vote_type)
        .execute(conn)
        .await?;

    Ok(())
}

pub async fn delete_vote(conn: &mut PgConnection, vote_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM comment_votes WHERE id = $1")
        .bind(vote_id)
        .execute(conn)
        .await?;

    Ok(())
}

/// Counters after the triggers have run
pub async fn comment_counts(conn: &mut PgConnection, comment_id: Uuid) -> Result<(i64, i64), sqlx::Error> {
    let row = sqlx::query("SELECT upvotes_count, downvotes_count FROM comments WHERE id = $1")
        .bind(comment_id)
        .fetch_one(conn)
        .await?;

    Ok((
        i64::from(row.get::<i32, _>("upvotes_count")),
        i64::from(row.get::<i32, _>("downvotes_count")),
    ))
}
