use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Flip the user's like on a resume inside one transaction.
///
/// Returns `true` when the resume is liked after the call.
pub async fn toggle_like(pool: &PgPool, resume_id: Uuid, user_id: &str) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query(
        r#"
        DELETE FROM likes
        WHERE resume_id = $1 AND user_id = $2
        "#,
    )
    .bind(resume_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let liked = if removed > 0 {
        false
    } else {
        sqlx::query(
            r#"
            INSERT INTO likes (resume_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (resume_id, user_id) DO NOTHING
            "#,
        )
        .bind(resume_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
        true
    };

    tx.commit().await?;
    Ok(liked)
}

/// Exact number of like rows for a resume
pub async fn count_likes(pool: &PgPool, resume_id: Uuid) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS count FROM likes WHERE resume_id = $1")
        .bind(resume_id)
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("count"))
}
