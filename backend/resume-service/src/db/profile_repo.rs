use crate::models::Profile;
use sqlx::PgPool;

/// Make sure a profile row exists for an authenticated user.
///
/// Existing rows are left alone; the identity provider owns profile edits.
pub async fn ensure_profile(
    pool: &PgPool,
    user_id: &str,
    email: &str,
    name: Option<&str>,
    avatar_url: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO profiles (id, email, name, avatar_url)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(email)
    .bind(name)
    .bind(avatar_url)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a profile by its identity-provider subject
pub async fn find_profile(pool: &PgPool, user_id: &str) -> Result<Option<Profile>, sqlx::Error> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, email, name, avatar_url, created_at, updated_at
        FROM profiles
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}
