use sqlx::PgPool;

use crate::models::user::User;

/// Insert a new user with an already-hashed password.
/// A duplicate email surfaces as the database's unique-violation error;
/// the caller maps it to a conflict.
pub async fn create(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
    photo_url: Option<&str>,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password, photo_url)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, email, password, photo_url, created_at
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(photo_url)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Fetch a user by email for login.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password, photo_url, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
