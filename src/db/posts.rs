use sqlx::PgPool;

use crate::models::post::{Post, PostPayload, PostWithTheme};

/// Insert a new post. The database assigns the id and the initial timestamp;
/// both come back on the returned row.
pub async fn create(pool: &PgPool, payload: &PostPayload) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, body, theme_id)
        VALUES ($1, $2, $3)
        RETURNING id, title, body, timestamp, theme_id
        "#,
    )
    .bind(&payload.title)
    .bind(&payload.body)
    .bind(payload.theme_id)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Replace title/body/theme of an existing post and refresh its timestamp.
/// Returns `None` when no row has the given id.
pub async fn update(
    pool: &PgPool,
    id: i64,
    payload: &PostPayload,
) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = $1, body = $2, theme_id = $3, timestamp = NOW()
        WHERE id = $4
        RETURNING id, title, body, timestamp, theme_id
        "#,
    )
    .bind(&payload.title)
    .bind(&payload.body)
    .bind(payload.theme_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Fetch one post by id, with its theme joined in.
pub async fn find(pool: &PgPool, id: i64) -> Result<Option<PostWithTheme>, sqlx::Error> {
    let post = sqlx::query_as::<_, PostWithTheme>(
        r#"
        SELECT p.id, p.title, p.body, p.timestamp, p.theme_id,
               t.description AS theme_description
        FROM posts p
        LEFT JOIN themes t ON p.theme_id = t.id
        WHERE p.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List posts, newest first, optionally filtered by a case-insensitive
/// title pattern (an ILIKE pattern such as `%keyword%`).
pub async fn list(
    pool: &PgPool,
    title_pattern: Option<String>,
) -> Result<Vec<PostWithTheme>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostWithTheme>(
        r#"
        SELECT p.id, p.title, p.body, p.timestamp, p.theme_id,
               t.description AS theme_description
        FROM posts p
        LEFT JOIN themes t ON p.theme_id = t.id
        WHERE ($1::TEXT IS NULL OR p.title ILIKE $1)
        ORDER BY p.timestamp DESC
        "#,
    )
    .bind(title_pattern)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// The reverse view of the theme relation, computed on demand: all posts
/// referencing the given theme, newest first.
pub async fn list_by_theme(pool: &PgPool, theme_id: i64) -> Result<Vec<PostWithTheme>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostWithTheme>(
        r#"
        SELECT p.id, p.title, p.body, p.timestamp, p.theme_id,
               t.description AS theme_description
        FROM posts p
        LEFT JOIN themes t ON p.theme_id = t.id
        WHERE p.theme_id = $1
        ORDER BY p.timestamp DESC
        "#,
    )
    .bind(theme_id)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Delete a post by id. Returns the number of rows removed (0 or 1).
pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
