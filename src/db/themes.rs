use sqlx::PgPool;

use crate::models::theme::Theme;

/// Insert a new theme. The database assigns the id.
pub async fn create(pool: &PgPool, description: &str) -> Result<Theme, sqlx::Error> {
    let theme = sqlx::query_as::<_, Theme>(
        r#"
        INSERT INTO themes (description)
        VALUES ($1)
        RETURNING id, description
        "#,
    )
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(theme)
}

/// Replace the description of an existing theme.
/// Returns `None` when no row has the given id.
pub async fn update(pool: &PgPool, id: i64, description: &str) -> Result<Option<Theme>, sqlx::Error> {
    let theme = sqlx::query_as::<_, Theme>(
        r#"
        UPDATE themes
        SET description = $1
        WHERE id = $2
        RETURNING id, description
        "#,
    )
    .bind(description)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(theme)
}

/// Fetch one theme by id.
pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Theme>, sqlx::Error> {
    let theme = sqlx::query_as::<_, Theme>("SELECT id, description FROM themes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(theme)
}

/// List themes, optionally filtered by a case-insensitive description
/// pattern (an ILIKE pattern such as `%keyword%`).
pub async fn list(
    pool: &PgPool,
    description_pattern: Option<String>,
) -> Result<Vec<Theme>, sqlx::Error> {
    let themes = sqlx::query_as::<_, Theme>(
        r#"
        SELECT id, description
        FROM themes
        WHERE ($1::TEXT IS NULL OR description ILIKE $1)
        ORDER BY id
        "#,
    )
    .bind(description_pattern)
    .fetch_all(pool)
    .await?;

    Ok(themes)
}

/// Delete a theme by id. Posts referencing it are removed by the FK cascade.
/// Returns the number of theme rows removed (0 or 1).
pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM themes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
