use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::{theme::Theme, validate_not_blank};

/// Represents the 'posts' table in the database.
/// `id` is assigned by the sequence on insert and never changes afterwards;
/// `timestamp` is set on insert and refreshed by every update.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub theme_id: Option<i64>,
}

/// Row shape for reads that join the optional theme in one pass.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithTheme {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub theme_id: Option<i64>,
    pub theme_description: Option<String>,
}

/// Serialized post returned by the API. The theme is embedded as a nested
/// object; the relation is one-directional, so the nested theme never
/// carries a post list back.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub theme: Option<Theme>,
}

impl PostResponse {
    /// Builds the response from a bare row plus an already-resolved theme.
    /// Used on the create/update path, where the theme was looked up before
    /// the write.
    pub fn from_parts(post: Post, theme: Option<Theme>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            timestamp: post.timestamp,
            theme,
        }
    }
}

impl From<PostWithTheme> for PostResponse {
    fn from(row: PostWithTheme) -> Self {
        let theme = match (row.theme_id, row.theme_description) {
            (Some(id), Some(description)) => Some(Theme { id, description }),
            _ => None,
        };

        Self {
            id: row.id,
            title: row.title,
            body: row.body,
            timestamp: row.timestamp,
            theme,
        }
    }
}

/// DTO for creating or replacing a post. The same payload (and therefore the
/// same validation path) serves both operations; `id` and `timestamp` are
/// never accepted from callers.
#[derive(Debug, Deserialize, Validate)]
pub struct PostPayload {
    #[validate(
        length(
            min = 5,
            max = 100,
            message = "Title must be between 5 and 100 characters"
        ),
        custom(function = validate_not_blank)
    )]
    pub title: String,

    #[validate(length(
        min = 10,
        max = 1000,
        message = "Body must be between 10 and 1000 characters"
    ))]
    pub body: String,

    /// Optional reference to a theme; resolved against the themes table
    /// before any write.
    pub theme_id: Option<i64>,
}

/// Query parameters for listing posts.
#[derive(Debug, Deserialize)]
pub struct PostListParams {
    /// Case-insensitive title substring filter.
    pub q: Option<String>,
}
