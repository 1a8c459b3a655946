use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::validate_not_blank;

/// Represents the 'themes' table in the database.
/// A theme only carries its description; the posts referencing it are
/// reachable through an explicit query, never embedded here.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Theme {
    pub id: i64,
    pub description: String,
}

/// DTO for creating or replacing a theme.
#[derive(Debug, Deserialize, Validate)]
pub struct ThemePayload {
    #[validate(
        length(
            min = 1,
            max = 255,
            message = "Description must be between 1 and 255 characters"
        ),
        custom(function = validate_not_blank)
    )]
    pub description: String,
}
