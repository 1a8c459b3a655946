// src/models/mod.rs

pub mod post;
pub mod theme;
pub mod user;

/// Rejects strings that are empty or whitespace-only. Length bounds alone
/// accept e.g. five spaces, so required text fields pair this with them.
pub fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("not_blank"));
    }
    Ok(())
}
