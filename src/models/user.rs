// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use url::Url;
use validator::Validate;

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    pub name: String,

    /// Unique email address; doubles as the login identifier.
    pub email: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    /// Optional profile picture URL.
    pub photo_url: Option<String>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for registering a new user.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Name must be between 2 and 100 characters"
    ))]
    pub name: String,

    #[validate(email(message = "Email address is not valid"))]
    pub email: String,

    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub password: String,

    #[validate(length(max = 500), custom(function = validate_url_string))]
    pub photo_url: Option<String>,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// Validates that a string is a correctly formatted URL.
fn validate_url_string(url: &str) -> Result<(), validator::ValidationError> {
    if Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: "Jo Doe".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            photo_url: None,
        }
    }

    #[test]
    fn accepts_valid_registration() {
        assert!(register("jo@example.com", "password123").validate().is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(register("not-an-email", "password123").validate().is_err());
        assert!(register("", "password123").validate().is_err());
    }

    #[test]
    fn rejects_short_password() {
        assert!(register("jo@example.com", "short").validate().is_err());
        assert!(register("jo@example.com", &"p".repeat(129)).validate().is_err());
    }

    #[test]
    fn photo_url_must_parse_when_present() {
        let mut req = register("jo@example.com", "password123");
        req.photo_url = Some("https://example.com/avatar.png".to_string());
        assert!(req.validate().is_ok());

        req.photo_url = Some("definitely not a url".to_string());
        assert!(req.validate().is_err());

        req.photo_url = None;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn password_is_never_serialized() {
        let user = User {
            id: 1,
            name: "Jo Doe".to_string(),
            email: "jo@example.com".to_string(),
            password: "$argon2id$hash".to_string(),
            photo_url: None,
            created_at: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "jo@example.com");
    }
}
