// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::config::Config;
use crate::db;
use crate::error::AppError;
use crate::models::user::{LoginRequest, RegisterRequest};
use crate::utils::hash::{hash_password, verify_password};
use crate::utils::jwt::sign_jwt;

/// Registers a new user. The password is hashed before it reaches the
/// database, and the email must be unique.
pub async fn register(
    State(pool): State<PgPool>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let hashed_password = hash_password(&payload.password)?;

    let user = db::users::create(
        &pool,
        &payload.name,
        &payload.email,
        &hashed_password,
        payload.photo_url.as_deref(),
    )
    .await
    .map_err(|e| {
        // Postgres reports a unique violation as error code 23505.
        if e.to_string().contains("unique constraint") || e.to_string().contains("23505") {
            AppError::Conflict(format!("Email '{}' is already registered", payload.email))
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::InternalServerError(e.to_string())
        }
    })?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Verifies credentials and issues a bearer token. The same message is
/// returned for an unknown email and a wrong password.
pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = db::users::find_by_email(&pool, &payload.email)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up user: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(AppError::AuthError("Invalid email or password".to_string()));
    }

    let token = sign_jwt(user.id, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
    })))
}
