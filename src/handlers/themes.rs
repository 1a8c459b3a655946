// src/handlers/themes.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::db;
use crate::error::AppError;
use crate::models::post::PostResponse;
use crate::models::theme::ThemePayload;

#[derive(Deserialize)]
pub struct ThemeListParams {
    pub q: Option<String>,
}

/// Lists themes, optionally filtered by `?q=` on the description.
pub async fn list_themes(
    State(pool): State<PgPool>,
    Query(params): Query<ThemeListParams>,
) -> Result<impl IntoResponse, AppError> {
    let description_pattern = params.q.map(|q| format!("%{}%", q));

    let themes = db::themes::list(&pool, description_pattern)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list themes: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    Ok(Json(themes))
}

/// Fetches a single theme by its ID.
pub async fn get_theme(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let theme = db::themes::find(&pool, id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch theme {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(format!("Theme with id {} not found", id)))?;

    Ok(Json(theme))
}

/// Lists the posts attached to a theme, newest first. The theme itself is
/// looked up first so an unknown ID is a 404 rather than an empty list.
pub async fn list_theme_posts(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    db::themes::find(&pool, id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch theme {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(format!("Theme with id {} not found", id)))?;

    let posts = db::posts::list_by_theme(&pool, id).await.map_err(|e| {
        tracing::error!("Failed to list posts for theme {}: {:?}", id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    let response: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();

    Ok(Json(response))
}

/// Creates a theme.
pub async fn create_theme(
    State(pool): State<PgPool>,
    Json(payload): Json<ThemePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let theme = db::themes::create(&pool, &payload.description).await.map_err(|e| {
        tracing::error!("Failed to create theme: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(theme)))
}

/// Replaces the description of an existing theme.
pub async fn update_theme(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<ThemePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let theme = db::themes::update(&pool, id, &payload.description)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update theme {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(format!("Theme with id {} not found", id)))?;

    Ok(Json(theme))
}

/// Deletes a theme. Posts referencing it are removed by the database through
/// the cascading foreign key on posts.theme_id.
pub async fn delete_theme(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows_affected = db::themes::delete(&pool, id).await.map_err(|e| {
        tracing::error!("Failed to delete theme {}: {:?}", id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    if rows_affected == 0 {
        return Err(AppError::NotFound(format!("Theme with id {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
