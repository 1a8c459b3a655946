// src/handlers/posts.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::PgPool;
use validator::Validate;

use crate::db;
use crate::error::AppError;
use crate::models::post::{PostListParams, PostPayload, PostResponse};
use crate::models::theme::Theme;

/// Resolves an optional theme reference before a post is written. Pointing a
/// post at a theme that does not exist is a caller error, so it is rejected
/// before anything touches the posts table.
async fn resolve_theme(pool: &PgPool, theme_id: Option<i64>) -> Result<Option<Theme>, AppError> {
    match theme_id {
        Some(id) => {
            let theme = db::themes::find(pool, id).await?.ok_or_else(|| {
                AppError::BadRequest(format!("Theme with id {} does not exist", id))
            })?;
            Ok(Some(theme))
        }
        None => Ok(None),
    }
}

/// Lists posts, newest first. `?q=` narrows the result to titles containing
/// the query, case-insensitively.
pub async fn list_posts(
    State(pool): State<PgPool>,
    Query(params): Query<PostListParams>,
) -> Result<impl IntoResponse, AppError> {
    let title_pattern = params.q.map(|q| format!("%{}%", q));

    let posts = db::posts::list(&pool, title_pattern).await.map_err(|e| {
        tracing::error!("Failed to list posts: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let response: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();

    Ok(Json(response))
}

/// Fetches a single post by its ID.
pub async fn get_post(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let post = db::posts::find(&pool, id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch post {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

    Ok(Json(PostResponse::from(post)))
}

/// Creates a post. The ID and the timestamp are assigned by the database;
/// whatever the caller sends for them is ignored by the payload shape.
pub async fn create_post(
    State(pool): State<PgPool>,
    Json(payload): Json<PostPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let theme = resolve_theme(&pool, payload.theme_id).await?;

    let post = db::posts::create(&pool, &payload).await.map_err(|e| {
        tracing::error!("Failed to create post: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(PostResponse::from_parts(post, theme)),
    ))
}

/// Replaces the title, body and theme of an existing post. The repository
/// refreshes the timestamp in the same statement, so a successful update
/// always comes back with a newer timestamp.
pub async fn update_post(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<PostPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let theme = resolve_theme(&pool, payload.theme_id).await?;

    let post = db::posts::update(&pool, id, &payload)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update post {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or_else(|| AppError::NotFound(format!("Post with id {} not found", id)))?;

    Ok(Json(PostResponse::from_parts(post, theme)))
}

/// Deletes a post by its ID.
pub async fn delete_post(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let rows_affected = db::posts::delete(&pool, id).await.map_err(|e| {
        tracing::error!("Failed to delete post {}: {:?}", id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    if rows_affected == 0 {
        return Err(AppError::NotFound(format!("Post with id {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
