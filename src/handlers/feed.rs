// src/handlers/feed.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::TenantContext},
};

const DEFAULT_FEED_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostPayload {
    #[validate(length(min = 1, max = 5000, message = "required"))]
    #[schema(example = "Alguém viu meu gato laranja?")]
    pub body: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentPayload {
    #[validate(length(min = 1, max = 2000, message = "required"))]
    pub body: String,
}

// POST /api/feed/posts
#[utoipa::path(
    post,
    path = "/api/feed/posts",
    tag = "Feed",
    request_body = CreatePostPayload,
    responses(
        (status = 201, description = "Publicação criada", body = crate::models::feed::Post)
    ),
    params(
        ("x-tenant-id" = String, Header, description = "Slug da comunidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_post(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CreatePostPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .tenancy_service
        .ensure_feature(&tenant, "feed")
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let post = app_state
        .feed_service
        .create_post(&tenant, user.0.id, &payload.body)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(post)))
}

// GET /api/feed/posts
#[utoipa::path(
    get,
    path = "/api/feed/posts",
    tag = "Feed",
    responses(
        (status = 200, description = "Feed da comunidade", body = Vec<crate::models::feed::PostWithCounts>)
    ),
    params(
        ("x-tenant-id" = String, Header, description = "Slug da comunidade"),
        ("limit" = Option<i64>, Query, description = "Máximo de publicações (default 50)")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_posts(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(query): Query<FeedQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, 200);

    let posts = app_state
        .feed_service
        .list_posts(&tenant, limit)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(posts)))
}

// POST /api/feed/posts/{id}/like
#[utoipa::path(
    post,
    path = "/api/feed/posts/{id}/like",
    tag = "Feed",
    responses(
        (status = 200, description = "Estado final da curtida", body = crate::models::feed::LikeResult),
        (status = 404, description = "Publicação não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "Id da publicação"),
        ("x-tenant-id" = String, Header, description = "Slug da comunidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn toggle_like(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let result = app_state
        .feed_service
        .toggle_like(&tenant, post_id, user.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(result)))
}

// POST /api/feed/posts/{id}/comments
#[utoipa::path(
    post,
    path = "/api/feed/posts/{id}/comments",
    tag = "Feed",
    request_body = CreateCommentPayload,
    responses(
        (status = 201, description = "Comentário criado", body = crate::models::feed::PostComment),
        (status = 404, description = "Publicação não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "Id da publicação"),
        ("x-tenant-id" = String, Header, description = "Slug da comunidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_comment(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<CreateCommentPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let comment = app_state
        .feed_service
        .create_comment(&tenant, post_id, user.0.id, &payload.body)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(comment)))
}

// GET /api/feed/posts/{id}/comments
#[utoipa::path(
    get,
    path = "/api/feed/posts/{id}/comments",
    tag = "Feed",
    responses(
        (status = 200, description = "Comentários da publicação", body = Vec<crate::models::feed::PostComment>)
    ),
    params(
        ("id" = Uuid, Path, description = "Id da publicação"),
        ("x-tenant-id" = String, Header, description = "Slug da comunidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_comments(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let comments = app_state
        .feed_service
        .list_comments(&tenant, post_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(comments)))
}
