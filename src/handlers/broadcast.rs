// src/handlers/broadcast.rs

use axum::{
    extract::{Path, State},
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

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBroadcastPayload {
    #[validate(length(min = 1, max = 200, message = "required"))]
    #[schema(example = "Assembleia dia 15/09")]
    pub subject: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "<p>Pessoal, a assembleia será dia 15...</p>")]
    pub body_html: String,
}

// POST /api/broadcasts
#[utoipa::path(
    post,
    path = "/api/broadcasts",
    tag = "Broadcasts",
    request_body = CreateBroadcastPayload,
    responses(
        (status = 201, description = "Rascunho criado", body = crate::models::broadcast::Broadcast)
    ),
    params(
        ("x-tenant-id" = String, Header, description = "Slug da comunidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_broadcast(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CreateBroadcastPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .tenancy_service
        .ensure_feature(&tenant, "broadcasts")
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let broadcast = app_state
        .broadcast_service
        .create_draft(&tenant, user.0.id, &payload.subject, &payload.body_html)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(broadcast)))
}

// GET /api/broadcasts
#[utoipa::path(
    get,
    path = "/api/broadcasts",
    tag = "Broadcasts",
    responses(
        (status = 200, description = "Comunicados da comunidade", body = Vec<crate::models::broadcast::Broadcast>)
    ),
    params(
        ("x-tenant-id" = String, Header, description = "Slug da comunidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_broadcasts(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let broadcasts = app_state
        .broadcast_service
        .list_broadcasts(&tenant)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(broadcasts)))
}

// POST /api/broadcasts/{id}/send
#[utoipa::path(
    post,
    path = "/api/broadcasts/{id}/send",
    tag = "Broadcasts",
    responses(
        (status = 200, description = "Comunicado enviado", body = crate::models::broadcast::Broadcast),
        (status = 404, description = "Comunicado não encontrado"),
        (status = 409, description = "Já enviado"),
        (status = 503, description = "Provedor de e-mail não configurado")
    ),
    params(
        ("id" = Uuid, Path, description = "Id do comunicado"),
        ("x-tenant-id" = String, Header, description = "Slug da comunidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_broadcast(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    tenant: TenantContext,
    Path(broadcast_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let broadcast = app_state
        .broadcast_service
        .send(&tenant, broadcast_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(broadcast)))
}
