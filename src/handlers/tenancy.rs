// src/handlers/tenancy.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::tenancy::TenantId,
};

// ---
// 1. "Payload" (O "Formulário" da API)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantPayload {
    // O slug vira o tenant_id de todas as tabelas; minúsculas e hífens
    #[validate(length(min = 2, message = "O slug deve ter no mínimo 2 caracteres"))]
    #[schema(example = "acme")]
    pub slug: String,

    #[validate(length(min = 1, message = "O nome da comunidade é obrigatório."))]
    #[schema(example = "Comunidade Acme")]
    pub name: String,

    pub description: Option<String>,
}

// POST /api/tenants
#[utoipa::path(
    post,
    path = "/api/tenants",
    tag = "Tenancy",
    request_body = CreateTenantPayload,
    responses(
        (status = 201, description = "Comunidade criada", body = crate::models::tenancy::Tenant),
        (status = 409, description = "Slug já existe")
    )
)]
pub async fn create_tenant(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateTenantPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let slug = TenantId::new(payload.slug.trim().to_lowercase());

    let new_tenant = app_state
        .tenancy_service
        .create_tenant(&slug, &payload.name, payload.description.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(new_tenant)))
}

// GET /api/tenants/current
// A comunidade da requisição atual (útil para o frontend se configurar)
#[utoipa::path(
    get,
    path = "/api/tenants/current",
    tag = "Tenancy",
    responses(
        (status = 200, description = "Comunidade ativa", body = crate::models::tenancy::Tenant),
        (status = 404, description = "Comunidade desconhecida")
    ),
    params(
        ("x-tenant-id" = String, Header, description = "Slug da comunidade")
    )
)]
pub async fn get_current_tenant(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let current = app_state
        .tenancy_service
        .get_tenant(&tenant)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(current)))
}
