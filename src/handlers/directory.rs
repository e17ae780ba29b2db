// src/handlers/directory.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        db_utils::tenant_connection,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::TenantContext},
    models::directory::NewMember,
};

const DEFAULT_DIRECTORY_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct DirectoryQuery {
    // ?search=maria filtra por nome ou e-mail
    pub search: Option<String>,
    pub limit: Option<i64>,
}

// POST /api/directory/members
pub async fn create_member(
    State(app_state): State<AppState>,
    locale: Locale,
    _user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<NewMember>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    // Obtém conexão segura com RLS
    let mut conn = tenant_connection(&app_state.db_pool, &tenant)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let member = app_state
        .directory_repo
        .create_member(&mut *conn, tenant.scoped(payload))
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(member)))
}

// GET /api/directory/members
pub async fn list_members(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(query): Query<DirectoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_DIRECTORY_LIMIT).clamp(1, 500);

    let mut conn = tenant_connection(&app_state.db_pool, &tenant)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let members = app_state
        .directory_repo
        .search_members(&mut *conn, &tenant, query.search.as_deref(), limit)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(members)))
}

// GET /api/directory/members/{id}
pub async fn get_member(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(member_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let mut conn = tenant_connection(&app_state.db_pool, &tenant)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let member = app_state
        .directory_repo
        .find_member(&mut *conn, &tenant, member_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?
        .ok_or_else(|| AppError::MemberNotFound.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(member)))
}
