// src/handlers/events.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::TenantContext},
    models::events::RsvpStatus,
};

const DEFAULT_EVENTS_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct EventsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Churrasco de fim de ano")]
    pub title: String,

    pub description: Option<String>,
    pub location: Option<String>,

    #[schema(value_type = String, format = DateTime, example = "2026-09-15T18:00:00Z")]
    pub starts_at: DateTime<Utc>,

    #[schema(value_type = Option<String>, format = DateTime)]
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RsvpPayload {
    #[schema(example = "going")]
    pub status: RsvpStatus,
}

// POST /api/events
#[utoipa::path(
    post,
    path = "/api/events",
    tag = "Events",
    request_body = CreateEventPayload,
    responses(
        (status = 201, description = "Evento criado", body = crate::models::events::Event)
    ),
    params(
        ("x-tenant-id" = String, Header, description = "Slug da comunidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_event(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CreateEventPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .tenancy_service
        .ensure_feature(&tenant, "events")
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let event = app_state
        .events_service
        .create_event(
            &tenant,
            user.0.id,
            &payload.title,
            payload.description.as_deref(),
            payload.location.as_deref(),
            payload.starts_at,
            payload.ends_at,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(event)))
}

// GET /api/events
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "Events",
    responses(
        (status = 200, description = "Próximos eventos", body = Vec<crate::models::events::Event>)
    ),
    params(
        ("x-tenant-id" = String, Header, description = "Slug da comunidade"),
        ("limit" = Option<i64>, Query, description = "Máximo de eventos (default 50)")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_events(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Query(query): Query<EventsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_EVENTS_LIMIT).clamp(1, 200);

    let events = app_state
        .events_service
        .list_upcoming(&tenant, limit)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(events)))
}

// PUT /api/events/{id}/rsvp
#[utoipa::path(
    put,
    path = "/api/events/{id}/rsvp",
    tag = "Events",
    request_body = RsvpPayload,
    responses(
        (status = 200, description = "RSVP registrado", body = crate::models::events::EventRsvp),
        (status = 404, description = "Evento não encontrado")
    ),
    params(
        ("id" = Uuid, Path, description = "Id do evento"),
        ("x-tenant-id" = String, Header, description = "Slug da comunidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn rsvp(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<RsvpPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let rsvp = app_state
        .events_service
        .rsvp(&tenant, event_id, user.0.id, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rsvp)))
}

// GET /api/events/{id}/rsvps
#[utoipa::path(
    get,
    path = "/api/events/{id}/rsvps",
    tag = "Events",
    responses(
        (status = 200, description = "RSVPs do evento", body = Vec<crate::models::events::EventRsvp>)
    ),
    params(
        ("id" = Uuid, Path, description = "Id do evento"),
        ("x-tenant-id" = String, Header, description = "Slug da comunidade")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_rsvps(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let rsvps = app_state
        .events_service
        .list_rsvps(&tenant, event_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rsvps)))
}
