// src/handlers/chat.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::{
        db_utils::tenant_connection,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale, tenancy::TenantContext},
    models::chat::NewChatMessage,
};

const DEFAULT_CHAT_LIMIT: i64 = 100;

// "Geral" e "geral " são o mesmo canal
fn normalize_channel(channel: &str) -> String {
    channel.trim().to_lowercase()
}

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostMessagePayload {
    #[validate(length(min = 1, max = 2000, message = "required"))]
    pub body: String,
}

// POST /api/chat/{channel}/messages
pub async fn post_message(
    State(app_state): State<AppState>,
    locale: Locale,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Path(channel): Path<String>,
    Json(payload): Json<PostMessagePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .tenancy_service
        .ensure_feature(&tenant, "chat")
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let mut conn = tenant_connection(&app_state.db_pool, &tenant)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state
        .chat_repo
        .create_message(
            &mut *conn,
            tenant.scoped(NewChatMessage {
                channel: normalize_channel(&channel),
                sender_id: user.0.id,
                body: payload.body,
            }),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(message)))
}

// GET /api/chat/{channel}/messages
pub async fn list_messages(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(channel): Path<String>,
    Query(query): Query<ChatQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_CHAT_LIMIT).clamp(1, 500);

    let mut conn = tenant_connection(&app_state.db_pool, &tenant)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let messages = app_state
        .chat_repo
        .list_messages(&mut *conn, &tenant, &normalize_channel(&channel), limit)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(messages)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_names_are_normalized() {
        assert_eq!(normalize_channel("  Geral "), "geral");
        assert_eq!(normalize_channel("CARONAS"), "caronas");
    }
}
