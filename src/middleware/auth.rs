// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::{resolve_tenant, TenantContext},
    models::auth::User,
};

// O middleware em si
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string());

    let Some(token) = token else {
        return Err(AppError::InvalidToken);
    };

    // O token precisa ter sido emitido para a comunidade desta requisição.
    // Se o tenant_guard já rodou, usamos o contexto validado dele.
    let tenant_id = match request.extensions().get::<TenantContext>() {
        Some(ctx) => ctx.tenant_id().clone(),
        None => resolve_tenant(request.headers(), request.uri()),
    };

    let user = app_state
        .auth_service
        .validate_token(&token, &tenant_id)
        .await?;

    // Insere o usuário nos "extensions" da requisição
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extrator para obter o usuário autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}
