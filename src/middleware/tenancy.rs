// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, Uri},
    middleware::Next,
    response::Response,
};

use crate::common::error::AppError;
use crate::config::AppState;
use crate::models::tenancy::TenantId;

// O nome do nosso cabeçalho HTTP customizado
pub const TENANT_ID_HEADER: &str = "x-tenant-id";

// Fallback por query string (?tenant=acme), pensado para uso local/dev,
// onde mexer em cabeçalho no navegador é chato.
pub const TENANT_QUERY_PARAM: &str = "tenant";

// ---
// O Contexto de Tenant
// ---
// O tenant ativo de UMA requisição. Resolvido uma vez na entrada e passado
// explicitamente pela cadeia de chamadas (extrator -> handler -> service ->
// repo). Não existe variável global: dois pedidos concorrentes de
// comunidades diferentes nunca enxergam o tenant um do outro, e não há
// "reset" a fazer no fim — o valor morre com a requisição.
#[derive(Debug, Clone)]
pub struct TenantContext(TenantId);

impl TenantContext {
    pub fn new(tenant_id: TenantId) -> Self {
        Self(tenant_id)
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.0
    }

    /// Embrulha um payload de INSERT junto com o tenant ativo. Os
    /// repositórios só aceitam inserts embrulhados assim, então nenhuma
    /// linha entra no banco sem tenant_id.
    pub fn scoped<T>(&self, data: T) -> TenantScoped<T> {
        TenantScoped {
            tenant_id: self.0.clone(),
            data,
        }
    }
}

/// Um dado de inserção já carimbado com o tenant dono.
#[derive(Debug, Clone)]
pub struct TenantScoped<T> {
    pub tenant_id: TenantId,
    pub data: T,
}

// ---
// Resolução (pura, nunca falha)
// ---
// Ordem: cabeçalho > query param > tenant padrão. A resolução é só
// sintática; se o tenant existe de verdade é problema do guard (modo
// estrito) ou das queries (que devolvem vazio para tenant desconhecido).
pub fn resolve_tenant(headers: &HeaderMap, uri: &Uri) -> TenantId {
    if let Some(value) = headers.get(TENANT_ID_HEADER) {
        if let Ok(raw) = value.to_str() {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return TenantId::new(trimmed);
            }
        }
    }

    if let Some(query) = uri.query() {
        for pair in query.split('&') {
            let mut parts = pair.splitn(2, '=');
            if parts.next() == Some(TENANT_QUERY_PARAM) {
                if let Some(value) = parts.next() {
                    if !value.is_empty() {
                        // ?tenant=my%2Dslug chega percent-encoded
                        let decoded = urlencoding::decode(value)
                            .map(|v| v.into_owned())
                            .unwrap_or_else(|_| value.to_string());
                        return TenantId::new(decoded);
                    }
                }
            }
        }
    }

    TenantId::default_tenant()
}

pub fn resolve_tenant_from_parts(parts: &Parts) -> TenantId {
    resolve_tenant(&parts.headers, &parts.uri)
}

// ---
// O Guard
// ---
// Resolve o tenant, valida a existência (modo estrito) e deixa o contexto
// nos "extensions" para o resto da requisição. É o único ponto que decide
// entre "404 explícito" e "degrada para resultado vazio".
pub async fn tenant_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let tenant_id = resolve_tenant(request.headers(), request.uri());

    if app_state.tenant_strict && !app_state.tenant_repo.tenant_exists(&tenant_id).await? {
        tracing::warn!(tenant = %tenant_id, "Requisição para comunidade desconhecida");
        return Err(AppError::TenantNotFound(tenant_id.to_string()));
    }

    request
        .extensions_mut()
        .insert(TenantContext::new(tenant_id));

    Ok(next.run(request).await)
}

// ---
// O Extrator
// ---
// Prefere o contexto que o guard deixou; rotas fora do guard (ex: auth)
// resolvem direto, sem validação de existência.
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<TenantContext>() {
            return Ok(ctx.clone());
        }

        Ok(TenantContext::new(resolve_tenant_from_parts(parts)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    fn parts_for(uri: &str, header: Option<&str>) -> Parts {
        let mut builder = HttpRequest::builder().uri(uri);
        if let Some(value) = header {
            builder = builder.header(TENANT_ID_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn header_wins_over_query_param() {
        let parts = parts_for("/api/feed/posts?tenant=do-query", Some("do-header"));
        assert_eq!(
            resolve_tenant_from_parts(&parts),
            TenantId::new("do-header")
        );
    }

    #[test]
    fn query_param_is_used_without_header() {
        let parts = parts_for("/api/feed/posts?page=2&tenant=acme", None);
        assert_eq!(resolve_tenant_from_parts(&parts), TenantId::new("acme"));
    }

    #[test]
    fn query_param_is_percent_decoded() {
        let parts = parts_for("/api/feed/posts?tenant=my%2Dslug", None);
        assert_eq!(resolve_tenant_from_parts(&parts), TenantId::new("my-slug"));
    }

    #[test]
    fn falls_back_to_default_tenant() {
        let parts = parts_for("/api/feed/posts", None);
        assert_eq!(resolve_tenant_from_parts(&parts), TenantId::default_tenant());
    }

    #[test]
    fn empty_header_falls_through() {
        let parts = parts_for("/api/feed/posts?tenant=acme", Some("   "));
        assert_eq!(resolve_tenant_from_parts(&parts), TenantId::new("acme"));
    }

    #[test]
    fn scoped_insert_carries_the_active_tenant() {
        let ctx = TenantContext::new(TenantId::new("acme"));
        let scoped = ctx.scoped("qualquer payload");
        assert_eq!(scoped.tenant_id, TenantId::new("acme"));
        assert_eq!(scoped.data, "qualquer payload");
    }

    #[tokio::test]
    async fn extractor_prefers_guard_context_over_raw_headers() {
        // O guard já validou e deixou "acme"; o cabeçalho cru diz outra
        // coisa (não deve ser relido).
        let mut parts = parts_for("/api/feed/posts", Some("intruso"));
        parts
            .extensions
            .insert(TenantContext::new(TenantId::new("acme")));

        let ctx = TenantContext::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(ctx.tenant_id(), &TenantId::new("acme"));
    }

    #[tokio::test]
    async fn sequential_requests_resolve_independently() {
        let mut first = parts_for("/api/feed/posts", Some("acme"));
        let ctx1 = TenantContext::from_request_parts(&mut first, &())
            .await
            .unwrap();

        let mut second = parts_for("/api/feed/posts", None);
        let ctx2 = TenantContext::from_request_parts(&mut second, &())
            .await
            .unwrap();

        // Nada do primeiro pedido vaza para o segundo.
        assert_eq!(ctx1.tenant_id(), &TenantId::new("acme"));
        assert_eq!(ctx2.tenant_id(), &TenantId::default_tenant());
    }
}
