// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Nosso tipo de erro de domínio, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    // O erro explícito de "tenant desconhecido" (modo estrito).
    // O fallback silencioso do design original escondia typos no cabeçalho.
    #[error("Comunidade não encontrada: {0}")]
    TenantNotFound(String),

    #[error("Comunidade já existe: {0}")]
    TenantAlreadyExists(String),

    #[error("Membro não encontrado")]
    MemberNotFound,

    #[error("Publicação não encontrada")]
    PostNotFound,

    #[error("Evento não encontrado")]
    EventNotFound,

    #[error("Comunicado não encontrado")]
    BroadcastNotFound,

    #[error("Comunicado já enviado")]
    BroadcastAlreadySent,

    #[error("Nenhum destinatário com e-mail")]
    NoRecipients,

    #[error("Provedor de e-mail não configurado")]
    MailerNotConfigured,

    #[error("Módulo desligado: {0}")]
    FeatureDisabled(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro do provedor de e-mail: {0}")]
    EmailProviderError(#[from] reqwest::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists
            | AppError::TenantAlreadyExists(_)
            | AppError::BroadcastAlreadySent
            | AppError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound
            | AppError::TenantNotFound(_)
            | AppError::MemberNotFound
            | AppError::PostNotFound
            | AppError::EventNotFound
            | AppError::BroadcastNotFound => StatusCode::NOT_FOUND,
            AppError::FeatureDisabled(_) => StatusCode::FORBIDDEN,
            AppError::NoRecipients => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MailerNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A chave no catálogo i18n (ver `common::i18n`).
    fn message_key(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation",
            AppError::EmailAlreadyExists => "email_already_exists",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::UserNotFound => "user_not_found",
            AppError::TenantNotFound(_) => "tenant_not_found",
            AppError::TenantAlreadyExists(_) => "tenant_already_exists",
            AppError::MemberNotFound => "member_not_found",
            AppError::PostNotFound => "post_not_found",
            AppError::EventNotFound => "event_not_found",
            AppError::BroadcastNotFound => "broadcast_not_found",
            AppError::BroadcastAlreadySent => "broadcast_already_sent",
            AppError::NoRecipients => "no_recipients",
            AppError::MailerNotConfigured => "mailer_not_configured",
            AppError::FeatureDisabled(_) => "feature_disabled",
            AppError::UniqueConstraintViolation(_) => "unique_violation",
            _ => "internal",
        }
    }

    // Variantes que carregam um dado interessante para a mensagem
    fn message_arg(&self) -> Option<&str> {
        match self {
            AppError::TenantNotFound(id) | AppError::TenantAlreadyExists(id) => Some(id),
            AppError::FeatureDisabled(name) => Some(name),
            AppError::UniqueConstraintViolation(what) => Some(what),
            _ => None,
        }
    }

    /// Converte o erro de domínio no erro HTTP, traduzindo a mensagem
    /// para o idioma da requisição.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O detalhe fica no log; o cliente só vê a mensagem genérica.
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        }

        // Sugestão B: devolver todos os detalhes da validação.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            return ApiError {
                status,
                message: store.translate(locale.lang(), "validation"),
                details: Some(json!(details)),
            };
        }

        let message = match self.message_arg() {
            Some(arg) => store.translate_with(locale.lang(), self.message_key(), arg),
            None => store.translate(locale.lang(), self.message_key()),
        };

        ApiError {
            status,
            message,
            details: None,
        }
    }
}

// Fallback em inglês para os pontos sem `Locale` à mão (guards, extratores).
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let store = I18nStore::new();
        self.to_api_error(&Locale::english(), &store).into_response()
    }
}

// ---
// O erro na fronteira HTTP
// ---
// O que de fato vira resposta: um status e uma mensagem já traduzida.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => Json(json!({ "error": self.message, "details": details })),
            None => Json(json!({ "error": self.message })),
        };
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenant_not_found_maps_to_404_with_the_slug() {
        let store = I18nStore::new();
        let err = AppError::TenantNotFound("acme".to_string());
        let api = err.to_api_error(&Locale::english(), &store);
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert!(api.message.contains("acme"));
    }

    #[test]
    fn validation_error_carries_field_details() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 5, message = "too_short"))]
            name: String,
        }

        let probe = Probe {
            name: "ab".to_string(),
        };
        let err = AppError::ValidationError(probe.validate().unwrap_err());
        let api = err.to_api_error(&Locale::english(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("detalhes de validação");
        assert!(details.get("name").is_some());
    }

    #[test]
    fn messages_follow_the_request_locale() {
        let store = I18nStore::new();
        let api = AppError::InvalidCredentials.to_api_error(&Locale::new("pt"), &store);
        assert_eq!(api.message, "E-mail ou senha inválidos.");
    }
}
