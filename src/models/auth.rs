// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::tenancy::TenantId;

// Representa um usuário vindo do banco de dados.
// Usuários pertencem a uma comunidade: o e-mail é único POR tenant,
// não globalmente.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub tenant_id: TenantId,

    pub name: String,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O que o repositório insere (a senha já chega como hash)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres"))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@email.com")]
    pub email: String,

    #[validate(length(min = 8, message = "A senha deve ter no mínimo 8 caracteres"))]
    #[schema(example = "senha-bem-longa")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@email.com")]
    pub email: String,

    #[validate(length(min = 1, message = "required"))]
    pub password: String,
}

// O que devolvemos após login/registro
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// As claims do JWT. Carregamos o tenant junto do usuário: um token
// emitido para a comunidade A não vale numa requisição resolvida para B.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub tenant: TenantId,
    pub exp: usize,
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_payload_rejects_short_password() {
        let payload = RegisterUserPayload {
            name: "Maria".to_string(),
            email: "maria@email.com".to_string(),
            password: "curta".to_string(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn register_payload_rejects_bad_email() {
        let payload = RegisterUserPayload {
            name: "Maria".to_string(),
            email: "nao-e-email".to_string(),
            password: "senha-bem-longa".to_string(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn claims_round_trip_keeps_tenant() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            tenant: TenantId::new("acme"),
            exp: 2_000_000_000,
            iat: 1_900_000_000,
        };
        let json = serde_json::to_string(&claims).unwrap();
        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tenant, claims.tenant);
        assert_eq!(back.sub, claims.sub);
    }
}
