// src/models/directory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::tenancy::TenantId;

// ---
// O Membro (diretório da comunidade)
// ---
// Nem todo membro tem login: o diretório também guarda pessoas cadastradas
// manualmente (ex: importadas de uma planilha). Por isso user_id é opcional.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub tenant_id: TenantId,

    pub user_id: Option<Uuid>,

    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,

    // CAMPOS PERSONALIZADOS
    // Cada comunidade decide o que quer saber dos membros.
    // Aqui vai o { "apartamento": "12B", "time": "Flamengo" }
    pub profile: Value,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Payload de criação (o repositório recebe isto embrulhado em TenantScoped)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub user_id: Option<Uuid>,

    #[validate(length(min = 1, message = "required"))]
    pub display_name: String,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub profile: Value,
}
