// src/models/tenancy.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;

/// O tenant padrão. Dados criados antes do multi-tenancy vivem aqui,
/// e requisições sem cabeçalho caem nele.
pub const DEFAULT_TENANT_ID: &str = "default";

// ---
// 1. O Identificador de Tenant
// ---
// Um "slug" opaco (ex: "acme", "clube-do-bairro"). Usamos um newtype em vez
// de String solta para que nenhuma query aceite um tenant por acidente.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(transparent)]
#[serde(transparent)]
#[schema(value_type = String, example = "acme")]
pub struct TenantId(String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// O tenant de fallback ("default").
    pub fn default_tenant() -> Self {
        Self(DEFAULT_TENANT_ID.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_TENANT_ID
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self::default_tenant()
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---
// 2. A Comunidade (Tenant)
// ---
// A conta principal (uma comunidade isolada dentro do mesmo deploy)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    // O slug é a própria chave primária (não existe id numérico separado)
    pub id: TenantId,

    #[schema(example = "Comunidade Acme")]
    pub name: String,
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tenant_is_the_well_known_slug() {
        let t = TenantId::default();
        assert_eq!(t.as_str(), "default");
        assert!(t.is_default());
    }

    #[test]
    fn tenant_id_serializes_as_plain_string() {
        let t = TenantId::new("acme");
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"acme\"");

        let back: TenantId = serde_json::from_str("\"acme\"").unwrap();
        assert_eq!(back, t);
        assert!(!back.is_default());
    }
}
