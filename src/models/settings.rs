// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::tenancy::TenantId;

// A "feature config" da comunidade. As flags vivem num JSONB porque cada
// comunidade liga/desliga módulos sem precisar de migração.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenantSettings {
    #[schema(ignore)] // O contexto (Header) já define a comunidade
    pub tenant_id: TenantId,

    // Ex: { "feed": true, "chat": true, "events": true, "broadcasts": false }
    #[schema(example = json!({"feed": true, "chat": true, "events": true, "broadcasts": true}))]
    pub features: Value,

    pub updated_at: Option<DateTime<Utc>>,
}

impl TenantSettings {
    /// Configuração inicial de uma comunidade: tudo ligado.
    pub fn default_for(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            features: serde_json::json!({
                "feed": true,
                "chat": true,
                "events": true,
                "broadcasts": true,
            }),
            updated_at: None,
        }
    }

    /// Flag ausente conta como ligada (módulos novos não começam apagados
    /// para comunidades antigas).
    pub fn feature_enabled(&self, name: &str) -> bool {
        self.features
            .get(name)
            .and_then(|v| v.as_bool())
            .unwrap_or(true)
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[validate(custom(function = "validate_features_object"))]
    #[schema(example = json!({"feed": true, "chat": false}))]
    pub features: Value,
}

// Um escalar aqui passaria batido e toda consulta de flag cairia no
// default "ligada"; só objeto JSON é aceito.
fn validate_features_object(features: &Value) -> Result<(), ValidationError> {
    if features.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("features_object")
            .with_message("As feature flags devem ser um objeto JSON".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_flag_counts_as_enabled() {
        let settings = TenantSettings::default_for(TenantId::new("acme"));
        assert!(settings.feature_enabled("feed"));
        assert!(settings.feature_enabled("algum_modulo_futuro"));
    }

    #[test]
    fn update_request_rejects_non_object_features() {
        let req = UpdateSettingsRequest {
            features: serde_json::json!(5),
        };
        assert!(req.validate().is_err());

        let req = UpdateSettingsRequest {
            features: serde_json::json!({ "chat": false }),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn explicit_false_disables_feature() {
        let mut settings = TenantSettings::default_for(TenantId::new("acme"));
        settings.features = serde_json::json!({ "chat": false });
        assert!(!settings.feature_enabled("chat"));
        assert!(settings.feature_enabled("feed"));
    }
}
