// src/models/broadcast.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::tenancy::TenantId;

// Mapeia o CREATE TYPE broadcast_status do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "broadcast_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BroadcastStatus {
    Draft,
    Sending,
    Sent,
    Failed,
}

impl BroadcastStatus {
    /// Só rascunhos e envios que falharam podem ser (re)enviados.
    pub fn can_send(self) -> bool {
        matches!(self, BroadcastStatus::Draft | BroadcastStatus::Failed)
    }
}

// ---
// O E-mail em massa
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Broadcast {
    pub id: Uuid,
    pub tenant_id: TenantId,

    #[schema(example = "Assembleia dia 15/09")]
    pub subject: String,

    // Corpo em HTML; o provedor cuida da versão texto
    pub body_html: String,

    pub status: BroadcastStatus,

    // Quantos destinatários o último envio alcançou
    pub recipient_count: i32,
    pub sent_at: Option<DateTime<Utc>>,

    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBroadcast {
    pub subject: String,
    pub body_html: String,
    pub created_by: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_draft_and_failed_can_be_sent() {
        assert!(BroadcastStatus::Draft.can_send());
        assert!(BroadcastStatus::Failed.can_send());
        assert!(!BroadcastStatus::Sending.can_send());
        assert!(!BroadcastStatus::Sent.can_send());
    }
}
