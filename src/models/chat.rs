// src/models/chat.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::tenancy::TenantId;

// Canais são só nomes ("geral", "caronas"); criar canal é postar nele.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub tenant_id: TenantId,

    pub channel: String,
    pub sender_id: Uuid,
    pub body: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub channel: String,
    pub sender_id: Uuid,
    pub body: String,
}
