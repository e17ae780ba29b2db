// src/models/events.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::tenancy::TenantId;

// ---
// ENUMS
// ---

// Mapeia o CREATE TYPE rsvp_status do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "rsvp_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Going,
    Maybe,
    Declined,
}

// ---
// O Evento
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub tenant_id: TenantId,

    #[schema(example = "Churrasco de fim de ano")]
    pub title: String,
    pub description: Option<String>,

    #[schema(example = "Salão de festas, bloco B")]
    pub location: Option<String>,

    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,

    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
}

// ---
// RSVP
// ---
// Um usuário tem no máximo um RSVP por evento (upsert no banco)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventRsvp {
    pub event_id: Uuid,
    pub tenant_id: TenantId,
    pub user_id: Uuid,

    pub status: RsvpStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsvp_status_uses_lowercase_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&RsvpStatus::Going).unwrap(),
            "\"going\""
        );
        let back: RsvpStatus = serde_json::from_str("\"declined\"").unwrap();
        assert_eq!(back, RsvpStatus::Declined);
    }
}
