// src/services/events_service.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::EventsRepository,
    middleware::tenancy::TenantContext,
    models::events::{Event, EventRsvp, NewEvent, RsvpStatus},
};

#[derive(Clone)]
pub struct EventsService {
    repo: EventsRepository,
    pool: PgPool,
}

impl EventsService {
    pub fn new(repo: EventsRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_event(
        &self,
        tenant: &TenantContext,
        created_by: Uuid,
        title: &str,
        description: Option<&str>,
        location: Option<&str>,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
    ) -> Result<Event, AppError> {
        self.repo
            .create_event(
                &self.pool,
                tenant.scoped(NewEvent {
                    title: title.to_string(),
                    description: description.map(|s| s.to_string()),
                    location: location.map(|s| s.to_string()),
                    starts_at,
                    ends_at,
                    created_by,
                }),
            )
            .await
    }

    pub async fn list_upcoming(
        &self,
        tenant: &TenantContext,
        limit: i64,
    ) -> Result<Vec<Event>, AppError> {
        self.repo.list_upcoming(&self.pool, tenant, limit).await
    }

    pub async fn rsvp(
        &self,
        tenant: &TenantContext,
        event_id: Uuid,
        user_id: Uuid,
        status: RsvpStatus,
    ) -> Result<EventRsvp, AppError> {
        self.repo
            .find_event(tenant, event_id)
            .await?
            .ok_or(AppError::EventNotFound)?;

        self.repo.upsert_rsvp(tenant, event_id, user_id, status).await
    }

    pub async fn list_rsvps(
        &self,
        tenant: &TenantContext,
        event_id: Uuid,
    ) -> Result<Vec<EventRsvp>, AppError> {
        self.repo
            .find_event(tenant, event_id)
            .await?
            .ok_or(AppError::EventNotFound)?;

        self.repo.list_rsvps(tenant, event_id).await
    }
}
