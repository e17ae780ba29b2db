// src/db/events_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::tenancy::{TenantContext, TenantScoped},
    models::events::{Event, EventRsvp, NewEvent, RsvpStatus},
};

#[derive(Clone)]
pub struct EventsRepository {
    pool: PgPool,
}

impl EventsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_event<'e, E>(
        &self,
        executor: E,
        new_event: TenantScoped<NewEvent>,
    ) -> Result<Event, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (tenant_id, title, description, location, starts_at, ends_at, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, tenant_id, title, description, location, starts_at, ends_at,
                      created_by, created_at
            "#,
        )
        .bind(&new_event.tenant_id)
        .bind(&new_event.data.title)
        .bind(&new_event.data.description)
        .bind(&new_event.data.location)
        .bind(new_event.data.starts_at)
        .bind(new_event.data.ends_at)
        .bind(new_event.data.created_by)
        .fetch_one(executor)
        .await?;

        Ok(event)
    }

    pub async fn find_event(
        &self,
        tenant: &TenantContext,
        event_id: Uuid,
    ) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, tenant_id, title, description, location, starts_at, ends_at,
                   created_by, created_at
            FROM events
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Próximos eventos primeiro; eventos passados ficam de fora.
    pub async fn list_upcoming<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        limit: i64,
    ) -> Result<Vec<Event>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, tenant_id, title, description, location, starts_at, ends_at,
                   created_by, created_at
            FROM events
            WHERE tenant_id = $1 AND starts_at >= NOW()
            ORDER BY starts_at ASC
            LIMIT $2
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(events)
    }

    /// Um usuário, um RSVP por evento: INSERT ... ON CONFLICT atualiza o status.
    pub async fn upsert_rsvp(
        &self,
        tenant: &TenantContext,
        event_id: Uuid,
        user_id: Uuid,
        status: RsvpStatus,
    ) -> Result<EventRsvp, AppError> {
        let rsvp = sqlx::query_as::<_, EventRsvp>(
            r#"
            INSERT INTO event_rsvps (tenant_id, event_id, user_id, status)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (event_id, user_id)
            DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()
            RETURNING event_id, tenant_id, user_id, status, created_at, updated_at
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(event_id)
        .bind(user_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(rsvp)
    }

    pub async fn list_rsvps(
        &self,
        tenant: &TenantContext,
        event_id: Uuid,
    ) -> Result<Vec<EventRsvp>, AppError> {
        let rsvps = sqlx::query_as::<_, EventRsvp>(
            r#"
            SELECT event_id, tenant_id, user_id, status, created_at, updated_at
            FROM event_rsvps
            WHERE tenant_id = $1 AND event_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rsvps)
    }
}
