// src/db/broadcast_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::tenancy::{TenantContext, TenantScoped},
    models::broadcast::{Broadcast, BroadcastStatus, NewBroadcast},
};

// O WHERE no status é o que impede dois envios concorrentes do mesmo
// comunicado: só uma UPDATE encontra a linha em 'draft'/'failed'.
const CLAIM_FOR_SENDING_SQL: &str = r#"
    UPDATE broadcasts
    SET status = 'sending'
    WHERE tenant_id = $1 AND id = $2 AND status IN ('draft', 'failed')
    RETURNING id, tenant_id, subject, body_html, status, recipient_count,
              sent_at, created_by, created_at
"#;

#[derive(Clone)]
pub struct BroadcastRepository {
    pool: PgPool,
}

impl BroadcastRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_broadcast<'e, E>(
        &self,
        executor: E,
        new_broadcast: TenantScoped<NewBroadcast>,
    ) -> Result<Broadcast, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let broadcast = sqlx::query_as::<_, Broadcast>(
            r#"
            INSERT INTO broadcasts (tenant_id, subject, body_html, status, created_by)
            VALUES ($1, $2, $3, 'draft', $4)
            RETURNING id, tenant_id, subject, body_html, status, recipient_count,
                      sent_at, created_by, created_at
            "#,
        )
        .bind(&new_broadcast.tenant_id)
        .bind(&new_broadcast.data.subject)
        .bind(&new_broadcast.data.body_html)
        .bind(new_broadcast.data.created_by)
        .fetch_one(executor)
        .await?;

        Ok(broadcast)
    }

    pub async fn find_broadcast(
        &self,
        tenant: &TenantContext,
        broadcast_id: Uuid,
    ) -> Result<Option<Broadcast>, AppError> {
        let broadcast = sqlx::query_as::<_, Broadcast>(
            r#"
            SELECT id, tenant_id, subject, body_html, status, recipient_count,
                   sent_at, created_by, created_at
            FROM broadcasts
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(broadcast_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(broadcast)
    }

    pub async fn list_broadcasts(
        &self,
        tenant: &TenantContext,
    ) -> Result<Vec<Broadcast>, AppError> {
        let broadcasts = sqlx::query_as::<_, Broadcast>(
            r#"
            SELECT id, tenant_id, subject, body_html, status, recipient_count,
                   sent_at, created_by, created_at
            FROM broadcasts
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(tenant.tenant_id())
        .fetch_all(&self.pool)
        .await?;

        Ok(broadcasts)
    }

    /// Transição atômica draft/failed -> sending. None significa que outra
    /// requisição já reivindicou (ou concluiu) o envio.
    pub async fn claim_for_sending(
        &self,
        tenant: &TenantContext,
        broadcast_id: Uuid,
    ) -> Result<Option<Broadcast>, AppError> {
        let broadcast = sqlx::query_as::<_, Broadcast>(CLAIM_FOR_SENDING_SQL)
            .bind(tenant.tenant_id())
            .bind(broadcast_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(broadcast)
    }

    pub async fn mark_status(
        &self,
        tenant: &TenantContext,
        broadcast_id: Uuid,
        status: BroadcastStatus,
        recipient_count: i32,
        sent_at: Option<DateTime<Utc>>,
    ) -> Result<Broadcast, AppError> {
        let broadcast = sqlx::query_as::<_, Broadcast>(
            r#"
            UPDATE broadcasts
            SET status = $3, recipient_count = $4, sent_at = COALESCE($5, sent_at)
            WHERE tenant_id = $1 AND id = $2
            RETURNING id, tenant_id, subject, body_html, status, recipient_count,
                      sent_at, created_by, created_at
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(broadcast_id)
        .bind(status)
        .bind(recipient_count)
        .bind(sent_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(broadcast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sending_claim_guards_on_prior_status() {
        assert!(CLAIM_FOR_SENDING_SQL.contains("SET status = 'sending'"));
        assert!(CLAIM_FOR_SENDING_SQL.contains("status IN ('draft', 'failed')"));
    }
}
