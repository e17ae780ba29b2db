// src/services/broadcast_service.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BroadcastRepository, DirectoryRepository},
    middleware::tenancy::TenantContext,
    models::broadcast::{Broadcast, BroadcastStatus, NewBroadcast},
    services::mailer::Mailer,
};

#[derive(Clone)]
pub struct BroadcastService {
    repo: BroadcastRepository,
    directory_repo: DirectoryRepository,
    mailer: Option<Mailer>,
    pool: PgPool,
}

impl BroadcastService {
    pub fn new(
        repo: BroadcastRepository,
        directory_repo: DirectoryRepository,
        mailer: Option<Mailer>,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            directory_repo,
            mailer,
            pool,
        }
    }

    pub async fn create_draft(
        &self,
        tenant: &TenantContext,
        created_by: Uuid,
        subject: &str,
        body_html: &str,
    ) -> Result<Broadcast, AppError> {
        self.repo
            .create_broadcast(
                &self.pool,
                tenant.scoped(NewBroadcast {
                    subject: subject.to_string(),
                    body_html: body_html.to_string(),
                    created_by,
                }),
            )
            .await
    }

    pub async fn list_broadcasts(&self, tenant: &TenantContext) -> Result<Vec<Broadcast>, AppError> {
        self.repo.list_broadcasts(tenant).await
    }

    /// O envio de fato: draft/failed -> sending -> sent | failed.
    /// Destinatários são os membros do diretório DESTA comunidade.
    pub async fn send(
        &self,
        tenant: &TenantContext,
        broadcast_id: Uuid,
    ) -> Result<Broadcast, AppError> {
        let broadcast = self
            .repo
            .find_broadcast(tenant, broadcast_id)
            .await?
            .ok_or(AppError::BroadcastNotFound)?;

        if !broadcast.status.can_send() {
            return Err(AppError::BroadcastAlreadySent);
        }

        let Some(mailer) = &self.mailer else {
            return Err(AppError::MailerNotConfigured);
        };

        let recipients = self.directory_repo.list_member_emails(tenant).await?;
        if recipients.is_empty() {
            return Err(AppError::NoRecipients);
        }

        // A transição para 'sending' é condicionada ao status no banco;
        // de duas requisições concorrentes, só uma ganha a linha.
        let claimed = self
            .repo
            .claim_for_sending(tenant, broadcast_id)
            .await?
            .ok_or(AppError::BroadcastAlreadySent)?;

        let delivery = mailer
            .send_bulk(&claimed.subject, &claimed.body_html, &recipients)
            .await;

        let (status, count, sent_at) =
            delivery_outcome(delivery.is_ok(), recipients.len() as i32);
        let updated = self
            .repo
            .mark_status(tenant, broadcast_id, status, count, sent_at)
            .await?;

        match delivery {
            Ok(()) => Ok(updated),
            Err(e) => {
                tracing::error!(broadcast = %broadcast_id, "Falha no envio do broadcast: {:?}", e);
                Err(e)
            }
        }
    }
}

// Estado persistido após a tentativa de envio. A contagem de destinatários
// fica registrada também quando o provedor falha.
fn delivery_outcome(
    delivered: bool,
    attempted: i32,
) -> (BroadcastStatus, i32, Option<DateTime<Utc>>) {
    if delivered {
        (BroadcastStatus::Sent, attempted, Some(Utc::now()))
    } else {
        (BroadcastStatus::Failed, attempted, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_delivery_keeps_the_attempted_recipient_count() {
        let (status, count, sent_at) = delivery_outcome(false, 42);
        assert_eq!(status, BroadcastStatus::Failed);
        assert_eq!(count, 42);
        assert!(sent_at.is_none());
    }

    #[test]
    fn successful_delivery_stamps_sent_at() {
        let (status, count, sent_at) = delivery_outcome(true, 42);
        assert_eq!(status, BroadcastStatus::Sent);
        assert_eq!(count, 42);
        assert!(sent_at.is_some());
    }
}
