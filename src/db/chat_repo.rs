// src/db/chat_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    middleware::tenancy::{TenantContext, TenantScoped},
    models::chat::{ChatMessage, NewChatMessage},
};

#[derive(Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_message<'e, E>(
        &self,
        executor: E,
        new_message: TenantScoped<NewChatMessage>,
    ) -> Result<ChatMessage, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let message = sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO chat_messages (tenant_id, channel, sender_id, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, tenant_id, channel, sender_id, body, created_at
            "#,
        )
        .bind(&new_message.tenant_id)
        .bind(&new_message.data.channel)
        .bind(new_message.data.sender_id)
        .bind(&new_message.data.body)
        .fetch_one(executor)
        .await?;

        Ok(message)
    }

    /// As últimas mensagens do canal, em ordem cronológica.
    pub async fn list_messages<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        channel: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let messages = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT * FROM (
                SELECT id, tenant_id, channel, sender_id, body, created_at
                FROM chat_messages
                WHERE tenant_id = $1 AND channel = $2
                ORDER BY created_at DESC
                LIMIT $3
            ) recent
            ORDER BY created_at ASC
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(channel)
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(messages)
    }
}
