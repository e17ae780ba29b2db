// src/db/settings_repo.rs

use serde_json::Value;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{settings::TenantSettings, tenancy::TenantId},
};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Comunidades antigas podem não ter linha de settings; o chamador
    /// cai para `TenantSettings::default_for` quando vier None.
    pub async fn get_settings(
        &self,
        tenant_id: &TenantId,
    ) -> Result<Option<TenantSettings>, AppError> {
        let settings = sqlx::query_as::<_, TenantSettings>(
            r#"
            SELECT tenant_id, features, updated_at
            FROM tenant_settings
            WHERE tenant_id = $1
            "#,
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    pub async fn upsert_settings<'e, E>(
        &self,
        executor: E,
        tenant_id: &TenantId,
        features: &Value,
    ) -> Result<TenantSettings, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let settings = sqlx::query_as::<_, TenantSettings>(
            r#"
            INSERT INTO tenant_settings (tenant_id, features, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (tenant_id)
            DO UPDATE SET features = EXCLUDED.features, updated_at = NOW()
            RETURNING tenant_id, features, updated_at
            "#,
        )
        .bind(tenant_id)
        .bind(features)
        .fetch_one(executor)
        .await?;

        Ok(settings)
    }
}
