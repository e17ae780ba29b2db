// src/services/tenancy_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{SettingsRepository, TenantRepository},
    middleware::tenancy::TenantContext,
    models::{
        settings::TenantSettings,
        tenancy::{Tenant, TenantId},
    },
};

#[derive(Clone)]
pub struct TenancyService {
    tenant_repo: TenantRepository,
    settings_repo: SettingsRepository,
    pool: PgPool, // Usamos a pool para iniciar transações
}

impl TenancyService {
    pub fn new(
        tenant_repo: TenantRepository,
        settings_repo: SettingsRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            tenant_repo,
            settings_repo,
            pool,
        }
    }

    /// Cria a comunidade e, atomicamente, a linha de settings com as
    /// features padrão. Ou nasce tudo, ou nada.
    pub async fn create_tenant(
        &self,
        id: &TenantId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Tenant, AppError> {
        let mut tx = self.pool.begin().await?;

        let tenant = self
            .tenant_repo
            .create_tenant(&mut *tx, id, name, description)
            .await?;

        let defaults = TenantSettings::default_for(id.clone());
        self.settings_repo
            .upsert_settings(&mut *tx, id, &defaults.features)
            .await?;

        tx.commit().await?;

        tracing::info!(tenant = %id, "Comunidade criada");
        Ok(tenant)
    }

    pub async fn get_tenant(&self, tenant: &TenantContext) -> Result<Tenant, AppError> {
        self.tenant_repo
            .find_tenant(&self.pool, tenant.tenant_id())
            .await?
            .ok_or_else(|| AppError::TenantNotFound(tenant.tenant_id().to_string()))
    }

    pub async fn get_settings(&self, tenant: &TenantContext) -> Result<TenantSettings, AppError> {
        let settings = self
            .settings_repo
            .get_settings(tenant.tenant_id())
            .await?;

        // Comunidade sem linha de settings usa os padrões
        Ok(settings.unwrap_or_else(|| TenantSettings::default_for(tenant.tenant_id().clone())))
    }

    pub async fn update_settings(
        &self,
        tenant: &TenantContext,
        features: &serde_json::Value,
    ) -> Result<TenantSettings, AppError> {
        self.settings_repo
            .upsert_settings(&self.pool, tenant.tenant_id(), features)
            .await
    }

    /// Gate dos módulos opcionais: feed, chat, events, broadcasts.
    pub async fn ensure_feature(
        &self,
        tenant: &TenantContext,
        feature: &str,
    ) -> Result<(), AppError> {
        let settings = self.get_settings(tenant).await?;
        if !settings.feature_enabled(feature) {
            return Err(AppError::FeatureDisabled(feature.to_string()));
        }
        Ok(())
    }
}
