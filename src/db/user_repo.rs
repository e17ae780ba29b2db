// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::tenancy::TenantScoped,
    models::{
        auth::{NewUser, User},
        tenancy::TenantId,
    },
};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_user(&self, new_user: TenantScoped<NewUser>) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (tenant_id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, tenant_id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(&new_user.tenant_id)
        .bind(&new_user.data.name)
        .bind(&new_user.data.email)
        .bind(&new_user.data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // O índice único é (tenant_id, email)
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;

        Ok(user)
    }

    pub async fn find_by_email(
        &self,
        tenant_id: &TenantId,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, tenant_id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE tenant_id = $1 AND email = $2
            "#,
        )
        .bind(tenant_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        user_id: Uuid,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, tenant_id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
