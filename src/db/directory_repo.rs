// src/db/directory_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::{db_utils::push_tenant_filter, error::AppError},
    middleware::tenancy::{TenantContext, TenantScoped},
    models::directory::{Member, NewMember},
};

#[derive(Clone)]
pub struct DirectoryRepository {
    pool: PgPool,
}

impl DirectoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_member<'e, E>(
        &self,
        executor: E,
        new_member: TenantScoped<NewMember>,
    ) -> Result<Member, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let member = sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (tenant_id, user_id, display_name, email, phone, bio, avatar_url, profile)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, tenant_id, user_id, display_name, email, phone, bio, avatar_url,
                      profile, created_at, updated_at
            "#,
        )
        .bind(&new_member.tenant_id)
        .bind(new_member.data.user_id)
        .bind(&new_member.data.display_name)
        .bind(&new_member.data.email)
        .bind(&new_member.data.phone)
        .bind(&new_member.data.bio)
        .bind(&new_member.data.avatar_url)
        .bind(&new_member.data.profile)
        .fetch_one(executor)
        .await?;

        Ok(member)
    }

    pub async fn find_member<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        member_id: Uuid,
    ) -> Result<Option<Member>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let member = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, tenant_id, user_id, display_name, email, phone, bio, avatar_url,
                   profile, created_at, updated_at
            FROM members
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(member_id)
        .fetch_optional(executor)
        .await?;

        Ok(member)
    }

    /// Listagem com busca opcional por nome/e-mail. Query dinâmica, então
    /// o escopo de tenant entra via push_tenant_filter.
    pub async fn search_members<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        search: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Member>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT id, tenant_id, user_id, display_name, email, phone, bio, avatar_url, \
             profile, created_at, updated_at FROM members",
        );
        push_tenant_filter(&mut qb, tenant, None);

        if let Some(term) = search {
            let pattern = format!("%{}%", term);
            qb.push(" AND (display_name ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR email ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        qb.push(" ORDER BY display_name ASC LIMIT ");
        qb.push_bind(limit);

        let members = qb.build_query_as::<Member>().fetch_all(executor).await?;
        Ok(members)
    }

    /// Os destinatários de um broadcast: todo membro com e-mail.
    pub async fn list_member_emails(&self, tenant: &TenantContext) -> Result<Vec<String>, AppError> {
        let emails = sqlx::query_scalar::<_, String>(
            r#"
            SELECT email FROM members
            WHERE tenant_id = $1 AND email IS NOT NULL
            ORDER BY email ASC
            "#,
        )
        .bind(tenant.tenant_id())
        .fetch_all(&self.pool)
        .await?;

        Ok(emails)
    }
}
