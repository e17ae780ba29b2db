// src/common/db_utils.rs

use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::common::error::AppError;
use crate::middleware::tenancy::TenantContext;

// ---
// Helpers de escopo de tenant para a camada de dados
// ---

/// Adquire uma conexão da pool com a variável `app.tenant_id` definida,
/// para que as policies de RLS do Postgres reforcem o isolamento por baixo
/// dos filtros que as queries já fazem.
pub(crate) async fn tenant_connection(
    pool: &PgPool,
    tenant: &TenantContext,
) -> Result<sqlx::pool::PoolConnection<sqlx::Postgres>, AppError> {
    // 1. Adquire conexão
    // O operador '?' converte automaticamente sqlx::Error -> AppError::DatabaseError
    let mut conn = pool.acquire().await?;

    // 2. Define o Tenant ID da conexão
    sqlx::query("SELECT set_config('app.tenant_id', $1, true)")
        .bind(tenant.tenant_id().as_str())
        .execute(&mut *conn)
        .await?;

    Ok(conn)
}

/// Anexa a condição de tenant a uma query dinâmica:
/// `WHERE tenant_id = $n`, combinada com a condição extra via AND quando
/// o chamador tiver uma. Toda listagem multi-linha passa por aqui (ou
/// escreve o `WHERE tenant_id` à mão nas queries estáticas).
pub fn push_tenant_filter(
    qb: &mut QueryBuilder<'_, Postgres>,
    tenant: &TenantContext,
    extra_condition: Option<&str>,
) {
    qb.push(" WHERE tenant_id = ");
    qb.push_bind(tenant.tenant_id().as_str().to_owned());

    if let Some(condition) = extra_condition {
        qb.push(" AND (");
        qb.push(condition);
        qb.push(")");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tenancy::TenantId;

    #[test]
    fn filter_scopes_by_tenant_column() {
        let tenant = TenantContext::new(TenantId::new("acme"));
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT * FROM members");
        push_tenant_filter(&mut qb, &tenant, None);
        assert_eq!(qb.sql(), "SELECT * FROM members WHERE tenant_id = $1");
    }

    #[test]
    fn extra_condition_is_combined_with_and() {
        let tenant = TenantContext::new(TenantId::new("acme"));
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT * FROM members");
        push_tenant_filter(&mut qb, &tenant, Some("email IS NOT NULL"));
        assert_eq!(
            qb.sql(),
            "SELECT * FROM members WHERE tenant_id = $1 AND (email IS NOT NULL)"
        );
    }
}
