// src/db/feed_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    middleware::tenancy::{TenantContext, TenantScoped},
    models::feed::{NewComment, NewPost, Post, PostComment, PostWithCounts},
};

#[derive(Clone)]
pub struct FeedRepository {
    pool: PgPool,
}

impl FeedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  POSTS
    // =========================================================================

    pub async fn create_post<'e, E>(
        &self,
        executor: E,
        new_post: TenantScoped<NewPost>,
    ) -> Result<Post, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (tenant_id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, tenant_id, author_id, body, created_at
            "#,
        )
        .bind(&new_post.tenant_id)
        .bind(new_post.data.author_id)
        .bind(&new_post.data.body)
        .fetch_one(executor)
        .await?;

        Ok(post)
    }

    pub async fn find_post(
        &self,
        tenant: &TenantContext,
        post_id: Uuid,
    ) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, tenant_id, author_id, body, created_at
            FROM posts
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// O feed: mais recentes primeiro, contadores agregados na mesma query.
    pub async fn list_posts<'e, E>(
        &self,
        executor: E,
        tenant: &TenantContext,
        limit: i64,
    ) -> Result<Vec<PostWithCounts>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let posts = sqlx::query_as::<_, PostWithCounts>(
            r#"
            SELECT
                p.id, p.tenant_id, p.author_id, p.body, p.created_at,
                COUNT(DISTINCT l.user_id) AS like_count,
                COUNT(DISTINCT c.id) AS comment_count
            FROM posts p
            LEFT JOIN post_likes l ON l.post_id = p.id
            LEFT JOIN post_comments c ON c.post_id = p.id
            WHERE p.tenant_id = $1
            GROUP BY p.id
            ORDER BY p.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(posts)
    }

    // =========================================================================
    //  CURTIDAS (toggle)
    // =========================================================================

    pub async fn has_like(
        &self,
        tenant: &TenantContext,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM post_likes
                WHERE tenant_id = $1 AND post_id = $2 AND user_id = $3
            )
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn insert_like(
        &self,
        tenant: &TenantContext,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO post_likes (tenant_id, post_id, user_id)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete_like(
        &self,
        tenant: &TenantContext,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            DELETE FROM post_likes
            WHERE tenant_id = $1 AND post_id = $2 AND user_id = $3
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn count_likes(
        &self,
        tenant: &TenantContext,
        post_id: Uuid,
    ) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM post_likes
            WHERE tenant_id = $1 AND post_id = $2
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    // =========================================================================
    //  COMENTÁRIOS
    // =========================================================================

    pub async fn create_comment<'e, E>(
        &self,
        executor: E,
        new_comment: TenantScoped<NewComment>,
    ) -> Result<PostComment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let comment = sqlx::query_as::<_, PostComment>(
            r#"
            INSERT INTO post_comments (tenant_id, post_id, author_id, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, tenant_id, post_id, author_id, body, created_at
            "#,
        )
        .bind(&new_comment.tenant_id)
        .bind(new_comment.data.post_id)
        .bind(new_comment.data.author_id)
        .bind(&new_comment.data.body)
        .fetch_one(executor)
        .await?;

        Ok(comment)
    }

    pub async fn list_comments(
        &self,
        tenant: &TenantContext,
        post_id: Uuid,
    ) -> Result<Vec<PostComment>, AppError> {
        let comments = sqlx::query_as::<_, PostComment>(
            r#"
            SELECT id, tenant_id, post_id, author_id, body, created_at
            FROM post_comments
            WHERE tenant_id = $1 AND post_id = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(tenant.tenant_id())
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
