// src/services/feed_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FeedRepository,
    middleware::tenancy::TenantContext,
    models::feed::{LikeResult, NewComment, NewPost, Post, PostComment, PostWithCounts},
};

#[derive(Clone)]
pub struct FeedService {
    repo: FeedRepository,
    pool: PgPool,
}

impl FeedService {
    pub fn new(repo: FeedRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create_post(
        &self,
        tenant: &TenantContext,
        author_id: Uuid,
        body: &str,
    ) -> Result<Post, AppError> {
        self.repo
            .create_post(
                &self.pool,
                tenant.scoped(NewPost {
                    author_id,
                    body: body.to_string(),
                }),
            )
            .await
    }

    pub async fn list_posts(
        &self,
        tenant: &TenantContext,
        limit: i64,
    ) -> Result<Vec<PostWithCounts>, AppError> {
        self.repo.list_posts(&self.pool, tenant, limit).await
    }

    /// Curtir é um toggle: curtiu de novo, descurtiu.
    pub async fn toggle_like(
        &self,
        tenant: &TenantContext,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<LikeResult, AppError> {
        self.repo
            .find_post(tenant, post_id)
            .await?
            .ok_or(AppError::PostNotFound)?;

        let liked = if self.repo.has_like(tenant, post_id, user_id).await? {
            self.repo.delete_like(tenant, post_id, user_id).await?;
            false
        } else {
            self.repo.insert_like(tenant, post_id, user_id).await?;
            true
        };

        let like_count = self.repo.count_likes(tenant, post_id).await?;
        Ok(LikeResult { liked, like_count })
    }

    pub async fn create_comment(
        &self,
        tenant: &TenantContext,
        post_id: Uuid,
        author_id: Uuid,
        body: &str,
    ) -> Result<PostComment, AppError> {
        // Comentário em post de outra comunidade cai aqui como "não existe"
        self.repo
            .find_post(tenant, post_id)
            .await?
            .ok_or(AppError::PostNotFound)?;

        self.repo
            .create_comment(
                &self.pool,
                tenant.scoped(NewComment {
                    post_id,
                    author_id,
                    body: body.to_string(),
                }),
            )
            .await
    }

    pub async fn list_comments(
        &self,
        tenant: &TenantContext,
        post_id: Uuid,
    ) -> Result<Vec<PostComment>, AppError> {
        self.repo
            .find_post(tenant, post_id)
            .await?
            .ok_or(AppError::PostNotFound)?;

        self.repo.list_comments(tenant, post_id).await
    }
}
