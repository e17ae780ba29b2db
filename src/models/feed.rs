// src/models/feed.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::tenancy::TenantId;

// ---
// 1. Post (o item do feed)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub tenant_id: TenantId,

    pub author_id: Uuid,
    pub body: String,

    pub created_at: DateTime<Utc>,
}

// O feed devolve o post já com os contadores (uma query, sem N+1)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostWithCounts {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,

    #[schema(example = 3)]
    pub like_count: i64,
    #[schema(example = 1)]
    pub comment_count: i64,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub body: String,
}

// ---
// 2. Curtidas
// ---
// O like é um toggle; o handler devolve o estado final.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeResult {
    pub liked: bool,
    pub like_count: i64,
}

// ---
// 3. Comentários
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostComment {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub post_id: Uuid,

    pub author_id: Uuid,
    pub body: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
}
