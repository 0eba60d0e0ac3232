//! API request/response models for comments.

use crate::db::models::comments::CommentDBResponse;
use crate::types::CommentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentCreate {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CommentUpdate {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: CommentId,
    pub text: String,
    /// Username of the comment author; always set server-side
    pub author: String,
    pub pub_date: DateTime<Utc>,
}

impl From<CommentDBResponse> for CommentResponse {
    fn from(db: CommentDBResponse) -> Self {
        Self {
            id: db.id,
            text: db.text,
            author: db.author_username,
            pub_date: db.pub_date,
        }
    }
}
