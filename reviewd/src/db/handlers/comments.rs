//! Database repository for comments on reviews.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::comments::{CommentCreateDBRequest, CommentDBResponse, CommentUpdateDBRequest},
};
use crate::types::{abbrev_uuid, CommentId, ReviewId};
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing comments, always scoped to a parent review.
#[derive(Debug, Clone)]
pub struct CommentFilter {
    pub review_id: ReviewId,
    pub skip: i64,
    pub limit: i64,
}

const SELECT_COMMENT: &str = r#"
    SELECT c.id, c.review_id, c.author_id, u.username AS author_username, c.text, c.pub_date
    FROM comments c
    JOIN users u ON u.id = c.author_id
"#;

pub struct Comments<'c> {
    db: &'c mut SqliteConnection,
}

#[async_trait::async_trait]
impl<'c> Repository for Comments<'c> {
    type CreateRequest = CommentCreateDBRequest;
    type UpdateRequest = CommentUpdateDBRequest;
    type Response = CommentDBResponse;
    type Id = CommentId;
    type Filter = CommentFilter;

    #[instrument(skip(self, request), fields(review_id = %abbrev_uuid(&request.review_id)), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let comment_id = Uuid::new_v4();

        sqlx::query("INSERT INTO comments (id, review_id, author_id, text, pub_date) VALUES (?, ?, ?, ?, ?)")
            .bind(comment_id)
            .bind(request.review_id)
            .bind(request.author_id)
            .bind(&request.text)
            .bind(Utc::now())
            .execute(&mut *self.db)
            .await?;

        self.get_by_id(comment_id).await?.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(comment_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let comment = sqlx::query_as::<_, CommentDBResponse>(&format!("{SELECT_COMMENT} WHERE c.id = ?"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(comment)
    }

    #[instrument(skip(self, filter), fields(review_id = %abbrev_uuid(&filter.review_id)), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let comments = sqlx::query_as::<_, CommentDBResponse>(&format!(
            "{SELECT_COMMENT} WHERE c.review_id = ? ORDER BY c.pub_date DESC, c.id LIMIT ? OFFSET ?"
        ))
        .bind(filter.review_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(comments)
    }

    #[instrument(skip(self), fields(comment_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(comment_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let result = sqlx::query("UPDATE comments SET text = COALESCE(?, text) WHERE id = ?")
            .bind(&request.text)
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        self.get_by_id(id).await?.ok_or(DbError::NotFound)
    }
}

impl<'c> Comments<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }
}
