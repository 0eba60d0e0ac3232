//! Database repository for genres.
//!
//! Structurally identical to [`super::categories`]; genres are the second of
//! the two flat reference tables titles point at.

use crate::db::{
    errors::Result,
    models::genres::{GenreCreateDBRequest, GenreDBResponse},
};
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing genres
#[derive(Debug, Clone)]
pub struct GenreFilter {
    pub search: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

impl GenreFilter {
    pub fn new(search: Option<String>, skip: i64, limit: i64) -> Self {
        Self { search, skip, limit }
    }
}

pub struct Genres<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Genres<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(slug = %request.slug), err)]
    pub async fn create(&mut self, request: &GenreCreateDBRequest) -> Result<GenreDBResponse> {
        let genre = sqlx::query_as::<_, GenreDBResponse>(
            "INSERT INTO genres (id, slug, name, created_at) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&request.slug)
        .bind(&request.name)
        .bind(Utc::now())
        .fetch_one(&mut *self.db)
        .await?;

        Ok(genre)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_slug(&mut self, slug: &str) -> Result<Option<GenreDBResponse>> {
        let genre = sqlx::query_as::<_, GenreDBResponse>("SELECT * FROM genres WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(genre)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    pub async fn list(&mut self, filter: &GenreFilter) -> Result<Vec<GenreDBResponse>> {
        let genres = sqlx::query_as::<_, GenreDBResponse>(
            r#"
            SELECT * FROM genres
            WHERE (? IS NULL OR instr(lower(name), lower(?)) > 0)
            ORDER BY created_at, slug
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(&filter.search)
        .bind(&filter.search)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(genres)
    }

    #[instrument(skip(self), err)]
    pub async fn delete_by_slug(&mut self, slug: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM genres WHERE slug = ?")
            .bind(slug)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
