//! Database repository for categories.

use crate::db::{
    errors::Result,
    models::categories::{CategoryCreateDBRequest, CategoryDBResponse},
};
use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing categories
#[derive(Debug, Clone)]
pub struct CategoryFilter {
    /// Case-insensitive substring match on name
    pub search: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

impl CategoryFilter {
    pub fn new(search: Option<String>, skip: i64, limit: i64) -> Self {
        Self { search, skip, limit }
    }
}

pub struct Categories<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Categories<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, request), fields(slug = %request.slug), err)]
    pub async fn create(&mut self, request: &CategoryCreateDBRequest) -> Result<CategoryDBResponse> {
        let category = sqlx::query_as::<_, CategoryDBResponse>(
            "INSERT INTO categories (id, slug, name, created_at) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&request.slug)
        .bind(&request.name)
        .bind(Utc::now())
        .fetch_one(&mut *self.db)
        .await?;

        Ok(category)
    }

    #[instrument(skip(self), err)]
    pub async fn get_by_slug(&mut self, slug: &str) -> Result<Option<CategoryDBResponse>> {
        let category = sqlx::query_as::<_, CategoryDBResponse>("SELECT * FROM categories WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(category)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    pub async fn list(&mut self, filter: &CategoryFilter) -> Result<Vec<CategoryDBResponse>> {
        let categories = sqlx::query_as::<_, CategoryDBResponse>(
            r#"
            SELECT * FROM categories
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

        Ok(categories)
    }

    /// Delete by slug. Titles referencing the category keep existing with
    /// their category reference cleared (ON DELETE SET NULL).
    #[instrument(skip(self), err)]
    pub async fn delete_by_slug(&mut self, slug: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE slug = ?")
            .bind(slug)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
