use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::SqliteConnection;

use crate::{
    api::models::titles::{validate_year, ListTitlesQuery, TitleCreate, TitleResponse, TitleUpdate},
    api::models::users::CurrentUser,
    auth::permissions::require_admin,
    db::{
        handlers::{titles::TitleFilter, Categories, Genres, Repository, Titles},
        models::titles::{TitleCreateDBRequest, TitleUpdateDBRequest},
    },
    errors::{Error, Result},
    types::{CategoryId, GenreId, Operation, Resource, TitleId},
    AppState,
};

/// Resolve a category slug supplied in a write payload, rejecting unknown
/// slugs as a validation error rather than a dangling reference.
async fn resolve_category(conn: &mut SqliteConnection, slug: &str) -> Result<CategoryId> {
    let category = Categories::new(conn).get_by_slug(slug).await?.ok_or_else(|| Error::Validation {
        field: "category".to_string(),
        message: format!("Unknown category '{slug}'"),
    })?;
    Ok(category.id)
}

/// Resolve the genre slugs supplied in a write payload.
async fn resolve_genres(conn: &mut SqliteConnection, slugs: &[String]) -> Result<Vec<GenreId>> {
    let mut genre_ids = Vec::with_capacity(slugs.len());
    for slug in slugs {
        let genre = Genres::new(&mut *conn).get_by_slug(slug).await?.ok_or_else(|| Error::Validation {
            field: "genre".to_string(),
            message: format!("Unknown genre '{slug}'"),
        })?;
        genre_ids.push(genre.id);
    }
    Ok(genre_ids)
}

#[utoipa::path(
    get,
    path = "/v1/titles",
    tag = "titles",
    summary = "List titles",
    params(ListTitlesQuery),
    responses(
        (status = 200, description = "List of titles with their ratings", body = Vec<TitleResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_titles(State(state): State<AppState>, Query(query): Query<ListTitlesQuery>) -> Result<Json<Vec<TitleResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Titles::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let titles = repo
        .list(&TitleFilter {
            category: query.category,
            genre: query.genre,
            name: query.name,
            year: query.year,
            skip,
            limit,
        })
        .await?;

    Ok(Json(titles.into_iter().map(TitleResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/v1/titles",
    tag = "titles",
    summary = "Create title",
    request_body = TitleCreate,
    responses(
        (status = 201, description = "Title created", body = TitleResponse),
        (status = 400, description = "Invalid year or unknown category/genre slug"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_title(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(create): Json<TitleCreate>,
) -> Result<(StatusCode, Json<TitleResponse>)> {
    require_admin(&current_user, Operation::CreateAll, Resource::Titles)?;
    validate_year(create.year)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let category_id = match &create.category {
        Some(slug) => Some(resolve_category(&mut conn, slug).await?),
        None => None,
    };
    let genre_ids = resolve_genres(&mut conn, &create.genre).await?;

    let mut repo = Titles::new(&mut conn);
    let title = repo
        .create(&TitleCreateDBRequest {
            name: create.name,
            year: create.year,
            description: create.description,
            category_id,
            genre_ids,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TitleResponse::from(title))))
}

#[utoipa::path(
    get,
    path = "/v1/titles/{title_id}",
    tag = "titles",
    summary = "Get title",
    params(("title_id" = uuid::Uuid, Path, description = "Title ID")),
    responses(
        (status = 200, description = "Title details", body = TitleResponse),
        (status = 404, description = "Title not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_title(State(state): State<AppState>, Path(title_id): Path<TitleId>) -> Result<Json<TitleResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Titles::new(&mut conn);

    match repo.get_by_id(title_id).await? {
        Some(title) => Ok(Json(TitleResponse::from(title))),
        None => Err(Error::NotFound {
            resource: "Title".to_string(),
            id: title_id.to_string(),
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/v1/titles/{title_id}",
    tag = "titles",
    summary = "Update title",
    request_body = TitleUpdate,
    params(("title_id" = uuid::Uuid, Path, description = "Title ID")),
    responses(
        (status = 200, description = "Title updated", body = TitleResponse),
        (status = 400, description = "Invalid year or unknown category/genre slug"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Title not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_title(
    State(state): State<AppState>,
    Path(title_id): Path<TitleId>,
    current_user: CurrentUser,
    Json(update): Json<TitleUpdate>,
) -> Result<Json<TitleResponse>> {
    require_admin(&current_user, Operation::UpdateAll, Resource::Titles)?;

    if let Some(year) = update.year {
        validate_year(year)?;
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let category_id = match &update.category {
        Some(slug) => Some(resolve_category(&mut conn, slug).await?),
        None => None,
    };
    let genre_ids = match &update.genre {
        Some(slugs) => Some(resolve_genres(&mut conn, slugs).await?),
        None => None,
    };

    let mut repo = Titles::new(&mut conn);
    let title = repo
        .update(
            title_id,
            &TitleUpdateDBRequest {
                name: update.name,
                year: update.year,
                description: update.description,
                category_id,
                genre_ids,
            },
        )
        .await
        .map_err(|e| match e {
            crate::db::errors::DbError::NotFound => Error::NotFound {
                resource: "Title".to_string(),
                id: title_id.to_string(),
            },
            other => Error::Database(other),
        })?;

    Ok(Json(TitleResponse::from(title)))
}

#[utoipa::path(
    delete,
    path = "/v1/titles/{title_id}",
    tag = "titles",
    summary = "Delete title",
    params(("title_id" = uuid::Uuid, Path, description = "Title ID")),
    responses(
        (status = 204, description = "Title deleted; its reviews and their comments go with it"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Title not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_title(State(state): State<AppState>, Path(title_id): Path<TitleId>, current_user: CurrentUser) -> Result<StatusCode> {
    require_admin(&current_user, Operation::DeleteAll, Resource::Titles)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Titles::new(&mut conn);

    if repo.delete(title_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Title".to_string(),
            id: title_id.to_string(),
        })
    }
}
