use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::categories::{validate_slug, ListSlugQuery},
    api::models::genres::{GenreCreate, GenreResponse},
    api::models::users::CurrentUser,
    auth::permissions::require_admin,
    db::{
        handlers::{genres::GenreFilter, Genres},
        models::genres::GenreCreateDBRequest,
    },
    errors::{Error, Result},
    types::{Operation, Resource},
    AppState,
};

#[utoipa::path(
    get,
    path = "/v1/genres",
    tag = "genres",
    summary = "List genres",
    params(ListSlugQuery),
    responses(
        (status = 200, description = "List of genres", body = Vec<GenreResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_genres(State(state): State<AppState>, Query(query): Query<ListSlugQuery>) -> Result<Json<Vec<GenreResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Genres::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let genres = repo.list(&GenreFilter::new(query.search, skip, limit)).await?;

    Ok(Json(genres.into_iter().map(GenreResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/v1/genres",
    tag = "genres",
    summary = "Create genre",
    request_body = GenreCreate,
    responses(
        (status = 201, description = "Genre created", body = GenreResponse),
        (status = 400, description = "Invalid slug"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Slug already exists"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_genre(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(create): Json<GenreCreate>,
) -> Result<(StatusCode, Json<GenreResponse>)> {
    require_admin(&current_user, Operation::CreateAll, Resource::Genres)?;
    validate_slug(&create.slug)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Genres::new(&mut conn);

    let genre = repo.create(&GenreCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(GenreResponse::from(genre))))
}

#[utoipa::path(
    delete,
    path = "/v1/genres/{slug}",
    tag = "genres",
    summary = "Delete genre",
    params(("slug" = String, Path, description = "Genre slug")),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Genre not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_genre(State(state): State<AppState>, Path(slug): Path<String>, current_user: CurrentUser) -> Result<StatusCode> {
    require_admin(&current_user, Operation::DeleteAll, Resource::Genres)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Genres::new(&mut conn);

    if repo.delete_by_slug(&slug).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Genre".to_string(),
            id: slug,
        })
    }
}
