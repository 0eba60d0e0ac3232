use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::categories::{validate_slug, CategoryCreate, CategoryResponse, ListSlugQuery},
    api::models::users::CurrentUser,
    auth::permissions::require_admin,
    db::{
        handlers::{categories::CategoryFilter, Categories},
        models::categories::CategoryCreateDBRequest,
    },
    errors::{Error, Result},
    types::{Operation, Resource},
    AppState,
};

#[utoipa::path(
    get,
    path = "/v1/categories",
    tag = "categories",
    summary = "List categories",
    params(ListSlugQuery),
    responses(
        (status = 200, description = "List of categories", body = Vec<CategoryResponse>),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListSlugQuery>,
) -> Result<Json<Vec<CategoryResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let categories = repo.list(&CategoryFilter::new(query.search, skip, limit)).await?;

    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/v1/categories",
    tag = "categories",
    summary = "Create category",
    request_body = CategoryCreate,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid slug"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Slug already exists"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(create): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryResponse>)> {
    require_admin(&current_user, Operation::CreateAll, Resource::Categories)?;
    validate_slug(&create.slug)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);

    let category = repo.create(&CategoryCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

#[utoipa::path(
    delete,
    path = "/v1/categories/{slug}",
    tag = "categories",
    summary = "Delete category",
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 204, description = "Category deleted; dependent titles keep existing without a category"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Category not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    current_user: CurrentUser,
) -> Result<StatusCode> {
    require_admin(&current_user, Operation::DeleteAll, Resource::Categories)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Categories::new(&mut conn);

    if repo.delete_by_slug(&slug).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            resource: "Category".to_string(),
            id: slug,
        })
    }
}
