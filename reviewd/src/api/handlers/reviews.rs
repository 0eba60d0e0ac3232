use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::SqliteConnection;

use crate::{
    api::models::pagination::Pagination,
    api::models::reviews::{validate_score, ReviewCreate, ReviewResponse, ReviewUpdate},
    api::models::users::CurrentUser,
    auth::permissions::require_author_or_privileged,
    db::{
        handlers::{reviews::ReviewFilter, Repository, Reviews, Titles},
        models::reviews::{ReviewCreateDBRequest, ReviewDBResponse, ReviewUpdateDBRequest},
    },
    errors::{Error, Result},
    types::{Operation, Resource, ReviewId, TitleId},
    AppState,
};

/// 404 unless the parent title exists.
async fn ensure_title_exists(conn: &mut SqliteConnection, title_id: TitleId) -> Result<()> {
    if Titles::new(conn).get_by_id(title_id).await?.is_none() {
        return Err(Error::NotFound {
            resource: "Title".to_string(),
            id: title_id.to_string(),
        });
    }
    Ok(())
}

/// Fetch a review scoped to its parent title; a review reached through the
/// wrong title is a 404, not a leak.
async fn get_scoped_review(conn: &mut SqliteConnection, title_id: TitleId, review_id: ReviewId) -> Result<ReviewDBResponse> {
    let review = Reviews::new(conn).get_by_id(review_id).await?;
    match review {
        Some(review) if review.title_id == title_id => Ok(review),
        _ => Err(Error::NotFound {
            resource: "Review".to_string(),
            id: review_id.to_string(),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/v1/titles/{title_id}/reviews",
    tag = "reviews",
    summary = "List reviews for a title",
    params(
        ("title_id" = uuid::Uuid, Path, description = "Title ID"),
        Pagination,
    ),
    responses(
        (status = 200, description = "Reviews, newest first", body = Vec<ReviewResponse>),
        (status = 404, description = "Title not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(title_id): Path<TitleId>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<ReviewResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    ensure_title_exists(&mut conn, title_id).await?;

    let (skip, limit) = pagination.params();
    let reviews = Reviews::new(&mut conn)
        .list(&ReviewFilter { title_id, skip, limit })
        .await?;

    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/v1/titles/{title_id}/reviews",
    tag = "reviews",
    summary = "Post a review",
    request_body = ReviewCreate,
    params(("title_id" = uuid::Uuid, Path, description = "Title ID")),
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Score out of range, or the actor already reviewed this title"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Title not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_review(
    State(state): State<AppState>,
    Path(title_id): Path<TitleId>,
    current_user: CurrentUser,
    Json(create): Json<ReviewCreate>,
) -> Result<(StatusCode, Json<ReviewResponse>)> {
    validate_score(create.score)?;

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    ensure_title_exists(&mut tx, title_id).await?;

    let mut repo = Reviews::new(&mut tx);

    // User-facing duplicate check; the composite constraint stays the
    // authoritative arbiter if a concurrent insert slips past it
    if repo.exists_for(title_id, current_user.id).await? {
        return Err(Error::Validation {
            field: "title".to_string(),
            message: "Only one review per title is allowed".to_string(),
        });
    }

    // The author is the requesting actor, never client-supplied
    let review = repo
        .create(&ReviewCreateDBRequest {
            title_id,
            author_id: current_user.id,
            text: create.text,
            score: create.score,
        })
        .await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}

#[utoipa::path(
    get,
    path = "/v1/titles/{title_id}/reviews/{review_id}",
    tag = "reviews",
    summary = "Get review",
    params(
        ("title_id" = uuid::Uuid, Path, description = "Title ID"),
        ("review_id" = uuid::Uuid, Path, description = "Review ID"),
    ),
    responses(
        (status = 200, description = "Review details", body = ReviewResponse),
        (status = 404, description = "Title or review not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_review(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(TitleId, ReviewId)>,
) -> Result<Json<ReviewResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let review = get_scoped_review(&mut conn, title_id, review_id).await?;

    Ok(Json(ReviewResponse::from(review)))
}

#[utoipa::path(
    patch,
    path = "/v1/titles/{title_id}/reviews/{review_id}",
    tag = "reviews",
    summary = "Update review",
    request_body = ReviewUpdate,
    params(
        ("title_id" = uuid::Uuid, Path, description = "Title ID"),
        ("review_id" = uuid::Uuid, Path, description = "Review ID"),
    ),
    responses(
        (status = 200, description = "Review updated", body = ReviewResponse),
        (status = 400, description = "Score out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author or a privileged role"),
        (status = 404, description = "Title or review not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_review(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(TitleId, ReviewId)>,
    current_user: CurrentUser,
    Json(update): Json<ReviewUpdate>,
) -> Result<Json<ReviewResponse>> {
    if let Some(score) = update.score {
        validate_score(score)?;
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let review = get_scoped_review(&mut conn, title_id, review_id).await?;

    require_author_or_privileged(&current_user, review.author_id, Operation::UpdateOwn, Resource::Reviews)?;

    let updated = Reviews::new(&mut conn)
        .update(
            review_id,
            &ReviewUpdateDBRequest {
                text: update.text,
                score: update.score,
            },
        )
        .await?;

    Ok(Json(ReviewResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/v1/titles/{title_id}/reviews/{review_id}",
    tag = "reviews",
    summary = "Delete review",
    params(
        ("title_id" = uuid::Uuid, Path, description = "Title ID"),
        ("review_id" = uuid::Uuid, Path, description = "Review ID"),
    ),
    responses(
        (status = 204, description = "Review deleted; its comments go with it"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author or a privileged role"),
        (status = 404, description = "Title or review not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_review(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(TitleId, ReviewId)>,
    current_user: CurrentUser,
) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let review = get_scoped_review(&mut conn, title_id, review_id).await?;

    require_author_or_privileged(&current_user, review.author_id, Operation::DeleteOwn, Resource::Reviews)?;

    Reviews::new(&mut conn).delete(review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
