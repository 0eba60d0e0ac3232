use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::SqliteConnection;

use crate::{
    api::models::comments::{CommentCreate, CommentResponse, CommentUpdate},
    api::models::pagination::Pagination,
    api::models::users::CurrentUser,
    auth::permissions::require_author_or_privileged,
    db::{
        handlers::{comments::CommentFilter, Comments, Repository, Reviews},
        models::comments::{CommentCreateDBRequest, CommentDBResponse, CommentUpdateDBRequest},
    },
    errors::{Error, Result},
    types::{CommentId, Operation, Resource, ReviewId, TitleId},
    AppState,
};

/// 404 unless the review exists under the given title.
async fn ensure_scoped_review(conn: &mut SqliteConnection, title_id: TitleId, review_id: ReviewId) -> Result<()> {
    let review = Reviews::new(conn).get_by_id(review_id).await?;
    match review {
        Some(review) if review.title_id == title_id => Ok(()),
        _ => Err(Error::NotFound {
            resource: "Review".to_string(),
            id: review_id.to_string(),
        }),
    }
}

/// Fetch a comment scoped to its parent review.
async fn get_scoped_comment(conn: &mut SqliteConnection, review_id: ReviewId, comment_id: CommentId) -> Result<CommentDBResponse> {
    let comment = Comments::new(conn).get_by_id(comment_id).await?;
    match comment {
        Some(comment) if comment.review_id == review_id => Ok(comment),
        _ => Err(Error::NotFound {
            resource: "Comment".to_string(),
            id: comment_id.to_string(),
        }),
    }
}

#[utoipa::path(
    get,
    path = "/v1/titles/{title_id}/reviews/{review_id}/comments",
    tag = "comments",
    summary = "List comments for a review",
    params(
        ("title_id" = uuid::Uuid, Path, description = "Title ID"),
        ("review_id" = uuid::Uuid, Path, description = "Review ID"),
        Pagination,
    ),
    responses(
        (status = 200, description = "Comments, newest first", body = Vec<CommentResponse>),
        (status = 404, description = "Title or review not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(TitleId, ReviewId)>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<CommentResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    ensure_scoped_review(&mut conn, title_id, review_id).await?;

    let (skip, limit) = pagination.params();
    let comments = Comments::new(&mut conn)
        .list(&CommentFilter { review_id, skip, limit })
        .await?;

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/v1/titles/{title_id}/reviews/{review_id}/comments",
    tag = "comments",
    summary = "Post a comment",
    request_body = CommentCreate,
    params(
        ("title_id" = uuid::Uuid, Path, description = "Title ID"),
        ("review_id" = uuid::Uuid, Path, description = "Review ID"),
    ),
    responses(
        (status = 201, description = "Comment created", body = CommentResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Title or review not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_comment(
    State(state): State<AppState>,
    Path((title_id, review_id)): Path<(TitleId, ReviewId)>,
    current_user: CurrentUser,
    Json(create): Json<CommentCreate>,
) -> Result<(StatusCode, Json<CommentResponse>)> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    ensure_scoped_review(&mut conn, title_id, review_id).await?;

    // The author is the requesting actor, never client-supplied
    let comment = Comments::new(&mut conn)
        .create(&CommentCreateDBRequest {
            review_id,
            author_id: current_user.id,
            text: create.text,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

#[utoipa::path(
    get,
    path = "/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
    tag = "comments",
    summary = "Get comment",
    params(
        ("title_id" = uuid::Uuid, Path, description = "Title ID"),
        ("review_id" = uuid::Uuid, Path, description = "Review ID"),
        ("comment_id" = uuid::Uuid, Path, description = "Comment ID"),
    ),
    responses(
        (status = 200, description = "Comment details", body = CommentResponse),
        (status = 404, description = "Title, review or comment not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_comment(
    State(state): State<AppState>,
    Path((title_id, review_id, comment_id)): Path<(TitleId, ReviewId, CommentId)>,
) -> Result<Json<CommentResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    ensure_scoped_review(&mut conn, title_id, review_id).await?;
    let comment = get_scoped_comment(&mut conn, review_id, comment_id).await?;

    Ok(Json(CommentResponse::from(comment)))
}

#[utoipa::path(
    patch,
    path = "/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
    tag = "comments",
    summary = "Update comment",
    request_body = CommentUpdate,
    params(
        ("title_id" = uuid::Uuid, Path, description = "Title ID"),
        ("review_id" = uuid::Uuid, Path, description = "Review ID"),
        ("comment_id" = uuid::Uuid, Path, description = "Comment ID"),
    ),
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author or a privileged role"),
        (status = 404, description = "Title, review or comment not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_comment(
    State(state): State<AppState>,
    Path((title_id, review_id, comment_id)): Path<(TitleId, ReviewId, CommentId)>,
    current_user: CurrentUser,
    Json(update): Json<CommentUpdate>,
) -> Result<Json<CommentResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    ensure_scoped_review(&mut conn, title_id, review_id).await?;
    let comment = get_scoped_comment(&mut conn, review_id, comment_id).await?;

    require_author_or_privileged(&current_user, comment.author_id, Operation::UpdateOwn, Resource::Comments)?;

    let updated = Comments::new(&mut conn)
        .update(comment_id, &CommentUpdateDBRequest { text: update.text })
        .await?;

    Ok(Json(CommentResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/v1/titles/{title_id}/reviews/{review_id}/comments/{comment_id}",
    tag = "comments",
    summary = "Delete comment",
    params(
        ("title_id" = uuid::Uuid, Path, description = "Title ID"),
        ("review_id" = uuid::Uuid, Path, description = "Review ID"),
        ("comment_id" = uuid::Uuid, Path, description = "Comment ID"),
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author or a privileged role"),
        (status = 404, description = "Title, review or comment not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((title_id, review_id, comment_id)): Path<(TitleId, ReviewId, CommentId)>,
    current_user: CurrentUser,
) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    ensure_scoped_review(&mut conn, title_id, review_id).await?;
    let comment = get_scoped_comment(&mut conn, review_id, comment_id).await?;

    require_author_or_privileged(&current_user, comment.author_id, Operation::DeleteOwn, Resource::Comments)?;

    Comments::new(&mut conn).delete(comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
