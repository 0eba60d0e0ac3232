use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::users::{validate_email, validate_username, CurrentUser, ListUsersQuery, UserCreate, UserResponse, UserUpdate},
    auth::permissions::require_admin,
    db::{
        handlers::{users::UserFilter, Repository, Users},
        models::users::{UserCreateDBRequest, UserUpdateDBRequest},
    },
    errors::{Error, Result},
    types::{Operation, Resource},
    AppState,
};

#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "users",
    summary = "List users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
    current_user: CurrentUser,
) -> Result<Json<Vec<UserResponse>>> {
    require_admin(&current_user, Operation::ReadAll, Resource::Users)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let (skip, limit) = query.pagination.params();
    let users = repo.list(&UserFilter::new(query.search, skip, limit)).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/v1/users",
    tag = "users",
    summary = "Create user",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Username or email already taken"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(create): Json<UserCreate>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    require_admin(&current_user, Operation::CreateAll, Resource::Users)?;
    validate_username(&create.username)?;
    validate_email(&create.email)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let user = repo.create(&UserCreateDBRequest::from(create)).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/v1/users/{username}",
    tag = "users",
    summary = "Get user",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    current_user: CurrentUser,
) -> Result<Json<UserResponse>> {
    require_admin(&current_user, Operation::ReadAll, Resource::Users)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    match repo.get_by_username(&username).await? {
        Some(user) => Ok(Json(UserResponse::from(user))),
        None => Err(Error::NotFound {
            resource: "User".to_string(),
            id: username,
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/v1/users/{username}",
    tag = "users",
    summary = "Update user",
    request_body = UserUpdate,
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    current_user: CurrentUser,
    Json(update): Json<UserUpdate>,
) -> Result<Json<UserResponse>> {
    require_admin(&current_user, Operation::UpdateAll, Resource::Users)?;

    if let Some(new_username) = &update.username {
        validate_username(new_username)?;
    }
    if let Some(new_email) = &update.email {
        validate_email(new_email)?;
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let user = repo.get_by_username(&username).await?.ok_or_else(|| Error::NotFound {
        resource: "User".to_string(),
        id: username.clone(),
    })?;

    let updated = repo.update(user.id, &UserUpdateDBRequest::from(update)).await?;
    Ok(Json(UserResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/v1/users/{username}",
    tag = "users",
    summary = "Delete user",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "User not found"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    current_user: CurrentUser,
) -> Result<StatusCode> {
    require_admin(&current_user, Operation::DeleteAll, Resource::Users)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let user = repo.get_by_username(&username).await?.ok_or_else(|| Error::NotFound {
        resource: "User".to_string(),
        id: username.clone(),
    })?;

    repo.delete(user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "users",
    summary = "Get own profile",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = UserResponse),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_me(State(state): State<AppState>, current_user: CurrentUser) -> Result<Json<UserResponse>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let user = repo.get_by_id(current_user.id).await?.ok_or(Error::Unauthenticated {
        message: Some("Unknown user".to_string()),
    })?;

    Ok(Json(UserResponse::from(user)))
}

#[utoipa::path(
    patch,
    path = "/v1/users/me",
    tag = "users",
    summary = "Update own profile",
    request_body = UserUpdate,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
    ),
    security(("BearerAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_me(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(mut update): Json<UserUpdate>,
) -> Result<Json<UserResponse>> {
    // Non-admin actors cannot change their own role; the field is dropped
    // from the payload rather than rejected, mirroring a read-only field
    if !current_user.is_admin() {
        update.role = None;
    }

    if let Some(new_username) = &update.username {
        validate_username(new_username)?;
    }
    if let Some(new_email) = &update.email {
        validate_email(new_email)?;
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Users::new(&mut conn);

    let updated = repo.update(current_user.id, &UserUpdateDBRequest::from(update)).await?;
    Ok(Json(UserResponse::from(updated)))
}
