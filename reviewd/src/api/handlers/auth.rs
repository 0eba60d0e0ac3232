use axum::{extract::State, http::StatusCode, Json};

use crate::{
    api::models::{
        auth::{SignupRequest, SignupResponse, TokenRequest, TokenResponse},
        users::{validate_email, validate_username, Role},
    },
    auth::token,
    crypto,
    db::{
        handlers::{Repository, Users},
        models::users::UserCreateDBRequest,
    },
    email::EmailService,
    errors::Error,
    AppState,
};

/// Request a confirmation code for the given identity
#[utoipa::path(
    post,
    path = "/v1/auth/signup",
    request_body = SignupRequest,
    tag = "auth",
    responses(
        (status = 200, description = "Confirmation code issued and emailed", body = SignupResponse),
        (status = 400, description = "Invalid or already-taken identity fields"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn signup(State(state): State<AppState>, Json(request): Json<SignupRequest>) -> Result<Json<SignupResponse>, Error> {
    validate_username(&request.username)?;
    validate_email(&request.email)?;

    let confirmation_code = crypto::generate_confirmation_code();

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut tx);

    let by_username = user_repo.get_by_username(&request.username).await?;
    let by_email = user_repo.get_by_email(&request.email).await?;

    match (by_username, by_email) {
        // Same account signing up again: regenerate the code and re-send it
        (Some(user), Some(other)) if user.id == other.id => {
            user_repo.set_confirmation_code(user.id, &confirmation_code).await?;
        }
        (Some(_), _) => {
            return Err(Error::Validation {
                field: "username".to_string(),
                message: "This username is already taken".to_string(),
            });
        }
        (_, Some(_)) => {
            return Err(Error::Validation {
                field: "email".to_string(),
                message: "An account with this email address already exists".to_string(),
            });
        }
        (None, None) => {
            user_repo
                .create(&UserCreateDBRequest {
                    username: request.username.clone(),
                    email: request.email.clone(),
                    first_name: None,
                    last_name: None,
                    bio: None,
                    role: Role::User,
                    is_superuser: false,
                    confirmation_code: Some(confirmation_code.clone()),
                })
                .await?;
        }
    }

    // Hand the code to the email collaborator before making it live
    let email_service = EmailService::new(&state.config)?;
    email_service
        .send_confirmation_code(&request.email, &request.username, &confirmation_code)
        .await?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(SignupResponse {
        email: request.email,
        username: request.username,
    }))
}

/// Exchange a confirmation code for a bearer token
#[utoipa::path(
    post,
    path = "/v1/auth/token",
    request_body = TokenRequest,
    tag = "auth",
    responses(
        (status = 201, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid confirmation code"),
        (status = 404, description = "Unknown username"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn obtain_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut conn);

    let user = user_repo
        .get_by_username(&request.username)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "User".to_string(),
            id: request.username.clone(),
        })?;

    // Case-sensitive exact match; a user with no issued code can never pass
    if user.confirmation_code.as_deref() != Some(request.confirmation_code.as_str()) {
        return Err(Error::Validation {
            field: "confirmation_code".to_string(),
            message: "Invalid confirmation code".to_string(),
        });
    }

    let token = token::create_access_token(user.id, &user.username, &state.config)?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}
