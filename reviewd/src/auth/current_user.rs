use crate::{
    api::models::users::CurrentUser,
    auth::token,
    db::{errors::DbError, handlers::{Repository, Users}},
    errors::{Error, Result},
    AppState,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use sqlx::SqlitePool;
use tracing::{debug, instrument, trace};

/// Extract a verified bearer token from the Authorization header if present
/// Returns:
/// - None: No Authorization header or not a Bearer token
/// - Some(Ok(claims)): Valid token found and verified
/// - Some(Err(error)): Bearer token present but invalid/expired
fn try_bearer_auth(parts: &Parts, config: &crate::config::Config) -> Option<Result<token::AccessClaims>> {
    let auth_header = parts.headers.get(axum::http::header::AUTHORIZATION)?;

    let auth_str = match auth_header.to_str() {
        Ok(s) => s,
        Err(e) => {
            return Some(Err(Error::BadRequest {
                message: format!("Invalid authorization header: {e}"),
            }))
        }
    };

    // Check for Bearer token format
    let raw_token = auth_str.strip_prefix("Bearer ")?;

    Some(token::verify_access_token(raw_token, config))
}

/// Load the user named by verified claims, so role changes take effect
/// immediately rather than at token expiry.
#[instrument(skip_all, fields(user_id = %claims.sub))]
async fn load_claimed_user(claims: &token::AccessClaims, db: &SqlitePool) -> Result<CurrentUser> {
    let mut conn = db.acquire().await.map_err(|e| Error::Database(DbError::from(e)))?;
    let mut user_repo = Users::new(&mut conn);

    let user = user_repo.get_by_id(claims.sub).await?.ok_or(Error::Unauthenticated {
        // The account may have been deleted since the token was issued
        message: Some("Unknown user".to_string()),
    })?;

    Ok(CurrentUser::from(user))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        match try_bearer_auth(parts, &state.config) {
            Some(Ok(claims)) => {
                let user = load_claimed_user(&claims, &state.db).await?;
                debug!("Authenticated user: {}", user.username);
                Ok(user)
            }
            Some(Err(e)) => {
                trace!("Bearer authentication failed: {:?}", e);
                Err(e)
            }
            None => {
                trace!("No authentication credentials found in request");
                Err(Error::Unauthenticated { message: None })
            }
        }
    }
}
