//! API models for the signup and token-exchange flow.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Signup payload: identity only, no password anywhere in this flow.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
}

/// Signup echoes the identity fields back on success.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    pub email: String,
    pub username: String,
}

/// Token exchange payload: the emailed confirmation code for this username.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub username: String,
    pub confirmation_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed bearer token for the `Authorization` header
    pub token: String,
}
