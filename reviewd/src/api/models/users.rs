//! API request/response models for users, plus the username/email validation
//! shared by the signup and admin-create paths.

use super::pagination::Pagination;
use crate::db::models::users::UserDBResponse;
use crate::errors::Error;
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// The username segment reserved for the self-service profile route.
const RESERVED_USERNAME: &str = "me";

const MAX_USERNAME_LEN: usize = 150;
const MAX_EMAIL_LEN: usize = 254;

// Role enum driving all authorization decisions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
    Moderator,
}

// User request models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Option<Role>,
}

// User response models
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub role: Role,
}

impl From<UserDBResponse> for UserResponse {
    fn from(db: UserDBResponse) -> Self {
        Self {
            username: db.username,
            email: db.email,
            first_name: db.first_name,
            last_name: db.last_name,
            bio: db.bio,
            role: db.role,
        }
    }
}

/// Query parameters for listing users
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListUsersQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Filter users by username (case-insensitive substring match)
    pub search: Option<String>,
}

/// The authenticated actor, as seen by handlers and the policy layer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentUser {
    #[schema(value_type = String, format = "uuid")]
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_superuser: bool,
}

impl CurrentUser {
    /// Admin role or the bootstrap superuser flag
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin || self.is_superuser
    }

    /// Admin or moderator - the roles allowed to edit other authors' content
    pub fn is_privileged(&self) -> bool {
        self.is_admin() || self.role == Role::Moderator
    }
}

impl From<UserDBResponse> for CurrentUser {
    fn from(db: UserDBResponse) -> Self {
        Self {
            id: db.id,
            username: db.username,
            email: db.email,
            role: db.role,
            is_superuser: db.is_superuser,
        }
    }
}

/// Validate a username against the charset and reserved-name rules.
pub fn validate_username(username: &str) -> Result<(), Error> {
    if username.is_empty() {
        return Err(Error::Validation {
            field: "username".to_string(),
            message: "Username must not be empty".to_string(),
        });
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(Error::Validation {
            field: "username".to_string(),
            message: format!("Username must be at most {MAX_USERNAME_LEN} characters"),
        });
    }
    if username == RESERVED_USERNAME {
        return Err(Error::Validation {
            field: "username".to_string(),
            message: format!("Username '{RESERVED_USERNAME}' is reserved"),
        });
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '@' | '+' | '-')) {
        return Err(Error::Validation {
            field: "username".to_string(),
            message: "Username may only contain letters, digits and . _ @ + -".to_string(),
        });
    }
    Ok(())
}

/// Validate the shape of an email address. Deliverability is the email
/// collaborator's problem, not ours.
pub fn validate_email(email: &str) -> Result<(), Error> {
    if email.len() > MAX_EMAIL_LEN {
        return Err(Error::Validation {
            field: "email".to_string(),
            message: format!("Email must be at most {MAX_EMAIL_LEN} characters"),
        });
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        return Err(Error::Validation {
            field: "email".to_string(),
            message: "Invalid email address".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_username_rejected() {
        assert!(validate_username("me").is_err());
        assert!(validate_username("mee").is_ok());
    }

    #[test]
    fn test_username_charset() {
        assert!(validate_username("jane.doe+test@host-1_2").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("semi;colon").is_err());
        assert!(validate_username(&"x".repeat(151)).is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@missing-local.com").is_err());
        assert!(validate_email("missing-domain@").is_err());
        assert!(validate_email("bare@domain").is_err());
    }

    #[test]
    fn test_current_user_privileges() {
        let mut user = CurrentUser {
            id: uuid::Uuid::new_v4(),
            username: "u".to_string(),
            email: "u@example.com".to_string(),
            role: Role::User,
            is_superuser: false,
        };
        assert!(!user.is_admin());
        assert!(!user.is_privileged());

        user.role = Role::Moderator;
        assert!(!user.is_admin());
        assert!(user.is_privileged());

        user.role = Role::Admin;
        assert!(user.is_admin());

        user.role = Role::User;
        user.is_superuser = true;
        assert!(user.is_admin());
        assert!(user.is_privileged());
    }
}
