//! Bearer token creation and verification.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{config::Config, errors::Error, types::UserId};

/// Claims carried by issued bearer tokens. Identity only - roles are read
/// from the database on every request.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: UserId,      // Subject (user ID)
    pub username: String, // Username at issue time
    pub exp: i64,         // Expiration time
    pub iat: i64,         // Issued at
}

impl AccessClaims {
    /// Create new claims for a user
    pub fn new(user_id: UserId, username: &str, config: &Config) -> Self {
        let now = Utc::now();
        let exp = now + config.auth.token_expiry;

        Self {
            sub: user_id,
            username: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

/// Create a signed bearer token for a user
pub fn create_access_token(user_id: UserId, username: &str, config: &Config) -> Result<String, Error> {
    let claims = AccessClaims::new(user_id, username, config);
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "bearer tokens: secret_key is required".to_string(),
    })?;

    let key = EncodingKey::from_secret(secret_key.as_bytes());
    encode(&Header::default(), &claims, &key).map_err(|e| Error::Internal {
        operation: format!("create bearer token: {e}"),
    })
}

/// Verify and decode a bearer token
pub fn verify_access_token(token: &str, config: &Config) -> Result<AccessClaims, Error> {
    let secret_key = config.secret_key.as_ref().ok_or_else(|| Error::Internal {
        operation: "bearer tokens: secret_key is required".to_string(),
    })?;

    let key = DecodingKey::from_secret(secret_key.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<AccessClaims>(token, &key, &validation).map_err(|e| match e.kind() {
        // Client errors (401) - malformed tokens, invalid claims, expired tokens
        jsonwebtoken::errors::ErrorKind::InvalidToken
        | jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::ExpiredSignature
        | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_)
        | jsonwebtoken::errors::ErrorKind::InvalidIssuer
        | jsonwebtoken::errors::ErrorKind::InvalidAudience
        | jsonwebtoken::errors::ErrorKind::InvalidSubject
        | jsonwebtoken::errors::ErrorKind::ImmatureSignature
        | jsonwebtoken::errors::ErrorKind::Base64(_)
        | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => Error::Unauthenticated { message: None },

        // Server errors (500) - key issues, internal failures
        _ => Error::Internal {
            operation: format!("bearer token verification: {e}"),
        },
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn create_test_config() -> Config {
        Config {
            secret_key: Some("test-secret-key-for-tokens".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = create_test_config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(user_id, "tester", &config).unwrap();
        assert!(!token.is_empty());

        let claims = verify_access_token(&token, &config).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "tester");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_verify_invalid_token() {
        let config = create_test_config();

        let result = verify_access_token("invalid.token.here", &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let mut config = create_test_config();
        let token = create_access_token(Uuid::new_v4(), "tester", &config).unwrap();

        config.secret_key = Some("different-secret".to_string());
        let result = verify_access_token(&token, &config);
        // Should be Unauthenticated (InvalidSignature), not Internal error
        assert!(matches!(result.unwrap_err(), Error::Unauthenticated { .. }));
    }

    #[test]
    fn test_verify_expired_token() {
        let config = create_test_config();
        let now = Utc::now();
        let claims = AccessClaims {
            sub: Uuid::new_v4(),
            username: "tester".to_string(),
            exp: (now - chrono::Duration::seconds(3600)).timestamp(),
            iat: now.timestamp(),
        };

        let key = EncodingKey::from_secret(config.secret_key.as_ref().unwrap().as_bytes());
        let token = encode(&Header::default(), &claims, &key).unwrap();

        let result = verify_access_token(&token, &config);
        assert!(matches!(result.unwrap_err(), Error::Unauthenticated { .. }));
    }

    #[test]
    fn test_missing_secret_is_internal_error() {
        let config = Config::default();
        let result = create_access_token(Uuid::new_v4(), "tester", &config);
        assert!(matches!(result.unwrap_err(), Error::Internal { .. }));
    }
}
