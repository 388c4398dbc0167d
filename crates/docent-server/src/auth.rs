//! Bearer-token authentication with JWT.
//!
//! Every data route is scoped to the user identity carried in the token.
//! Token issuance is the seam where an external identity provider plugs in;
//! the server only cares that the token it later receives verifies against
//! its secret and has not expired.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authentication error
#[derive(Debug, Error)]
pub enum AuthError {
    /// JWT encoding failed
    #[error("Failed to encode JWT: {0}")]
    JwtEncode(#[from] jsonwebtoken::errors::Error),

    /// Token expired
    #[error("Bearer token expired")]
    TokenExpired,

    /// Invalid token
    #[error("Invalid bearer token")]
    InvalidToken,
}

/// JWT claims for bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    /// User identifier
    pub user_id: String,

    /// Token expiration timestamp (Unix epoch)
    pub exp: u64,

    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
}

/// Issues and validates bearer tokens
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_secs: u64,
}

impl AuthManager {
    /// Create a new auth manager with the given JWT secret and expiry
    pub fn new(jwt_secret: &str, token_expiry_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_expiry_secs,
        }
    }

    /// Issue a new bearer token for the given user
    pub fn issue_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = AuthClaims {
            user_id: user_id.to_string(),
            exp: now + self.token_expiry_secs,
            iat: now,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a bearer token and extract its claims
    pub fn validate_token(&self, token: &str) -> Result<AuthClaims, AuthError> {
        let validation = Validation::default();
        let token_data = decode::<AuthClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_validate_token() {
        let manager = AuthManager::new("test-secret", 3600);
        let token = manager.issue_token("test-user").unwrap();

        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.user_id, "test-user");
    }

    #[test]
    fn test_expired_token() {
        use jsonwebtoken::{encode, Header};

        let manager = AuthManager::new("test-secret", 3600);

        // Create a token that's already expired
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = AuthClaims {
            user_id: "test-user".to_string(),
            exp: now - 100,
            iat: now - 200,
        };

        let token = encode(&Header::default(), &claims, &manager.encoding_key).unwrap();

        let result = manager.validate_token(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_invalid_token() {
        let manager = AuthManager::new("test-secret", 3600);
        let result = manager.validate_token("invalid-token");
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret() {
        let manager1 = AuthManager::new("secret1", 3600);
        let manager2 = AuthManager::new("secret2", 3600);

        let token = manager1.issue_token("test-user").unwrap();
        let result = manager2.validate_token(&token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
