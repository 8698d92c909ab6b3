//! JWT service for token issuance and validation
//!
//! Tokens are signed with HS256 using a shared secret and carry the user id
//! plus an expiry 24 hours after issuance.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret used for signing and verification
    pub secret: String,
    /// Token lifetime in seconds (default: 24 hours)
    pub expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: signing secret, required
    /// - `JWT_EXPIRATION_HOURS`: token lifetime in hours (default: 24)
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let expiry_hours: u64 = std::env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);

        Ok(JwtConfig {
            secret,
            expiry: expiry_hours * 3600,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            expiry: config.expiry,
        }
    }

    /// Issue a token for a user
    pub fn issue(&self, user_id: Uuid) -> ApiResult<String> {
        let now = unix_now()?;

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + self.expiry,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to sign token: {e}")))
    }

    /// Validate a token and return the claims
    pub fn validate(&self, token: &str) -> ApiResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;
        Ok(token_data.claims)
    }

    /// Token lifetime in seconds
    pub fn expiry(&self) -> u64 {
        self.expiry
    }
}

fn unix_now() -> ApiResult<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| ApiError::Internal(format!("Failed to get current time: {e}")))?
        .as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn service(secret: &str) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: secret.to_string(),
            expiry: 24 * 3600,
        })
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let jwt = service("test-secret");
        let user_id = Uuid::new_v4();

        let token = jwt.issue(user_id).unwrap();
        let claims = jwt.validate(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = service("secret-a").issue(Uuid::new_v4()).unwrap();
        assert!(service("secret-b").validate(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let jwt = service("test-secret");
        assert!(jwt.validate("not-a-token").is_err());
        assert!(jwt.validate("").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt = service("test-secret");
        let now = unix_now().unwrap();

        // Sign an already-expired claim set with the same key
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(jwt.validate(&token).is_err());
    }

    #[test]
    #[serial]
    fn test_jwt_config_from_env() {
        unsafe { std::env::remove_var("JWT_SECRET") };
        assert!(JwtConfig::from_env().is_err());

        unsafe {
            std::env::set_var("JWT_SECRET", "env-secret");
            std::env::remove_var("JWT_EXPIRATION_HOURS");
        }
        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.secret, "env-secret");
        assert_eq!(config.expiry, 24 * 3600);
        unsafe { std::env::remove_var("JWT_SECRET") };
    }
}
