//! JWT verification for the external auth provider
//!
//! The marketplace never issues tokens itself. It only verifies the
//! provider's signed bearer token and reads the subject claim that
//! maps to an internal user row.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::utils::errors::AppError;

/// Claims expected in the auth provider's token
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthClaims {
    /// External subject id, mapped to `users.clerk_user_id`
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: usize,
}

/// Verify and decode a bearer token
pub fn verify_token(token: &str, secret: &str) -> Result<AuthClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(secret.as_ref());

    let token_data = decode::<AuthClaims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn make_token(secret: &str, exp_offset_secs: i64) -> String {
        let claims = AuthClaims {
            sub: "user_2abc".to_string(),
            email: Some("buyer@example.com".to_string()),
            name: None,
            exp: (chrono::Utc::now().timestamp() + exp_offset_secs) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_round_trip() {
        let token = make_token("test-secret", 3600);
        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, "user_2abc");
        assert_eq!(claims.email.as_deref(), Some("buyer@example.com"));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = make_token("test-secret", 3600);
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let token = make_token("test-secret", -3600);
        assert!(verify_token(&token, "test-secret").is_err());
    }
}
