use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// Claims carried by every bearer token. The email is the caller identity
/// everything else keys off.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    /// Capability check: a caller may only act on resources scoped to the
    /// email inside its own token.
    pub fn require_email(&self, email: &str) -> Result<(), AppError> {
        if self.email != email {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}

fn get_token_secret() -> String {
    std::env::var("ACCESS_TOKEN_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

/// Signs a one-hour token for the given identity. There is no refresh flow;
/// clients re-issue via POST /jwt.
pub fn issue(email: String, name: Option<String>) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        email,
        name,
        iat: now.timestamp() as usize,
        exp: (now + Duration::hours(1)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_token_secret().as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
}

/// Validates signature and expiry. Any failure collapses to `Unauthorized`;
/// callers never learn why a token was rejected.
pub fn verify(token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_token_secret().as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let token = issue("a@x.com".to_string(), Some("A".to_string())).unwrap();
        let claims = verify(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.name.as_deref(), Some("A"));
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        // Hand-craft a token whose expiry is well past the validation leeway.
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            email: "a@x.com".to_string(),
            name: None,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(get_token_secret().as_ref()),
        )
        .unwrap();

        match verify(&token) {
            Err(AppError::Unauthorized) => {}
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_tampered_token_is_unauthorized() {
        let token = issue("a@x.com".to_string(), None).unwrap();
        let tampered = format!("{}x", token);
        assert!(matches!(verify(&tampered), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_capability_check() {
        let claims = Claims {
            email: "a@x.com".to_string(),
            name: None,
            iat: 0,
            exp: 0,
        };
        assert!(claims.require_email("a@x.com").is_ok());
        assert!(matches!(
            claims.require_email("b@x.com"),
            Err(AppError::Forbidden)
        ));
    }
}
