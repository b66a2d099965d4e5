use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::warn;

use crate::{
    application::{error::ApplicationError, services::CallerAuthenticator},
    domain::models::caller::Caller,
};

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
}

/// Verifies HS256 bearer tokens signed with a shared secret.
pub struct JwtCallerAuthenticator {
    key: DecodingKey,
    validation: Validation,
}

impl JwtCallerAuthenticator {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl CallerAuthenticator for JwtCallerAuthenticator {
    fn authenticate(&self, bearer_token: &str) -> Result<Caller, ApplicationError> {
        let data = decode::<Claims>(bearer_token, &self.key, &self.validation).map_err(|e| {
            warn!("Rejected bearer token: {}", e);
            ApplicationError::Unauthorized
        })?;

        if data.claims.sub.trim().is_empty() {
            warn!("Bearer token has an empty subject");
            return Err(ApplicationError::Unauthorized);
        }

        Ok(Caller::new(data.claims.sub))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;
    use std::time::{SystemTime, UNIX_EPOCH};

    pub(crate) const TEST_SECRET: &str = "test-secret";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        sub: &'a str,
        exp: u64,
        iat: u64,
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    pub(crate) fn token_with(secret: &str, sub: &str, exp: u64) -> String {
        let claims = TestClaims {
            sub,
            exp,
            iat: now(),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    pub(crate) fn token_for(sub: &str) -> String {
        token_with(TEST_SECRET, sub, now() + 3600)
    }

    #[test]
    fn accepts_valid_token_and_returns_subject() {
        let auth = JwtCallerAuthenticator::new(TEST_SECRET);
        let caller = auth.authenticate(&token_for("admin")).unwrap();
        assert_eq!(caller, Caller::new("admin"));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let auth = JwtCallerAuthenticator::new(TEST_SECRET);
        let token = token_with("another-secret", "admin", now() + 3600);
        assert!(matches!(
            auth.authenticate(&token),
            Err(ApplicationError::Unauthorized)
        ));
    }

    #[test]
    fn rejects_expired_token() {
        let auth = JwtCallerAuthenticator::new(TEST_SECRET);
        let token = token_with(TEST_SECRET, "admin", now() - 3600);
        assert!(matches!(
            auth.authenticate(&token),
            Err(ApplicationError::Unauthorized)
        ));
    }

    #[test]
    fn rejects_garbage() {
        let auth = JwtCallerAuthenticator::new(TEST_SECRET);
        assert!(auth.authenticate("not-a-jwt").is_err());
    }
}
