// JWT token issuance and verification service

use crate::auth::error::AuthError;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// Claims embedded in every issued token.
/// Minimal PII only: no email and no credential material ever goes in here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub name: String,
    pub avatar: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token service holding the process-wide signing secret.
/// Built once at startup from configuration and shared read-only.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    /// Sign a token for the given identity. The validity window is fixed
    /// here at issuance and is never refreshed by later use.
    pub fn issue(&self, id: i32, name: &str, avatar: &str) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            id,
            name: name.to_string(),
            avatar: avatar.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Verify a token and return its claims.
    /// Malformed, tampered, and expired tokens are all rejected before any
    /// claim data is exposed to the caller.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        // The expiry boundary is exact: valid strictly before iat + ttl
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
                _ => AuthError::Malformed,
            })
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes", 3600)
    }

    fn encode_with(secret: &str, claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issued_token_carries_identity_and_ttl() {
        let service = test_service();
        let token = service
            .issue(42, "John Doe", "https://www.gravatar.com/avatar/abc")
            .unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.id, 42);
        assert_eq!(claims.name, "John Doe");
        assert_eq!(claims.avatar, "https://www.gravatar.com/avatar/abc");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn claims_never_contain_email_or_password() {
        let service = test_service();
        let token = service.issue(1, "Jane", "avatar-url").unwrap();
        // Decode the payload segment without verifying to inspect raw keys
        let claims = service.verify(&token).unwrap();
        let payload = serde_json::to_value(&claims).unwrap();
        let keys: Vec<&str> = payload.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 5);
        for key in ["id", "name", "avatar", "iat", "exp"] {
            assert!(keys.contains(&key));
        }
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = test_service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            id: 1,
            name: "Old".to_string(),
            avatar: "a".to_string(),
            iat: now - 4000,
            exp: now - 400,
        };
        let token = encode_with("test_secret_key_for_testing_purposes", &claims);

        let result = service.verify(&token);
        assert!(matches!(result.unwrap_err(), AuthError::Expired));
    }

    #[test]
    fn unexpired_token_is_accepted() {
        let service = test_service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            id: 1,
            name: "Fresh".to_string(),
            avatar: "a".to_string(),
            iat: now - 3500,
            exp: now + 100,
        };
        let token = encode_with("test_secret_key_for_testing_purposes", &claims);
        assert!(service.verify(&token).is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected_as_invalid_signature() {
        let issuer = TokenService::new("secret-one", 3600);
        let verifier = TokenService::new("secret-two", 3600);

        let token = issuer.issue(1, "Mallory", "a").unwrap();
        assert!(issuer.verify(&token).is_ok());

        let result = verifier.verify(&token);
        assert!(matches!(result.unwrap_err(), AuthError::SignatureInvalid));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let service = test_service();
        let token = service.issue(1, "Alice", "a").unwrap();

        // Flip one character in the signature segment
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let sig = parts[2].clone();
        let flipped = if sig.ends_with('A') { 'B' } else { 'A' };
        let mut tampered_sig: Vec<char> = sig.chars().collect();
        let last = tampered_sig.len() - 1;
        tampered_sig[last] = flipped;
        parts[2] = tampered_sig.into_iter().collect();
        let tampered = parts.join(".");

        let result = service.verify(&tampered);
        assert!(matches!(
            result.unwrap_err(),
            AuthError::SignatureInvalid | AuthError::Malformed
        ));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let service = test_service();
        for junk in ["", "not.a.token", "garbage", "a.b"] {
            assert!(service.verify(junk).is_err());
        }
    }

    proptest! {
        #[test]
        fn prop_roundtrip_preserves_identity(
            id in 1i32..1_000_000,
            name in "[A-Za-z ]{2,30}"
        ) {
            let service = test_service();
            let token = service.issue(id, &name, "avatar").unwrap();
            let claims = service.verify(&token).unwrap();
            prop_assert_eq!(claims.id, id);
            prop_assert_eq!(claims.name, name);
            prop_assert_eq!(claims.exp - claims.iat, 3600);
        }

        #[test]
        fn prop_random_strings_rejected(junk in "[a-zA-Z0-9]{10,60}") {
            let service = test_service();
            prop_assert!(service.verify(&junk).is_err());
        }
    }
}
