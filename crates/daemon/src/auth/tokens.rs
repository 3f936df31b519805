//! Bearer-token issuance and verification.
//!
//! Tokens carry only the opaque user id; the username behind it is looked up
//! fresh on every request, so a token outlives neither its account nor the
//! one-hour expiry.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TOKEN_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
    #[error("token encoding failed: {0}")]
    Encode(jsonwebtoken::errors::Error),
}

/// HS256 signer/verifier around the service secret.
#[derive(Clone)]
pub struct TokenAuthority {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenAuthority {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id,
            exp: Utc::now().timestamp() + TOKEN_TTL_SECS,
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Encode)
    }

    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid,
                }
            })?;
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_verify_roundtrip() {
        let authority = TokenAuthority::new(b"test-secret");
        let id = Uuid::new_v4();

        let token = authority.issue(id).unwrap();
        assert_eq!(authority.verify(&token).unwrap(), id);
    }

    #[test]
    fn tampered_token_is_invalid() {
        let authority = TokenAuthority::new(b"test-secret");
        let mut token = authority.issue(Uuid::new_v4()).unwrap();
        token.push('x');

        assert!(matches!(authority.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let issuer = TokenAuthority::new(b"secret-a");
        let verifier = TokenAuthority::new(b"secret-b");

        let token = issuer.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(verifier.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let authority = TokenAuthority::new(b"test-secret");
        // far enough in the past to clear the default validation leeway
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: Utc::now().timestamp() - 600,
        };
        let token = encode(&Header::default(), &claims, &authority.encoding).unwrap();

        assert!(matches!(authority.verify(&token), Err(TokenError::Expired)));
    }
}
