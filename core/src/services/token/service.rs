//! JWT token service implementation.

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use sg_shared::config::JwtConfig;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

/// A freshly signed token together with its lifetime
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Issues and verifies HS256-signed access tokens.
///
/// Tokens carry `{sub, iat, exp, iss}` and nothing else; verification
/// never inspects an unverified payload. There is no server-side
/// revocation, so logout is a client-side discard.
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Sign a token for the given subject with the configured lifetime
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, DomainError> {
        self.issue_at(subject, Utc::now())
    }

    /// Sign a token as of an explicit issue instant. Split out from
    /// `issue` so expiry behavior can be pinned in tests.
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, DomainError> {
        let claims = Claims::new(subject, &self.config.issuer, now, self.config.ttl_minutes);

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| TokenError::TokenGenerationFailed)?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.config.ttl_minutes * 60,
        })
    }

    /// Verify a token's signature, issuer, and expiry; returns its claims
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired.into(),
                _ => TokenError::InvalidToken.into(),
            })
    }
}
