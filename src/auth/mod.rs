use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::config;

pub mod password;

/// JWT payload. The subject claim is read under two accepted names:
/// `userId` (current) and `sub` (legacy). `userId` is authoritative when
/// both are present. Tokens issued by this service carry `sub`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(subject: String, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            user_id: None,
            sub: Some(subject),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }

    pub fn subject(&self) -> Option<&str> {
        self.user_id.as_deref().or(self.sub.as_deref())
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Could not validate credentials")]
    Invalid,

    #[error("Token has no subject claim")]
    MissingSubject,

    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("Unsupported JWT algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Issue a signed token for `subject`, valid for `ttl` from now.
pub fn issue_token(subject: &str, ttl: Duration) -> Result<String, TokenError> {
    let security = &config::config().security;
    let claims = Claims::new(subject.to_string(), ttl);
    sign_claims(&claims, &security.jwt_secret, &security.jwt_algorithm)
}

/// Verify a token against the configured secret and algorithm and return its subject.
pub fn verify_token(token: &str) -> Result<String, TokenError> {
    let security = &config::config().security;
    decode_subject(token, &security.jwt_secret, &security.jwt_algorithm)
}

pub fn default_ttl() -> Duration {
    Duration::minutes(config::config().security.token_ttl_minutes)
}

fn algorithm(name: &str) -> Result<Algorithm, TokenError> {
    Algorithm::from_str(name).map_err(|_| TokenError::UnsupportedAlgorithm(name.to_string()))
}

pub fn sign_claims(claims: &Claims, secret: &str, algorithm_name: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let header = Header::new(algorithm(algorithm_name)?);

    encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes())).map_err(|e| {
        tracing::error!("JWT generation failed: {}", e);
        TokenError::Invalid
    })
}

pub fn decode_subject(token: &str, secret: &str, algorithm_name: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let mut validation = Validation::new(algorithm(algorithm_name)?);
    // A token is valid strictly while now < exp
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => {
                tracing::debug!("JWT rejected: {}", e);
                TokenError::Invalid
            }
        })?;

    token_data
        .claims
        .subject()
        .map(|s| s.to_string())
        .ok_or(TokenError::MissingSubject)
}
