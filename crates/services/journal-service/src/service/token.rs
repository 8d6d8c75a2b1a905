//! Token issuance - signed, time-limited credentials bound to a user.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppResult, JwtConfig};
use domain::{UserType, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub user_type: UserType,
    pub iat: i64,
    pub exp: i64,
}

/// Token returned to a client after registration or login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: Uuid, user_type: UserType) -> AppResult<TokenResponse>;

    fn verify(&self, token: &str) -> AppResult<Claims>;
}

/// HS256 issuer over a secret supplied at construction.
pub struct JwtIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration_hours: i64,
}

impl JwtIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            expiration_hours: config.expiration_hours,
        }
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, user_id: Uuid, user_type: UserType) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            user_type,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiration_hours)).timestamp(),
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding)?;

        Ok(TokenResponse {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.expiration_hours * SECONDS_PER_HOUR,
        })
    }

    fn verify(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}
