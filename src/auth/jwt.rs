use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::{config::JwtConfig, state::AppState};

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

/// JWT payload: whatever the client submitted at issue time (expected to
/// include an email), plus the registered timestamp claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iat: usize,
    pub exp: usize,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl Claims {
    pub fn email(&self) -> Option<&str> {
        self.data.get("email").and_then(Value::as_str)
    }
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig { secret, ttl_days } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs((ttl_days as u64) * 24 * 60 * 60),
        }
    }
}

impl JwtKeys {
    /// Signs the caller-supplied claim map as-is; no claim validation.
    pub fn issue(&self, data: Map<String, Value>) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            data,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!("jwt issued");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        debug!("jwt verified");
        Ok(data.claims)
    }
}

/// `Set-Cookie` value for a freshly issued token. HttpOnly, not Secure:
/// the original deployment serves the token over plaintext-permitted
/// channels.
pub fn token_cookie(token: &str, max_age: Duration) -> String {
    format!(
        "{TOKEN_COOKIE}={token}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
        max_age.as_secs()
    )
}

/// Pulls the session token out of a raw `Cookie` request header.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TOKEN_COOKIE)
        .map(|(_, value)| value)
}
