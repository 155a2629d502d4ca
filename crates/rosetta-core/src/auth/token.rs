use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::api::{Result, RosettaError};

/// Seconds subtracted from the provider's reported lifetime so the token is
/// always refreshed before the provider would reject it.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 300;

/// Lifetime assumed when the token response omits `expires_in` (24 hours).
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 86_400;

/// Source of the current time for expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Body of a client-credentials token response. `token_type` is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
}

/// A bearer token together with the instant after which it must not be used.
#[derive(Clone, PartialEq, Eq)]
pub struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl CachedToken {
    pub fn new(token: String, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }

    pub(crate) fn from_response(
        response: TokenResponse,
        acquired_at: DateTime<Utc>,
    ) -> Result<Self> {
        let token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                RosettaError::Protocol(
                    "OAuth token response did not contain an access_token".to_string(),
                )
            })?;

        let expires_in = response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        let expires_at = expires_in
            .checked_sub(TOKEN_EXPIRY_MARGIN_SECS)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| acquired_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                RosettaError::Protocol(
                    "OAuth token response has an out-of-range expires_in".to_string(),
                )
            })?;

        Ok(Self { token, expires_at })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
