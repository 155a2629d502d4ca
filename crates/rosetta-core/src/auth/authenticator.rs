//! OAuth 2.0 client-credentials authenticator.
//!
//! Acquires a bearer token from the configured token endpoint, caches it
//! until shortly before the provider's expiry, and attaches it to outgoing
//! requests. Concurrent callers that find the cache empty or expired
//! collapse into a single token request.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::token::{CachedToken, Clock, SystemClock, TokenResponse};
use crate::api::{Result, RosettaError};
use crate::config::RosettaClientOptions;

const GRANT_TYPE: &str = "client_credentials";

pub struct Authenticator {
    token_url: String,
    client_id: String,
    client_secret: String,
    timeout: Duration,
    cached: RwLock<Option<CachedToken>>,
    // Serializes token requests only; never held across a business request.
    refresh_lock: Mutex<()>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    pub fn new(options: &RosettaClientOptions) -> Result<Self> {
        Self::with_clock(options, Arc::new(SystemClock))
    }

    pub fn with_clock(options: &RosettaClientOptions, clock: Arc<dyn Clock>) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            token_url: options.token_url.trim().to_string(),
            client_id: options.client_id.clone(),
            client_secret: options.client_secret.clone(),
            timeout: options.timeout(),
            cached: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            clock,
        })
    }

    /// Attach `Authorization: Bearer <token>` to an outgoing request.
    pub async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.valid_token().await?;
        Ok(request.bearer_auth(token))
    }

    /// Return a usable token, requesting a new one if none is cached or the
    /// cached one has reached its expiry.
    pub async fn valid_token(&self) -> Result<String> {
        if let Some(token) = self.current_token().await {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock
        if let Some(token) = self.current_token().await {
            debug!("Reusing token refreshed by a concurrent request");
            return Ok(token);
        }

        let fresh = self.request_token().await?;
        let token = fresh.token().to_string();
        *self.cached.write().await = Some(fresh);
        Ok(token)
    }

    /// Drop the cached token so the next request acquires a new one.
    pub async fn invalidate(&self) {
        let _guard = self.refresh_lock.lock().await;
        *self.cached.write().await = None;
    }

    pub async fn cached_token(&self) -> Option<CachedToken> {
        self.cached.read().await.clone()
    }

    pub async fn cached_expiry(&self) -> Option<DateTime<Utc>> {
        self.cached.read().await.as_ref().map(CachedToken::expires_at)
    }

    async fn current_token(&self) -> Option<String> {
        let now = self.clock.now();
        self.cached
            .read()
            .await
            .as_ref()
            .filter(|t| t.is_valid_at(now))
            .map(|t| t.token().to_string())
    }

    /// POST the client-credentials grant on a dedicated, unauthenticated client.
    async fn request_token(&self) -> Result<CachedToken> {
        debug!(token_url = %self.token_url, "Requesting new OAuth token");

        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let response = client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", GRANT_TYPE)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RosettaError::Authentication {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            RosettaError::Protocol(format!("OAuth token response was not valid JSON: {e}"))
        })?;
        let token = CachedToken::from_response(parsed, self.clock.now())?;

        debug!(expires_at = %token.expires_at(), "OAuth token acquired");
        Ok(token)
    }
}
