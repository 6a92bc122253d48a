use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{Error, Result};
use crate::helpers::time::now_i64;
use crate::token::token::Token;
use crate::utils::constants::DEFAULT_SAFETY_MARGIN_SECS;

/// Client-credentials pair supplied by the embedding application.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: client_secret.into() }
    }

    fn basic_authorization(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", BASE64.encode(raw))
    }
}

// The secret must never reach log output, so Debug is written by hand.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<serde_json::Value>,
}

/// Fetches and caches the OAuth2 client-credentials token.
///
/// One cached slot, refreshed lazily on the first use after the token
/// enters its safety margin. The lock is not held across the exchange,
/// so concurrent callers that both observe a stale token may each
/// refresh; the last write wins and both end up with a usable token.
#[derive(Debug, Clone)]
pub struct TokenManager {
    credentials: Credentials,
    http: Client,
    auth_url: String,
    safety_margin_secs: i64,
    cached: Arc<RwLock<Option<Token>>>,
}

impl TokenManager {
    pub fn new(http: Client, credentials: Credentials, auth_url: String) -> Self {
        Self {
            credentials,
            http,
            auth_url,
            safety_margin_secs: DEFAULT_SAFETY_MARGIN_SECS,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Return the cached token, exchanging credentials for a new one
    /// first if none is cached or the cached one is stale.
    pub async fn get_valid_token(&self) -> Result<Token> {
        if let Some(token) = self.cached.read().await.as_ref() {
            if !token.is_stale(self.safety_margin_secs) {
                return Ok(token.clone());
            }
        }

        debug!("refreshing FuelCheck API token");
        let token = self.exchange().await?;
        *self.cached.write().await = Some(token.clone());
        Ok(token)
    }

    /// Drop the cached token so the next call re-authenticates.
    /// Lets a caller recover after the API rejects a token mid-flight.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    async fn exchange(&self) -> Result<Token> {
        let response = self
            .http
            .get(&self.auth_url)
            .query(&[("grant_type", "client_credentials")])
            .header("Accept", "application/json")
            .header("Authorization", self.credentials.basic_authorization())
            .send()
            .await
            .map_err(|err| Error::auth_with_source("token request could not be sent", err))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::auth(format!("invalid API credentials ({status})")));
        }
        if !status.is_success() {
            return Err(Error::auth(format!("token request failed with status {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|err| Error::auth_with_source("connection lost while reading token response", err))?;

        // The gateway sometimes mislabels the content type, so decode
        // from the raw text instead of trusting the header.
        let parsed: AccessTokenResponse =
            serde_json::from_str(&body).map_err(|_| Error::auth("token response was not valid JSON"))?;

        let value = parsed
            .access_token
            .ok_or_else(|| Error::auth("no access_token in token response"))?;

        let expires_in = parsed
            .expires_in
            .as_ref()
            .and_then(parse_expires_in)
            .filter(|secs| *secs > 0)
            .ok_or_else(|| Error::auth("token response carried no usable expires_in"))?;

        debug!(expires_in, "token acquired");
        Ok(Token::new(value, now_i64() + expires_in))
    }
}

/// `expires_in` arrives as a JSON number or a numeric string depending
/// on the gateway; accept both.
fn parse_expires_in(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
