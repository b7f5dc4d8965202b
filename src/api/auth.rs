//! Service account authentication for Google APIs.
//!
//! Implements the OAuth 2.0 JWT bearer grant: a claim set naming the service
//! account, scope and token endpoint is signed with the account's RSA key and
//! exchanged for a short-lived access token. Tokens are reused until shortly
//! before they expire.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::error::FetchError;

/// Read-only access to spreadsheet contents
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// The fields of a service account key file that token exchange needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub private_key: String,
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    /// Parses a key file's JSON. Missing fields are tolerated here and only
    /// rejected when a token is requested.
    pub fn from_json(json: &str) -> Result<Self, FetchError> {
        serde_json::from_str(json).map_err(FetchError::Credentials)
    }

    fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

/// Issues bearer tokens for one service account and scope.
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    scope: String,
    client: Client,
    token: Mutex<Option<AccessToken>>,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, scope: impl Into<String>) -> Self {
        Self::with_client(Client::new(), key, scope)
    }

    pub fn with_client(client: Client, key: ServiceAccountKey, scope: impl Into<String>) -> Self {
        Self {
            key,
            scope: scope.into(),
            client,
            token: Mutex::new(None),
        }
    }

    /// Returns a valid access token, exchanging a fresh assertion when the
    /// cached one is missing or about to expire.
    pub async fn access_token(&self) -> Result<String, FetchError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() + EXPIRY_MARGIN < token.expires_at {
                debug!("Reusing access token");
                return Ok(token.value.clone());
            }
        }

        let assertion = self.sign_assertion()?;
        let token_uri = self.key.token_uri();
        debug!(token_uri, client_email = %self.key.client_email, "Requesting access token");

        let response = self
            .client
            .post(token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Auth(format!(
                "token endpoint returned {}: {}",
                status, body
            )));
        }

        let token: TokenResponse = serde_json::from_str(&response.text().await?)?;
        *cached = Some(AccessToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });

        Ok(token.access_token)
    }

    fn sign_assertion(&self) -> Result<String, FetchError> {
        if self.key.client_email.is_empty() || self.key.private_key.is_empty() {
            return Err(FetchError::Auth(
                "service account credential is missing client_email or private_key".to_string(),
            ));
        }

        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| FetchError::Auth(format!("system clock before epoch: {}", e)))?
            .as_secs();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: &self.scope,
            aud: self.key.token_uri(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| FetchError::Auth(format!("invalid private key: {}", e)))?;

        encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .map_err(|e| FetchError::Auth(format!("failed to sign assertion: {}", e)))
    }
}
