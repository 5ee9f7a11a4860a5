//! OAuth2 service-account flow (JWT bearer grant)
//!
//! 1. Sign a JWT assertion with the key's RSA private key
//! 2. POST it to the key's token URI
//! 3. Cache the access token until shortly before it expires

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error_body;
use crate::credentials::ServiceAccountKey;
use crate::error::{AppealError, Result};

/// Scope requested for the Sheets calls
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/drive";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens this close to expiry are refreshed before use
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    assertion: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

/// OAuth error response body
#[derive(Debug, Deserialize)]
struct OAuthError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    http: Client,
    cached: Mutex<Option<AccessToken>>,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, http: Client) -> Self {
        Self { key, http, cached: Mutex::new(None) }
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// A bearer token valid for at least another minute
    pub fn access_token(&self) -> Result<String> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| AppealError::Authentication("token cache poisoned".to_string()))?;

        let now = Utc::now();
        if let Some(token) = cached.as_ref()
            && token.is_fresh(now)
        {
            return Ok(token.value.clone());
        }

        let token = self.exchange(now)?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    /// Signed JWT assertion for the token exchange
    pub fn build_assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        let signing_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| AppealError::Authentication(format!("invalid private key: {e}")))?;

        encode(&header, &claims, &signing_key)
            .map_err(|e| AppealError::Authentication(format!("failed to sign assertion: {e}")))
    }

    fn exchange(&self, now: DateTime<Utc>) -> Result<AccessToken> {
        let assertion = self.build_assertion(now)?;
        debug!("Requesting access token for {}", self.key.client_email);

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&TokenRequest { grant_type: JWT_BEARER_GRANT, assertion: &assertion })
            .send()
            .map_err(|e| AppealError::RemoteStore(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response.text());
            return Err(token_failure(status.as_u16(), &body));
        }

        let body = response.text()?;
        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AppealError::Authentication(format!("malformed token response: {e}")))?;

        info!("Obtained access token for {} ({}s)", self.key.client_email, token.expires_in);
        Ok(AccessToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

/// Client errors mean the key or grant was rejected; anything else is the endpoint
/// being unavailable and may succeed on a later attempt
fn token_failure(status: u16, body: &str) -> AppealError {
    let message = describe_oauth_error(status, body);
    if (400..500).contains(&status) {
        AppealError::Authentication(message)
    } else {
        AppealError::RemoteStore(format!("token endpoint {message}"))
    }
}

fn describe_oauth_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<OAuthError>(body) {
        Ok(err) => match err.error_description {
            Some(description) => format!("{}: {}", err.error, description),
            None => err.error,
        },
        Err(_) => format!("HTTP {status}: {body}"),
    }
}
