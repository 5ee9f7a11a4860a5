use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{SheetsApi, error_body};
use super::auth::ServiceAccountAuth;
use super::range::A1Range;
use super::requests::{Mutation, batch_update_body};
use crate::credentials::{CredentialProvider, ServiceAccountKey};
use crate::error::{AppealError, Result};

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `ValueRange` response of `spreadsheets.values.get`
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Error envelope returned by Google APIs
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    code: Option<u16>,
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Blocking Google Sheets v4 client authorized as a service account
pub struct SheetsClient {
    http: Client,
    auth: ServiceAccountAuth,
    base_url: String,
}

impl SheetsClient {
    pub fn new(key: ServiceAccountKey) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let auth = ServiceAccountAuth::new(key, http.clone());
        Ok(Self { http, auth, base_url: SHEETS_API_BASE.to_string() })
    }

    /// Resolve the credential file and open a client with it
    pub fn connect(provider: &CredentialProvider) -> Result<Self> {
        let key = provider.load_key()?;
        let client = Self::new(key)?;
        info!("Opened Sheets session as {}", client.auth.client_email());
        Ok(client)
    }

    /// Point the client at another API root (emulators, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn values_url(&self, spreadsheet_id: &str, range: &A1Range) -> String {
        format!("{}/{}/values/{}", self.base_url, spreadsheet_id, range.encoded())
    }

    fn batch_update_url(&self, spreadsheet_id: &str) -> String {
        format!("{}/{}:batchUpdate", self.base_url, spreadsheet_id)
    }
}

impl SheetsApi for SheetsClient {
    fn read_range(&self, spreadsheet_id: &str, range: &A1Range) -> Result<Vec<Vec<String>>> {
        let token = self.auth.access_token()?;
        debug!("GET values {range}");

        let response =
            self.http.get(self.values_url(spreadsheet_id, range)).bearer_auth(token).send()?;
        let value_range: ValueRange = check_status(response)?.json()?;

        debug!("Read {} row(s) from {range}", value_range.values.len());
        Ok(value_range.values)
    }

    fn batch_mutate(&self, spreadsheet_id: &str, mutations: &[Mutation]) -> Result<()> {
        let token = self.auth.access_token()?;
        debug!("POST batchUpdate with {} request(s)", mutations.len());

        let response = self
            .http
            .post(self.batch_update_url(spreadsheet_id))
            .bearer_auth(token)
            .json(&batch_update_body(mutations))
            .send()?;
        check_status(response)?;

        Ok(())
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = error_body(response.text());
    let message = describe_api_error(status.as_u16(), &body);
    warn!("Sheets API request failed: {message}");
    Err(AppealError::RemoteStore(message))
}

fn describe_api_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody { error }) => {
            let code = error.code.unwrap_or(status);
            match error.status {
                Some(kind) => format!("HTTP {code} {kind}: {}", error.message),
                None => format!("HTTP {code}: {}", error.message),
            }
        }
        Err(_) => format!("HTTP {status}: {}", body.trim()),
    }
}
