use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppealError, Result};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// The fields of a Google service-account key file this crate uses
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            AppealError::Authentication(format!(
                "cannot read service account key {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let key: Self = serde_json::from_str(contents)
            .map_err(|e| AppealError::Authentication(format!("malformed service account key: {e}")))?;

        if let Some(kind) = key.key_type.as_deref()
            && kind != SERVICE_ACCOUNT_TYPE
        {
            return Err(AppealError::Authentication(format!(
                "expected a {SERVICE_ACCOUNT_TYPE} key, found {kind}"
            )));
        }
        if key.client_email.is_empty() || key.private_key.is_empty() {
            return Err(AppealError::Authentication(
                "service account key is missing client_email or private_key".to_string(),
            ));
        }

        Ok(key)
    }
}
