//! Environment-sourced configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory (see [`load_dotenv`]).

use std::env;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{AppealError, Result};

/// Fixed location of the service-account key, relative to the working directory
pub const CREDENTIALS_FILE: &str = "serviceAccountKey.json";
/// Share links fall back to the binary name when no public URL is configured
pub const DEFAULT_SHARE_BASE: &str = "roster-appeal";

pub const SPREADSHEET_ID_VAR: &str = "SPREADSHEET_ID";
pub const CREDENTIALS_JSON_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS_JSON";
pub const SHARE_BASE_VAR: &str = "ROSTER_APPEAL_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub spreadsheet_id: String,
    /// Raw key JSON used to (re)write the credential file on first use
    pub credentials_json: Option<String>,
    pub credentials_path: PathBuf,
    pub share_base: String,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let spreadsheet_id = lookup(SPREADSHEET_ID_VAR)
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                AppealError::Config(format!("{SPREADSHEET_ID_VAR} environment variable not set"))
            })?;

        let credentials_json = lookup(CREDENTIALS_JSON_VAR).filter(|json| {
            let present = !json.trim().is_empty();
            if !present {
                debug!("{CREDENTIALS_JSON_VAR} is blank, ignoring");
            }
            present
        });

        let share_base = lookup(SHARE_BASE_VAR)
            .map(|base| base.trim().to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| {
                info!("{SHARE_BASE_VAR} not set, using default: {DEFAULT_SHARE_BASE}");
                DEFAULT_SHARE_BASE.to_string()
            });

        Ok(Self {
            spreadsheet_id,
            credentials_json,
            credentials_path: PathBuf::from(CREDENTIALS_FILE),
            share_base,
        })
    }
}

/// Seed the environment from `.env` if one exists. Existing variables win.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => debug!("Ignoring unreadable .env: {e}"),
    }
}
