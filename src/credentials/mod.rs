//! Service-account credential resolution.
//!
//! The key file lives at a fixed path. When the raw key JSON is configured (typical for
//! hosted deployments where only environment variables are available) the first
//! resolution writes it to that path; later resolutions in the same process return the
//! memoized path without touching the file.

mod service_account;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub use service_account::ServiceAccountKey;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;

pub struct CredentialProvider {
    path: PathBuf,
    payload: Option<String>,
    resolved: OnceLock<PathBuf>,
}

impl CredentialProvider {
    pub fn new(path: impl Into<PathBuf>, payload: Option<String>) -> Self {
        Self { path: path.into(), payload, resolved: OnceLock::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.credentials_path.clone(), config.credentials_json.clone())
    }

    /// Path of the credential file, writing the configured payload on first call
    ///
    /// A missing file without a payload is not an error here; loading the key
    /// reports it as an authentication failure.
    pub fn resolve_credential_path(&self) -> Result<&Path> {
        if let Some(path) = self.resolved.get() {
            return Ok(path);
        }

        match &self.payload {
            Some(payload) => {
                fs::write(&self.path, payload)?;
                info!("Wrote service account key to {}", self.path.display());
            }
            None if self.path.exists() => {
                debug!("Using existing service account key at {}", self.path.display());
            }
            None => {
                warn!("No credential payload configured and {} does not exist", self.path.display());
            }
        }

        Ok(self.resolved.get_or_init(|| self.path.clone()))
    }

    /// Resolve the path and parse the key stored there
    pub fn load_key(&self) -> Result<ServiceAccountKey> {
        ServiceAccountKey::from_file(self.resolve_credential_path()?)
    }
}

static PROCESS_PROVIDER: OnceLock<CredentialProvider> = OnceLock::new();

/// The provider shared by the whole process, built from the first config it sees
pub fn process_provider(config: &Config) -> &'static CredentialProvider {
    PROCESS_PROVIDER.get_or_init(|| CredentialProvider::from_config(config))
}
