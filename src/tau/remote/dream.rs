use super::{CloudClient, EphemeralCloud, RemoteError, UniverseStatus};
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client for the ephemeral cloud's status endpoint.
///
/// Starting an instance is left to the cloud's own tooling; `client()` only
/// prepares the connection and `status()` reports whether anything answers.
#[derive(Debug, Clone)]
pub struct DreamClient {
    base_url: String,
    timeout: Duration,
}

impl DreamClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

impl EphemeralCloud for DreamClient {
    fn client(&self) -> Result<Box<dyn CloudClient>, RemoteError> {
        let client = Client::builder().timeout(self.timeout).build()?;
        Ok(Box::new(DreamHandle {
            client,
            status_url: format!("{}/status", self.base_url),
        }))
    }
}

struct DreamHandle {
    client: Client,
    status_url: String,
}

impl CloudClient for DreamHandle {
    fn status(&self) -> Result<HashMap<String, UniverseStatus>, RemoteError> {
        tracing::debug!(url = %self.status_url, "querying ephemeral cloud status");
        let response = self.client.get(&self.status_url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                status,
                url: self.status_url.clone(),
            });
        }
        Ok(response.json()?)
    }
}
