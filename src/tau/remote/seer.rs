use super::{FqdnValidator, RemoteError};
use reqwest::blocking::Client;
use std::time::Duration;

const FQDN_PLACEHOLDER: &str = "{fqdn}";
const MAX_FQDN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// The form an FQDN is validated and stored in: no root dot, lowercase.
pub fn normalize_fqdn(fqdn: &str) -> String {
    fqdn.strip_suffix('.').unwrap_or(fqdn).to_ascii_lowercase()
}

/// Checks FQDN syntax without touching the network.
pub fn check_fqdn(fqdn: &str) -> Result<(), RemoteError> {
    let invalid = |reason: &str| -> Result<(), RemoteError> {
        Err(RemoteError::Invalid(format!("`{}` {}", fqdn, reason)))
    };

    let fqdn = fqdn.strip_suffix('.').unwrap_or(fqdn);
    if fqdn.is_empty() {
        return invalid("is empty");
    }
    if fqdn.len() > MAX_FQDN_LEN {
        return invalid("is longer than 253 characters");
    }

    let labels: Vec<&str> = fqdn.split('.').collect();
    if labels.len() < 2 {
        return invalid("needs at least two labels");
    }
    for label in &labels {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return invalid("has a label that is empty or longer than 63 characters");
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return invalid("may only contain letters, digits and hyphens");
        }
        if label.starts_with('-') || label.ends_with('-') {
            return invalid("has a label starting or ending with a hyphen");
        }
    }
    if labels
        .last()
        .is_some_and(|tld| tld.chars().all(|c| c.is_ascii_digit()))
    {
        return invalid("has a numeric top-level label");
    }
    Ok(())
}

/// Validates an FQDN by syntax, then by probing the platform behind it.
#[derive(Debug, Clone)]
pub struct SeerValidator {
    probe: String,
    timeout: Duration,
}

impl SeerValidator {
    /// `probe` is a URL template; `{fqdn}` is replaced with the value under test.
    pub fn new(probe: impl Into<String>, timeout: Duration) -> Self {
        Self {
            probe: probe.into(),
            timeout,
        }
    }

    pub fn probe_url(&self, fqdn: &str) -> String {
        self.probe.replace(FQDN_PLACEHOLDER, fqdn)
    }
}

impl FqdnValidator for SeerValidator {
    fn validate(&self, fqdn: &str) -> Result<(), RemoteError> {
        check_fqdn(fqdn)?;

        let url = self.probe_url(fqdn);
        tracing::debug!(%url, "probing network");
        let client = Client::builder().timeout(self.timeout).build()?;
        let response = client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status { status, url });
        }
        Ok(())
    }
}
