//! # Remote Collaborators
//!
//! Narrow interfaces to the services tau talks to but does not own:
//!
//! - [`EphemeralCloud`]: a locally managed, disposable cloud and its universes
//! - [`FqdnValidator`]: checks that an FQDN points at a usable platform
//! - [`RuntimeEnv`]: remembers the resolved profile and network between invocations
//!
//! The production implementations ([`dream::DreamClient`], [`seer::SeerValidator`],
//! [`session::FileSession`]) are plain blocking clients; every call is made once
//! and a failure comes back as a [`RemoteError`] for the caller to wrap.

use crate::error::Result;
use crate::model::NetworkType;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub mod dream;
pub mod seer;
pub mod session;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Unavailable(String),
}

/// Metadata reported for one live universe.
pub type UniverseStatus = serde_json::Value;

/// Factory for ephemeral-cloud handles.
///
/// `client()` never starts an instance. When none is running the handle is
/// still returned and the failure shows up on the first `status()` call.
pub trait EphemeralCloud {
    fn client(&self) -> std::result::Result<Box<dyn CloudClient>, RemoteError>;
}

pub trait CloudClient {
    /// Live universes by name. An `Ok` answer means the instance is up.
    fn status(&self) -> std::result::Result<HashMap<String, UniverseStatus>, RemoteError>;
}

pub trait FqdnValidator {
    fn validate(&self, fqdn: &str) -> std::result::Result<(), RemoteError>;
}

/// What the runtime environment currently records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_type: Option<NetworkType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_url: Option<String>,
}

pub trait RuntimeEnv {
    fn current(&self) -> Result<SessionState>;

    fn set_selected_profile(&mut self, name: &str) -> Result<()>;

    fn set_selected_network(&mut self, network_type: NetworkType) -> Result<()>;

    fn set_network_url(&mut self, url: &str) -> Result<()>;

    fn clear(&mut self) -> Result<()>;

    fn selected_profile(&self) -> Result<Option<String>> {
        Ok(self.current()?.profile)
    }
}
