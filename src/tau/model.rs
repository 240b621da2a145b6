use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a profile's network lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkType {
    /// A deployed platform reached through its FQDN.
    Remote,
    /// A universe inside a locally managed, disposable cloud.
    EphemeralCloud,
}

impl NetworkType {
    pub fn label(self) -> &'static str {
        match self {
            NetworkType::Remote => "Remote",
            NetworkType::EphemeralCloud => "Ephemeral Cloud",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named set of credentials plus the network they target.
///
/// The name is the key in the profile store and is not serialized with the
/// entry; stores fill it back in on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip)]
    pub name: String,
    pub provider: String,
    pub token: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_type: Option<NetworkType>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network: String,
    #[serde(default)]
    pub history: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        provider: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            provider: provider.into(),
            token: token.into(),
            default: false,
            network_type: None,
            network: String::new(),
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a network to the history unless it is already there.
    /// Returns true when the history changed.
    pub fn record_history(&mut self, network: &str) -> bool {
        if self.history.iter().any(|h| h == network) {
            return false;
        }
        self.history.push(network.to_string());
        true
    }

    pub fn use_remote(&mut self, fqdn: &str) {
        self.network_type = Some(NetworkType::Remote);
        self.network = fqdn.to_string();
    }

    pub fn use_universe(&mut self, universe: &str) {
        self.network_type = Some(NetworkType::EphemeralCloud);
        self.network = universe.to_string();
    }

    pub fn masked_token(&self) -> String {
        let visible: String = self.token.chars().take(4).collect();
        if self.token.chars().count() <= 4 {
            "****".to_string()
        } else {
            format!("{}****", visible)
        }
    }
}
