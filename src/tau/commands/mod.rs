//! # Command Layer
//!
//! Business logic behind `login`, `current`, `exit` and the resource verbs.
//! Every command takes a [`Session`] holding the services it may touch and
//! returns a [`CmdResult`]; nothing here writes to the terminal.

use crate::model::Profile;
use crate::remote::{EphemeralCloud, FqdnValidator, RuntimeEnv};
use crate::select::Prompter;
use crate::store::ProfileStore;

pub mod current;
pub mod login;
pub mod network;
pub mod profile;

/// Services a command runs against, built once at process entry.
pub struct Session {
    pub store: Box<dyn ProfileStore>,
    pub prompter: Box<dyn Prompter>,
    pub cloud: Box<dyn EphemeralCloud>,
    pub validator: Box<dyn FqdnValidator>,
    pub env: Box<dyn RuntimeEnv>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// A network entry as shown by `list network`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkEntry {
    pub value: String,
    pub is_current: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_profile: Option<Profile>,
    pub listed_profiles: Vec<Profile>,
    pub listed_networks: Vec<NetworkEntry>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_profile(mut self, profile: Profile) -> Self {
        self.affected_profile = Some(profile);
        self
    }

    pub fn with_listed_profiles(mut self, profiles: Vec<Profile>) -> Self {
        self.listed_profiles = profiles;
        self
    }

    pub fn with_listed_networks(mut self, networks: Vec<NetworkEntry>) -> Self {
        self.listed_networks = networks;
        self
    }
}
