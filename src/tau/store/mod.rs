//! # Profile Store
//!
//! Profiles are keyed by name. The [`ProfileStore`] trait is the only way
//! commands reach them:
//!
//! - [`fs::FileProfileStore`]: `profiles.json` in the tau config directory,
//!   loaded on first access and written through on every change
//! - [`memory::InMemoryProfileStore`]: no persistence, for tests
//!
//! ```text
//! ~/.config/tau/
//! ├── profiles.json   # { "<name>": { provider, token, default, network_type, network, history } }
//! ├── session.json    # runtime environment (selected profile / network)
//! └── config.json     # client settings
//! ```
//!
//! One invocation owns the store at a time; there is no locking between
//! processes. Keeping at most one default profile is up to the callers
//! (see [`crate::commands::login::select`]).

use crate::error::{Result, TauError};
use crate::model::Profile;
use std::collections::BTreeMap;

pub mod fs;
pub mod memory;

/// Names in the store plus which one is the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileList {
    pub default: Option<String>,
    pub names: Vec<String>,
}

pub trait ProfileStore {
    /// Load a profile by name.
    fn get(&self, name: &str) -> Result<Profile>;

    /// Create or replace the profile stored under `name`.
    fn set(&mut self, name: &str, profile: Profile) -> Result<()>;

    /// All names, sorted, and the default one if any.
    fn all(&self) -> Result<ProfileList>;

    /// Delete a profile, returning what was stored.
    fn remove(&mut self, name: &str) -> Result<Profile>;

    fn profiles(&self) -> Result<Vec<Profile>> {
        self.all()?.names.iter().map(|name| self.get(name)).collect()
    }
}

type ProfileMap = BTreeMap<String, Profile>;

fn list_of(map: &ProfileMap) -> ProfileList {
    ProfileList {
        default: map
            .values()
            .find(|profile| profile.default)
            .map(|profile| profile.name.clone()),
        names: map.keys().cloned().collect(),
    }
}

fn missing(map: &ProfileMap, name: &str) -> TauError {
    let known: Vec<String> = map.keys().cloned().collect();
    TauError::not_found("profile", name, &known)
}

fn get_from(map: &ProfileMap, name: &str) -> Result<Profile> {
    map.get(name).cloned().ok_or_else(|| missing(map, name))
}

fn insert_into(map: &mut ProfileMap, name: &str, mut profile: Profile) {
    profile.name = name.to_string();
    map.insert(name.to_string(), profile);
}

fn remove_from(map: &mut ProfileMap, name: &str) -> Result<Profile> {
    match map.remove(name) {
        Some(profile) => Ok(profile),
        None => Err(missing(map, name)),
    }
}
