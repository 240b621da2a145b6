//! Network selection for the current profile.
//!
//! ```text
//!                      ┌── --fqdn ──────► validate, record history ──┐
//! check flags ─► ──────┼── --universe ──► must be a live universe ───┼─► persist profile,
//!                      └── neither ─────► prompt: Remote | Ephemeral │   record in runtime env
//!                                          Cloud (if live) | history ┘
//! ```
//!
//! `--fqdn` and `--universe` are exclusive, and the check happens before any
//! remote call. The profile is only written back once the new network has been
//! validated or found, so a failure leaves the store as it was.
//!
//! History entries picked from the prompt are used as-is: only validated FQDNs
//! ever make it into the history.

use super::login::selected_profile;
use super::{CmdMessage, CmdResult, NetworkEntry, Session};
use crate::error::{Result, TauError};
use crate::model::{NetworkType, Profile};
use crate::remote::seer::normalize_fqdn;
use crate::remote::CloudClient;
use crate::select::{Prompter, SelectionRequest};

pub const FQDN_FLAG: &str = "--fqdn";
pub const UNIVERSE_FLAG: &str = "--universe";

#[derive(Debug, Clone, Default)]
pub struct NetworkOptions {
    pub fqdn: Option<String>,
    pub universe: Option<String>,
}

impl NetworkOptions {
    fn check_exclusive(&self) -> Result<()> {
        let set: Vec<String> = [(FQDN_FLAG, &self.fqdn), (UNIVERSE_FLAG, &self.universe)]
            .iter()
            .filter(|(_, value)| value.is_some())
            .map(|(flag, _)| flag.to_string())
            .collect();
        if set.len() > 1 {
            return Err(TauError::UsageConflict { flags: set });
        }
        Ok(())
    }
}

enum NetworkChoice {
    Remote,
    EphemeralCloud,
    History(String),
}

impl NetworkChoice {
    fn label(&self) -> String {
        match self {
            NetworkChoice::Remote => NetworkType::Remote.label().to_string(),
            NetworkChoice::EphemeralCloud => NetworkType::EphemeralCloud.label().to_string(),
            NetworkChoice::History(fqdn) => fqdn.clone(),
        }
    }
}

pub fn select(session: &mut Session, options: &NetworkOptions) -> Result<CmdResult> {
    options.check_exclusive()?;

    let mut profile = selected_profile(session)?;

    match (&options.fqdn, &options.universe) {
        (Some(fqdn), _) => use_fqdn(session, &mut profile, Some(fqdn.clone()))?,
        (None, Some(universe)) => {
            let client = cloud_client(session)?;
            use_universe(
                client.as_ref(),
                session.prompter.as_ref(),
                &mut profile,
                Some(universe.clone()),
            )?;
        }
        (None, None) => choose_interactively(session, &mut profile)?,
    }

    let name = profile.name.clone();
    session.store.set(&name, profile.clone())?;
    if let Some(network_type) = profile.network_type {
        session.env.set_selected_network(network_type)?;
    }
    session.env.set_network_url(&profile.network)?;
    tracing::info!(profile = %name, network = %profile.network, "selected network");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Connected to network {}",
        profile.network
    )));
    Ok(result.with_affected_profile(profile))
}

fn use_fqdn(session: &Session, profile: &mut Profile, explicit: Option<String>) -> Result<()> {
    let validator = session.validator.as_ref();
    let validate = |value: &str| -> Result<()> {
        let value = normalize_fqdn(value);
        validator
            .validate(&value)
            .map_err(|source| TauError::ValidationFailed { value, source })
    };
    let prior = (profile.network_type == Some(NetworkType::Remote))
        .then(|| profile.network.clone());

    let fqdn = SelectionRequest::new("network", "Network FQDN")
        .explicit(explicit)
        .prior(prior)
        .resolve_open(session.prompter.as_ref(), &validate)?;
    let fqdn = normalize_fqdn(&fqdn);

    profile.use_remote(&fqdn);
    profile.record_history(&fqdn);
    Ok(())
}

fn use_universe(
    client: &dyn CloudClient,
    prompter: &dyn Prompter,
    profile: &mut Profile,
    explicit: Option<String>,
) -> Result<()> {
    let universe = SelectionRequest::new("universe", "Select a universe")
        .explicit(explicit)
        .candidates(live_universes(client)?)
        .resolve(prompter)?;
    profile.use_universe(&universe);
    Ok(())
}

fn choose_interactively(session: &Session, profile: &mut Profile) -> Result<()> {
    let client = cloud_client(session)?;
    let live = match client.status() {
        Ok(_) => true,
        Err(err) => {
            tracing::debug!(error = %err, "ephemeral cloud is not live");
            false
        }
    };

    let mut choices = vec![NetworkChoice::Remote];
    if live {
        choices.push(NetworkChoice::EphemeralCloud);
    }
    choices.extend(profile.history.iter().cloned().map(NetworkChoice::History));

    let picked = SelectionRequest::new("network", "Select a network")
        .candidates(choices.iter().map(NetworkChoice::label).collect())
        .prior(profile.network_type.map(|t| t.label().to_string()))
        .resolve(session.prompter.as_ref())?;
    let choice = choices
        .into_iter()
        .find(|choice| choice.label() == picked)
        .unwrap_or(NetworkChoice::History(picked));

    match choice {
        NetworkChoice::Remote => use_fqdn(session, profile, None),
        NetworkChoice::EphemeralCloud => {
            use_universe(client.as_ref(), session.prompter.as_ref(), profile, None)
        }
        NetworkChoice::History(fqdn) => {
            profile.use_remote(&fqdn);
            Ok(())
        }
    }
}

fn cloud_client(session: &Session) -> Result<Box<dyn CloudClient>> {
    session
        .cloud
        .client()
        .map_err(|source| TauError::Collaborator {
            context: "creating ephemeral cloud client failed",
            source,
        })
}

/// Live universe names, sorted so prompts are stable.
fn live_universes(client: &dyn CloudClient) -> Result<Vec<String>> {
    let status = client.status().map_err(|source| TauError::Collaborator {
        context: "ephemeral cloud status call failed",
        source,
    })?;
    let mut names: Vec<String> = status.into_keys().collect();
    names.sort();
    Ok(names)
}

/// The current profile's network history, marking the network in use.
pub fn list(session: &Session) -> Result<CmdResult> {
    let profile = selected_profile(session)?;
    let is_remote = profile.network_type == Some(NetworkType::Remote);
    let entries: Vec<NetworkEntry> = profile
        .history
        .iter()
        .map(|fqdn| NetworkEntry {
            value: fqdn.clone(),
            is_current: is_remote && *fqdn == profile.network,
        })
        .collect();

    let mut result = CmdResult::default();
    if entries.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No remote networks used by profile {} yet",
            profile.name
        )));
    }
    if profile.network_type == Some(NetworkType::EphemeralCloud) {
        result.add_message(CmdMessage::info(format!(
            "Current: universe {} ({})",
            profile.network,
            NetworkType::EphemeralCloud
        )));
    }
    Ok(result.with_listed_networks(entries))
}

/// The current profile's network.
pub fn query(session: &Session) -> Result<CmdResult> {
    let profile = selected_profile(session)?;
    let mut result = CmdResult::default();
    match profile.network_type {
        Some(network_type) if !profile.network.is_empty() => {
            result.add_message(CmdMessage::info(format!(
                "{} ({})",
                profile.network, network_type
            )));
        }
        _ => result.add_message(CmdMessage::warning(format!(
            "Profile {} has no network selected, run `tau select network`",
            profile.name
        ))),
    }
    Ok(result.with_affected_profile(profile))
}
