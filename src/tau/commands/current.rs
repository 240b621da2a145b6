use super::login::selected_profile;
use super::{CmdMessage, CmdResult, Session};
use crate::error::Result;

/// The selected profile and the network recorded for this session.
pub fn current(session: &Session) -> Result<CmdResult> {
    let profile = selected_profile(session)?;
    let state = session.env.current()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("Profile: {}", profile.name)));

    let network_type = state.network_type.or(profile.network_type);
    let network = state
        .network_url
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| profile.network.clone());
    match network_type {
        Some(network_type) if !network.is_empty() => {
            result.add_message(CmdMessage::info(format!("Network type: {}", network_type)));
            result.add_message(CmdMessage::info(format!("Network: {}", network)));
        }
        _ => result.add_message(CmdMessage::warning(
            "No network selected, run `tau select network`",
        )),
    }
    Ok(result.with_affected_profile(profile))
}

/// Forgets the selected profile and network.
pub fn exit(session: &mut Session) -> Result<CmdResult> {
    session.env.clear()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Session cleared"));
    Ok(result)
}
