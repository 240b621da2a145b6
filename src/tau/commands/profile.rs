use super::login::{self, selected_profile};
use super::{CmdMessage, CmdResult, Session};
use crate::error::Result;
use crate::select::SelectionRequest;

/// Picks a profile by flag or prompt, highlighting the default.
fn resolve_name(session: &Session, explicit: Option<&str>, prompt: &str) -> Result<String> {
    let profiles = login::get_profiles(session.store.as_ref())?;
    SelectionRequest::new("profile", prompt)
        .explicit(explicit.map(str::to_string))
        .candidates(profiles.names)
        .prior(profiles.default)
        .resolve(session.prompter.as_ref())
}

pub fn select(session: &mut Session, name: Option<&str>, make_default: bool) -> Result<CmdResult> {
    let name = resolve_name(session, name, "Select a profile")?;
    login::select(session, &name, make_default)
}

pub fn list(session: &Session) -> Result<CmdResult> {
    let profiles = session.store.profiles()?;
    let mut result = CmdResult::default();
    if profiles.is_empty() {
        result.add_message(CmdMessage::info(
            "No profiles yet, run `tau login` to create one",
        ));
    }
    Ok(result.with_listed_profiles(profiles))
}

/// Shows one profile, the selected one when no name is given.
pub fn query(session: &Session, name: Option<&str>) -> Result<CmdResult> {
    let profile = match name {
        Some(name) => session.store.get(name)?,
        None => selected_profile(session)?,
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!("Name: {}", profile.name)));
    result.add_message(CmdMessage::info(format!("Provider: {}", profile.provider)));
    result.add_message(CmdMessage::info(format!("Token: {}", profile.masked_token())));
    result.add_message(CmdMessage::info(format!("Default: {}", profile.default)));
    match profile.network_type {
        Some(network_type) => result.add_message(CmdMessage::info(format!(
            "Network: {} ({})",
            profile.network, network_type
        ))),
        None => result.add_message(CmdMessage::info("Network: none")),
    }
    result.add_message(CmdMessage::info(format!(
        "Created: {}",
        profile.created_at.format("%Y-%m-%d %H:%M")
    )));
    Ok(result.with_affected_profile(profile))
}

pub fn delete(session: &mut Session, name: Option<&str>) -> Result<CmdResult> {
    let name = resolve_name(session, name, "Select a profile to delete")?;
    let removed = session.store.remove(&name)?;
    tracing::info!(profile = %name, "deleted profile");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Deleted profile {}", name)));

    if session.env.selected_profile()?.as_deref() == Some(name.as_str()) {
        session.env.clear()?;
        result.add_message(CmdMessage::warning(format!(
            "{} was the selected profile, run `tau login` to pick another",
            name
        )));
    } else if removed.default {
        result.add_message(CmdMessage::warning(
            "No default profile left, use `tau select profile --set-default`",
        ));
    }
    Ok(result.with_affected_profile(removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::TauError;
    use crate::test_utils::{profile, Answer, TestSession};

    fn two_profiles() -> TestSession {
        TestSession::new()
            .with_profile(profile("a", true))
            .with_profile(profile("b", false))
    }

    #[test]
    fn list_returns_profiles_in_name_order() {
        let session = TestSession::new()
            .with_profile(profile("b", false))
            .with_profile(profile("a", true))
            .build();
        let result = list(&session).unwrap();
        let names: Vec<&str> = result
            .listed_profiles
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn list_of_empty_store_says_so() {
        let session = TestSession::new().build();
        let result = list(&session).unwrap();
        assert!(result.listed_profiles.is_empty());
        assert!(result.messages[0].content.contains("tau login"));
    }

    #[test]
    fn query_masks_the_token() {
        let session = two_profiles().build();
        let result = query(&session, Some("b")).unwrap();
        let lines: Vec<&str> = result.messages.iter().map(|m| m.content.as_str()).collect();
        assert!(lines.contains(&"Token: toke****"));
        assert!(!lines.iter().any(|line| line.contains("token-b")));
    }

    #[test]
    fn query_without_name_uses_the_selected_profile() {
        let session = two_profiles().build();
        let result = query(&session, None).unwrap();
        assert_eq!(result.affected_profile.unwrap().name, "a");
    }

    #[test]
    fn select_profile_with_unknown_name_fails() {
        let mut session = two_profiles().build();
        assert!(matches!(
            select(&mut session, Some("c"), false),
            Err(TauError::NotFound { .. })
        ));
    }

    #[test]
    fn select_profile_on_empty_store_has_no_candidates() {
        let mut session = TestSession::new().build();
        assert!(matches!(
            select(&mut session, None, false),
            Err(TauError::NoCandidates("profile"))
        ));
    }

    #[test]
    fn delete_selected_profile_clears_the_session() {
        let fixture = two_profiles();
        let mut session = fixture.build();
        login::select(&mut session, "b", false).unwrap();

        let result = delete(&mut session, Some("b")).unwrap();
        assert_eq!(session.store.all().unwrap().names, vec!["a"]);
        assert_eq!(fixture.env.state().profile, None);
        assert_eq!(result.messages[1].level, MessageLevel::Warning);
    }

    #[test]
    fn delete_prompts_when_no_name_is_given() {
        let fixture = two_profiles().answers(vec![Answer::Pick(1)]);
        let mut session = fixture.build();
        delete(&mut session, None).unwrap();
        assert_eq!(session.store.all().unwrap().names, vec!["a"]);
        assert_eq!(fixture.prompter.defaults(), vec![Some(0)]);
    }

    #[test]
    fn delete_default_warns_about_missing_default() {
        let mut session = two_profiles().build();
        let result = delete(&mut session, Some("a")).unwrap();
        assert_eq!(session.store.all().unwrap().default, None);
        assert!(result.messages[1].content.contains("--set-default"));
    }
}
