//! Login: decide which profile is current, or create one.
//!
//! `--new`, or an empty store, goes straight to profile creation; `--name` is
//! then the new profile's name rather than a selector. Otherwise the profile is
//! resolved like any other selection (flag, then prompt with the default
//! highlighted) and made current.

use super::{CmdMessage, CmdResult, Session};
use crate::error::{Result, TauError};
use crate::model::Profile;
use crate::select::SelectionRequest;
use crate::store::{ProfileList, ProfileStore};

/// Git providers a profile can authenticate with.
pub const PROVIDERS: &[&str] = &["github"];

#[derive(Debug, Clone, Default)]
pub struct LoginOptions {
    pub name: Option<String>,
    pub token: Option<String>,
    pub provider: Option<String>,
    pub new: bool,
    pub set_default: bool,
}

pub fn get_profiles(store: &dyn ProfileStore) -> Result<ProfileList> {
    store.all()
}

pub fn run(session: &mut Session, options: &LoginOptions) -> Result<CmdResult> {
    let profiles = get_profiles(session.store.as_ref())?;

    if options.new || profiles.names.is_empty() {
        return create(session, options);
    }

    let name = SelectionRequest::new("profile", "Select a profile")
        .explicit(options.name.clone())
        .candidates(profiles.names)
        .prior(profiles.default)
        .resolve(session.prompter.as_ref())?;

    select(session, &name, options.set_default)
}

/// Makes `name` the current profile, and the only default one if `make_default`.
pub fn select(session: &mut Session, name: &str, make_default: bool) -> Result<CmdResult> {
    let mut profile = session.store.get(name)?;

    if make_default {
        clear_default(session.store.as_mut(), name)?;
        if !profile.default {
            profile.default = true;
            session.store.set(name, profile.clone())?;
        }
    }

    record_selection(session, &profile)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Logged in as {}", name)));
    if make_default {
        result.add_message(CmdMessage::info(format!("{} is now the default profile", name)));
    }
    Ok(result.with_affected_profile(profile))
}

/// Creates a profile from flags, prompting for whatever is missing.
pub fn create(session: &mut Session, options: &LoginOptions) -> Result<CmdResult> {
    let existing = session.store.all()?;

    let name = match &options.name {
        Some(name) => name.trim().to_string(),
        None => session.prompter.input("Profile name", None)?.trim().to_string(),
    };
    if name.is_empty() {
        return Err(TauError::Empty("profile name"));
    }
    if existing.names.contains(&name) {
        return Err(TauError::AlreadyExists {
            kind: "profile",
            value: name,
        });
    }

    let provider = SelectionRequest::new("provider", "Select a git provider")
        .explicit(options.provider.clone())
        .candidates(PROVIDERS.iter().map(|p| p.to_string()).collect())
        .auto_pick_single()
        .resolve(session.prompter.as_ref())?;

    let token = match &options.token {
        Some(token) => token.clone(),
        None => session.prompter.secret("Token")?,
    };
    if token.trim().is_empty() {
        return Err(TauError::Empty("token"));
    }

    let mut profile = Profile::new(&name, provider, token);
    profile.default = existing.names.is_empty() || options.set_default;
    // Write the new profile before demoting the old default.
    session.store.set(&name, profile.clone())?;
    if profile.default {
        clear_default(session.store.as_mut(), &name)?;
    }
    tracing::info!(profile = %name, default = profile.default, "created profile");

    record_selection(session, &profile)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Created profile {}", name)));
    Ok(result.with_affected_profile(profile))
}

/// The profile commands act on: the one recorded in the runtime environment,
/// else the store's default.
pub fn selected_profile(session: &Session) -> Result<Profile> {
    if let Some(name) = session.env.selected_profile()? {
        match session.store.get(&name) {
            Ok(profile) => return Ok(profile),
            Err(TauError::NotFound { .. }) => {
                tracing::warn!(profile = %name, "selected profile no longer exists");
            }
            Err(err) => return Err(err),
        }
    }

    match session.store.all()?.default {
        Some(name) => session.store.get(&name),
        None => Err(TauError::NotLoggedIn),
    }
}

fn clear_default(store: &mut dyn ProfileStore, keep: &str) -> Result<()> {
    for name in store.all()?.names {
        if name == keep {
            continue;
        }
        let mut profile = store.get(&name)?;
        if profile.default {
            profile.default = false;
            store.set(&name, profile)?;
        }
    }
    Ok(())
}

fn record_selection(session: &mut Session, profile: &Profile) -> Result<()> {
    session.env.set_selected_profile(&profile.name)?;
    if let Some(network_type) = profile.network_type {
        if !profile.network.is_empty() {
            session.env.set_selected_network(network_type)?;
            session.env.set_network_url(&profile.network)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NetworkType;
    use crate::store::memory::InMemoryProfileStore;
    use crate::test_utils::{profile, Answer, Prompt, TestSession};

    fn two_profiles() -> TestSession {
        TestSession::new()
            .with_profile(profile("a", true))
            .with_profile(profile("b", false))
    }

    fn defaults(session: &Session) -> Vec<String> {
        session
            .store
            .profiles()
            .unwrap()
            .into_iter()
            .filter(|p| p.default)
            .map(|p| p.name)
            .collect()
    }

    #[test]
    fn get_profiles_reports_default_and_names() {
        let session = two_profiles().build();
        let list = get_profiles(session.store.as_ref()).unwrap();
        assert_eq!(list.default.as_deref(), Some("a"));
        assert_eq!(list.names, vec!["a", "b"]);
    }

    #[test]
    fn unknown_name_is_not_found_listing_known_profiles() {
        let fixture = two_profiles();
        let mut session = fixture.build();
        let options = LoginOptions {
            name: Some("c".into()),
            ..LoginOptions::default()
        };
        let err = run(&mut session, &options).unwrap_err();
        match err {
            TauError::NotFound { value, known, .. } => {
                assert_eq!(value, "c");
                assert_eq!(known, vec!["a", "b"]);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert!(fixture.prompter.prompts().is_empty());
        assert_eq!(fixture.env.state().profile, None);
    }

    #[test]
    fn explicit_name_resolves_without_prompting() {
        let fixture = two_profiles();
        let mut session = fixture.build();
        let options = LoginOptions {
            name: Some("b".into()),
            ..LoginOptions::default()
        };
        let result = run(&mut session, &options).unwrap();
        assert_eq!(result.affected_profile.unwrap().name, "b");
        assert!(fixture.prompter.prompts().is_empty());
        assert_eq!(fixture.env.state().profile.as_deref(), Some("b"));
    }

    #[test]
    fn no_name_prompts_with_default_highlighted() {
        let fixture = two_profiles().answers(vec![Answer::Pick(1)]);
        let mut session = fixture.build();
        let result = run(&mut session, &LoginOptions::default()).unwrap();
        assert_eq!(result.affected_profile.unwrap().name, "b");
        assert_eq!(fixture.prompter.selections(), vec![vec!["a", "b"]]);
        assert_eq!(fixture.prompter.defaults(), vec![Some(0)]);
    }

    #[test]
    fn empty_store_routes_to_creation_not_selection() {
        let fixture = TestSession::new().answers(vec![
            Answer::Text("first".into()),
            Answer::Text("secret-token".into()),
        ]);
        let mut session = fixture.build();
        let result = run(&mut session, &LoginOptions::default()).unwrap();

        let created = result.affected_profile.unwrap();
        assert_eq!(created.name, "first");
        assert_eq!(created.provider, "github");
        assert!(created.default);
        assert!(fixture.prompter.selections().is_empty());
        assert_eq!(
            fixture.prompter.prompts(),
            vec![
                Prompt::Input {
                    prompt: "Profile name".into(),
                    default: None
                },
                Prompt::Secret {
                    prompt: "Token".into()
                },
            ]
        );
        assert_eq!(session.store.all().unwrap().default.as_deref(), Some("first"));
    }

    #[test]
    fn new_flag_uses_name_as_the_new_profile() {
        let fixture = two_profiles();
        let mut session = fixture.build();
        let options = LoginOptions {
            name: Some("c".into()),
            token: Some("t".into()),
            new: true,
            ..LoginOptions::default()
        };
        run(&mut session, &options).unwrap();
        assert_eq!(session.store.all().unwrap().names, vec!["a", "b", "c"]);
        // Not the first profile and no --set-default: "a" stays the default.
        assert_eq!(defaults(&session), vec!["a"]);
        assert!(fixture.prompter.prompts().is_empty());
    }

    #[test]
    fn new_flag_with_existing_name_fails() {
        let mut session = two_profiles().build();
        let options = LoginOptions {
            name: Some("a".into()),
            token: Some("t".into()),
            new: true,
            ..LoginOptions::default()
        };
        let err = run(&mut session, &options).unwrap_err();
        assert!(matches!(err, TauError::AlreadyExists { .. }));
    }

    #[test]
    fn new_default_profile_takes_over_the_default() {
        let mut session = two_profiles().build();
        let options = LoginOptions {
            name: Some("c".into()),
            token: Some("t".into()),
            new: true,
            set_default: true,
            ..LoginOptions::default()
        };
        run(&mut session, &options).unwrap();
        assert_eq!(defaults(&session), vec!["c"]);
    }

    /// Refuses to store one profile name, like a full disk would.
    struct RefusingStore {
        inner: InMemoryProfileStore,
        refused: &'static str,
    }

    impl ProfileStore for RefusingStore {
        fn get(&self, name: &str) -> Result<Profile> {
            self.inner.get(name)
        }

        fn set(&mut self, name: &str, profile: Profile) -> Result<()> {
            if name == self.refused {
                return Err(TauError::Store(format!("cannot write {}", name)));
            }
            self.inner.set(name, profile)
        }

        fn all(&self) -> Result<ProfileList> {
            self.inner.all()
        }

        fn remove(&mut self, name: &str) -> Result<Profile> {
            self.inner.remove(name)
        }
    }

    #[test]
    fn failed_create_keeps_the_old_default() {
        let fixture = two_profiles();
        let mut session = fixture.build();
        session.store = Box::new(RefusingStore {
            inner: fixture.store.clone(),
            refused: "c",
        });
        let options = LoginOptions {
            name: Some("c".into()),
            token: Some("t".into()),
            new: true,
            set_default: true,
            ..LoginOptions::default()
        };

        assert!(matches!(
            run(&mut session, &options),
            Err(TauError::Store(_))
        ));
        assert_eq!(defaults(&session), vec!["a"]);
        assert_eq!(fixture.env.state().profile, None);
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let mut session = TestSession::new().build();
        let options = LoginOptions {
            name: Some("a".into()),
            token: Some("t".into()),
            provider: Some("bitbucket".into()),
            ..LoginOptions::default()
        };
        let err = run(&mut session, &options).unwrap_err();
        assert!(matches!(err, TauError::NotFound { kind: "provider", .. }));
        assert!(session.store.all().unwrap().names.is_empty());
    }

    #[test]
    fn empty_token_is_rejected() {
        let mut session = TestSession::new()
            .answers(vec![Answer::Text("  ".into())])
            .build();
        let options = LoginOptions {
            name: Some("a".into()),
            ..LoginOptions::default()
        };
        assert!(matches!(
            run(&mut session, &options),
            Err(TauError::Empty("token"))
        ));
    }

    #[test]
    fn select_with_default_leaves_exactly_one_default() {
        let mut session = two_profiles().build();
        select(&mut session, "b", true).unwrap();
        assert_eq!(defaults(&session), vec!["b"]);

        select(&mut session, "a", true).unwrap();
        assert_eq!(defaults(&session), vec!["a"]);
    }

    #[test]
    fn select_without_default_keeps_the_store_untouched() {
        let mut session = two_profiles().build();
        select(&mut session, "b", false).unwrap();
        assert_eq!(defaults(&session), vec!["a"]);
    }

    #[test]
    fn select_records_the_profile_network() {
        let mut with_network = profile("b", false);
        with_network.use_remote("good.example.org");
        let fixture = TestSession::new()
            .with_profile(profile("a", true))
            .with_profile(with_network);
        let mut session = fixture.build();

        select(&mut session, "b", false).unwrap();
        let state = fixture.env.state();
        assert_eq!(state.profile.as_deref(), Some("b"));
        assert_eq!(state.network_type, Some(NetworkType::Remote));
        assert_eq!(state.network_url.as_deref(), Some("good.example.org"));
    }

    #[test]
    fn selected_profile_prefers_the_session_then_the_default() {
        let fixture = two_profiles();
        let mut session = fixture.build();
        assert_eq!(selected_profile(&session).unwrap().name, "a");

        session.env.set_selected_profile("b").unwrap();
        assert_eq!(selected_profile(&session).unwrap().name, "b");

        session.env.set_selected_profile("gone").unwrap();
        assert_eq!(selected_profile(&session).unwrap().name, "a");
    }

    #[test]
    fn selected_profile_without_any_default_is_not_logged_in() {
        let session = TestSession::new()
            .with_profile(profile("a", false))
            .build();
        assert!(matches!(
            selected_profile(&session),
            Err(TauError::NotLoggedIn)
        ));
    }
}
