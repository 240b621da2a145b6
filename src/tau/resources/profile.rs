use crate::commands::login::{self, LoginOptions};
use crate::commands::{profile, CmdResult, Session};
use crate::compose::{selected_name, CapabilityDescriptor, Implementation, ResourceBase, VerbCommand};
use crate::error::Result;
use crate::verbs::Verb;
use clap::{Arg, ArgAction, ArgMatches};

pub struct ProfileResource;

fn set_default_arg() -> Arg {
    Arg::new("set_default")
        .long("set-default")
        .short('d')
        .action(ArgAction::SetTrue)
        .help("Make this the default profile")
}

fn new_profile(session: &mut Session, matches: &ArgMatches) -> Result<CmdResult> {
    let options = LoginOptions {
        name: selected_name(matches),
        token: matches.get_one::<String>("token").cloned(),
        provider: matches.get_one::<String>("provider").cloned(),
        new: true,
        set_default: matches.get_flag("set_default"),
    };
    login::create(session, &options)
}

fn select_profile(session: &mut Session, matches: &ArgMatches) -> Result<CmdResult> {
    let name = selected_name(matches);
    profile::select(session, name.as_deref(), matches.get_flag("set_default"))
}

fn list_profiles(session: &mut Session, _: &ArgMatches) -> Result<CmdResult> {
    profile::list(session)
}

fn query_profile(session: &mut Session, matches: &ArgMatches) -> Result<CmdResult> {
    profile::query(session, selected_name(matches).as_deref())
}

fn delete_profile(session: &mut Session, matches: &ArgMatches) -> Result<CmdResult> {
    profile::delete(session, selected_name(matches).as_deref())
}

impl CapabilityDescriptor for ProfileResource {
    fn base(&self) -> ResourceBase {
        ResourceBase::new("profile", "credentials for a git provider").with_name_arg()
    }

    fn implementation(&self, verb: Verb) -> Implementation {
        match verb {
            Verb::New => VerbCommand::new(new_profile)
                .about("Create a profile")
                .arg(
                    Arg::new("token")
                        .long("token")
                        .value_name("TOKEN")
                        .help("Git provider token"),
                )
                .arg(
                    Arg::new("provider")
                        .long("provider")
                        .value_name("PROVIDER")
                        .help(format!("Git provider [{}]", login::PROVIDERS.join(", "))),
                )
                .arg(set_default_arg())
                .into(),
            Verb::Select => VerbCommand::new(select_profile)
                .about("Select the profile to work with")
                .arg(set_default_arg())
                .into(),
            Verb::List => VerbCommand::new(list_profiles).about("List profiles").into(),
            Verb::Query => VerbCommand::new(query_profile).into(),
            Verb::Delete => VerbCommand::new(delete_profile).into(),
            _ => Implementation::NotImplemented,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::test_utils::{profile, TestSession};

    fn run(args: &[&str], session: &mut Session) -> Result<CmdResult> {
        let registry: Vec<Box<dyn CapabilityDescriptor>> = vec![Box::new(ProfileResource)];
        let tree = compose(&registry);
        let root = tree.register(clap::Command::new("tau"));
        let matches = root.try_get_matches_from(args).unwrap();
        tree.dispatch(session, &matches).unwrap()
    }

    #[test]
    fn new_profile_from_flags() {
        let mut session = TestSession::new().build();
        run(
            &["tau", "new", "profile", "work", "--token", "t", "--set-default"],
            &mut session,
        )
        .unwrap();
        let list = session.store.all().unwrap();
        assert_eq!(list.names, vec!["work"]);
        assert_eq!(list.default.as_deref(), Some("work"));
    }

    #[test]
    fn select_profile_by_flag_sets_default() {
        let fixture = TestSession::new()
            .with_profile(profile("a", true))
            .with_profile(profile("b", false));
        let mut session = fixture.build();
        run(&["tau", "select", "profile", "-n", "b", "-d"], &mut session).unwrap();
        assert_eq!(session.store.all().unwrap().default.as_deref(), Some("b"));
        assert_eq!(fixture.env.state().profile.as_deref(), Some("b"));
    }

    #[test]
    fn list_profiles_through_alias() {
        let mut session = TestSession::new()
            .with_profile(profile("a", true))
            .build();
        let result = run(&["tau", "list", "profiles"], &mut session).unwrap();
        assert_eq!(result.listed_profiles.len(), 1);
    }
}
