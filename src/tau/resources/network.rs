use crate::commands::network::{self, NetworkOptions};
use crate::commands::{CmdResult, Session};
use crate::compose::{CapabilityDescriptor, Implementation, ResourceBase, VerbCommand};
use crate::error::Result;
use crate::verbs::Verb;
use clap::{Arg, ArgMatches};

pub struct NetworkResource;

fn select_network(session: &mut Session, matches: &ArgMatches) -> Result<CmdResult> {
    let options = NetworkOptions {
        fqdn: matches.get_one::<String>("fqdn").cloned(),
        universe: matches.get_one::<String>("universe").cloned(),
    };
    network::select(session, &options)
}

fn list_networks(session: &mut Session, _: &ArgMatches) -> Result<CmdResult> {
    network::list(session)
}

fn query_network(session: &mut Session, _: &ArgMatches) -> Result<CmdResult> {
    network::query(session)
}

impl CapabilityDescriptor for NetworkResource {
    fn base(&self) -> ResourceBase {
        ResourceBase::new("network", "the cloud the selected profile targets")
    }

    fn implementation(&self, verb: Verb) -> Implementation {
        match verb {
            // Exclusivity is checked by the resolver so the error names both flags.
            Verb::Select => VerbCommand::new(select_network)
                .about("Select the network to work with")
                .arg(
                    Arg::new("fqdn")
                        .long("fqdn")
                        .short('f')
                        .value_name("FQDN")
                        .help("Domain of a remote network"),
                )
                .arg(
                    Arg::new("universe")
                        .long("universe")
                        .short('u')
                        .value_name("UNIVERSE")
                        .help("Universe of the ephemeral cloud"),
                )
                .into(),
            Verb::List => VerbCommand::new(list_networks)
                .about("List networks used by the selected profile")
                .into(),
            Verb::Query => VerbCommand::new(query_network)
                .about("Show the selected network")
                .into(),
            _ => Implementation::NotImplemented,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::error::TauError;
    use crate::test_utils::{profile, FakeCloud, TestSession};

    fn run(args: &[&str], session: &mut Session) -> Result<CmdResult> {
        let registry: Vec<Box<dyn CapabilityDescriptor>> = vec![Box::new(NetworkResource)];
        let tree = compose(&registry);
        let root = tree.register(clap::Command::new("tau"));
        let matches = root.try_get_matches_from(args).unwrap();
        tree.dispatch(session, &matches).unwrap()
    }

    #[test]
    fn both_flags_reach_the_resolver_as_a_conflict() {
        let fixture = TestSession::new().with_profile(profile("a", true));
        let mut session = fixture.build();
        let err = run(
            &["tau", "select", "network", "-f", "x.example.org", "-u", "y"],
            &mut session,
        )
        .unwrap_err();
        assert!(matches!(err, TauError::UsageConflict { .. }));
        assert_eq!(fixture.cloud.calls(), 0);
    }

    #[test]
    fn select_universe_by_flag() {
        let fixture = TestSession::new()
            .with_profile(profile("a", true))
            .cloud(FakeCloud::live(&["blue"]));
        let mut session = fixture.build();
        run(&["tau", "select", "network", "--universe", "blue"], &mut session).unwrap();
        assert_eq!(session.store.get("a").unwrap().network, "blue");
    }

    #[test]
    fn network_takes_no_name() {
        let registry: Vec<Box<dyn CapabilityDescriptor>> = vec![Box::new(NetworkResource)];
        let tree = compose(&registry);
        let select = tree.find(Verb::Select, "network").unwrap();
        assert!(select.command.get_arguments().all(|a| a.get_id() != "name"));
    }
}
