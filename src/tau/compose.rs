//! # Command Composition
//!
//! Resources do not build their own `new`/`list`/`select`/... commands. Each one
//! publishes a [`CapabilityDescriptor`]: for every [`Verb`] it answers with either
//! [`Implementation::NotImplemented`] or a [`VerbCommand`] (clap arguments plus the
//! action to run). [`compose`] walks the descriptors in registration order and
//! attaches each implemented command under its verb.
//!
//! ```text
//! tau select network --fqdn example.org
//!     │      │
//!     │      └── sub-command contributed by the `network` descriptor
//!     └───────── verb from the fixed verb table
//! ```
//!
//! Invariants of the resulting [`CommandTree`]:
//! - sub-commands under a verb keep resource registration order
//! - a verb with no attached sub-command is left out entirely
//! - verbs keep [`Verb::ALL`] order
//! - `list` sub-commands carry plural aliases (see [`crate::alias`])
//!
//! Composition runs once at startup and the tree is never mutated afterwards.

use crate::alias::pluralize;
use crate::commands::{CmdResult, Session};
use crate::error::Result;
use crate::verbs::Verb;
use clap::{Arg, ArgMatches, Command};

/// The body of a resource sub-command.
pub type Action = fn(&mut Session, &ArgMatches) -> Result<CmdResult>;

const NAME_ARG: &str = "name_arg";
const NAME_FLAG: &str = "name";

/// Options a resource shares with every verb it implements.
#[derive(Debug, Clone)]
pub struct ResourceBase {
    pub name: &'static str,
    pub about: &'static str,
    /// Whether sub-commands accept a resource name (positional or `--name`).
    pub takes_name: bool,
}

impl ResourceBase {
    pub fn new(name: &'static str, about: &'static str) -> Self {
        Self {
            name,
            about,
            takes_name: false,
        }
    }

    pub fn with_name_arg(mut self) -> Self {
        self.takes_name = true;
        self
    }
}

/// A verb-specific sub-command before it is attached to its verb.
pub struct VerbCommand {
    command: Command,
    action: Action,
}

impl VerbCommand {
    pub fn new(action: Action) -> Self {
        Self {
            command: Command::new(""),
            action,
        }
    }

    pub fn about(mut self, about: &'static str) -> Self {
        self.command = self.command.about(about);
        self
    }

    pub fn arg(mut self, arg: Arg) -> Self {
        self.command = self.command.arg(arg);
        self
    }

    /// Applies the base options: the resource name becomes the command name,
    /// a missing description is derived from the verb, and resources that take
    /// a name get the shared name arguments.
    fn initialize(self, verb: Verb, base: &ResourceBase) -> ResourceCommand {
        let mut command = self.command.name(base.name);
        if command.get_about().is_none() {
            command = command.about(format!("{} ({})", verb.about(), base.about));
        }
        if base.takes_name && verb != Verb::List {
            command = command
                .arg(
                    Arg::new(NAME_ARG)
                        .value_name("NAME")
                        .help(verb.name_usage(base.name))
                        .conflicts_with(NAME_FLAG),
                )
                .arg(
                    Arg::new(NAME_FLAG)
                        .long("name")
                        .short('n')
                        .value_name("NAME")
                        .help(verb.name_usage(base.name)),
                );
        }

        ResourceCommand {
            resource: base.name,
            command,
            action: self.action,
        }
    }
}

/// Whether a resource implements a verb. Checked before anything is attached.
pub enum Implementation {
    NotImplemented,
    Implemented(VerbCommand),
}

impl From<VerbCommand> for Implementation {
    fn from(command: VerbCommand) -> Self {
        Implementation::Implemented(command)
    }
}

/// A resource's declaration of which verbs it supports.
pub trait CapabilityDescriptor {
    fn base(&self) -> ResourceBase;

    fn implementation(&self, verb: Verb) -> Implementation;
}

/// A resource sub-command attached under a verb.
pub struct ResourceCommand {
    pub resource: &'static str,
    pub command: Command,
    action: Action,
}

impl ResourceCommand {
    pub fn run(&self, session: &mut Session, matches: &ArgMatches) -> Result<CmdResult> {
        (self.action)(session, matches)
    }
}

pub struct ComposedCommand {
    pub verb: Verb,
    pub subcommands: Vec<ResourceCommand>,
}

impl ComposedCommand {
    fn command(&self) -> Command {
        self.verb
            .base_command()
            .subcommands(self.subcommands.iter().map(|sub| sub.command.clone()))
    }

    pub fn resources(&self) -> Vec<&'static str> {
        self.subcommands.iter().map(|sub| sub.resource).collect()
    }
}

pub struct CommandTree {
    verbs: Vec<ComposedCommand>,
}

impl CommandTree {
    pub fn verbs(&self) -> &[ComposedCommand] {
        &self.verbs
    }

    pub fn verb(&self, verb: Verb) -> Option<&ComposedCommand> {
        self.verbs.iter().find(|composed| composed.verb == verb)
    }

    pub fn find(&self, verb: Verb, resource: &str) -> Option<&ResourceCommand> {
        self.verb(verb)?
            .subcommands
            .iter()
            .find(|sub| sub.resource == resource)
    }

    /// Adds every composed verb to `root`, in verb table order.
    pub fn register(&self, root: Command) -> Command {
        self.verbs
            .iter()
            .fold(root, |root, composed| root.subcommand(composed.command()))
    }

    /// Runs the resource sub-command selected in `matches`.
    ///
    /// Returns `None` when the matched top-level command is not a composed verb.
    pub fn dispatch(
        &self,
        session: &mut Session,
        matches: &ArgMatches,
    ) -> Option<Result<CmdResult>> {
        let (verb_name, verb_matches) = matches.subcommand()?;
        let verb = Verb::from_name(verb_name)?;
        let (resource, sub_matches) = verb_matches.subcommand()?;
        let command = self.find(verb, resource)?;

        tracing::debug!(verb = %verb, resource, "dispatching resource command");
        Some(command.run(session, sub_matches))
    }
}

pub fn compose(resources: &[Box<dyn CapabilityDescriptor>]) -> CommandTree {
    let mut verbs: Vec<ComposedCommand> = Verb::ALL
        .iter()
        .map(|&verb| ComposedCommand {
            verb,
            subcommands: Vec::new(),
        })
        .collect();

    for resource in resources {
        let base = resource.base();
        for composed in verbs.iter_mut() {
            if let Implementation::Implemented(command) = resource.implementation(composed.verb) {
                let mut attached = command.initialize(composed.verb, &base);
                if composed.verb == Verb::List {
                    attached.command = attached.command.aliases(pluralize(base.name));
                }
                composed.subcommands.push(attached);
            }
        }
    }

    verbs.retain(|composed| !composed.subcommands.is_empty());
    CommandTree { verbs }
}

/// The resource name given either positionally or through `--name`.
pub fn selected_name(matches: &ArgMatches) -> Option<String> {
    [NAME_FLAG, NAME_ARG].iter().find_map(|id| {
        matches
            .try_get_one::<String>(id)
            .ok()
            .flatten()
            .cloned()
    })
}
