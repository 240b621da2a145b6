//! The fixed table of generic verbs.
//!
//! Every resource hangs its sub-commands off these verbs, so `tau select network`
//! and `tau select profile` share the `select` entry point. The order of
//! [`Verb::ALL`] is the order verbs appear in help and completion.

use clap::Command;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    New,
    Edit,
    Delete,
    Query,
    List,
    Select,
    Clone,
    Push,
    Pull,
    Checkout,
    Import,
}

impl Verb {
    pub const ALL: [Verb; 11] = [
        Verb::New,
        Verb::Edit,
        Verb::Delete,
        Verb::Query,
        Verb::List,
        Verb::Select,
        Verb::Clone,
        Verb::Push,
        Verb::Pull,
        Verb::Checkout,
        Verb::Import,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Verb::New => "new",
            Verb::Edit => "edit",
            Verb::Delete => "delete",
            Verb::Query => "query",
            Verb::List => "list",
            Verb::Select => "select",
            Verb::Clone => "clone",
            Verb::Push => "push",
            Verb::Pull => "pull",
            Verb::Checkout => "checkout",
            Verb::Import => "import",
        }
    }

    pub fn about(self) -> &'static str {
        match self {
            Verb::New => "Create a resource",
            Verb::Edit => "Edit a resource",
            Verb::Delete => "Delete a resource",
            Verb::Query => "Show details of a resource",
            Verb::List => "List resources",
            Verb::Select => "Select the resource to work with",
            Verb::Clone => "Clone a resource",
            Verb::Push => "Push local changes of a resource",
            Verb::Pull => "Pull remote changes of a resource",
            Verb::Checkout => "Check out a branch of a resource",
            Verb::Import => "Import an existing resource",
        }
    }

    /// Help for the name argument a resource receives under this verb.
    pub fn name_usage(self, resource: &str) -> String {
        format!("Name of the {} to {}", resource, self.name())
    }

    /// The bare verb command, before any resource is attached.
    pub fn base_command(self) -> Command {
        Command::new(self.name())
            .about(self.about())
            .subcommand_required(true)
            .arg_required_else_help(true)
    }

    pub fn from_name(name: &str) -> Option<Verb> {
        Verb::ALL.iter().copied().find(|verb| verb.name() == name)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_is_fixed() {
        let names: Vec<&str> = Verb::ALL.iter().map(|v| v.name()).collect();
        assert_eq!(
            names,
            vec![
                "new", "edit", "delete", "query", "list", "select", "clone", "push", "pull",
                "checkout", "import"
            ]
        );
    }

    #[test]
    fn names_round_trip() {
        for verb in Verb::ALL {
            assert_eq!(Verb::from_name(verb.name()), Some(verb));
        }
        assert_eq!(Verb::from_name("login"), None);
    }

    #[test]
    fn name_usage_mentions_resource_and_verb() {
        assert_eq!(Verb::Delete.name_usage("profile"), "Name of the profile to delete");
    }

    #[test]
    fn base_command_requires_a_resource() {
        let cmd = Verb::Select.base_command();
        assert_eq!(cmd.get_name(), "select");
        assert!(cmd.is_subcommand_required_set());
    }
}
