use clap::{value_parser, Arg, ArgAction, ArgMatches, Command, ValueEnum};
use clap_complete::{generate, Shell};
use tau::commands::login::{LoginOptions, PROVIDERS};
use tau::compose::{selected_name, CommandTree};

pub const ENV_VAR: &str = "TAU_ENV";
pub const COLOR_VAR: &str = "TAU_COLOR";

/// Execution environment, used to pick the default log filter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    Prod,
    Dev,
    Test,
}

impl Environment {
    pub fn default_filter(self) -> &'static str {
        match self {
            Environment::Prod => "tau=warn",
            Environment::Dev => "tau=debug",
            Environment::Test => "tau=info",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
        }
    }
}

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.4.2"
/// Format for dev builds: "v0.4.2\ndev: abc1234 2024-01-15 14:30"
pub fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

fn login_command() -> Command {
    Command::new("login")
        .about("Select a profile, or create one")
        .arg(
            Arg::new("name_arg")
                .value_name("NAME")
                .help("Name of the profile to log in with")
                .conflicts_with("name"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .short('n')
                .value_name("NAME")
                .help("Name of the profile to log in with"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .value_name("TOKEN")
                .help("Git provider token (new profiles)"),
        )
        .arg(
            Arg::new("provider")
                .long("provider")
                .value_name("PROVIDER")
                .help(format!("Git provider [{}] (new profiles)", PROVIDERS.join(", "))),
        )
        .arg(
            Arg::new("new")
                .long("new")
                .action(ArgAction::SetTrue)
                .help("Create a new profile even if others exist"),
        )
        .arg(
            Arg::new("set_default")
                .long("set-default")
                .short('d')
                .action(ArgAction::SetTrue)
                .help("Make the profile the default one"),
        )
}

/// The root command: global flags, `login`/`current`/`exit`, then the composed verbs.
pub fn build_command(tree: &CommandTree) -> Command {
    let root = Command::new("tau")
        .bin_name("tau")
        .version(get_version())
        .about("Command-line client for the tau cloud platform")
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("env")
                .long("env")
                .env(ENV_VAR)
                .global(true)
                .value_name("ENV")
                .value_parser(value_parser!(Environment))
                .default_value("prod")
                .help("Execution environment"),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .env(COLOR_VAR)
                .global(true)
                .value_name("WHEN")
                .value_parser(value_parser!(ColorMode))
                .default_value("auto")
                .help("When to color output"),
        )
        .subcommand(login_command())
        .subcommand(Command::new("current").about("Show the selected profile and network"))
        .subcommand(Command::new("exit").about("Forget the selected profile and network"));

    tree.register(root)
        .subcommand(
            Command::new("completions")
                .about("Print a shell completion script")
                .after_help("Enable completions:\n  eval \"$(tau completions bash)\"  # add to ~/.bashrc")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(value_parser!(CompletionShell))
                        .help("Shell to generate completions for"),
                ),
        )
        .subcommand(Command::new("version").about("Print the tau version"))
}

/// Completion script for the full command tree, composed verbs included.
pub fn completion_script(tree: &CommandTree, shell: CompletionShell) -> String {
    let mut command = build_command(tree);
    let mut script = Vec::new();
    generate(Shell::from(shell), &mut command, "tau", &mut script);
    String::from_utf8_lossy(&script).into_owned()
}

pub fn login_options(matches: &ArgMatches) -> LoginOptions {
    LoginOptions {
        name: selected_name(matches),
        token: matches.get_one::<String>("token").cloned(),
        provider: matches.get_one::<String>("provider").cloned(),
        new: matches.get_flag("new"),
        set_default: matches.get_flag("set_default"),
    }
}
