use super::prompt::DialoguerPrompter;
use super::render::print_result;
use super::setup::{
    build_command, completion_script, get_version, login_options, ColorMode, CompletionShell,
    Environment,
};
use clap::ArgMatches;
use tau::commands::{current, login, CmdResult, Session};
use tau::compose::{compose, CommandTree};
use tau::config::{TauConfig, TauPaths};
use tau::error::{Result, TauError};
use tau::remote::dream::DreamClient;
use tau::remote::seer::SeerValidator;
use tau::remote::session::FileSession;
use tau::resources::registry;
use tau::store::fs::FileProfileStore;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let tree = compose(&registry());
    let matches = build_command(&tree).get_matches();

    let environment = matches
        .get_one::<Environment>("env")
        .copied()
        .unwrap_or(Environment::Prod);
    init_tracing(environment);
    apply_color(
        matches
            .get_one::<ColorMode>("color")
            .copied()
            .unwrap_or(ColorMode::Auto),
    );

    // These need neither the store nor any collaborator.
    match matches.subcommand() {
        Some(("completions", sub)) => {
            let shell = sub
                .get_one::<CompletionShell>("shell")
                .copied()
                .ok_or_else(|| TauError::Config("no shell given".into()))?;
            print!("{}", completion_script(&tree, shell));
            return Ok(());
        }
        Some(("version", _)) => {
            println!("tau {}", get_version());
            return Ok(());
        }
        _ => {}
    }

    let mut session = init_session()?;
    let result = dispatch(&tree, &mut session, &matches)?;
    print_result(&result);
    Ok(())
}

fn dispatch(tree: &CommandTree, session: &mut Session, matches: &ArgMatches) -> Result<CmdResult> {
    match matches.subcommand() {
        Some(("login", sub)) => login::run(session, &login_options(sub)),
        Some(("current", _)) => current::current(session),
        Some(("exit", _)) => current::exit(session),
        Some((name, _)) => tree
            .dispatch(session, matches)
            .unwrap_or_else(|| Err(TauError::Config(format!("unknown command `{}`", name)))),
        None => Err(TauError::Config("no command given".into())),
    }
}

/// Logs go to stderr so stdout only carries command output.
/// `RUST_LOG` takes precedence over the environment's default filter.
fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(environment.default_filter()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn apply_color(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }
}

fn init_session() -> Result<Session> {
    let paths = TauPaths::resolve()?;
    let config = TauConfig::load(&paths.root)?;
    tracing::debug!(home = %paths.root.display(), "resolved tau home");

    Ok(Session {
        store: Box::new(FileProfileStore::new(paths.profiles())),
        prompter: Box::new(DialoguerPrompter),
        cloud: Box::new(DreamClient::new(config.dream_url.clone(), config.timeout())),
        validator: Box::new(SeerValidator::new(config.seer_probe.clone(), config.timeout())),
        env: Box::new(FileSession::new(paths.session())),
    })
}
