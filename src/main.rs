// Entrypoint for the console.
// - Registers the app and authenticates before anything else; failures
//   there end the process with an error.
// - Then hands the session and the command registry to the loop.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tootstream::{
    api::MastodonClient,
    cli::Cli,
    config::Config,
    registry::CommandRegistry,
    repl::Console,
    session,
    ui::{TerminalInput, TerminalPrompt},
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = Config::from_env()?;
    let app = session::ensure_app_registered(&config, MastodonClient::register_app)?;
    let client = MastodonClient::new(app, config.load_token()?)?;
    let session = session::start(
        &config,
        Box::new(client),
        cli.credentials(),
        &mut TerminalPrompt,
    )?;

    let registry = CommandRegistry::builtin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Console::new(&session, &registry).run(&mut TerminalInput, &mut out)
}

/// Log to stderr. `RUST_LOG` wins; otherwise warnings only, or debug with
/// `--verbose`.
fn setup_logging(verbose: bool) {
    let default = if verbose { "tootstream=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
