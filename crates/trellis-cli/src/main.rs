//! `trellis`: synthesize the project tree declared in `.trellisrc.toml`.
//!
//! Exit status: 0 on success, 2 for a bad definition or arguments, 3 when
//! something looked up does not exist, 4 for configuration problems and 1
//! for everything else (I/O, bugs).

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info_span};

use crate::{
    cli::{Cli, Commands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod definition;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here as well, on stdout.
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };

    if let Err(e) = logging::init_logging(&cli.global) {
        eprintln!("trellis: {e:#}");
        return ExitCode::from(1);
    }

    let verbose = cli.global.verbose > 0;
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err, verbose),
    }
}

/// Load configuration, then run one subcommand inside its own span so
/// every event it emits carries the command name and directory.
fn run(cli: Cli) -> CliResult<()> {
    let Cli { global, command } = cli;

    let config = AppConfig::load(global.config.as_ref()).map_err(|e| CliError::ConfigError {
        message: format!("{e:#}"),
        source: None,
    })?;
    let output = OutputManager::new(&global, &config);

    let span = info_span!(
        "command",
        name = command.name(),
        dir = ?global.dir,
    );
    let _entered = span.enter();
    debug!(format = ?output.format(), "dispatching");

    dispatch(command, &global, &config, &output)
}

fn dispatch(
    command: Commands,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    match command {
        Commands::Synth(args) => commands::synth::execute(args, global, config, output),
        Commands::Init(args) => commands::init::execute(args, global, output),
        Commands::Files(args) => commands::files::execute(args, global, output),
        Commands::Find(args) => commands::find::execute(args, global, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Log the failure, print it with its suggestions on stderr and map it to
/// an exit status.
fn report(err: CliError, verbose: bool) -> ExitCode {
    err.log();
    let rendered = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{rendered}");
    ExitCode::from(err.exit_code())
}
