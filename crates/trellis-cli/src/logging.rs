//! Tracing setup for the `trellis` binary.
//!
//! The library crates only emit events; the subscriber is installed here,
//! once, before a command runs. Events go to stderr so stdout stays usable
//! for `files`, `find` and JSON output.
//!
//! `-v` shows the synthesis driver's progress (one line per project),
//! `-vv` adds every generated file, `-vvv` additionally traces filesystem
//! and cleanup calls in `trellis-adapters`. `RUST_LOG` replaces all of it.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Install the global subscriber. With `--output-format json` events are
/// written as JSON lines, otherwise as compact text.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse(directives(args))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let base = tracing_subscriber::fmt::layer()
        .with_target(args.verbose >= 3)
        .with_writer(std::io::stderr);

    let installed = if args.output_format == OutputFormat::Json {
        registry.with(base.json().flatten_event(true)).try_init()
    } else {
        let ansi = !args.no_color && std::io::stderr().is_terminal();
        registry.with(base.compact().with_ansi(ansi)).try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

/// Level applied to the binary and `trellis-core`.
fn core_level(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Adapters log per filesystem call, so they stay at INFO until `-vvv`.
fn adapter_level(args: &GlobalArgs) -> LevelFilter {
    core_level(args).min(match args.verbose {
        0..=2 => LevelFilter::INFO,
        _ => LevelFilter::TRACE,
    })
}

fn directives(args: &GlobalArgs) -> String {
    let core = core_level(args);
    format!(
        "trellis={core},trellis_core={core},trellis_adapters={}",
        adapter_level(args)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn global(argv: &[&str]) -> GlobalArgs {
        let mut full = vec!["trellis"];
        full.extend_from_slice(argv);
        full.push("synth");
        Cli::try_parse_from(full).unwrap().global
    }

    #[test]
    fn default_is_warn_everywhere() {
        assert_eq!(
            directives(&global(&[])),
            "trellis=warn,trellis_core=warn,trellis_adapters=warn"
        );
    }

    #[test]
    fn double_verbose_keeps_adapters_at_info() {
        let args = global(&["-vv", "-C", "packages/api"]);
        assert_eq!(core_level(&args), LevelFilter::DEBUG);
        assert_eq!(adapter_level(&args), LevelFilter::INFO);
    }

    #[test]
    fn triple_verbose_traces_adapters() {
        let args = global(&["-vvv"]);
        assert_eq!(adapter_level(&args), LevelFilter::TRACE);
        assert_eq!(core_level(&global(&["-vvvvv"])), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_only_reports_errors() {
        let args = global(&["--quiet", "--dir", "/tmp"]);
        assert_eq!(
            directives(&args),
            "trellis=error,trellis_core=error,trellis_adapters=error"
        );
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["trellis", "-q", "-v", "synth"]).is_err());
    }
}
