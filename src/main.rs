//! Outrig CLI entry point.

use std::ffi::OsString;
use std::fmt::Display;
use std::process::ExitCode;

use clap::Parser;
use outrig::cli::{build_resolver, Cli, CommandDispatcher, CommandRouter, Route};
use outrig::config::load_config;
use outrig::plugin::{current_environment, DispatchOutcome};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that turns on debug logging for every invocation.
const DEBUG_ENV: &str = "OUTRIG_DEBUG";

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag or `OUTRIG_DEBUG` sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr; stdout belongs to commands and plugins.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("outrig=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("outrig=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn debug_from_env() -> bool {
    std::env::var(DEBUG_ENV).is_ok_and(|v| !v.is_empty() && v != "0" && v != "false")
}

/// Log a surfaced error and pick the failure exit status.
fn report_failure(error: &dyn Display) -> ExitCode {
    tracing::error!("{}", error);
    ExitCode::from(1)
}

/// Try to hand the process to an external plugin.
///
/// Returns `None` when no plugin matched and built-in handling should run.
fn dispatch_plugin(args: &[OsString]) -> Option<ExitCode> {
    let config = match load_config(None) {
        Ok(config) => config,
        Err(e) => return Some(report_failure(&e)),
    };

    let resolver = build_resolver(&config);
    let router = CommandRouter::new();
    match router.route(args, resolver.as_ref(), &current_environment()) {
        Ok(DispatchOutcome::NoMatch) => None,
        Ok(DispatchOutcome::Executed) => Some(ExitCode::SUCCESS),
        Err(e) => {
            tracing::debug!("Plugin dispatch failed: {:?}", e);
            Some(report_failure(&e))
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let route = CommandRouter::new().classify(&args);

    // Plugin arguments belong to the plugin, so only the env var applies there
    let debug = debug_from_env() || (route == Route::Builtin && args.iter().any(|a| a == "--debug"));
    init_tracing(debug);

    tracing::debug!("Outrig starting with args: {:?}", args);

    if route == Route::Plugin {
        if let Some(code) = dispatch_plugin(&args) {
            return code;
        }
    }

    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => return report_failure(&e),
    };

    let dispatcher = CommandDispatcher::new(config);
    let mut stdout = std::io::stdout();

    match dispatcher.dispatch(&cli, &mut stdout) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => report_failure(&e),
    }
}
