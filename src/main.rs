//! extension-gate CLI entry point.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use extension_gate::cli::{Cli, CommandDispatcher};
use extension_gate::GateError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so command output stays parseable.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("extension_gate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("extension_gate=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Exit code for errors that stop a command before it can decide.
fn error_exit_code(error: &GateError) -> u8 {
    match error {
        GateError::ConfigNotFound { .. }
        | GateError::ConfigParseError { .. }
        | GateError::InvalidCallback { .. } => 2,
        _ => 1,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("extension-gate starting with args: {:?}", cli);

    if cli.no_color {
        console::set_colors_enabled(false);
    }
    let color = !cli.no_color && console::colors_enabled();

    let project_root = cli
        .project
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let dispatcher = CommandDispatcher::new(project_root).with_color(color);
    let mut stdout = io::stdout().lock();

    let code = match dispatcher.dispatch(&cli, &mut stdout) {
        Ok(result) => result.exit_code as u8,
        Err(e) => {
            eprintln!(
                "{} {}",
                console::style("Error:").red().bold(),
                e
            );
            error_exit_code(&e)
        }
    };

    let _ = stdout.flush();
    ExitCode::from(code)
}
