//! Millia editor
//!
//! Usage: `millia [FILE]`

use std::fs::OpenOptions;
use std::io;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use millia::config::{CliArgs, Config};
use millia::session::HELP_MESSAGE;
use millia::tty::{self, RawMode, TtyInput};
use millia::{EditSession, EditorResult, FsStorage, Viewport};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Configuration problems are reported before the screen is taken over
    let config = match Config::load_with_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config) {
        eprintln!("Failed to open log file: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("Starting Millia");

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal error: {}", e);
            eprintln!("millia: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to the configured file; the terminal is busy drawing the editor
fn init_logging(config: &Config) -> io::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn run(args: &CliArgs, config: &Config) -> EditorResult<()> {
    // Restores the terminal on every way out of this function, panics included
    let _raw = RawMode::enable()?;
    let (rows, cols) = tty::window_size()?;

    let mut session = EditSession::new(
        TtyInput,
        io::stdout(),
        FsStorage,
        Viewport::for_window(rows, cols),
        config.session_options(),
    );
    if let Some(path) = &args.file {
        session.open(path)?;
    }
    session.set_message(HELP_MESSAGE);

    session.run()
}
