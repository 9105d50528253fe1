/// Voxcube Terminal Demo - Point-Cloud Cube
///
/// Renders a cube as eight depth-scaled point clusters.
/// Controls:
///   - WASD / QE: Move the cube
///   - X / Y / Z: Rotate
///   - Up / Down: Scale
///   - Backspace: Reset
///   - Esc: Quit

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use voxcube_core::Session;
use voxcube_terminal::cli::Cli;
use voxcube_terminal::TerminalApp;

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    // Misconfiguration fails here, before the terminal is touched
    let session = Session::new(cli.session_config()).context("invalid session configuration")?;

    println!("Starting voxcube terminal renderer (press Esc to quit)...");

    let mut app = TerminalApp::new(session).context("no terminal surface available")?;
    app.run()?;

    println!("Thank you for using Voxcube!");
    Ok(())
}
