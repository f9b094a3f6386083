//! `figura`: replay a script against a headless canvas.

use clap::Parser;
use figura_app::{AppError, Script, run_script};
use figura_core::EditorConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Replay event snapshots and toolbar actions on a headless canvas
#[derive(Parser, Debug)]
#[command(name = "figura")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON script of steps to replay
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Editor configuration (JSON)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let script = Script::load(&cli.script)?;
    log::info!("Replaying {} steps from {}", script.steps.len(), cli.script.display());

    let summary = run_script(&script, &config)?;
    print!("{summary}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("figura: {err}");
            ExitCode::FAILURE
        }
    }
}
