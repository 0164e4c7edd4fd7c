//! calcharator: terminal calculator and scratchpad
//!
//! ## Usage
//!
//! ```bash
//! calcharator                        # Home menu
//! calcharator --start calculator     # Straight to the calculator
//! calcharator --scientific --radians # Scientific keypad, radian trig
//! calcharator -e "sin(30)*2"         # Evaluate once and print
//! calcharator --print-config         # Show the effective configuration
//! ```

use calcharator::{
    cli::Cli,
    config::AppConfig,
    core::controller::BufferState,
    error::{AppError, AppResult},
    evaluate_line, logging, tui,
};
use clap::Parser;
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> AppResult<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::from(&cli);

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(expression) = cli.eval.as_deref() {
        return run_eval(&config, expression);
    }

    logging::init(&config, true)?;
    info!(start = ?config.start, angle_mode = ?config.engine.angle_mode, "starting");
    tui::run(&config)?;
    Ok(ExitCode::SUCCESS)
}

fn run_eval(config: &AppConfig, expression: &str) -> AppResult<ExitCode> {
    if expression.trim().is_empty() {
        return Err(AppError::config("--eval needs a non-empty expression"));
    }
    logging::init(config, false)?;

    let (text, state) = evaluate_line(config.engine, expression);
    info!(expression, result = %text, "evaluated");
    println!("{text}");

    Ok(match state {
        BufferState::Editable => ExitCode::SUCCESS,
        BufferState::ErrorDisplayed => ExitCode::FAILURE,
    })
}
