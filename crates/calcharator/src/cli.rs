//! Command-line arguments using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::StartScreen;

/// calcharator: terminal calculator and scratchpad
#[derive(Parser, Debug)]
#[command(name = "calcharator")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Use radians for trigonometric functions instead of degrees
    #[arg(long)]
    pub radians: bool,

    /// Start the calculator with the scientific rows visible
    #[arg(long)]
    pub scientific: bool,

    /// Initial screen
    #[arg(long, value_enum, default_value = "home")]
    pub start: StartArg,

    /// Evaluate one expression, print the result and exit
    #[arg(short, long, value_name = "EXPR")]
    pub eval: Option<String>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH", env = "CALCHARATOR_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

/// Initial screen argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StartArg {
    /// Menu
    #[default]
    Home,
    /// Calculator
    Calculator,
    /// Scratch text
    Editor,
}

impl From<StartArg> for StartScreen {
    fn from(arg: StartArg) -> Self {
        match arg {
            StartArg::Home => Self::Home,
            StartArg::Calculator => Self::Calculator,
            StartArg::Editor => Self::Editor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["calcharator"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(!cli.radians);
        assert!(!cli.scientific);
        assert_eq!(cli.start, StartArg::Home);
        assert!(cli.eval.is_none());
        assert!(!cli.print_config);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "calcharator",
            "-vv",
            "--radians",
            "--scientific",
            "--start",
            "editor",
            "--log-file",
            "/tmp/calc.log",
            "--print-config",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.radians);
        assert!(cli.scientific);
        assert_eq!(cli.start, StartArg::Editor);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/calc.log")));
        assert!(cli.print_config);
    }

    #[test]
    fn test_eval_short_flag() {
        let cli = Cli::try_parse_from(["calcharator", "-e", "2+2"]).unwrap();
        assert_eq!(cli.eval.as_deref(), Some("2+2"));
    }

    #[test]
    fn test_unknown_start_rejected() {
        assert!(Cli::try_parse_from(["calcharator", "--start", "settings"]).is_err());
    }

    #[test]
    fn test_start_arg_conversion() {
        assert_eq!(StartScreen::from(StartArg::Home), StartScreen::Home);
        assert_eq!(StartScreen::from(StartArg::Calculator), StartScreen::Calculator);
        assert_eq!(StartScreen::from(StartArg::Editor), StartScreen::Editor);
    }
}
