//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::core::{AngleMode, EngineConfig};

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Warnings and errors
    #[default]
    Normal,
    /// Informational events
    Verbose,
    /// Every edit
    Debug,
}

impl Verbosity {
    /// From the `-q` flag and `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default log filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Screen shown at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartScreen {
    /// Menu
    #[default]
    Home,
    /// Calculator
    Calculator,
    /// Scratch text
    Editor,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Evaluator settings, fixed for the whole run
    pub engine: EngineConfig,
    /// Screen shown at startup
    pub start: StartScreen,
    /// Whether calculator sessions open with the scientific rows visible
    pub scientific: bool,
    /// Log destination; `None` logs to stderr outside the TUI and nowhere inside it
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the trigonometric angle mode
    #[must_use]
    pub const fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.engine = self.engine.with_angle_mode(angle_mode);
        self
    }

    /// Set the start screen
    #[must_use]
    pub const fn with_start(mut self, start: StartScreen) -> Self {
        self.start = start;
        self
    }

    /// Set scientific mode on calculator entry
    #[must_use]
    pub const fn with_scientific(mut self, scientific: bool) -> Self {
        self.scientific = scientific;
        self
    }

    /// Set the log file
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }
}

impl From<&Cli> for AppConfig {
    fn from(cli: &Cli) -> Self {
        let angle_mode = if cli.radians {
            AngleMode::Radians
        } else {
            AngleMode::Degrees
        };
        Self::new()
            .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
            .with_angle_mode(angle_mode)
            .with_start(cli.start.into())
            .with_scientific(cli.scientific)
            .with_log_file(cli.log_file.clone())
    }
}
