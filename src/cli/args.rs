//! CLI argument definitions for `NuRoadmap`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use nu_roadmap::config::ConfigOverrides;
use nu_roadmap::logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `out_dir`, `max_credits`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Build a semester roadmap from a course list.
    ///
    /// Reads a course list (.json, .toml or curriculum .csv), prints the
    /// roadmap and optionally saves the semester assignments.
    Schedule {
        /// Path to the course list
        #[arg(value_name = "COURSES")]
        input_file: PathBuf,

        /// Write semester assignments to this file (.json or .csv)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Save semester assignments to the configured `out_dir`
        #[arg(long)]
        save: bool,
    },
    /// Check a saved roadmap for prerequisite ordering violations.
    ///
    /// Exits with status 1 when violations are found.
    Validate {
        /// Path to the course list
        #[arg(value_name = "COURSES")]
        courses: PathBuf,

        /// Path to saved semester assignments (.json or .csv)
        #[arg(value_name = "PLAN")]
        plan: PathBuf,
    },
    /// Move a course to another semester in a saved roadmap.
    ///
    /// The move always happens; the result is validated before saving and is
    /// only written when clean, or when --force is given.
    Move {
        /// Path to the course list
        #[arg(value_name = "COURSES")]
        courses: PathBuf,

        /// Path to saved semester assignments (.json or .csv)
        #[arg(value_name = "PLAN")]
        plan: PathBuf,

        /// Course code to move
        #[arg(value_name = "COURSE")]
        course: String,

        /// Destination: `backlog`, `semester-N`, or N
        #[arg(value_name = "TO")]
        to: String,

        /// Expected source bucket; the move fails if the course is elsewhere
        #[arg(long, value_name = "FROM")]
        from: Option<String>,

        /// Save even when the edited roadmap has violations
        #[arg(long)]
        force: bool,

        /// Write the edited assignments here instead of overwriting PLAN
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "nuroadmap",
    about = "NuRoadmap command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config output directory
    #[arg(long = "config-out-dir", value_name = "DIR")]
    pub config_out_dir: Option<PathBuf>,

    /// Override config output directory (short form)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Override the per-semester credit cap for this run
    #[arg(long = "max-credits", value_name = "CREDITS")]
    pub max_credits: Option<u32>,

    /// Override the number of semesters for this run
    #[arg(long = "semesters", value_name = "COUNT")]
    pub semesters: Option<u8>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--out-dir`) take precedence over long-form
    /// flags (e.g., `--config-out-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            out_dir: self
                .out_dir
                .as_ref()
                .or(self.config_out_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
            max_credits: self.max_credits,
            semesters: self.semesters,
        }
    }
}
