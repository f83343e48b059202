//! Command-line interface entry point for `NuRoadmap`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use commands::move_course::MoveRequest;
use nu_roadmap::config::Config;
use nu_roadmap::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use nu_roadmap::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let outcome = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults).map(|()| true)
        }
        Command::Schedule {
            input_file,
            output,
            save,
        } => commands::schedule::run(&input_file, output.as_deref(), save, &config).map(|()| true),
        Command::Validate { courses, plan } => commands::validate::run(&courses, &plan, &config),
        Command::Move {
            courses,
            plan,
            course,
            to,
            from,
            force,
            output,
        } => commands::move_course::run(
            &MoveRequest {
                courses: &courses,
                plan: &plan,
                course: &course,
                to: &to,
                from: from.as_deref(),
                force,
                output: output.as_deref(),
            },
            &config,
        ),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
