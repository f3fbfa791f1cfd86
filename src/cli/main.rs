//! Command-line interface entry point for `academic-navigator`

mod args;
mod commands;

use academic_navigator::config::Config;
use academic_navigator::info;
use academic_navigator::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use args::{Cli, Command};
use clap::Parser;
use commands::Session;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

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

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
            Ok(())
        }
        Command::Summary { semester } => commands::summary::run(&Session::open(&config), semester),
        Command::Semester { action } => commands::semester::run(action, &mut Session::open(&config)),
        Command::Subject { action } => commands::subject::run(action, &mut Session::open(&config)),
        Command::Attendance { action } => {
            commands::attendance::run(action, &mut Session::open(&config))
        }
        Command::Target { value } => commands::semester::set_target(&mut Session::open(&config), value),
        Command::Timetable { action } => {
            commands::timetable::run(action, &mut Session::open(&config))
        }
        Command::Import { file } => commands::data::import(&mut Session::open(&config), &file),
        Command::Export { output } => commands::data::export(&Session::open(&config), output.as_deref()),
        Command::Report { format, output } => {
            commands::report::run(&Session::open(&config), format, output.as_deref(), &config)
        }
        Command::Share { .. } => commands::data::share(&Session::open(&config), &config.share.base_url),
        Command::Open { link } => commands::data::open(&mut Session::open(&config), &link),
    };

    if let Err(e) = result {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}
