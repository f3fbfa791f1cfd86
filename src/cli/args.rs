//! CLI argument definitions for `navigator`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use academic_navigator::config::ConfigOverrides;
use academic_navigator::core::models::{Day, EntryColor, Grade, SemesterId};
use academic_navigator::core::mutations::AttendanceField;
use academic_navigator::core::report::ReportFormat;
use academic_navigator::core::schedule::parse_hour;
use academic_navigator::logger::Level;

/// CLI log level argument
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

/// Parse `HH:MM` or a fractional hour
fn hour_arg(value: &str) -> Result<f64, String> {
    parse_hour(value).ok_or_else(|| format!("Invalid time: '{value}' (use HH:MM or e.g. 10.5)"))
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key (e.g., `level`, `data_file`, `base_url`)
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
    /// Reset one configuration value to its default.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum SemesterCommand {
    /// List semesters with their averages.
    List,
    /// Add the next semester and make it current.
    Add,
    /// Remove a semester and all of its subjects.
    Remove {
        /// Semester id
        id: SemesterId,
    },
    /// Make a semester the current one.
    Select {
        /// Semester id
        id: SemesterId,
    },
}

#[derive(Debug, Subcommand)]
pub enum SubjectCommand {
    /// List the subjects of a semester.
    List {
        /// Semester id (defaults to the current semester)
        #[arg(short, long)]
        semester: Option<SemesterId>,
    },
    /// Add a subject.
    Add {
        /// Subject name
        name: String,
        /// Credit weight
        credits: u32,
        /// Grade: a number, a letter (O, A+, A, B+, B, C, P, F) or N/A
        #[arg(short, long, default_value = "N/A")]
        grade: Grade,
        /// Semester id (defaults to the current semester)
        #[arg(short, long)]
        semester: Option<SemesterId>,
    },
    /// Remove a subject.
    Remove {
        /// Subject id
        id: String,
        /// Semester id (defaults to the current semester)
        #[arg(short, long)]
        semester: Option<SemesterId>,
    },
    /// Change fields of a subject.
    Update {
        /// Subject id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New credit weight
        #[arg(long)]
        credits: Option<u32>,
        /// New grade (number, letter or N/A)
        #[arg(short, long)]
        grade: Option<Grade>,
        /// Semester id (defaults to the current semester)
        #[arg(short, long)]
        semester: Option<SemesterId>,
    },
}

#[derive(Debug, Subcommand)]
pub enum AttendanceCommand {
    /// Show attendance for a semester.
    Show {
        /// Semester id (defaults to the current semester)
        #[arg(short, long)]
        semester: Option<SemesterId>,
    },
    /// Add a (possibly negative) delta to `attended` or `total`.
    Adjust {
        /// Subject id
        subject: String,
        /// Counter to change: attended or total
        field: AttendanceField,
        /// Amount to add, e.g. 1 or -1
        #[arg(allow_negative_numbers = true)]
        delta: i64,
        /// Semester id (defaults to the current semester)
        #[arg(short, long)]
        semester: Option<SemesterId>,
    },
    /// Overwrite both counters.
    Set {
        /// Subject id
        subject: String,
        /// Classes attended
        attended: u32,
        /// Classes held
        total: u32,
        /// Semester id (defaults to the current semester)
        #[arg(short, long)]
        semester: Option<SemesterId>,
    },
    /// Record one held class.
    Mark {
        /// Subject id
        subject: String,
        /// The class was missed
        #[arg(long)]
        absent: bool,
        /// Semester id (defaults to the current semester)
        #[arg(short, long)]
        semester: Option<SemesterId>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TimetableCommand {
    /// Show the weekly grid, or one day's classes.
    Show {
        /// Day (e.g., monday or mon)
        day: Option<Day>,
    },
    /// Show the class running now and the next one today.
    Now,
    /// Add a class.
    Add {
        /// Day
        day: Day,
        /// Abbreviation shown in the grid
        short_name: String,
        /// Start time (HH:MM)
        #[arg(value_parser = hour_arg)]
        start: f64,
        /// End time (HH:MM)
        #[arg(value_parser = hour_arg)]
        end: f64,
        /// Full subject name (defaults to the abbreviation)
        #[arg(long)]
        full_name: Option<String>,
        /// Room
        #[arg(long, default_value = "")]
        room: String,
        /// Colour tag
        #[arg(long)]
        color: Option<EntryColor>,
        /// Add even if it overlaps another class
        #[arg(long)]
        allow_overlap: bool,
    },
    /// Change fields of a class.
    Update {
        /// Day
        day: Day,
        /// Entry id
        id: String,
        /// New abbreviation
        #[arg(long)]
        short_name: Option<String>,
        /// New full name
        #[arg(long)]
        full_name: Option<String>,
        /// New room
        #[arg(long)]
        room: Option<String>,
        /// New start time
        #[arg(long, value_parser = hour_arg)]
        start: Option<f64>,
        /// New end time
        #[arg(long, value_parser = hour_arg)]
        end: Option<f64>,
        /// New colour tag
        #[arg(long)]
        color: Option<EntryColor>,
    },
    /// Remove a class.
    Remove {
        /// Day
        day: Day,
        /// Entry id
        id: String,
    },
    /// Move a class to another day/time, keeping its duration.
    Move {
        /// Current day
        from: Day,
        /// Destination day
        to: Day,
        /// Entry id
        id: String,
        /// New start time
        #[arg(value_parser = hour_arg)]
        start: f64,
    },
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
    /// Dashboard: averages, target progress, attendance alerts and today's classes.
    Summary {
        /// Semester id (defaults to the current semester)
        #[arg(short, long)]
        semester: Option<SemesterId>,
    },
    /// Manage semesters.
    Semester {
        #[command(subcommand)]
        action: SemesterCommand,
    },
    /// Manage subjects.
    Subject {
        #[command(subcommand)]
        action: SubjectCommand,
    },
    /// Track attendance.
    Attendance {
        #[command(subcommand)]
        action: AttendanceCommand,
    },
    /// Set the target cumulative average (clamped to 0-10).
    Target {
        /// Target average
        value: f64,
    },
    /// Manage the weekly timetable.
    Timetable {
        #[command(subcommand)]
        action: TimetableCommand,
    },
    /// Replace semesters and subjects from a JSON file (the timetable is kept).
    Import {
        /// JSON file to import
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Export semesters with computed averages as JSON.
    Export {
        /// Output file (prints to stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Generate a printable progress report.
    Report {
        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: ReportFormat,
        /// Output file path (defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print a share link carrying a compressed snapshot of the data.
    Share {
        /// Base URL for the link (defaults to config `base_url`)
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
    },
    /// Replace the stored data with the snapshot in a share link.
    Open {
        /// Share link or bare payload
        #[arg(value_name = "LINK")]
        link: String,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "navigator",
    about = "Track subjects, grades, attendance and your weekly timetable",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Use this data file instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Write reports to this directory instead of the configured one
    #[arg(long, value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides for this run
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: None,
            file: self.log_file.as_ref().map(path),
            verbose: self.verbose.then_some(true),
            data_file: self.data_file.as_ref().map(path),
            reports_dir: self.reports_dir.as_ref().map(path),
            base_url: match &self.command {
                Command::Share { base_url } => base_url.clone(),
                _ => None,
            },
        }
    }
}
