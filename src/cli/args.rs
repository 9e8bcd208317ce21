//! CLI argument definitions for `Libretto`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use libretto::config::ConfigOverrides;
use libretto::logger::Level;

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
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `records_file`)
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
    /// Open the interactive menu (default when no command is given).
    Menu,
    /// List completed and pending exams with a summary line.
    List,
    /// Add an exam, optionally with its grade.
    Add {
        /// Exam name
        #[arg(long)]
        name: String,
        /// Exam credits (CFU)
        #[arg(long, value_name = "CFU")]
        credits: String,
        /// Grade 18-30, or 30L for honors
        #[arg(long)]
        grade: Option<String>,
        /// Exam date (DD-MM-YYYY)
        #[arg(long)]
        date: Option<String>,
    },
    /// Give a grade to the N-th pending exam.
    Record {
        /// 1-based index among pending exams
        #[arg(value_name = "N")]
        index: usize,
        /// Grade 18-30, or 30L for honors
        #[arg(long)]
        grade: String,
        /// Exam date (DD-MM-YYYY)
        #[arg(long)]
        date: Option<String>,
    },
    /// Change grade and date of the N-th graded exam.
    Update {
        /// 1-based index among graded exams
        #[arg(value_name = "N")]
        index: usize,
        /// Grade 18-30, or 30L for honors
        #[arg(long)]
        grade: String,
        /// Exam date (DD-MM-YYYY)
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove the N-th exam of the full list.
    Remove {
        /// 1-based index in the full list
        #[arg(value_name = "N")]
        index: usize,
    },
    /// Clear every grade and date (requires confirmation).
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Compute the starting degree grade.
    Start,
    /// Starting grade with one hypothetical extra exam.
    Simulate {
        /// Grade 18-30, or 30L for honors
        #[arg(long)]
        grade: String,
        /// Exam credits (CFU)
        #[arg(long, value_name = "CFU")]
        credits: String,
    },
    /// Show or change the grading parameters.
    ///
    /// With no flags, prints the current values.
    Params {
        /// Years beyond the regular course duration
        #[arg(long, value_name = "YEARS")]
        delay_years: Option<String>,
        /// Credits of worst grades excluded from the filtered average
        #[arg(long, value_name = "CFU")]
        discount_credits: Option<String>,
        /// Extra bonus coefficient
        #[arg(long)]
        alpha: Option<String>,
    },
    /// Write a transcript report.
    Report {
        /// Output file path (optional; defaults to `transcript.<ext>` next to the records file)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,
    },
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "libretto",
    about = "Track exam grades and estimate the starting degree grade",
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

    /// Records file for this run (short form of `--config-records-file`)
    #[arg(short = 'r', long = "records", value_name = "PATH")]
    pub records: Option<PathBuf>,

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

    /// Override config records file path
    #[arg(long = "config-records-file", value_name = "PATH")]
    pub config_records_file: Option<PathBuf>,

    /// Subcommand to execute; the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `--records` takes precedence over `--config-records-file` when both
    /// are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            records_file: self
                .records
                .as_ref()
                .or(self.config_records_file.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            records: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_records_file: None,
            command: None,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli().to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.records_file.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/test.log")),
            config_verbose: Some(true),
            config_records_file: Some(PathBuf::from("/tmp/exams.json")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.records_file, Some("/tmp/exams.json".to_string()));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = Cli {
            records: Some(PathBuf::from("/short/exams.json")),
            config_records_file: Some(PathBuf::from("/long/exams.json")),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.records_file, Some("/short/exams.json".to_string()));
    }

    #[test]
    fn test_no_command_parses() {
        let cli = Cli::try_parse_from(["libretto"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_record_command() {
        let cli =
            Cli::try_parse_from(["libretto", "-r", "x.json", "record", "2", "--grade", "30L"])
                .unwrap();
        assert_eq!(cli.records, Some(PathBuf::from("x.json")));
        match cli.command {
            Some(Command::Record { index, grade, date }) => {
                assert_eq!(index, 2);
                assert_eq!(grade, "30L");
                assert!(date.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
