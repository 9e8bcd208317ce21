//! Command-line interface entry point for `Libretto`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use libretto::config::Config;
use libretto::core::session::Session;
use libretto::core::store::JsonFileStore;
use libretto::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use libretto::{error, info};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| config.logging.level.parse::<Level>().ok())
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

    // CLI flag wins, otherwise use config logging.file if set
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

    let command = args.command.unwrap_or(Command::Menu);
    if let Command::Config { subcommand } = command {
        commands::config::run(subcommand, &mut config, &defaults);
        return;
    }

    let mut session = open_session(&config);
    let scale = config.scale();

    let result = match command {
        Command::Menu => commands::menu::run(session, scale),
        Command::List => {
            commands::exams::list(&session);
            Ok(())
        }
        Command::Add {
            name,
            credits,
            grade,
            date,
        } => commands::exams::add(
            &mut session,
            &name,
            &credits,
            grade.as_deref(),
            date.as_deref(),
        ),
        Command::Record { index, grade, date } => {
            commands::exams::record(&mut session, index, &grade, date.as_deref())
        }
        Command::Update { index, grade, date } => {
            commands::exams::update(&mut session, index, &grade, date.as_deref())
        }
        Command::Remove { index } => commands::exams::remove(&mut session, index),
        Command::Reset { yes } => commands::exams::reset(&mut session, yes),
        Command::Start => commands::grade::start(&session, scale),
        Command::Simulate { grade, credits } => {
            commands::grade::simulate(&session, &grade, &credits, scale)
        }
        Command::Params {
            delay_years,
            discount_credits,
            alpha,
        } => commands::params::run(
            &mut session,
            delay_years.as_deref(),
            discount_credits.as_deref(),
            alpha.as_deref(),
        ),
        Command::Report { output, format } => {
            commands::report::run(&session, output.as_deref(), &format, &config)
        }
        Command::Config { .. } => Ok(()),
    };

    if let Err(e) = result {
        error!("{e}");
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

/// Open the records file named by the configuration, creating it on first run
fn open_session(config: &Config) -> Session<JsonFileStore> {
    let store = JsonFileStore::new(config.records_path());
    if let Err(e) = store.initialize() {
        error!("{e}");
        eprintln!("✗ {e}");
        std::process::exit(1);
    }

    match Session::open(store) {
        Ok(session) => session,
        Err(e) => {
            error!("{e}");
            eprintln!("✗ {e}");
            std::process::exit(1);
        }
    }
}
