use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use date_rename::rename::{rename_to_suggestion, RenameOutcome};
use date_rename::{Config, RenameError, Suggester};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Rename a file to a date-prefixed, normalized name.
///
/// The date is taken from the file name, the document content or the file
/// system timestamps, in that order of preference.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set logging level, repeat for more detail
    #[arg(short = 'l', long = "log-level", action = ArgAction::Count)]
    log_level: u8,

    /// Print the suggestion only, do not rename
    #[arg(short, long)]
    suggest: bool,

    /// Use this date (YYYY-MM-DD) instead of looking for one
    #[arg(short, long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Print the suggestion as JSON
    #[arg(long)]
    json: bool,

    /// File to rename
    source: PathBuf,
}

fn parse_date(raw: &str) -> Result<NaiveDate, RenameError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| RenameError::InvalidDate(raw.to_string()))
}

/// RUST_LOG wins; otherwise -l picks warn, info or debug for this crate
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "warn,date_rename=info",
        _ => "info,date_rename=debug",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

fn run(cli: Cli) -> Result<(), RenameError> {
    let config = Config::from_env()?;
    let suggestion = Suggester::new(&config).suggest(&cli.source, cli.date);

    if cli.json {
        match serde_json::to_string(&suggestion) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::error!("Failed to encode suggestion: {}", e);
                println!("{}", suggestion.name);
            }
        }
    } else {
        println!("{}", suggestion.name);
    }

    if rename_to_suggestion(&cli.source, &suggestion, cli.suggest)? == Some(RenameOutcome::Unchanged) {
        tracing::info!("Nothing to rename");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
