//! zhwotd - Chinese word-of-the-day log and vocabulary dictionary.
//!
//! Reads connection settings from the input directory (see [`config`]),
//! opens the SQLite store, runs one command and exits.
//!
//! ```text
//! zhwotd wotd date 2024-03-01
//! zhwotd wotd word 能力
//! zhwotd wotd range | gaps
//! zhwotd wotd import [--file words.txt] [--start tomorrow]
//! zhwotd dict lookup 学习
//! zhwotd dict import [--file dictionary.csv]
//! zhwotd check 能力
//! ```

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use vocab::{read_wotd_words, BulkAddReport, ParseError, StartDate, WotdEntry};

mod commands;
mod config;
mod persistence;

use commands::ImportError;
use config::{ConfigError, ConnectionSettings};
use persistence::sqlite::{Database, SqliteDictionaryRepository, SqliteWotdRepository};
use persistence::{DictionaryRepository, PersistenceError, WotdRepository};

/// Top-level CLI arguments.
#[derive(Parser)]
#[command(name = "zhwotd", about = "Chinese word-of-the-day log and dictionary")]
struct Cli {
    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query or extend the word-of-the-day log.
    Wotd {
        #[command(subcommand)]
        action: WotdAction,
    },
    /// Query or extend the dictionary.
    Dict {
        #[command(subcommand)]
        action: DictAction,
    },
    /// Show whether a term is in the dictionary and how often it was the
    /// word of the day.
    Check { term: String },
}

#[derive(Subcommand)]
enum WotdAction {
    /// Show the word for a date: YYYY-MM-DD, `today` or `tomorrow`.
    Date { date: String },
    /// List every date a word was used.
    Word { word: String },
    /// Show the earliest and latest entries and the total count.
    Range,
    /// List dates without a word between the earliest and latest entry.
    Gaps,
    /// Add a word list, one word per line, on consecutive days.
    Import {
        /// Word list to read. Defaults to the configured WOTD input file.
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// First date: YYYY-MM-DD, `today` or `tomorrow`. Prompted for when
        /// omitted; a blank answer continues after the latest entry.
        #[arg(short, long)]
        start: Option<String>,
    },
}

#[derive(Subcommand)]
enum DictAction {
    /// Show a dictionary term.
    Lookup { term: String },
    /// Add terms from a CSV file with a header row, skipping known terms.
    Import {
        /// CSV file to read. Defaults to the configured dictionary input file.
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl Commands {
    /// Imports may create a missing database file; every other command
    /// needs an existing one.
    fn creates_store(&self) -> bool {
        matches!(
            self,
            Commands::Wotd {
                action: WotdAction::Import { .. }
            } | Commands::Dict {
                action: DictAction::Import { .. }
            }
        )
    }
}

/// Error type for CLI operations.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("invalid input: {0}")]
    Parse(#[from] ParseError),

    #[error("import failed: {0}")]
    Import(#[from] ImportError),

    #[error("failed to read from terminal: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Load connection settings and open the store they name, creating it only
/// when `create` is set.
async fn open_database(create: bool) -> Result<Database, CliError> {
    let input_dir = config::get_input_dir();
    let settings_path = config::get_db_file();
    tracing::debug!("Connection settings: {}", settings_path.display());

    let settings = ConnectionSettings::load(&settings_path)?;
    if settings.host.is_some() || settings.user.is_some() {
        tracing::debug!(
            host = ?settings.host,
            user = ?settings.user,
            "Host and user are not used by the SQLite store"
        );
    }

    let path = settings.database_path(&input_dir)?;
    let db = if create {
        Database::open_or_create(&path).await?
    } else {
        Database::open(&path).await?
    };
    Ok(db)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Date named on the command line, relative to `today`.
fn query_date(input: &str, today: NaiveDate) -> Result<NaiveDate, ParseError> {
    StartDate::parse(input)?.resolve(today, None)
}

/// Ask for the first date of a word list on the terminal.
async fn prompt_start_date() -> Result<StartDate, CliError> {
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    let mut stderr = tokio::io::stderr();
    stderr
        .write_all(b"Start date (YYYY-MM-DD, today, tomorrow; blank continues the log): ")
        .await?;
    stderr.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(StartDate::parse(&line)?)
}

async fn handle_wotd(action: WotdAction, repo: &SqliteWotdRepository, json: bool) -> Result<(), CliError> {
    match action {
        WotdAction::Date { date } => {
            let date = query_date(&date, today())?;
            let entry = repo.find_by_date(date).await?;
            if json {
                return print_json(&entry);
            }
            match entry {
                Some(entry) => println!("{} {}", entry.date, entry.word),
                None => println!("No word of the day on {}.", date),
            }
        }
        WotdAction::Word { word } => {
            let entries = repo.find_by_word(&word).await?;
            if json {
                return print_json(&entries);
            }
            for entry in &entries {
                println!("{}", entry.date);
            }
            println!("{} was the word of the day {} time(s).", word, entries.len());
        }
        WotdAction::Range => {
            let range = commands::wotd_range(repo).await?;
            if json {
                return print_json(&range);
            }
            match (range.first, range.last) {
                (Some(first), Some(last)) => {
                    println!("First: {}", first);
                    println!("Last:  {}", last);
                    println!("Total: {}", range.total);
                }
                _ => println!("No words of the day yet."),
            }
        }
        WotdAction::Gaps => {
            let gaps = repo.find_missing_dates().await?;
            if json {
                return print_json(&gaps);
            }
            if gaps.is_empty() {
                println!("No missing dates.");
            }
            for date in gaps {
                println!("{}", date);
            }
        }
        WotdAction::Import { file, start } => {
            let file = file.unwrap_or_else(config::get_wotd_path);
            let words = read_wotd_words(&file)?;
            if words.is_empty() {
                tracing::warn!(path = %file.display(), "Word list is empty, nothing to import");
                return Ok(());
            }

            let start = match start {
                Some(start) => StartDate::parse(&start)?,
                None => prompt_start_date().await?,
            };
            let report = commands::import_wotd(repo, words, start, today()).await?;
            if json {
                return print_json(&report);
            }
            print_wotd_report(&report);
        }
    }
    Ok(())
}

fn print_wotd_report(report: &BulkAddReport<WotdEntry>) {
    if report.is_empty() {
        println!("Nothing to import.");
    }
    for entry in &report.added {
        println!("Added: {} {}", entry.date, entry.word);
    }
    for entry in &report.skipped {
        println!("Not added: {} {} (date already has a word)", entry.date, entry.word);
    }
}

async fn handle_dict(
    action: DictAction,
    repo: &SqliteDictionaryRepository,
    json: bool,
) -> Result<(), CliError> {
    match action {
        DictAction::Lookup { term } => {
            let found = repo.find(&term).await?;
            if json {
                return print_json(&found);
            }
            let Some(found) = found else {
                println!("{} is not in the dictionary.", term);
                return Ok(());
            };
            println!("{}", found.term);
            if let Some(traditional) = &found.traditional {
                println!("  traditional: {}", traditional);
            }
            if let Some(pinyin) = &found.pinyin {
                println!("  pinyin:      {}", pinyin);
            }
            if let Some(definition) = &found.definition {
                println!("  definition:  {}", definition);
            }
            if let Some(hsk) = found.hsk.filter(|&level| level > 0) {
                println!("  HSK:         {}", hsk);
            }
        }
        DictAction::Import { file } => {
            let file = file.unwrap_or_else(config::get_dictionary_path);
            let report = commands::import_dictionary(repo, &file).await?;
            if json {
                return print_json(&report);
            }
            if report.is_empty() {
                println!("Nothing to import.");
            }
            for term in &report.added {
                println!("Added: {}", term);
            }
            for term in &report.skipped {
                println!("Not added: {} is already in dictionary", term);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = open_database(cli.command.creates_store()).await?;

    match cli.command {
        Commands::Wotd { action } => {
            let repo = SqliteWotdRepository::new(db.pool().clone());
            handle_wotd(action, &repo, cli.json).await?;
        }
        Commands::Dict { action } => {
            let repo = SqliteDictionaryRepository::new(db.pool().clone());
            handle_dict(action, &repo, cli.json).await?;
        }
        Commands::Check { term } => {
            let dict = SqliteDictionaryRepository::new(db.pool().clone());
            let wotd = SqliteWotdRepository::new(db.pool().clone());
            let status = commands::term_status(&dict, &wotd, &term).await?;
            if cli.json {
                return print_json(&status);
            }
            let presence = if status.in_dictionary { "is" } else { "is not" };
            println!("{} {} in the dictionary.", status.term, presence);
            println!("Word of the day {} time(s).", status.wotd_count);
        }
    }

    db.pool().close().await;
    Ok(())
}
