//! Command-line front end for the library queries.
//!
//! # Responsibility
//! - Open a library database and run one query per invocation.
//! - Print results as JSON on stdout.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use libris_core::db::open_db;
use libris_core::{
    default_log_level, init_logging, AuthorService, BookService, SqliteLibraryRepository,
};
use log::info;
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "libris", version, about = "Query the author/book catalogue")]
struct Cli {
    /// Path to the SQLite library database.
    #[arg(long, env = "LIBRIS_DB", global = true)]
    db: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files. Logging stays off without it.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Author of the book with the longest title.
    Author,
    /// Authors with an even number of books published after 2015.
    Authors,
    /// Book with the highest price times quantity published.
    Book,
    /// Books with "Red" in the title published after 2012-05-25.
    Books,
    /// Print core health and version.
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        init_logging(&level, log_dir)
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    }

    let output = run(&cli)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(cli: &Cli) -> Result<Value> {
    match cli.command {
        Command::Version => Ok(json!({
            "ping": libris_core::ping(),
            "core_version": libris_core::core_version(),
        })),
        Command::Author => with_repo(cli, |repo| {
            Ok(serde_json::to_value(AuthorService::new(repo).get_author()?)?)
        }),
        Command::Authors => with_repo(cli, |repo| {
            Ok(serde_json::to_value(AuthorService::new(repo).get_authors()?)?)
        }),
        Command::Book => with_repo(cli, |repo| {
            Ok(serde_json::to_value(BookService::new(repo).get_book()?)?)
        }),
        Command::Books => with_repo(cli, |repo| {
            Ok(serde_json::to_value(BookService::new(repo).get_books()?)?)
        }),
    }
}

fn with_repo(
    cli: &Cli,
    query: impl FnOnce(&SqliteLibraryRepository<'_>) -> Result<Value>,
) -> Result<Value> {
    let path = cli
        .db
        .as_ref()
        .context("no database given; pass --db or set LIBRIS_DB")?;
    let conn = open_db(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    let repo = SqliteLibraryRepository::try_new(&conn)?;

    info!(
        "event=cli_query module=cli status=start command={:?}",
        cli.command
    );
    query(&repo)
}
