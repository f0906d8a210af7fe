use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use rusqlite::Connection;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use weight_book::{get_recent_events, load_csv, setup_database, telemetry, App, Config, Outcome};

#[derive(Debug, Parser)]
#[command(name = "weight-book", version, about = "Address book with per-person weight history")]
struct Cli {
    /// Config file (default: ./weight-book.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overrides config and WEIGHT_BOOK_DB
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Read commands from stdin until `exit` (default)
    Run,

    /// Run a single command, e.g. `exec w/ 72.5 1`
    Exec {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },

    /// Add persons from a CSV file
    Import { csv: PathBuf },

    /// Show the most recent audit events
    Events {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.storage.db_path = db;
    }
    telemetry::init(config.logging.level_filter()?, cli.verbose);

    match cli.mode.unwrap_or(Mode::Run) {
        Mode::Run => run_interactive(&config),
        Mode::Exec { line } => run_once(&config, &line.join(" ")),
        Mode::Import { csv } => run_import(&config, &csv),
        Mode::Events { limit } => show_events(&config, limit),
    }
}

fn run_interactive(config: &Config) -> Result<()> {
    let mut app = App::open(&config.storage.db_path)?;
    println!(
        "📇 {} persons loaded from {}. Type `help` for commands.",
        app.book().persons().len(),
        config.storage.db_path.display()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        stdout.flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match app.run_line(&line)? {
            Outcome::Continue(message) => println!("{}", message),
            Outcome::Exit(message) => {
                println!("{}", message);
                break;
            }
        }
    }

    Ok(())
}

fn run_once(config: &Config, line: &str) -> Result<()> {
    let mut app = App::open(&config.storage.db_path)?;
    println!("{}", app.run_line(line)?.message());
    Ok(())
}

fn run_import(config: &Config, csv: &std::path::Path) -> Result<()> {
    println!("📂 Loading {}...", csv.display());
    let persons = load_csv(csv)?;
    println!("✓ Read {} persons", persons.len());

    let mut app = App::open(&config.storage.db_path)?;
    let summary = app.import(persons)?;

    println!("✓ Inserted: {} persons", summary.inserted);
    println!("✓ Skipped duplicates: {}", summary.duplicates);
    Ok(())
}

fn show_events(config: &Config, limit: usize) -> Result<()> {
    let conn = Connection::open(&config.storage.db_path)?;
    setup_database(&conn)?;

    for event in get_recent_events(&conn, limit)? {
        println!(
            "{}  {:<16} {}/{}  {}",
            event.timestamp.to_rfc3339(),
            event.event_type,
            event.entity_type,
            event.entity_id,
            event.data
        );
    }
    Ok(())
}
