// 🖥️ App - one interactive session over a stored address book
//
// Each input line is parsed, executed against the in-memory book, and on a
// successful change the whole book is written back and an event is logged.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::{info, warn};

use crate::address_book::{AddressBook, PersonStore};
use crate::db::{
    insert_event, load_address_book, save_address_book, setup_database, write_persons, Event,
};
use crate::entities::Person;
use crate::logic::{parse_command, Command};

const ACTOR: &str = "cli";
const BOOK_ENTITY_TYPE: &str = "address_book";
const BOOK_ENTITY_ID: &str = "default";

/// What the caller should do after a line was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Show the message and read the next line
    Continue(String),
    /// Show the message and stop
    Exit(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Continue(message) | Outcome::Exit(message) => message,
        }
    }
}

/// Result of importing persons from a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub duplicates: usize,
}

pub struct App {
    conn: Connection,
    book: AddressBook,
}

impl App {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database {}", db_path.display()))?;
        Self::new(conn)
    }

    /// Prepare the schema and load the stored persons.
    pub fn new(conn: Connection) -> Result<Self> {
        setup_database(&conn)?;
        let persons = load_address_book(&conn).context("Failed to load address book")?;
        info!(count = persons.len(), "Loaded address book");

        Ok(App {
            conn,
            book: AddressBook::with_persons(persons),
        })
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Parse and run one line of input.
    ///
    /// Rejected input and failed commands come back as `Outcome::Continue`
    /// with the user-facing message; only storage failures are errors.
    pub fn run_line(&mut self, line: &str) -> Result<Outcome> {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                warn!(input = line, error = %err, "Rejected input");
                return Ok(Outcome::Continue(err.to_string()));
            }
        };

        let before = self.book.clone();
        let result = match command.execute(&mut self.book) {
            Ok(result) => result,
            Err(err) => {
                warn!(input = line, error = %err, "Command failed");
                return Ok(Outcome::Continue(err.to_string()));
            }
        };

        if command.changes_data() {
            // The book only keeps a change the database has accepted
            if let Err(err) = self.persist(&command, line, &before) {
                self.book = before;
                return Err(err);
            }
        }

        if command.is_exit() {
            Ok(Outcome::Exit(result.feedback))
        } else {
            Ok(Outcome::Continue(result.feedback))
        }
    }

    /// Add persons read from an import file, skipping ones already present.
    pub fn import(&mut self, persons: Vec<Person>) -> Result<ImportSummary> {
        let before = self.book.clone();
        let mut summary = ImportSummary {
            inserted: 0,
            duplicates: 0,
        };

        for person in persons {
            match self.book.add_person(person) {
                Ok(()) => summary.inserted += 1,
                Err(_) => summary.duplicates += 1,
            }
        }

        if summary.inserted > 0 {
            self.book.commit();
            if let Err(err) = save_address_book(&mut self.conn, self.book.persons()) {
                self.book = before;
                return Err(err);
            }
        }

        let event = Event::new(
            "persons_imported",
            BOOK_ENTITY_TYPE,
            BOOK_ENTITY_ID,
            serde_json::json!({
                "inserted": summary.inserted,
                "duplicates": summary.duplicates,
            }),
            ACTOR,
        );
        insert_event(&self.conn, &event)?;

        info!(
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            "Imported persons"
        );
        Ok(summary)
    }

    /// Write the book back and log one event per person the command changed.
    fn persist(&mut self, command: &Command, line: &str, before: &AddressBook) -> Result<()> {
        let tx = self.conn.transaction()?;
        write_persons(&tx, self.book.persons())?;

        let event_type = match command {
            Command::AddWeights(_) => "weights_added",
            Command::Undo => "undo",
            Command::Redo => "redo",
            _ => "changed",
        };
        let changed = self
            .book
            .persons()
            .iter()
            .zip(before.persons())
            .filter(|(after, old)| after != old)
            .map(|(after, _)| after);

        let mut logged = 0;
        for person in changed {
            let event = Event::for_person(
                event_type,
                person,
                serde_json::json!({ "input": line.trim() }),
                ACTOR,
            );
            insert_event(&tx, &event)?;
            logged += 1;
        }

        tx.commit()?;
        info!(event_type, persons = logged, "Saved address book");
        Ok(())
    }
}
