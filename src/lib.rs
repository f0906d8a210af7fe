// Weight Book - Core Library
// Address book that keeps a weight history per person.
// Exposes all modules for use in the CLI and tests.

pub mod address_book;
pub mod app;
pub mod config;
pub mod db;
pub mod entities;
pub mod logic;
pub mod storage;
pub mod telemetry;

// Re-export commonly used types
pub use address_book::{AddressBook, PersonFilter, PersonStore, StoreError};
pub use app::{App, ImportSummary, Outcome};
pub use config::Config;
pub use db::{
    Event,
    setup_database, save_address_book, load_address_book, count_persons, load_csv,
    insert_event, get_events_for_entity, get_recent_events,
};
pub use entities::{
    ConstraintError, DuplicateWeightError, Person, PersonDetails, Tag, UniqueWeightList, Weight,
};
pub use logic::{
    AddWeightsCommand, AddWeightsCommandParser, Command, CommandError, CommandResult, Index,
    ParseError, WeightAddDescriptor, parse_command,
};
pub use storage::{AdaptedPerson, AdaptedWeight};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
