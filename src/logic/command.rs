// Commands the user can run against the address book.

use thiserror::Error;

use super::add_weights::{AddWeightsCommand, MESSAGE_DUPLICATE_PERSON, MESSAGE_NOT_EDITED};
use super::messages::{
    MESSAGE_INVALID_PERSON_DISPLAYED_INDEX, MESSAGE_PERSONS_LISTED_OVERVIEW, MESSAGE_REDO_FAILURE,
    MESSAGE_REDO_SUCCESS, MESSAGE_UNDO_FAILURE, MESSAGE_UNDO_SUCCESS, HELP_MESSAGE,
};
use crate::address_book::{AddressBook, PersonFilter, PersonStore};

pub const FIND_USAGE: &str = "find: Finds all persons whose names contain any of \
    the specified keywords (case-insensitive) and displays them as a list with index numbers.\n\
    Parameters: KEYWORD [MORE_KEYWORDS]...\n\
    Example: find alice bob charlie";

/// Feedback shown to the user after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        CommandResult {
            feedback: feedback.into(),
        }
    }
}

/// A command was understood but could not be carried out. The address book is
/// unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{}", MESSAGE_INVALID_PERSON_DISPLAYED_INDEX)]
    InvalidPersonDisplayedIndex,

    #[error("{}", MESSAGE_DUPLICATE_PERSON)]
    DuplicatePerson,

    #[error("{}", MESSAGE_NOT_EDITED)]
    NotEdited,

    #[error("{}", MESSAGE_UNDO_FAILURE)]
    NothingToUndo,

    #[error("{}", MESSAGE_REDO_FAILURE)]
    NothingToRedo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddWeights(AddWeightsCommand),
    List,
    Find(Vec<String>),
    Undo,
    Redo,
    Help,
    Exit,
}

impl Command {
    /// Whether a successful run may have changed the persons and the book
    /// needs saving.
    pub fn changes_data(&self) -> bool {
        matches!(self, Command::AddWeights(_) | Command::Undo | Command::Redo)
    }

    pub fn is_exit(&self) -> bool {
        matches!(self, Command::Exit)
    }

    pub fn execute(&self, book: &mut AddressBook) -> Result<CommandResult, CommandError> {
        match self {
            Command::AddWeights(command) => command.execute(book),
            Command::List => {
                book.update_filtered_person_list(PersonFilter::All);
                Ok(CommandResult::new(list_persons(book)))
            }
            Command::Find(keywords) => {
                book.update_filtered_person_list(PersonFilter::NameContains(keywords.clone()));
                Ok(CommandResult::new(list_persons(book)))
            }
            Command::Undo => {
                if !book.undo() {
                    return Err(CommandError::NothingToUndo);
                }
                book.update_filtered_person_list(PersonFilter::All);
                Ok(CommandResult::new(MESSAGE_UNDO_SUCCESS))
            }
            Command::Redo => {
                if !book.redo() {
                    return Err(CommandError::NothingToRedo);
                }
                book.update_filtered_person_list(PersonFilter::All);
                Ok(CommandResult::new(MESSAGE_REDO_SUCCESS))
            }
            Command::Help => Ok(CommandResult::new(HELP_MESSAGE)),
            Command::Exit => Ok(CommandResult::new("Exiting address book as requested ...")),
        }
    }
}

/// Numbered listing of the displayed persons, positions as users type them.
fn list_persons(book: &AddressBook) -> String {
    let shown = book.filtered_persons();
    let mut lines = vec![format!("{} {}", shown.len(), MESSAGE_PERSONS_LISTED_OVERVIEW)];
    lines.extend(
        shown
            .iter()
            .enumerate()
            .map(|(i, person)| format!("{}. {}", i + 1, person)),
    );
    lines.join("\n")
}
