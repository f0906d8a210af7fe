// Entity Models
//
// Values (Weight, Tag) are validated on construction and never change.
// Records (Person) are immutable aggregates; an edit produces a new Person.

use thiserror::Error;

pub mod person;
pub mod tag;
pub mod unique_weight_list;
pub mod weight;

pub use person::{Person, PersonDetails};
pub use tag::Tag;
pub use unique_weight_list::{DuplicateWeightError, UniqueWeightList};
pub use weight::Weight;

/// A raw value failed the format constraints of its field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConstraintError {
    pub field: &'static str,
    pub message: String,
}

impl ConstraintError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        ConstraintError {
            field,
            message: message.into(),
        }
    }
}
