// ⚖️ Add Weights Command - append a reading to persons' weight history
//
// Flow: resolve positions against the displayed list → merge the new
// reading into each target's history → hand every (old, new) pair to the
// store in one atomic update → show all persons again.

use std::collections::BTreeSet;
use tracing::info;

use super::command::{CommandError, CommandResult};
use super::index::Index;
use crate::address_book::{PersonFilter, PersonStore, StoreError};
use crate::entities::{Person, UniqueWeightList, Weight};

pub const COMMAND_WORD: &str = "w/";
pub const COMMAND_ALIAS: &str = "weight/";

pub const MESSAGE_USAGE: &str = "w/: Add weight to the person(s) identified \
    by the index number used in the last person listing. \
    Input weight will append to the existing weights.\n\
    Parameters: [WEIGHT] INDEX1 INDEX2... (must be a positive integer)\n\
    Example: w/ 55.5 1 2 3";

pub const MESSAGE_EDIT_PERSON_SUCCESS: &str = "Edited Person: ";
pub const MESSAGE_NOT_EDITED: &str = "At least one field to edit must be provided.";
pub const MESSAGE_DUPLICATE_PERSON: &str = "This person already exists in the address book.";

// ============================================================================
// DESCRIPTOR
// ============================================================================

/// The fields an edit changes. Only the weight history is ever populated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightAddDescriptor {
    weights: BTreeSet<Weight>,
}

impl WeightAddDescriptor {
    pub fn new(weights: BTreeSet<Weight>) -> Self {
        WeightAddDescriptor { weights }
    }

    pub fn weights(&self) -> &BTreeSet<Weight> {
        &self.weights
    }

    pub fn is_any_field_edited(&self) -> bool {
        !self.weights.is_empty()
    }
}

// ============================================================================
// COMMAND
// ============================================================================

/// Equal when both the positions and the descriptor are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddWeightsCommand {
    indices: Vec<Index>,
    descriptor: WeightAddDescriptor,
}

impl AddWeightsCommand {
    /// `indices` are positions in the last shown list; the first one is the
    /// primary target.
    pub fn new(indices: Vec<Index>, descriptor: WeightAddDescriptor) -> Self {
        AddWeightsCommand {
            indices,
            descriptor,
        }
    }

    pub fn indices(&self) -> &[Index] {
        &self.indices
    }

    pub fn descriptor(&self) -> &WeightAddDescriptor {
        &self.descriptor
    }

    pub fn execute<S>(&self, store: &mut S) -> Result<CommandResult, CommandError>
    where
        S: PersonStore + ?Sized,
    {
        if !self.descriptor.is_any_field_edited() {
            return Err(CommandError::NotEdited);
        }
        if self.indices.is_empty() {
            return Err(CommandError::InvalidPersonDisplayedIndex);
        }

        let last_shown_list = store.filtered_persons();

        // Every position is checked before anything is written
        let targets = self
            .indices
            .iter()
            .map(|index| {
                last_shown_list
                    .get(index.zero_based())
                    .ok_or(CommandError::InvalidPersonDisplayedIndex)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let edits: Vec<(Person, Person)> = targets
            .into_iter()
            .map(|person| (person.clone(), create_edited_person(person, &self.descriptor)))
            .collect();
        let edited: Vec<Person> = edits.iter().map(|(_, after)| after.clone()).collect();

        match store.update_persons(edits) {
            Ok(()) => {}
            Err(StoreError::DuplicatePerson) => return Err(CommandError::DuplicatePerson),
            Err(StoreError::PersonNotFound) => {
                // Targets were just read from the store's own view
                panic!("The target person cannot be missing")
            }
        }

        store.update_filtered_person_list(PersonFilter::All);
        store.commit();

        info!(
            persons = edited.len(),
            weights = ?self.descriptor.weights(),
            "Added weights"
        );

        let feedback = edited
            .iter()
            .map(|person| format!("{}{}", MESSAGE_EDIT_PERSON_SUCCESS, person))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(CommandResult::new(feedback))
    }
}

/// Copy of `person` whose history is its own readings followed by the new
/// ones from `descriptor`.
fn create_edited_person(person: &Person, descriptor: &WeightAddDescriptor) -> Person {
    let mut weights = person.weight_history().clone();
    weights.merge_from(&UniqueWeightList::from_set(descriptor.weights().clone()));
    person.with_weights(weights)
}

// ============================================================================
// TESTS
// ============================================================================
