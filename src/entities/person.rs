// 🧍 Person Entity - immutable record in the address book
//
// "Editing" a person never mutates it: every change builds a new Person with
// the selected field replaced, and the store swaps the old value for the new.

use std::collections::BTreeSet;
use std::fmt;

use super::{ConstraintError, Tag, UniqueWeightList, Weight};

pub const MESSAGE_NAME_CONSTRAINTS: &str = "Names should not be blank";

// ============================================================================
// PERSON
// ============================================================================

#[derive(Debug, Clone)]
pub struct Person {
    // ========================================================================
    // SCALAR FIELDS
    // ========================================================================
    name: String,
    phone: String,
    email: String,
    address: String,
    height: String,
    /// Current reading, as entered when the person was created
    weight: String,
    gender: String,
    age: String,

    // ========================================================================
    // SET FIELDS
    // ========================================================================
    /// Recorded weight history
    weights: UniqueWeightList,
    tags: BTreeSet<Tag>,
}

/// Scalar fields of a person, grouped so construction sites stay readable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub height: String,
    pub weight: String,
    pub gender: String,
    pub age: String,
}

impl Person {
    pub fn new(
        details: PersonDetails,
        weights: UniqueWeightList,
        tags: BTreeSet<Tag>,
    ) -> Result<Self, ConstraintError> {
        if details.name.trim().is_empty() {
            return Err(ConstraintError::new("name", MESSAGE_NAME_CONSTRAINTS));
        }

        let PersonDetails {
            name,
            phone,
            email,
            address,
            height,
            weight,
            gender,
            age,
        } = details;

        Ok(Person {
            name: name.trim().to_string(),
            phone,
            email,
            address,
            height,
            weight,
            gender,
            age,
            weights,
            tags,
        })
    }

    /// Copy of this person with only the weight history replaced.
    pub fn with_weights(&self, weights: UniqueWeightList) -> Person {
        Person {
            weights,
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn height(&self) -> &str {
        &self.height
    }

    pub fn weight(&self) -> &str {
        &self.weight
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    /// Weight history as a set; changes to it do not affect this person.
    pub fn weights(&self) -> BTreeSet<Weight> {
        self.weights.to_set()
    }

    pub fn weight_history(&self) -> &UniqueWeightList {
        &self.weights
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn details(&self) -> PersonDetails {
        PersonDetails {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            height: self.height.clone(),
            weight: self.weight.clone(),
            gender: self.gender.clone(),
            age: self.age.clone(),
        }
    }
}

/// Duplicate criterion of the address book. Weight history order is not
/// meaningful once persisted, so it is compared as a set.
impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.phone == other.phone
            && self.email == other.email
            && self.address == other.address
            && self.height == other.height
            && self.weight == other.weight
            && self.gender == other.gender
            && self.age == other.age
            && self.weights.equals_order_insensitive(&other.weights)
            && self.tags == other.tags
    }
}

impl Eq for Person {}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Phone: {} Email: {} Address: {} Height: {} Weight: {} Gender: {} Age: {} Weights: ",
            self.name,
            self.phone,
            self.email,
            self.address,
            self.height,
            self.weight,
            self.gender,
            self.age,
        )?;
        for weight in &self.weights {
            write!(f, "[{}]", weight)?;
        }
        write!(f, " Tags: ")?;
        for tag in &self.tags {
            write!(f, "{}", tag)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
