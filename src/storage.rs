// 💾 Storage Adapters - serde-friendly mirrors of the model
//
// Everything is plain strings on disk. Converting back into the model runs
// the same validation as user input, so a corrupted file is rejected rather
// than loaded half-valid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::entities::{ConstraintError, Person, PersonDetails, Tag, UniqueWeightList, Weight};

// ============================================================================
// WEIGHT
// ============================================================================

/// A weight stored as a single string field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdaptedWeight {
    pub value: String,
}

impl AdaptedWeight {
    pub fn new(value: impl Into<String>) -> Self {
        AdaptedWeight {
            value: value.into(),
        }
    }

    pub fn to_model_type(&self) -> Result<Weight, ConstraintError> {
        Weight::parse(&self.value)
    }
}

impl From<&Weight> for AdaptedWeight {
    fn from(source: &Weight) -> Self {
        AdaptedWeight::new(source.as_str())
    }
}

// ============================================================================
// PERSON
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptedPerson {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub height: String,
    pub weight: String,
    pub gender: String,
    pub age: String,

    /// History in recorded order
    #[serde(default)]
    pub weights: Vec<AdaptedWeight>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl AdaptedPerson {
    /// Rebuild the model person. The first invalid value fails the whole
    /// conversion; repeated weights keep their first position.
    pub fn to_model_type(&self) -> Result<Person, ConstraintError> {
        let weights = self
            .weights
            .iter()
            .map(AdaptedWeight::to_model_type)
            .collect::<Result<Vec<_>, _>>()?;
        let tags = self
            .tags
            .iter()
            .map(|tag| Tag::parse(tag))
            .collect::<Result<BTreeSet<_>, _>>()?;

        Person::new(
            PersonDetails {
                name: self.name.clone(),
                phone: self.phone.clone(),
                email: self.email.clone(),
                address: self.address.clone(),
                height: self.height.clone(),
                weight: self.weight.clone(),
                gender: self.gender.clone(),
                age: self.age.clone(),
            },
            weights.into_iter().collect::<UniqueWeightList>(),
            tags,
        )
    }
}

impl From<&Person> for AdaptedPerson {
    fn from(source: &Person) -> Self {
        let PersonDetails {
            name,
            phone,
            email,
            address,
            height,
            weight,
            gender,
            age,
        } = source.details();

        AdaptedPerson {
            name,
            phone,
            email,
            address,
            height,
            weight,
            gender,
            age,
            weights: source.weight_history().iter().map(AdaptedWeight::from).collect(),
            tags: source.tags().iter().map(|tag| tag.name().to_string()).collect(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::person::tests::person;
    use crate::entities::weight::MESSAGE_WEIGHT_CONSTRAINTS;

    #[test]
    fn test_adapted_weight_is_a_plain_string() {
        let json = serde_json::to_string(&AdaptedWeight::new("72.5")).unwrap();
        assert_eq!(json, "\"72.5\"");
    }

    #[test]
    fn test_invalid_weight_fails_conversion() {
        let err = AdaptedWeight::new("72,5").to_model_type().unwrap_err();
        assert_eq!(err.message, MESSAGE_WEIGHT_CONSTRAINTS);
    }

    #[test]
    fn test_person_survives_json() {
        let alice = person("Alice Pauline", &["70.0"]).with_weights(
            ["72.5", "70.0"]
                .iter()
                .map(|raw| Weight::parse(raw).unwrap())
                .collect(),
        );

        let json = serde_json::to_string(&AdaptedPerson::from(&alice)).unwrap();
        let loaded: AdaptedPerson = serde_json::from_str(&json).unwrap();
        let back = loaded.to_model_type().unwrap();

        assert_eq!(back, alice);
        // History order is kept, not just the set
        assert_eq!(back.weight_history(), alice.weight_history());
    }

    #[test]
    fn test_one_bad_weight_fails_person() {
        let mut adapted = AdaptedPerson::from(&person("Alice Pauline", &["70.0"]));
        adapted.weights.push(AdaptedWeight::new("heavy"));

        assert!(adapted.to_model_type().is_err());
    }

    #[test]
    fn test_bad_tag_fails_person() {
        let mut adapted = AdaptedPerson::from(&person("Alice Pauline", &[]));
        adapted.tags.push("not ok".to_string());

        assert!(adapted.to_model_type().is_err());
    }
}
