// 📇 Address Book - the record store
//
// Holds the persons, the filter that decides which of them are "currently
// displayed", and a history of committed states for undo/redo.
//
// Commands only see the PersonStore trait; AddressBook is the in-memory
// implementation the application and tests use.

use thiserror::Error;
use tracing::debug;

use crate::entities::Person;

// ============================================================================
// STORE CONTRACT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The change would make two persons in the book equal
    #[error("operation would result in duplicate persons")]
    DuplicatePerson,

    /// The person to replace is not in the book
    #[error("the person could not be found in the address book")]
    PersonNotFound,
}

/// What a command may ask of the record store.
pub trait PersonStore {
    /// Snapshot of the persons matching the current filter, in display order.
    fn filtered_persons(&self) -> Vec<Person>;

    /// Replace `target` with `edited`.
    fn update_person(&mut self, target: &Person, edited: Person) -> Result<(), StoreError>;

    /// Apply several replacements in order. Either all of them take effect
    /// or the store is left exactly as it was.
    fn update_persons(&mut self, edits: Vec<(Person, Person)>) -> Result<(), StoreError>;

    fn update_filtered_person_list(&mut self, filter: PersonFilter);

    /// Record the current state as an undo point.
    fn commit(&mut self);
}

// ============================================================================
// FILTER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersonFilter {
    /// Show every person
    #[default]
    All,

    /// Names containing any of the keywords as a whole word (case-insensitive)
    NameContains(Vec<String>),
}

impl PersonFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            PersonFilter::All => true,
            PersonFilter::NameContains(keywords) => person.name().split_whitespace().any(|word| {
                keywords
                    .iter()
                    .any(|keyword| word.eq_ignore_ascii_case(keyword))
            }),
        }
    }
}

// ============================================================================
// ADDRESS BOOK
// ============================================================================

/// Committed states kept for undo, the current one included.
pub const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone)]
pub struct AddressBook {
    persons: Vec<Person>,
    filter: PersonFilter,

    /// Committed states, oldest first; `current` indexes into it
    history: Vec<Vec<Person>>,
    current: usize,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::with_persons(Vec::new())
    }

    /// Start from persons that were already loaded and validated.
    pub fn with_persons(persons: Vec<Person>) -> Self {
        AddressBook {
            history: vec![persons.clone()],
            persons,
            filter: PersonFilter::All,
            current: 0,
        }
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn filter(&self) -> &PersonFilter {
        &self.filter
    }

    pub fn contains(&self, person: &Person) -> bool {
        self.persons.contains(person)
    }

    pub fn add_person(&mut self, person: Person) -> Result<(), StoreError> {
        if self.contains(&person) {
            return Err(StoreError::DuplicatePerson);
        }
        self.persons.push(person);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.history.len()
    }

    /// Step back to the previous committed state. Returns false when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.current -= 1;
        self.persons = self.history[self.current].clone();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.current += 1;
        self.persons = self.history[self.current].clone();
        true
    }

    /// Duplicate check first, then lookup, mirroring the store contract.
    fn replace_in(persons: &mut [Person], target: &Person, edited: Person) -> Result<(), StoreError> {
        if target != &edited && persons.contains(&edited) {
            return Err(StoreError::DuplicatePerson);
        }

        let index = persons
            .iter()
            .position(|p| p == target)
            .ok_or(StoreError::PersonNotFound)?;

        persons[index] = edited;
        Ok(())
    }
}

impl Default for AddressBook {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonStore for AddressBook {
    fn filtered_persons(&self) -> Vec<Person> {
        self.persons
            .iter()
            .filter(|p| self.filter.matches(p))
            .cloned()
            .collect()
    }

    fn update_person(&mut self, target: &Person, edited: Person) -> Result<(), StoreError> {
        Self::replace_in(&mut self.persons, target, edited)
    }

    fn update_persons(&mut self, edits: Vec<(Person, Person)>) -> Result<(), StoreError> {
        let mut staged = self.persons.clone();
        for (target, edited) in edits {
            Self::replace_in(&mut staged, &target, edited)?;
        }
        self.persons = staged;
        Ok(())
    }

    fn update_filtered_person_list(&mut self, filter: PersonFilter) {
        debug!(?filter, "Updating person filter");
        self.filter = filter;
    }

    fn commit(&mut self) {
        // A new commit discards any states that were undone
        self.history.truncate(self.current + 1);
        self.history.push(self.persons.clone());
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }
        self.current = self.history.len() - 1;
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::person::tests::person;

    fn book() -> AddressBook {
        AddressBook::with_persons(vec![
            person("Alice Pauline", &["70.0"]),
            person("Benson Meier", &["80.0"]),
        ])
    }

    #[test]
    fn test_update_person_replaces_in_place() {
        let mut book = book();
        let alice = book.persons()[0].clone();
        let edited = person("Alice Pauline", &["70.0", "72.5"]);

        book.update_person(&alice, edited.clone()).unwrap();

        assert_eq!(book.persons()[0], edited);
        assert_eq!(book.persons().len(), 2);
    }

    #[test]
    fn test_update_person_duplicate() {
        let mut book = book();
        let alice = book.persons()[0].clone();
        let benson = book.persons()[1].clone();

        let result = book.update_person(&alice, benson);

        assert_eq!(result, Err(StoreError::DuplicatePerson));
        assert_eq!(book.persons()[0], alice);
    }

    #[test]
    fn test_update_person_missing_target() {
        let mut book = book();
        let stranger = person("Carl Kurz", &[]);

        let result = book.update_person(&stranger, person("Carl Kurz", &["60.0"]));

        assert_eq!(result, Err(StoreError::PersonNotFound));
    }

    #[test]
    fn test_update_persons_is_all_or_nothing() {
        let mut book = book();
        let before = book.persons().to_vec();
        let alice = before[0].clone();
        let edited = person("Alice Pauline", &["70.0", "72.5"]);

        // Second edit targets the stale Alice, whose replacement now exists
        let result = book.update_persons(vec![
            (alice.clone(), edited.clone()),
            (alice, edited),
        ]);

        assert_eq!(result, Err(StoreError::DuplicatePerson));
        assert_eq!(book.persons(), before.as_slice());
    }

    #[test]
    fn test_filter_by_name() {
        let mut book = book();
        book.update_filtered_person_list(PersonFilter::NameContains(vec!["meier".to_string()]));

        let shown = book.filtered_persons();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name(), "Benson Meier");

        book.update_filtered_person_list(PersonFilter::All);
        assert_eq!(book.filtered_persons().len(), 2);
    }

    #[test]
    fn test_add_person_rejects_duplicate() {
        let mut book = book();
        let result = book.add_person(person("Alice Pauline", &["70.0"]));
        assert_eq!(result, Err(StoreError::DuplicatePerson));
    }

    #[test]
    fn test_undo_redo() {
        let mut book = book();
        assert!(!book.can_undo());

        let alice = book.persons()[0].clone();
        let edited = person("Alice Pauline", &["70.0", "72.5"]);
        book.update_person(&alice, edited.clone()).unwrap();
        book.commit();

        assert!(book.undo());
        assert_eq!(book.persons()[0], alice);
        assert!(!book.undo());

        assert!(book.redo());
        assert_eq!(book.persons()[0], edited);
        assert!(!book.redo());
    }

    #[test]
    fn test_commit_after_undo_drops_redo_states() {
        let mut book = book();
        let alice = book.persons()[0].clone();
        book.update_person(&alice, person("Alice Pauline", &["70.0", "72.5"])).unwrap();
        book.commit();
        book.undo();

        book.update_person(&alice, person("Alice Pauline", &["70.0", "69.0"])).unwrap();
        book.commit();

        assert!(!book.can_redo());
        assert!(book.can_undo());
    }

    #[test]
    fn test_history_is_capped() {
        let mut book = book();
        let mut alice = book.persons()[0].clone();

        for step in 0..HISTORY_LIMIT + 10 {
            let reading = format!("{}.5", 60 + step);
            let edited = person("Alice Pauline", &["70.0", reading.as_str()]);
            book.update_person(&alice, edited.clone()).unwrap();
            book.commit();
            alice = edited;
        }

        let mut undone = 0;
        while book.undo() {
            undone += 1;
        }
        assert_eq!(undone, HISTORY_LIMIT - 1);
        // Oldest surviving state is an edit, not the starting book
        assert_eq!(book.persons()[0].weight_history().len(), 2);
    }
}
