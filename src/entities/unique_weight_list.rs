// 📈 Unique Weight List - weight history without duplicates
//
// Ordered like a list (readings keep the order they were recorded in),
// compared like a set where the order is not meaningful.
//
// Invariant: no two elements compare equal. Every mutating method keeps it,
// so callers never have to re-check for duplicates themselves.

use std::collections::BTreeSet;
use thiserror::Error;

use super::Weight;

/// Adding a weight that is already in the list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Operation would result in duplicate weights: {weight}")]
pub struct DuplicateWeightError {
    pub weight: Weight,
}

// ============================================================================
// UNIQUE WEIGHT LIST
// ============================================================================

/// Equality (`==`) is order-sensitive list equality.
/// Use [`UniqueWeightList::equals_order_insensitive`] for set equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UniqueWeightList {
    internal_list: Vec<Weight>,
}

impl UniqueWeightList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from an already de-duplicated set.
    pub fn from_set(weights: BTreeSet<Weight>) -> Self {
        let list = UniqueWeightList {
            internal_list: weights.into_iter().collect(),
        };
        debug_assert!(list.elements_are_unique());
        list
    }

    /// Snapshot of the current contents. Later changes to the list do not
    /// show up in the returned set.
    pub fn to_set(&self) -> BTreeSet<Weight> {
        self.internal_list.iter().cloned().collect()
    }

    /// Replace every element with the given set.
    pub fn set_weights(&mut self, weights: BTreeSet<Weight>) {
        self.internal_list = weights.into_iter().collect();
        debug_assert!(self.elements_are_unique());
    }

    /// Append every weight of `from` that is not already here.
    ///
    /// Existing elements keep their positions and new ones keep the order they
    /// have in `from`, so merging the same list twice is a no-op.
    pub fn merge_from(&mut self, from: &UniqueWeightList) {
        let already_inside = self.to_set();
        self.internal_list.extend(
            from.internal_list
                .iter()
                .filter(|weight| !already_inside.contains(*weight))
                .cloned(),
        );
        debug_assert!(self.elements_are_unique());
    }

    pub fn contains(&self, to_check: &Weight) -> bool {
        self.internal_list.contains(to_check)
    }

    /// Append a weight, refusing duplicates. The list is unchanged on error.
    pub fn add(&mut self, to_add: Weight) -> Result<(), DuplicateWeightError> {
        if self.contains(&to_add) {
            return Err(DuplicateWeightError { weight: to_add });
        }
        self.internal_list.push(to_add);
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Weight> {
        self.internal_list.iter()
    }

    pub fn as_slice(&self) -> &[Weight] {
        &self.internal_list
    }

    pub fn len(&self) -> usize {
        self.internal_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.internal_list.is_empty()
    }

    /// Same elements, in any order.
    pub fn equals_order_insensitive(&self, other: &UniqueWeightList) -> bool {
        std::ptr::eq(self, other) || self.to_set() == other.to_set()
    }

    fn elements_are_unique(&self) -> bool {
        self.to_set().len() == self.internal_list.len()
    }
}

impl<'a> IntoIterator for &'a UniqueWeightList {
    type Item = &'a Weight;
    type IntoIter = std::slice::Iter<'a, Weight>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Weight> for UniqueWeightList {
    /// Keeps the first occurrence of each weight.
    fn from_iter<I: IntoIterator<Item = Weight>>(iter: I) -> Self {
        let mut list = UniqueWeightList::new();
        for weight in iter {
            if !list.contains(&weight) {
                list.internal_list.push(weight);
            }
        }
        list
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn w(raw: &str) -> Weight {
        Weight::parse(raw).unwrap()
    }

    fn list(raws: &[&str]) -> UniqueWeightList {
        raws.iter().map(|raw| w(raw)).collect()
    }

    #[test]
    fn test_add_rejects_duplicate_and_leaves_list_unchanged() {
        let mut weights = list(&["70.0", "71.2"]);
        let before = weights.clone();

        let err = weights.add(w("70.0")).unwrap_err();

        assert_eq!(err.weight, w("70.0"));
        assert_eq!(weights, before);
        assert_eq!(weights.len(), 2);
    }

    #[test]
    fn test_collect_keeps_first_occurrence() {
        let weights = list(&["70.0", "72.5", "70.0", "68.1", "72.5"]);

        let order: Vec<&str> = weights.iter().map(Weight::as_str).collect();
        assert_eq!(order, vec!["70.0", "72.5", "68.1"]);
    }

    #[test]
    fn test_add_appends_at_end() {
        let mut weights = list(&["70.0"]);
        weights.add(w("72.5")).unwrap();

        let order: Vec<&str> = weights.iter().map(Weight::as_str).collect();
        assert_eq!(order, vec!["70.0", "72.5"]);
        assert!(weights.contains(&w("72.5")));
    }

    #[test]
    fn test_merge_keeps_existing_positions_and_other_order() {
        let mut weights = list(&["70.0", "68.1"]);
        let other = list(&["75.0", "68.1", "60.5"]);

        weights.merge_from(&other);

        let order: Vec<&str> = weights.iter().map(Weight::as_str).collect();
        assert_eq!(order, vec!["70.0", "68.1", "75.0", "60.5"]);
    }

    #[test]
    fn test_merge_into_self_is_noop() {
        let mut weights = list(&["70.0", "68.1"]);
        let copy = weights.clone();

        weights.merge_from(&copy);

        assert_eq!(weights, copy);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a = list(&["70.0", "72.5"]);
        let b = list(&["72.5", "70.0"]);

        assert_ne!(a, b);
        assert!(a.equals_order_insensitive(&b));
        assert!(!a.equals_order_insensitive(&list(&["70.0"])));
    }

    #[test]
    fn test_to_set_is_a_snapshot() {
        let mut weights = list(&["70.0"]);
        let snapshot = weights.to_set();

        weights.add(w("72.5")).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(weights.to_set().len(), 2);
    }

    #[test]
    fn test_set_weights_replaces_everything() {
        let mut weights = list(&["70.0", "72.5"]);
        weights.set_weights([w("80.0")].into_iter().collect());

        assert_eq!(weights.as_slice(), &[w("80.0")]);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let weights = list(&["70.0", "72.5"]);

        let first: Vec<_> = weights.iter().collect();
        let second: Vec<_> = (&weights).into_iter().collect();

        assert_eq!(first, second);
    }

    fn weight_set() -> impl Strategy<Value = BTreeSet<Weight>> {
        prop::collection::btree_set("[0-9]{1,3}(\\.[0-9]{1,2})?", 0..8).prop_map(|raws| {
            raws.iter().map(|raw| Weight::parse(raw).unwrap()).collect()
        })
    }

    proptest! {
        #[test]
        fn prop_merge_is_union(a in weight_set(), b in weight_set()) {
            let mut merged = UniqueWeightList::from_set(a.clone());
            merged.merge_from(&UniqueWeightList::from_set(b.clone()));

            let union: BTreeSet<Weight> = a.union(&b).cloned().collect();
            prop_assert_eq!(merged.to_set(), union);
        }

        #[test]
        fn prop_merge_is_idempotent(a in weight_set(), b in weight_set()) {
            let other = UniqueWeightList::from_set(b);
            let mut once = UniqueWeightList::from_set(a);
            once.merge_from(&other);
            let mut twice = once.clone();
            twice.merge_from(&other);

            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_order_insensitive_equality_matches_sets(a in weight_set(), b in weight_set()) {
            let left = UniqueWeightList::from_set(a.clone());
            let reversed: UniqueWeightList = b.iter().rev().cloned().collect();

            prop_assert_eq!(left.equals_order_insensitive(&reversed), a == b);
        }
    }
}
