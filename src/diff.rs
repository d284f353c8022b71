//! Ordered set helpers shared by the selection state machines.
//!
//! Selections are kept as `Vec`s so that commit order stays deterministic;
//! these helpers give them set semantics without losing that order.

use std::collections::HashSet;

use crate::options::Value;

/// Symmetric difference of two selections.
///
/// Values only in `old` come first (in `old` order), followed by values only
/// in `new` (in `new` order).
pub fn xor<V: Value>(old: &[V], new: &[V]) -> Vec<V> {
    let old_set: HashSet<&V> = old.iter().collect();
    let new_set: HashSet<&V> = new.iter().collect();
    let mut seen = HashSet::new();

    old.iter()
        .filter(|v| !new_set.contains(v))
        .chain(new.iter().filter(|v| !old_set.contains(v)))
        .filter(|v| seen.insert(*v))
        .cloned()
        .collect()
}

/// Add `value` if absent, remove every occurrence if present.
pub fn toggle<V: Value>(values: &[V], value: &V) -> Vec<V> {
    if values.contains(value) {
        values.iter().filter(|v| *v != value).cloned().collect()
    } else {
        let mut out = values.to_vec();
        out.push(value.clone());
        out
    }
}

/// Values between `a` and `b` in `seq`, inclusive, in either direction.
///
/// Returns `None` when either endpoint is missing from `seq`.
pub fn inclusive_range<'a, V: Value>(seq: &'a [V], a: &V, b: &V) -> Option<&'a [V]> {
    let i = seq.iter().position(|v| v == a)?;
    let j = seq.iter().position(|v| v == b)?;
    Some(&seq[i.min(j)..=i.max(j)])
}

/// Stable sort of `values` by their position in `order`.
///
/// Values absent from `order` keep their relative order after the known ones.
pub fn sort_by_order<V: Value>(values: &mut [V], order: &[V]) {
    values.sort_by_key(|v| order.iter().position(|o| o == v).unwrap_or(usize::MAX));
}

/// Order-insensitive content equality.
pub fn same_members<V: Value>(a: &[V], b: &[V]) -> bool {
    let a: HashSet<&V> = a.iter().collect();
    let b: HashSet<&V> = b.iter().collect();
    a == b
}
