//! Typed outer joins.
//!
//! Every join in the pipeline resolves overlapping fields with one rule:
//! the left value wins unless it is missing, then the right value is used.

use std::collections::BTreeMap;

/// One key of an outer join with whatever each side provided.
#[derive(Clone, Debug, PartialEq)]
pub struct Joined<K, L, R> {
    pub key: K,
    pub left: Option<L>,
    pub right: Option<R>,
}

impl<K, L, R> Joined<K, L, R> {
    /// Resolve a field present on both sides.
    pub fn coalesce<T>(
        &self,
        left: impl Fn(&L) -> Option<T>,
        right: impl Fn(&R) -> Option<T>,
    ) -> Option<T> {
        coalesce(
            self.left.as_ref().and_then(left),
            self.right.as_ref().and_then(right),
        )
    }
}

/// Left value unless missing, else right value.
pub fn coalesce<T>(left: Option<T>, right: Option<T>) -> Option<T> {
    left.or(right)
}

/// Full outer join of two keyed row sets.
///
/// Keys come out in ascending order and each key appears exactly once. When a
/// side repeats a key, its first row is kept.
pub fn outer_join<K, L, R>(
    left: impl IntoIterator<Item = (K, L)>,
    right: impl IntoIterator<Item = (K, R)>,
) -> Vec<Joined<K, L, R>>
where
    K: Ord,
{
    let mut joined = BTreeMap::<K, (Option<L>, Option<R>)>::new();
    for (key, row) in left {
        let slot = joined.entry(key).or_insert((None, None));
        if slot.0.is_none() {
            slot.0 = Some(row);
        }
    }
    for (key, row) in right {
        let slot = joined.entry(key).or_insert((None, None));
        if slot.1.is_none() {
            slot.1 = Some(row);
        }
    }
    joined
        .into_iter()
        .map(|(key, (left, right))| Joined { key, left, right })
        .collect()
}
