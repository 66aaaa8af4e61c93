//! Derangement shuffling.
//!
//! A plain uniform shuffle can hand an element back to its original
//! slot, which looks unshuffled to the player. The routines here retry
//! the shuffle until no element sits at its original index, bounded so
//! a pathological input can never spin forever. Pragmatic fairness,
//! not cryptography.

use lexiquiz_common::constants::DERANGE_MAX_ATTEMPTS;
use rand::seq::SliceRandom;

/// Shuffle `items` into a complete derangement: no element remains at
/// its original index.
///
/// Retries up to [`DERANGE_MAX_ATTEMPTS`] shuffles; if none of them is
/// a derangement the last attempt is kept as a best-effort result.
/// Inputs shorter than two elements are left untouched.
pub fn derange<T: Clone + PartialEq>(items: &mut [T]) {
    if items.len() < 2 {
        return;
    }

    let original = items.to_vec();
    let mut rng = rand::rng();

    for _ in 0..=DERANGE_MAX_ATTEMPTS {
        items.shuffle(&mut rng);
        let is_derangement = items
            .iter()
            .zip(&original)
            .all(|(shuffled, org)| shuffled != org);
        if is_derangement {
            return;
        }
    }
}

/// Derangement-shuffle exactly `k` randomly chosen positions of
/// `items`, leaving every other position untouched.
///
/// The positions are picked by deranging the index range and taking
/// the first `k`; the values at those positions are then deranged
/// among themselves and written back. `k` is clamped to the input
/// length.
pub fn partial_derange<T: Clone + PartialEq>(k: usize, items: &mut [T]) {
    if items.len() < 2 || k == 0 {
        return;
    }
    let k = k.min(items.len());

    let mut indices: Vec<usize> = (0..items.len()).collect();
    derange(&mut indices);
    indices.truncate(k);

    let mut selected: Vec<T> = indices.iter().map(|&i| items[i].clone()).collect();
    derange(&mut selected);

    for (&i, value) in indices.iter().zip(selected) {
        items[i] = value;
    }
}

/// Pick `k` distinct random indices out of `0..len`, sorted ascending.
///
/// Uses the same derangement routine as the shufflers so index
/// selection shares their randomness properties.
pub fn pick_indices(k: usize, len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    derange(&mut indices);
    indices.truncate(k.min(len));
    indices.sort_unstable();
    indices
}
