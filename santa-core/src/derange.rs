//! Cyclic-rotation derangements.
//!
//! `derange` rotates the input by a random non-zero shift. Every output is a
//! derangement, but only `n - 1` of the possible derangements are reachable
//! (a single `n`-cycle each), so draws are not uniform over all derangements.

use rand::Rng;

/// `result[i] = items[(i + shift) % n]`. Returns `None` when no derangement
/// exists (`n < 2`) or when `shift % n == 0` would leave fixed points.
pub fn rotate<T: Clone>(items: &[T], shift: usize) -> Option<Vec<T>> {
    let n = items.len();
    if n < 2 || shift % n == 0 {
        return None;
    }
    Some((0..n).map(|i| items[(i + shift) % n].clone()).collect())
}

/// Rotates `items` by a shift drawn uniformly from `1..n`.
pub fn derange<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Option<Vec<T>> {
    let n = items.len();
    if n < 2 {
        return None;
    }
    let shift = rng.gen_range(1..n);
    rotate(items, shift)
}
