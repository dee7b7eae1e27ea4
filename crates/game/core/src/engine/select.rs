//! Weighted random selection.
//!
//! One algorithm serves menu sampling, event firing, crisis selection and the
//! ending tie-break, and it must be reproduced bit-for-bit by every
//! implementation: scale one draw by the total weight, walk the entries in
//! catalog order subtracting each weight, and stop at the first entry where
//! the remainder is no longer positive.

use crate::env::Prng;

/// Picks an index for a draw `d ∈ [0, 1)`.
///
/// Returns the smallest `i` with `w[0] + … + w[i] >= d × total`. Returns
/// `None` when the total weight is not positive. If floating-point rounding
/// leaves a positive remainder after the last entry, the last entry wins.
pub fn select_index(weights: &[f64], draw: f64) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return None;
    }

    let mut remaining = draw * total;
    for (index, weight) in weights.iter().enumerate() {
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(index);
        }
    }

    Some(weights.len() - 1)
}

/// Draws once from `rng` and selects an index.
///
/// Consumes exactly one draw when `weights` is non-empty, none otherwise.
pub fn pick_index(weights: &[f64], rng: &mut Prng) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }
    select_index(weights, rng.next_f64())
}

/// Samples up to `count` distinct indices without replacement.
///
/// Each pick consumes one draw and removes the chosen entry from the pool
/// before the next pick. Sampling stops early when the pool runs dry or its
/// remaining weight is zero.
pub fn sample_without_replacement(weights: &[f64], count: usize, rng: &mut Prng) -> Vec<usize> {
    let mut pool: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
    let mut picked = Vec::with_capacity(count.min(pool.len()));

    for _ in 0..count {
        if pool.is_empty() {
            break;
        }
        let pool_weights: Vec<f64> = pool.iter().map(|(_, weight)| *weight).collect();
        let Some(slot) = select_index(&pool_weights, rng.next_f64()) else {
            break;
        };
        let (index, _) = pool.remove(slot);
        picked.push(index);
    }

    picked
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference law: smallest i with prefix sum >= d * total.
    fn law(weights: &[f64], draw: f64) -> Option<usize> {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return None;
        }
        let target = draw * total;
        let mut prefix = 0.0;
        for (i, w) in weights.iter().enumerate() {
            prefix += w;
            if prefix >= target {
                return Some(i);
            }
        }
        Some(weights.len() - 1)
    }

    #[test]
    fn uniform_weights() {
        let weights = [1.0, 1.0, 1.0, 1.0];
        assert_eq!(select_index(&weights, 0.0), Some(0));
        assert_eq!(select_index(&weights, 0.24), Some(0));
        assert_eq!(select_index(&weights, 0.25), Some(0));
        assert_eq!(select_index(&weights, 0.26), Some(1));
        assert_eq!(select_index(&weights, 0.74), Some(2));
        assert_eq!(select_index(&weights, 0.99), Some(3));
    }

    #[test]
    fn skewed_weights() {
        let weights = [5.0, 1.0, 4.0];
        // total 10: cumulative 5, 6, 10
        assert_eq!(select_index(&weights, 0.3), Some(0));
        assert_eq!(select_index(&weights, 0.5), Some(0));
        assert_eq!(select_index(&weights, 0.55), Some(1));
        assert_eq!(select_index(&weights, 0.61), Some(2));
    }

    #[test]
    fn zero_weight_entries_are_skipped_for_positive_draws() {
        let weights = [0.0, 2.0, 0.0, 6.0];
        // total 8: cumulative 0, 2, 2, 8
        assert_eq!(select_index(&weights, 0.1), Some(1));
        assert_eq!(select_index(&weights, 0.25), Some(1));
        assert_eq!(select_index(&weights, 0.26), Some(3));
    }

    #[test]
    fn matches_reference_law_on_a_grid() {
        let vectors: [&[f64]; 3] = [&[1.0, 2.0, 3.0], &[0.5, 0.25, 0.25], &[10.0, 0.0, 1.0, 7.5]];
        for weights in vectors {
            for step in 0..100 {
                let draw = f64::from(step) / 100.0;
                assert_eq!(
                    select_index(weights, draw),
                    law(weights, draw),
                    "weights {weights:?} draw {draw}"
                );
            }
        }
    }

    #[test]
    fn degenerate_weights_select_nothing() {
        assert_eq!(select_index(&[], 0.5), None);
        assert_eq!(select_index(&[0.0, 0.0], 0.5), None);
    }

    #[test]
    fn pick_index_consumes_one_draw() {
        let mut rng = Prng::new(3);
        assert!(pick_index(&[1.0, 2.0], &mut rng).is_some());
        assert_eq!(rng.draws(), 1);
        assert!(pick_index(&[], &mut rng).is_none());
        assert_eq!(rng.draws(), 1);
        assert!(pick_index(&[0.0], &mut rng).is_none());
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn sampling_without_replacement_yields_distinct_indices() {
        let mut rng = Prng::new(11);
        let weights = [1.0, 3.0, 2.0, 5.0];
        let picked = sample_without_replacement(&weights, 3, &mut rng);
        assert_eq!(picked.len(), 3);
        assert_eq!(rng.draws(), 3);
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    fn sampling_stops_when_pool_is_exhausted() {
        let mut rng = Prng::new(11);
        let picked = sample_without_replacement(&[1.0, 1.0], 5, &mut rng);
        assert_eq!(picked.len(), 2);
        assert_eq!(rng.draws(), 2);
    }
}
