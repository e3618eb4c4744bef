//! Weight vector construction helpers.
//!
//! Every randomly initialized weight in the workspace, whether it belongs to a
//! freshly generated [`Network`](crate::Network) or to a noise network injected
//! during breeding, is drawn from the same symmetric range `[-1.0, 1.0]`.

use rand::Rng;
use rand_distr::{Distribution as _, Uniform};

/// Lower bound of a randomly initialized weight.
pub const MIN_RANDOM_WEIGHT: f64 = -1.0;
/// Upper bound of a randomly initialized weight.
pub const MAX_RANDOM_WEIGHT: f64 = 1.0;

/// Creates a weight vector by applying a function to each index.
///
/// # Examples
///
/// ```
/// use neuroevo_network::weights;
///
/// let weights = weights::from_fn(|i| i as f64 * 0.5, 3);
/// assert_eq!(weights, vec![0.0, 0.5, 1.0]);
/// ```
pub fn from_fn<F>(mut f: F, len: usize) -> Vec<f64>
where
    F: FnMut(usize) -> f64,
{
    let mut values = Vec::with_capacity(len);
    for i in 0..len {
        values.push(f(i));
    }
    values
}

/// Returns a random value uniformly distributed in `[-1.0, 1.0]`.
pub fn random_clamped<R>(rng: &mut R) -> f64
where
    R: Rng + ?Sized,
{
    let range = Uniform::new_inclusive(MIN_RANDOM_WEIGHT, MAX_RANDOM_WEIGHT)
        .expect("random weight bounds are finite and ordered");
    range.sample(rng)
}

/// Generates `len` weights uniformly distributed in `[-1.0, 1.0]`.
pub fn random<R>(rng: &mut R, len: usize) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    from_fn(|_| random_clamped(rng), len)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_random_weights_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let weights = random(&mut rng, 1000);
        assert_eq!(weights.len(), 1000);
        assert!(
            weights
                .iter()
                .all(|w| (MIN_RANDOM_WEIGHT..=MAX_RANDOM_WEIGHT).contains(w)),
            "all weights must lie in [-1, 1]"
        );
        assert!(weights.iter().any(|w| *w < 0.0));
        assert!(weights.iter().any(|w| *w > 0.0));
    }

    #[test]
    fn test_random_empty() {
        let mut rng = Pcg32::seed_from_u64(0);
        assert!(random(&mut rng, 0).is_empty());
    }
}
