//! Weight-level genetic operators used when breeding two genomes.
//!
//! - [`uniform`] picks each weight independently from either parent
//! - [`two_point`] copies a contiguous slice of weights from the second parent
//! - [`mutate`] perturbs individual weights by a small uniform amount
//!
//! All operators work in place on a child that starts as a copy of the first
//! parent. Only indices present in both vectors take part in crossover, so
//! parents of different lengths never cause out-of-bounds access.

use rand::Rng;

/// Uniform crossover.
///
/// Each weight is replaced by the second parent's weight with probability
/// `factor`.
pub fn uniform<R>(child: &mut [f64], other: &[f64], factor: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for (weight, &theirs) in child.iter_mut().zip(other) {
        if rng.random::<f64>() < factor {
            *weight = theirs;
        }
    }
}

/// Two-point crossover.
///
/// Draws two indices in `[0, other.len())`, orders them as `low <= high` and
/// copies the second parent's weights in `[low, high)` into the child. Does
/// nothing when the second parent has no weights.
pub fn two_point<R>(child: &mut [f64], other: &[f64], rng: &mut R)
where
    R: Rng + ?Sized,
{
    let len = other.len();
    if len == 0 {
        return;
    }
    let a = rng.random_range(0..len);
    let b = rng.random_range(0..len);
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    let high = high.min(child.len());
    if low < high {
        child[low..high].copy_from_slice(&other[low..high]);
    }
}

/// Mutates weights in place.
///
/// Each weight is mutated with probability `rate` by adding a value drawn
/// uniformly from `[-rate, rate)`. A rate of `0.0` leaves every weight intact.
pub fn mutate<R>(weights: &mut [f64], rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for weight in weights {
        if rng.random::<f64>() < rate {
            *weight += rng.random::<f64>() * rate * 2.0 - rate;
        }
    }
}
