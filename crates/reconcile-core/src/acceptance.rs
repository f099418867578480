//! Acceptance Model
//!
//! Maps an agent's willingness, conflict and reactivity to the probability
//! that it accepts an offer this round. Each call injects one normally
//! distributed noise draw scaled by reactivity.

use rand::Rng;
use rand_distr::StandardNormal;

/// Standard deviation of the per-decision noise term.
pub const NOISE_STD_DEV: f64 = 0.1;

/// Numerically stable logistic function.
///
/// Saturates to exactly 0.0 or 1.0 for very large magnitudes instead of
/// overflowing in `exp`.
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Acceptance probability for an already-sampled noise term.
pub fn logistic_acceptance(willingness: f64, conflict: f64, reactivity: f64, epsilon: f64) -> f64 {
    logistic(willingness - conflict + reactivity * epsilon)
}

/// Draws one noise term from `Normal(0, NOISE_STD_DEV)`.
pub fn sample_noise<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    z * NOISE_STD_DEV
}

/// Acceptance probability with fresh noise. Consumes exactly one normal draw.
pub fn acceptance_probability<R: Rng + ?Sized>(
    willingness: f64,
    conflict: f64,
    reactivity: f64,
    rng: &mut R,
) -> f64 {
    logistic_acceptance(willingness, conflict, reactivity, sample_noise(rng))
}
