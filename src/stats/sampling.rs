//! Gaussian draws for prior initialization and network sampling.

use rand::Rng;
use std::f64::consts::PI;

/// Draws from N(0, 1) with the Box-Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // u1 in (0, 1] keeps the logarithm finite.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Draws from N(mean, std²).
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std: f64) -> f64 {
    mean + std * standard_normal(rng)
}

/// Draws `len` independent N(mean, std²) values.
pub fn normal_vec<R: Rng + ?Sized>(rng: &mut R, len: usize, mean: f64, std: f64) -> Vec<f64> {
    (0..len).map(|_| normal(rng, mean, std)).collect()
}
