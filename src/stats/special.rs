//! Special functions used by the network models.
//!
//! Logistic link helpers are written to stay finite for any finite input:
//! `sigmoid(1e4)` and `log_sigmoid(-1e4)` neither overflow nor produce NaN.

use std::f64::consts::PI;

/// Largest `f64` strictly below 1.
const ONE_BELOW: f64 = 1.0 - f64::EPSILON / 2.0;

/// Smallest positive subnormal `f64`.
const SMALLEST_POSITIVE: f64 = 4.940_656_458_412_465_4e-324;

/// Logistic sigmoid σ(x) = 1 / (1 + e^(-x)), evaluated without overflow.
///
/// The result stays in the open interval (0, 1). Subnormal values near 0 are
/// kept as computed, so `sigmoid(x).ln()` tracks [`log_sigmoid`] down to
/// x ≈ -744. Below that the smallest subnormal is returned, and above
/// x ≈ 37 the largest `f64` below 1.
///
/// # Examples
///
/// ```
/// use weighted_networks::stats::sigmoid;
///
/// assert!((sigmoid(0.0) - 0.5).abs() < 1e-15);
/// assert!(sigmoid(1000.0) < 1.0);
/// assert!(sigmoid(-1000.0) > 0.0);
/// ```
#[inline]
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    let p = if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    };
    p.clamp(SMALLEST_POSITIVE, ONE_BELOW)
}

/// log σ(x) = -log(1 + e^(-x)), evaluated without overflow or cancellation.
///
/// `log(1 - σ(x))` is `log_sigmoid(-x)`.
#[inline]
#[must_use]
pub fn log_sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        -(-x).exp().ln_1p()
    } else {
        x - x.exp().ln_1p()
    }
}

/// Log-odds log(p / (1 - p)).
#[inline]
#[must_use]
pub fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// Digamma function ψ(x) = d/dx log Γ(x) for x > 0.
///
/// Shifts the argument above 10 with ψ(x) = ψ(x + 1) - 1/x and finishes with
/// the asymptotic expansion. Returns NaN for x ≤ 0.
#[must_use]
pub fn digamma(x: f64) -> f64 {
    if x <= 0.0 || x.is_nan() {
        return f64::NAN;
    }

    let mut x = x;
    let mut result = 0.0;
    while x < 10.0 {
        result -= 1.0 / x;
        x += 1.0;
    }

    let inv = 1.0 / x;
    let inv2 = inv * inv;
    let series = inv2
        * (1.0 / 12.0
            - inv2
                * (1.0 / 120.0
                    - inv2 * (1.0 / 252.0 - inv2 * (1.0 / 240.0 - inv2 * (1.0 / 132.0)))));
    result + x.ln() - 0.5 * inv - series
}

/// Log density of N(mean, variance) at `x`.
#[inline]
#[must_use]
pub fn normal_log_pdf(x: f64, mean: f64, variance: f64) -> f64 {
    let diff = x - mean;
    -0.5 * ((2.0 * PI * variance).ln() + diff * diff / variance)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

    #[test]
    fn test_sigmoid_midpoint_and_symmetry() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-15);
        for &x in &[0.1, 1.0, 3.5, 12.0] {
            assert!((sigmoid(x) + sigmoid(-x) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sigmoid_extremes_stay_open() {
        for &x in &[40.0, 800.0, 1e6, f64::MAX] {
            let p = sigmoid(x);
            assert!(p.is_finite() && p < 1.0 && p > 0.0, "sigmoid({x}) = {p}");
        }
        for &x in &[-40.0, -800.0, -1e6, f64::MIN] {
            let p = sigmoid(x);
            assert!(p.is_finite() && p > 0.0 && p < 1.0, "sigmoid({x}) = {p}");
        }
    }

    #[test]
    fn test_sigmoid_keeps_subnormal_tail() {
        let p = sigmoid(-720.0);
        assert_eq!(p, (-720.0_f64).exp());
        assert!(p < f64::MIN_POSITIVE);
        assert!((p.ln() - log_sigmoid(-720.0)).abs() < 1e-6);
        assert_eq!(sigmoid(-1e4), SMALLEST_POSITIVE);
        assert_eq!(SMALLEST_POSITIVE, f64::from_bits(1));
    }

    #[test]
    fn test_log_sigmoid_matches_naive_in_safe_range() {
        for &x in &[-5.0_f64, -1.0, 0.0, 0.5, 4.0] {
            let naive = (1.0 / (1.0 + (-x).exp())).ln();
            assert!((log_sigmoid(x) - naive).abs() < 1e-12);
        }
    }

    #[test]
    fn test_log_sigmoid_extremes() {
        assert!((log_sigmoid(-1000.0) + 1000.0).abs() < 1e-9);
        assert!(log_sigmoid(1000.0).abs() < 1e-300);
        assert!(log_sigmoid(1000.0) <= 0.0);
    }

    #[test]
    fn test_logit_inverts_sigmoid() {
        for &p in &[0.01, 0.25, 0.5, 0.9] {
            assert!((sigmoid(logit(p)) - p).abs() < 1e-12);
        }
        assert_eq!(logit(0.5), 0.0);
    }

    #[test]
    fn test_digamma_known_values() {
        assert!((digamma(1.0) + EULER_GAMMA).abs() < 1e-12);
        let half = -EULER_GAMMA - 2.0 * 2.0_f64.ln();
        assert!((digamma(0.5) - half).abs() < 1e-12);
        // ψ(10) = H_9 - γ
        let h9: f64 = (1..10).map(|k| 1.0 / f64::from(k)).sum();
        assert!((digamma(10.0) - (h9 - EULER_GAMMA)).abs() < 1e-12);
    }

    #[test]
    fn test_digamma_recurrence() {
        for &x in &[0.3, 1.7, 4.2, 25.0] {
            assert!((digamma(x + 1.0) - digamma(x) - 1.0 / x).abs() < 1e-11);
        }
        assert!(digamma(0.0).is_nan());
        assert!(digamma(-1.5).is_nan());
    }

    #[test]
    fn test_normal_log_pdf_standard() {
        let expected = -0.5 * (2.0 * PI).ln();
        assert!((normal_log_pdf(0.0, 0.0, 1.0) - expected).abs() < 1e-15);
        assert!((normal_log_pdf(3.0, 1.0, 4.0) - (-0.5 * ((8.0 * PI).ln() + 1.0))).abs() < 1e-12);
    }
}
