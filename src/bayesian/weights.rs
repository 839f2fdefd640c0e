//! Gaussian edge weights with a Normal-Inverse-Wishart prior.
//!
//! Every edge that exists carries a weight `w ∈ ℝ^B` drawn from N(μ, Σ),
//! shared by all node pairs.
//!
//! **Prior**: NIW(μ₀, κ₀, Ψ₀, ν₀), i.e. Σ ~ IW(Ψ₀, ν₀) and μ | Σ ~ N(μ₀, Σ/κ₀)
//! **Variational posterior**: NIW(μₙ, κₙ, Ψₙ, νₙ), pushed in by the driver
//!
//! # Mean-field expectations
//!
//! Under NIW(μₙ, κₙ, Ψₙ, νₙ):
//! - E[μ] = μₙ
//! - E[μμᵀ] = μₙμₙᵀ + Ψₙ / (κₙ(νₙ − B − 1))
//! - E[Σ⁻¹] = νₙ Ψₙ⁻¹
//! - E[log|Σ|] = log|Ψₙ| − B log 2 − Σᵢ ψ((νₙ + 1 − i)/2), i = 1..B

use crate::error::{NetworkError, Result};
use crate::primitives::{Matrix, Vector};
use crate::stats::{digamma, standard_normal};
use crate::traits::WeightProcess;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::{LN_2, PI};
use tracing::debug;

/// Relative tolerance for symmetry checks on scale matrices.
const SYMMETRY_TOL: f64 = 1e-9;

/// Parameters of a Normal-Inverse-Wishart distribution.
///
/// Used both for the prior and for the mean-field variational posterior.
///
/// # Example
///
/// ```
/// use weighted_networks::bayesian::NiwParams;
/// use weighted_networks::primitives::Matrix;
///
/// let prior = NiwParams::default_for(2).with_kappa_0(2.0).with_sigma_0(Matrix::eye(2).mul_scalar(0.5));
/// assert!(prior.validate(2).is_ok());
/// assert_eq!(prior.nu_0, 4.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NiwParams {
    /// Location μ₀
    pub mu_0: Vector<f64>,
    /// Mean precision scale κ₀
    pub kappa_0: f64,
    /// Inverse-Wishart scale matrix Ψ₀
    pub sigma_0: Matrix<f64>,
    /// Inverse-Wishart degrees of freedom ν₀
    pub nu_0: f64,
}

impl NiwParams {
    /// Default hyperparameters for weight dimension `dim`: μ₀ = 0, κ₀ = 1,
    /// Ψ₀ = I, ν₀ = dim + 2.
    #[must_use]
    pub fn default_for(dim: usize) -> Self {
        Self {
            mu_0: Vector::zeros(dim),
            kappa_0: 1.0,
            sigma_0: Matrix::eye(dim),
            nu_0: dim as f64 + 2.0,
        }
    }

    /// Sets the location μ₀.
    #[must_use]
    pub fn with_mu_0(mut self, mu_0: Vector<f64>) -> Self {
        self.mu_0 = mu_0;
        self
    }

    /// Sets κ₀.
    #[must_use]
    pub fn with_kappa_0(mut self, kappa_0: f64) -> Self {
        self.kappa_0 = kappa_0;
        self
    }

    /// Sets the scale matrix Ψ₀.
    #[must_use]
    pub fn with_sigma_0(mut self, sigma_0: Matrix<f64>) -> Self {
        self.sigma_0 = sigma_0;
        self
    }

    /// Sets ν₀.
    #[must_use]
    pub fn with_nu_0(mut self, nu_0: f64) -> Self {
        self.nu_0 = nu_0;
        self
    }

    /// Checks shapes against `dim` and parameter domains.
    ///
    /// ν₀ must exceed `dim + 1` so that E[Σ] (and with it E[μμᵀ]) is finite.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] for shape mismatches and
    /// [`NetworkError::InvalidParameter`] for out-of-domain values.
    pub fn validate(&self, dim: usize) -> Result<()> {
        if self.mu_0.len() != dim {
            return Err(NetworkError::dimension_mismatch("mu_0", dim, self.mu_0.len()));
        }
        if !self.mu_0.is_finite() {
            return Err(NetworkError::invalid_parameter(
                "mu_0",
                format!("{:?}", self.mu_0.as_slice()),
                "finite entries",
            ));
        }
        if !(self.kappa_0 > 0.0 && self.kappa_0.is_finite()) {
            return Err(NetworkError::invalid_parameter("kappa_0", self.kappa_0, "> 0"));
        }
        if !(self.nu_0 > dim as f64 + 1.0 && self.nu_0.is_finite()) {
            return Err(NetworkError::invalid_parameter(
                "nu_0",
                self.nu_0,
                &format!("> {}", dim + 1),
            ));
        }
        validate_spd("sigma_0", &self.sigma_0, dim)
    }
}

/// Checks that `m` is a `dim × dim` symmetric positive definite matrix.
fn validate_spd(name: &str, m: &Matrix<f64>, dim: usize) -> Result<()> {
    if m.shape() != (dim, dim) {
        return Err(NetworkError::shape_mismatch(name, (dim, dim), m.shape()));
    }
    let scale = m.as_slice().iter().fold(1.0_f64, |acc, x| acc.max(x.abs()));
    if !m.is_finite() || !m.is_symmetric(SYMMETRY_TOL * scale) {
        return Err(NetworkError::invalid_parameter(
            name,
            "non-symmetric matrix",
            "symmetric positive definite",
        ));
    }
    m.cholesky()
        .map(|_| ())
        .map_err(|e| NetworkError::invalid_parameter(name, e, "symmetric positive definite"))
}

/// Gaussian weight process with a conjugate Normal-Inverse-Wishart prior.
///
/// Holds a point estimate (μ, Σ) used for sampling and likelihoods, and
/// variational NIW parameters used for mean-field expectations. Posterior
/// updates are computed elsewhere and pushed in with the setters.
///
/// # Example
///
/// ```
/// use weighted_networks::bayesian::GaussianWeights;
/// use weighted_networks::traits::WeightProcess;
///
/// let weights = GaussianWeights::with_default_prior(2).unwrap();
/// assert_eq!(weights.mf_expected_mu().as_slice(), &[0.0, 0.0]);
///
/// // E[Σ⁻¹] = ν Ψ⁻¹ = 4 I under the default prior
/// let e_sigma_inv = weights.mf_expected_sigma_inv().unwrap();
/// assert!((e_sigma_inv.get(0, 0) - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianWeights {
    dim: usize,
    prior: NiwParams,
    mu: Vector<f64>,
    sigma: Matrix<f64>,
    variational: NiwParams,
}

impl GaussianWeights {
    /// Creates a weight process of dimension `dim` under `prior`.
    ///
    /// The point estimate starts at the prior mean (μ₀, Ψ₀ / (ν₀ − B − 1))
    /// and the variational parameters start at the prior.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `dim == 0` or a prior
    /// shape disagrees with `dim`, [`NetworkError::InvalidParameter`] for an
    /// out-of-domain prior.
    pub fn new(dim: usize, prior: NiwParams) -> Result<Self> {
        if dim == 0 {
            return Err(NetworkError::dimension_mismatch("weight dim (> 0)", 1, 0));
        }
        prior.validate(dim)?;

        let sigma = prior.sigma_0.mul_scalar(1.0 / (prior.nu_0 - dim as f64 - 1.0));
        debug!(dim, kappa_0 = prior.kappa_0, nu_0 = prior.nu_0, "created Gaussian weight process");
        Ok(Self {
            dim,
            mu: prior.mu_0.clone(),
            sigma,
            variational: prior.clone(),
            prior,
        })
    }

    /// Creates a weight process under [`NiwParams::default_for`].
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `dim == 0`.
    pub fn with_default_prior(dim: usize) -> Result<Self> {
        Self::new(dim, NiwParams::default_for(dim))
    }

    /// Prior hyperparameters.
    #[must_use]
    pub fn prior(&self) -> &NiwParams {
        &self.prior
    }

    /// Current variational parameters.
    #[must_use]
    pub fn variational(&self) -> &NiwParams {
        &self.variational
    }

    /// Replaces the point estimate of the mean.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `mu.len() != B`,
    /// [`NetworkError::InvalidParameter`] for non-finite entries.
    pub fn set_mu(&mut self, mu: Vector<f64>) -> Result<()> {
        if mu.len() != self.dim {
            return Err(NetworkError::dimension_mismatch("mu", self.dim, mu.len()));
        }
        if !mu.is_finite() {
            return Err(NetworkError::invalid_parameter(
                "mu",
                format!("{:?}", mu.as_slice()),
                "finite entries",
            ));
        }
        debug!(dim = self.dim, "updated weight mean");
        self.mu = mu;
        Ok(())
    }

    /// Replaces the point estimate of the covariance.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `sigma` is not B×B,
    /// [`NetworkError::InvalidParameter`] if it is not symmetric positive
    /// definite.
    pub fn set_sigma(&mut self, sigma: Matrix<f64>) -> Result<()> {
        validate_spd("sigma", &sigma, self.dim)?;
        debug!(dim = self.dim, "updated weight covariance");
        self.sigma = sigma;
        Ok(())
    }

    /// Replaces the variational NIW parameters.
    ///
    /// # Errors
    ///
    /// Same conditions as [`NiwParams::validate`].
    pub fn set_variational(&mut self, params: NiwParams) -> Result<()> {
        params.validate(self.dim)?;
        debug!(
            kappa = params.kappa_0,
            nu = params.nu_0,
            "updated weight variational parameters"
        );
        self.variational = params;
        Ok(())
    }

    /// Resets the variational parameters to the prior.
    pub fn reset_variational(&mut self) {
        self.variational = self.prior.clone();
    }

    fn sigma_cholesky(&self) -> Result<Matrix<f64>> {
        self.sigma
            .cholesky()
            .map_err(|e| NetworkError::invalid_parameter("sigma", e, "symmetric positive definite"))
    }
}

impl WeightProcess for GaussianWeights {
    fn dim(&self) -> usize {
        self.dim
    }

    fn mu(&self) -> &Vector<f64> {
        &self.mu
    }

    fn sigma(&self) -> &Matrix<f64> {
        &self.sigma
    }

    fn mf_expected_mu(&self) -> Vector<f64> {
        self.variational.mu_0.clone()
    }

    fn mf_expected_mumu_t(&self) -> Result<Matrix<f64>> {
        let v = &self.variational;
        let denom = v.kappa_0 * (v.nu_0 - self.dim as f64 - 1.0);
        let cov = v.sigma_0.mul_scalar(1.0 / denom);
        Matrix::outer(&v.mu_0, &v.mu_0)
            .add(&cov)
            .map_err(|e| NetworkError::invalid_parameter("variational sigma", e, "B x B"))
    }

    fn mf_expected_sigma_inv(&self) -> Result<Matrix<f64>> {
        let v = &self.variational;
        let inv = v.sigma_0.inverse_spd().map_err(|e| {
            NetworkError::invalid_parameter("variational sigma", e, "symmetric positive definite")
        })?;
        Ok(inv.mul_scalar(v.nu_0))
    }

    fn mf_expected_logdet_sigma(&self) -> Result<f64> {
        let v = &self.variational;
        let log_det = v.sigma_0.log_det_spd().map_err(|e| {
            NetworkError::invalid_parameter("variational sigma", e, "symmetric positive definite")
        })?;
        let b = self.dim as f64;
        let psi_sum: f64 = (1..=self.dim)
            .map(|i| digamma((v.nu_0 + 1.0 - i as f64) / 2.0))
            .sum();
        Ok(log_det - b * LN_2 - psi_sum)
    }

    fn log_likelihood(&self, weight: &[f64]) -> Result<f64> {
        if weight.len() != self.dim {
            return Err(NetworkError::dimension_mismatch("weight", self.dim, weight.len()));
        }
        let l = self.sigma_cholesky()?;

        // Solve L y = w − μ; the quadratic form is |y|².
        let mut y = vec![0.0; self.dim];
        for i in 0..self.dim {
            let mut sum = weight[i] - self.mu[i];
            for (k, y_k) in y.iter().enumerate().take(i) {
                sum -= l.get(i, k) * y_k;
            }
            y[i] = sum / l.get(i, i);
        }
        let quad: f64 = y.iter().map(|v| v * v).sum();
        let log_det: f64 = (0..self.dim).map(|i| 2.0 * l.get(i, i).ln()).sum();

        Ok(-0.5 * (self.dim as f64 * (2.0 * PI).ln() + log_det + quad))
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vector<f64>> {
        let l = self.sigma_cholesky()?;
        let z = Vector::from_vec((0..self.dim).map(|_| standard_normal(rng)).collect());
        let lz = l
            .matvec(&z)
            .map_err(|e| NetworkError::invalid_parameter("sigma", e, "B x B"))?;
        Ok(Vector::from_vec(
            (0..self.dim).map(|i| self.mu[i] + lz[i]).collect(),
        ))
    }
}

#[cfg(test)]
#[path = "weights_tests.rs"]
mod tests;
