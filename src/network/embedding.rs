//! Latent node embeddings for the logistic eigenmodel.
//!
//! Each node `i` owns a feature vector `fᵢ ∈ ℝ^D` and a scalar random effect
//! `λᵢ`; a global bias `μ₀` is shared by all pairs. The logit of an edge is
//!
//! ```text
//! x_ij = μ₀ + λᵢ + λⱼ + fᵢ · fⱼ
//! ```
//!
//! One embedding per node serves both the sender and the receiver role, so
//! the logit is symmetric in `(i, j)`.
//!
//! # Priors
//!
//! - μ₀ ~ N(logit(p), σ_μ0²)
//! - λᵢ ~ N(μ_λ, σ_λ²)
//! - f_id ~ N(0, σ_F²)

use crate::error::{NetworkError, Result};
use crate::primitives::Matrix;
use crate::stats::{logit, normal, normal_log_pdf, normal_vec, sigmoid};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Prior hyperparameters of a [`LatentEmbeddingStore`].
///
/// The `sigma_*` fields are standard deviations.
///
/// # Example
///
/// ```
/// use weighted_networks::network::EmbeddingPrior;
///
/// let prior = EmbeddingPrior::default().with_sigma_f(0.5).with_p(0.1);
/// assert!(prior.validate().is_ok());
/// assert!(prior.bias_prior_mean() < 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingPrior {
    /// Baseline edge probability; the bias prior is centred on `logit(p)`.
    pub p: f64,
    /// Standard deviation of the global bias prior.
    pub sigma_mu0: f64,
    /// Standard deviation of each embedding coordinate.
    pub sigma_f: f64,
    /// Mean of the per-node random effect prior.
    pub mu_lmbda: f64,
    /// Standard deviation of the per-node random effect prior.
    pub sigma_lmbda: f64,
}

impl Default for EmbeddingPrior {
    fn default() -> Self {
        Self {
            p: 0.5,
            sigma_mu0: 1.0,
            sigma_f: 1.0,
            mu_lmbda: 0.0,
            sigma_lmbda: 1.0,
        }
    }
}

impl EmbeddingPrior {
    /// Sets the baseline edge probability.
    #[must_use]
    pub fn with_p(mut self, p: f64) -> Self {
        self.p = p;
        self
    }

    /// Sets the bias prior standard deviation.
    #[must_use]
    pub fn with_sigma_mu0(mut self, sigma_mu0: f64) -> Self {
        self.sigma_mu0 = sigma_mu0;
        self
    }

    /// Sets the embedding prior standard deviation.
    #[must_use]
    pub fn with_sigma_f(mut self, sigma_f: f64) -> Self {
        self.sigma_f = sigma_f;
        self
    }

    /// Sets the random effect prior mean.
    #[must_use]
    pub fn with_mu_lmbda(mut self, mu_lmbda: f64) -> Self {
        self.mu_lmbda = mu_lmbda;
        self
    }

    /// Sets the random effect prior standard deviation.
    #[must_use]
    pub fn with_sigma_lmbda(mut self, sigma_lmbda: f64) -> Self {
        self.sigma_lmbda = sigma_lmbda;
        self
    }

    /// Prior mean of the global bias, `logit(p)`.
    #[must_use]
    pub fn bias_prior_mean(&self) -> f64 {
        logit(self.p)
    }

    /// Checks parameter domains.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidParameter`] if `p ∉ (0, 1)`, a standard
    /// deviation is not strictly positive, or `mu_lmbda` is not finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.p > 0.0 && self.p < 1.0) {
            return Err(NetworkError::invalid_parameter("p", self.p, "0 < p < 1"));
        }
        for (name, value) in [
            ("sigma_mu0", self.sigma_mu0),
            ("sigma_f", self.sigma_f),
            ("sigma_lmbda", self.sigma_lmbda),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(NetworkError::invalid_parameter(name, value, "> 0"));
            }
        }
        if !self.mu_lmbda.is_finite() {
            return Err(NetworkError::invalid_parameter(
                "mu_lmbda",
                self.mu_lmbda,
                "finite",
            ));
        }
        Ok(())
    }
}

/// Values supplied to [`LatentEmbeddingStore::initialize`]; anything left as
/// `None` is drawn from the prior.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingInit {
    /// N×D embedding matrix.
    pub features: Option<Matrix<f64>>,
    /// Length-N random effects.
    pub effects: Option<Vec<f64>>,
    /// Global bias.
    pub bias: Option<f64>,
}

impl EmbeddingInit {
    /// Supplies the embeddings.
    #[must_use]
    pub fn with_features(mut self, features: Matrix<f64>) -> Self {
        self.features = Some(features);
        self
    }

    /// Supplies the random effects.
    #[must_use]
    pub fn with_effects(mut self, effects: Vec<f64>) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Supplies the global bias.
    #[must_use]
    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = Some(bias);
        self
    }
}

/// Owner of node embeddings, random effects and the global bias.
///
/// A freshly constructed store is uninitialized: every read fails with
/// [`NetworkError::Uninitialized`] until [`initialize`](Self::initialize) or
/// the setters provide values.
///
/// # Example
///
/// ```
/// use weighted_networks::network::{EmbeddingInit, EmbeddingPrior, LatentEmbeddingStore};
/// use weighted_networks::primitives::Matrix;
/// use rand::SeedableRng;
///
/// let mut store = LatentEmbeddingStore::new(3, 2, EmbeddingPrior::default()).unwrap();
/// assert!(store.logit(0, 1).is_err());
///
/// let f = Matrix::from_vec(3, 2, vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
/// let init = EmbeddingInit::default()
///     .with_features(f)
///     .with_effects(vec![0.0; 3])
///     .with_bias(0.5);
/// store.initialize(init, &mut rand::rngs::StdRng::seed_from_u64(0)).unwrap();
///
/// // 0.5 + 0 + 0 + (1, 0)·(1, 1)
/// assert!((store.logit(0, 2).unwrap() - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatentEmbeddingStore {
    n_nodes: usize,
    n_features: usize,
    prior: EmbeddingPrior,
    features: Option<Matrix<f64>>,
    effects: Option<Vec<f64>>,
    bias: Option<f64>,
}

impl LatentEmbeddingStore {
    /// Creates an uninitialized store for `n_nodes` nodes in a
    /// `n_features`-dimensional latent space.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if either size is zero and
    /// [`NetworkError::InvalidParameter`] for an invalid prior.
    pub fn new(n_nodes: usize, n_features: usize, prior: EmbeddingPrior) -> Result<Self> {
        if n_nodes == 0 {
            return Err(NetworkError::dimension_mismatch("n_nodes (> 0)", 1, 0));
        }
        if n_features == 0 {
            return Err(NetworkError::dimension_mismatch("n_features (> 0)", 1, 0));
        }
        prior.validate()?;
        debug!(n_nodes, n_features, "created latent embedding store");
        Ok(Self {
            n_nodes,
            n_features,
            prior,
            features: None,
            effects: None,
            bias: None,
        })
    }

    /// Number of nodes N.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Latent dimension D.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Prior hyperparameters.
    #[must_use]
    pub fn prior(&self) -> &EmbeddingPrior {
        &self.prior
    }

    /// True once embeddings, random effects and bias are all set.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.features.is_some() && self.effects.is_some() && self.bias.is_some()
    }

    /// Sets every value supplied in `init` and draws the rest from the prior.
    ///
    /// Supplied values are validated before anything is written, so a failed
    /// call leaves the store unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if supplied features are not
    /// N×D or supplied effects are not length N, and
    /// [`NetworkError::InvalidParameter`] for any non-finite supplied value.
    pub fn initialize<R: Rng + ?Sized>(&mut self, init: EmbeddingInit, rng: &mut R) -> Result<()> {
        if let Some(f) = &init.features {
            self.check_features(f)?;
        }
        if let Some(l) = &init.effects {
            self.check_effects(l)?;
        }
        if let Some(b) = init.bias {
            check_bias(b)?;
        }

        let features = init
            .features
            .unwrap_or_else(|| self.draw_features(rng));
        let effects = init.effects.unwrap_or_else(|| self.draw_effects(rng));
        let bias = init.bias.unwrap_or_else(|| self.draw_bias(rng));

        debug!(
            n_nodes = self.n_nodes,
            n_features = self.n_features,
            bias,
            "initialized latent embeddings"
        );
        self.features = Some(features);
        self.effects = Some(effects);
        self.bias = Some(bias);
        Ok(())
    }

    /// Draws embeddings, random effects and bias from the prior.
    pub fn initialize_from_prior<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let features = self.draw_features(rng);
        let effects = self.draw_effects(rng);
        let bias = self.draw_bias(rng);
        debug!(
            n_nodes = self.n_nodes,
            n_features = self.n_features,
            bias,
            "drew latent embeddings from the prior"
        );
        self.features = Some(features);
        self.effects = Some(effects);
        self.bias = Some(bias);
    }

    /// Replaces the N×D embedding matrix.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `features` is not N×D
    /// and [`NetworkError::InvalidParameter`] for a non-finite entry.
    pub fn set_embeddings(&mut self, features: Matrix<f64>) -> Result<()> {
        self.check_features(&features)?;
        debug!(n_nodes = self.n_nodes, n_features = self.n_features, "updated embeddings");
        self.features = Some(features);
        Ok(())
    }

    /// Replaces the per-node random effects.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `effects.len() != N`
    /// and [`NetworkError::InvalidParameter`] for a non-finite entry.
    pub fn set_effects(&mut self, effects: Vec<f64>) -> Result<()> {
        self.check_effects(&effects)?;
        debug!(n_nodes = self.n_nodes, "updated random effects");
        self.effects = Some(effects);
        Ok(())
    }

    /// Replaces the global bias.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidParameter`] if `bias` is not finite.
    pub fn set_bias(&mut self, bias: f64) -> Result<()> {
        check_bias(bias)?;
        debug!(bias, "updated global bias");
        self.bias = Some(bias);
        Ok(())
    }

    /// The N×D embedding matrix.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if embeddings are unset.
    pub fn features(&self) -> Result<&Matrix<f64>> {
        self.features
            .as_ref()
            .ok_or_else(|| NetworkError::uninitialized("embeddings"))
    }

    /// The per-node random effects.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if random effects are unset.
    pub fn effects(&self) -> Result<&[f64]> {
        self.effects
            .as_deref()
            .ok_or_else(|| NetworkError::uninitialized("random effects"))
    }

    /// The global bias μ₀.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if the bias is unset.
    pub fn bias(&self) -> Result<f64> {
        self.bias.ok_or_else(|| NetworkError::uninitialized("bias"))
    }

    /// Edge logit `μ₀ + λᵢ + λⱼ + fᵢ·fⱼ`.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if any state is unset and
    /// [`NetworkError::InvalidParameter`] for an out-of-range node index or a
    /// logit that overflows.
    pub fn logit(&self, i: usize, j: usize) -> Result<f64> {
        let (features, effects, bias) = self.state()?;
        self.check_index(i)?;
        self.check_index(j)?;
        check_logit(pair_logit(features, effects, bias, i, j), i, j)
    }

    /// Edge probability σ(logit(i, j)), strictly inside (0, 1).
    ///
    /// # Errors
    ///
    /// Same conditions as [`logit`](Self::logit).
    pub fn probability(&self, i: usize, j: usize) -> Result<f64> {
        self.logit(i, j).map(sigmoid)
    }

    /// N×N matrix of edge logits.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if any state is unset and
    /// [`NetworkError::InvalidParameter`] if a logit overflows.
    pub fn logit_matrix(&self) -> Result<Matrix<f64>> {
        let (features, effects, bias) = self.state()?;
        trace!(n_nodes = self.n_nodes, n_features = self.n_features, "computing logit matrix");
        let n = self.n_nodes;
        let mut logits = Matrix::zeros(n, n);
        for i in 0..n {
            for j in i..n {
                let x = check_logit(pair_logit(features, effects, bias, i, j), i, j)?;
                logits.set(i, j, x);
                logits.set(j, i, x);
            }
        }
        Ok(logits)
    }

    /// Log density of the current state under the prior.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if any state is unset.
    pub fn log_prior(&self) -> Result<f64> {
        let (features, effects, bias) = self.state()?;
        let p = &self.prior;
        let var_f = p.sigma_f * p.sigma_f;
        let var_l = p.sigma_lmbda * p.sigma_lmbda;

        let lp_bias = normal_log_pdf(bias, p.bias_prior_mean(), p.sigma_mu0 * p.sigma_mu0);
        let lp_effects: f64 = effects
            .iter()
            .map(|&l| normal_log_pdf(l, p.mu_lmbda, var_l))
            .sum();
        let lp_features: f64 = features
            .as_slice()
            .iter()
            .map(|&f| normal_log_pdf(f, 0.0, var_f))
            .sum();
        Ok(lp_bias + lp_effects + lp_features)
    }

    fn draw_features<R: Rng + ?Sized>(&self, rng: &mut R) -> Matrix<f64> {
        let mut f = Matrix::zeros(self.n_nodes, self.n_features);
        for i in 0..self.n_nodes {
            for k in 0..self.n_features {
                f.set(i, k, normal(rng, 0.0, self.prior.sigma_f));
            }
        }
        f
    }

    fn draw_effects<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        normal_vec(rng, self.n_nodes, self.prior.mu_lmbda, self.prior.sigma_lmbda)
    }

    fn draw_bias<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        normal(rng, self.prior.bias_prior_mean(), self.prior.sigma_mu0)
    }

    fn state(&self) -> Result<(&Matrix<f64>, &[f64], f64)> {
        Ok((self.features()?, self.effects()?, self.bias()?))
    }

    fn check_features(&self, features: &Matrix<f64>) -> Result<()> {
        if features.shape() != (self.n_nodes, self.n_features) {
            return Err(NetworkError::shape_mismatch(
                "features",
                (self.n_nodes, self.n_features),
                features.shape(),
            ));
        }
        if !features.is_finite() {
            return Err(NetworkError::invalid_parameter(
                "features",
                "non-finite entry",
                "finite entries",
            ));
        }
        Ok(())
    }

    fn check_effects(&self, effects: &[f64]) -> Result<()> {
        if effects.len() != self.n_nodes {
            return Err(NetworkError::dimension_mismatch(
                "effects",
                self.n_nodes,
                effects.len(),
            ));
        }
        if let Some(&bad) = effects.iter().find(|x| !x.is_finite()) {
            return Err(NetworkError::invalid_parameter("effects", bad, "finite entries"));
        }
        Ok(())
    }

    fn check_index(&self, i: usize) -> Result<()> {
        if i >= self.n_nodes {
            return Err(NetworkError::invalid_parameter(
                "node index",
                i,
                &format!("< {}", self.n_nodes),
            ));
        }
        Ok(())
    }
}

fn check_bias(bias: f64) -> Result<()> {
    if !bias.is_finite() {
        return Err(NetworkError::invalid_parameter("bias", bias, "finite"));
    }
    Ok(())
}

/// Rejects logits that overflowed while summing finite state.
fn check_logit(x: f64, i: usize, j: usize) -> Result<f64> {
    if !x.is_finite() {
        return Err(NetworkError::invalid_parameter(
            &format!("logit({i}, {j})"),
            x,
            "finite (embeddings too large)",
        ));
    }
    Ok(x)
}

#[inline]
fn pair_logit(features: &Matrix<f64>, effects: &[f64], bias: f64, i: usize, j: usize) -> f64 {
    let dot: f64 = features
        .row_slice(i)
        .iter()
        .zip(features.row_slice(j))
        .map(|(a, b)| a * b)
        .sum();
    bias + effects[i] + effects[j] + dot
}

#[cfg(test)]
#[path = "embedding_tests.rs"]
mod tests;
