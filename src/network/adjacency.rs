//! Adjacency processes: fixed-sparsity Bernoulli edges and the logistic
//! latent-feature eigenmodel.

use super::embedding::{EmbeddingInit, EmbeddingPrior, LatentEmbeddingStore};
use crate::error::{NetworkError, Result};
use crate::primitives::Matrix;
use crate::stats::{log_sigmoid, sigmoid};
use crate::traits::AdjacencyProcess;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Homogeneous Bernoulli edges: every pair is connected with probability `p`.
///
/// There is no latent uncertainty, so the mean-field expectations reduce to
/// `log p` and `log(1 - p)` broadcast over the N×N grid.
///
/// # Example
///
/// ```
/// use weighted_networks::network::FixedSparsityEdges;
/// use weighted_networks::traits::AdjacencyProcess;
///
/// let edges = FixedSparsityEdges::new(3, 0.5).unwrap();
/// let p = edges.edge_probability_matrix().unwrap();
/// assert!(p.as_slice().iter().all(|&x| x == 0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedSparsityEdges {
    n_nodes: usize,
    p: f64,
}

impl FixedSparsityEdges {
    /// Creates the process over `n_nodes` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `n_nodes == 0` and
    /// [`NetworkError::InvalidParameter`] if `p ∉ (0, 1)`.
    pub fn new(n_nodes: usize, p: f64) -> Result<Self> {
        if n_nodes == 0 {
            return Err(NetworkError::dimension_mismatch("n_nodes (> 0)", 1, 0));
        }
        check_probability(p)?;
        debug!(n_nodes, p, "created fixed-sparsity adjacency");
        Ok(Self { n_nodes, p })
    }

    /// Edge probability.
    #[must_use]
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Replaces the edge probability.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidParameter`] if `p ∉ (0, 1)`.
    pub fn set_p(&mut self, p: f64) -> Result<()> {
        check_probability(p)?;
        debug!(p, "updated edge probability");
        self.p = p;
        Ok(())
    }

    /// Scalar E[log p] before broadcasting.
    #[must_use]
    pub fn log_p(&self) -> f64 {
        self.p.ln()
    }

    /// Scalar E[log(1 - p)] before broadcasting.
    #[must_use]
    pub fn log_notp(&self) -> f64 {
        (1.0 - self.p).ln()
    }
}

impl AdjacencyProcess for FixedSparsityEdges {
    fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    fn edge_probability_matrix(&self) -> Result<Matrix<f64>> {
        Ok(Matrix::filled(self.n_nodes, self.n_nodes, self.p))
    }

    fn mf_expected_log_p(&self) -> Result<Matrix<f64>> {
        Ok(Matrix::filled(self.n_nodes, self.n_nodes, self.log_p()))
    }

    fn mf_expected_log_notp(&self) -> Result<Matrix<f64>> {
        Ok(Matrix::filled(self.n_nodes, self.n_nodes, self.log_notp()))
    }
}

fn check_probability(p: f64) -> Result<()> {
    if !(p > 0.0 && p < 1.0) {
        return Err(NetworkError::invalid_parameter("p", p, "0 < p < 1"));
    }
    Ok(())
}

/// Logistic eigenmodel: `P[i, j] = σ(μ₀ + λᵢ + λⱼ + fᵢ·fⱼ)`.
///
/// # Mean-field expectations
///
/// E[log σ(x)] has no closed form under a Gaussian posterior over `x`. The
/// expectations here plug the current mean embeddings, effects and bias into
/// the logit and return `log σ(x)` and `log σ(-x)`. No second-order term is
/// added, so the approximation degrades as posterior variance over the
/// embeddings grows.
///
/// # Example
///
/// ```
/// use weighted_networks::network::{EmbeddingPrior, LatentFeatureEdges};
/// use weighted_networks::traits::AdjacencyProcess;
/// use rand::SeedableRng;
///
/// let mut edges = LatentFeatureEdges::new(4, 2, EmbeddingPrior::default()).unwrap();
/// assert!(edges.mf_expected_log_p().is_err());
///
/// edges.initialize_from_prior(&mut rand::rngs::StdRng::seed_from_u64(3));
/// let log_p = edges.mf_expected_log_p().unwrap();
/// assert!(log_p.as_slice().iter().all(|&x| x < 0.0));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatentFeatureEdges {
    store: LatentEmbeddingStore,
}

impl LatentFeatureEdges {
    /// Creates an uninitialized eigenmodel over `n_nodes` nodes with
    /// `n_features` latent dimensions.
    ///
    /// # Errors
    ///
    /// See [`LatentEmbeddingStore::new`].
    pub fn new(n_nodes: usize, n_features: usize, prior: EmbeddingPrior) -> Result<Self> {
        Ok(Self {
            store: LatentEmbeddingStore::new(n_nodes, n_features, prior)?,
        })
    }

    /// Wraps an existing store.
    #[must_use]
    pub fn from_store(store: LatentEmbeddingStore) -> Self {
        Self { store }
    }

    /// Read access to the embedding store.
    #[must_use]
    pub fn store(&self) -> &LatentEmbeddingStore {
        &self.store
    }

    /// Latent dimension D.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.store.n_features()
    }

    /// See [`LatentEmbeddingStore::initialize`].
    ///
    /// # Errors
    ///
    /// See [`LatentEmbeddingStore::initialize`].
    pub fn initialize<R: Rng + ?Sized>(&mut self, init: EmbeddingInit, rng: &mut R) -> Result<()> {
        self.store.initialize(init, rng)
    }

    /// See [`LatentEmbeddingStore::initialize_from_prior`].
    pub fn initialize_from_prior<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.store.initialize_from_prior(rng);
    }

    /// See [`LatentEmbeddingStore::set_embeddings`].
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `features` is not N×D
    /// and [`NetworkError::InvalidParameter`] for a non-finite entry.
    pub fn set_embeddings(&mut self, features: Matrix<f64>) -> Result<()> {
        self.store.set_embeddings(features)
    }

    /// See [`LatentEmbeddingStore::set_effects`].
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `effects.len() != N`
    /// and [`NetworkError::InvalidParameter`] for a non-finite entry.
    pub fn set_effects(&mut self, effects: Vec<f64>) -> Result<()> {
        self.store.set_effects(effects)
    }

    /// See [`LatentEmbeddingStore::set_bias`].
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidParameter`] if `bias` is not finite.
    pub fn set_bias(&mut self, bias: f64) -> Result<()> {
        self.store.set_bias(bias)
    }
}

impl AdjacencyProcess for LatentFeatureEdges {
    fn n_nodes(&self) -> usize {
        self.store.n_nodes()
    }

    fn edge_probability_matrix(&self) -> Result<Matrix<f64>> {
        Ok(self.store.logit_matrix()?.map(sigmoid))
    }

    fn mf_expected_log_p(&self) -> Result<Matrix<f64>> {
        trace!("plug-in E[log p]");
        Ok(self.store.logit_matrix()?.map(log_sigmoid))
    }

    fn mf_expected_log_notp(&self) -> Result<Matrix<f64>> {
        trace!("plug-in E[log(1 - p)]");
        Ok(self.store.logit_matrix()?.map(|x| log_sigmoid(-x)))
    }
}

#[cfg(test)]
#[path = "adjacency_tests.rs"]
mod tests;
