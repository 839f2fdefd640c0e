//! Factorized weighted network distribution: one adjacency process times one
//! weight process over an N-node graph.

use super::adjacency::{FixedSparsityEdges, LatentFeatureEdges};
use super::embedding::{EmbeddingInit, EmbeddingPrior};
use super::sampled::SampledNetwork;
use crate::bayesian::{GaussianWeights, NiwParams};
use crate::error::{NetworkError, Result};
use crate::primitives::{Matrix, TiledTensor};
use crate::traits::{AdjacencyProcess, WeightProcess};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Joint model `p(A, W) = p(A) · Π_{A[i,j]=1} p(W[i,j])`.
///
/// The weight distribution is shared by every node pair, so the weight
/// tensors are returned as [`TiledTensor`] views over one B or B×B block.
///
/// # Example
///
/// ```
/// use weighted_networks::network::GaussianErdosRenyi;
///
/// let model = GaussianErdosRenyi::new(3, 2, 0.5, None).unwrap();
///
/// let p = model.p().unwrap();
/// assert!(p.as_slice().iter().all(|&x| x == 0.5));
///
/// let mu = model.mu();
/// assert_eq!(mu.shape(), vec![3, 3, 2]);
/// assert_eq!(model.sigma().shape(), vec![3, 3, 2, 2]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedNetworkDistribution<A, W> {
    n_nodes: usize,
    weight_dim: usize,
    adjacency: A,
    weights: W,
}

/// Fixed-sparsity edges with Gaussian weights.
pub type GaussianErdosRenyi = WeightedNetworkDistribution<FixedSparsityEdges, GaussianWeights>;

/// Latent-feature logistic edges with Gaussian weights.
pub type GaussianWeightedEigenmodel =
    WeightedNetworkDistribution<LatentFeatureEdges, GaussianWeights>;

impl<A: AdjacencyProcess, W: WeightProcess> WeightedNetworkDistribution<A, W> {
    /// Composes an adjacency and a weight process.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `n_nodes` or
    /// `weight_dim` is zero, or if either process disagrees with them.
    pub fn from_parts(n_nodes: usize, weight_dim: usize, adjacency: A, weights: W) -> Result<Self> {
        if n_nodes == 0 {
            return Err(NetworkError::dimension_mismatch("n_nodes (> 0)", 1, 0));
        }
        if weight_dim == 0 {
            return Err(NetworkError::dimension_mismatch("weight dim (> 0)", 1, 0));
        }
        if adjacency.n_nodes() != n_nodes {
            return Err(NetworkError::dimension_mismatch(
                "adjacency nodes",
                n_nodes,
                adjacency.n_nodes(),
            ));
        }
        if weights.dim() != weight_dim {
            return Err(NetworkError::dimension_mismatch(
                "weight dim",
                weight_dim,
                weights.dim(),
            ));
        }
        debug!(n_nodes, weight_dim, "created weighted network distribution");
        Ok(Self {
            n_nodes,
            weight_dim,
            adjacency,
            weights,
        })
    }

    /// Number of nodes N.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Weight dimension B.
    #[must_use]
    pub fn weight_dim(&self) -> usize {
        self.weight_dim
    }

    /// The adjacency process.
    #[must_use]
    pub fn adjacency(&self) -> &A {
        &self.adjacency
    }

    /// Mutable access for parameter updates. Node count must not change.
    pub fn adjacency_mut(&mut self) -> &mut A {
        &mut self.adjacency
    }

    /// The weight process.
    #[must_use]
    pub fn weights(&self) -> &W {
        &self.weights
    }

    /// Mutable access for parameter updates. Weight dimension must not change.
    pub fn weights_mut(&mut self) -> &mut W {
        &mut self.weights
    }

    /// N×N edge probability matrix.
    ///
    /// # Errors
    ///
    /// Propagates [`AdjacencyProcess::edge_probability_matrix`] errors.
    pub fn p(&self) -> Result<Matrix<f64>> {
        self.adjacency.edge_probability_matrix()
    }

    /// Point weight mean tiled to N×N×B.
    #[must_use]
    pub fn mu(&self) -> TiledTensor {
        TiledTensor::from_vector(self.n_nodes, self.weights.mu())
    }

    /// Point weight covariance tiled to N×N×B×B.
    #[must_use]
    pub fn sigma(&self) -> TiledTensor {
        TiledTensor::from_matrix(self.n_nodes, self.weights.sigma())
    }

    /// N×N matrix of E[log p].
    ///
    /// # Errors
    ///
    /// Propagates [`AdjacencyProcess::mf_expected_log_p`] errors.
    pub fn mf_expected_log_p(&self) -> Result<Matrix<f64>> {
        self.adjacency.mf_expected_log_p()
    }

    /// N×N matrix of E[log(1 - p)].
    ///
    /// # Errors
    ///
    /// Propagates [`AdjacencyProcess::mf_expected_log_notp`] errors.
    pub fn mf_expected_log_notp(&self) -> Result<Matrix<f64>> {
        self.adjacency.mf_expected_log_notp()
    }

    /// E[μ] tiled to N×N×B.
    #[must_use]
    pub fn mf_expected_mu(&self) -> TiledTensor {
        TiledTensor::from_vector(self.n_nodes, &self.weights.mf_expected_mu())
    }

    /// E[μμᵀ] tiled to N×N×B×B.
    ///
    /// # Errors
    ///
    /// Propagates [`WeightProcess::mf_expected_mumu_t`] errors.
    pub fn mf_expected_mumu_t(&self) -> Result<TiledTensor> {
        let block = self.weights.mf_expected_mumu_t()?;
        Ok(TiledTensor::from_matrix(self.n_nodes, &block))
    }

    /// E[Σ⁻¹] tiled to N×N×B×B.
    ///
    /// # Errors
    ///
    /// Propagates [`WeightProcess::mf_expected_sigma_inv`] errors.
    pub fn mf_expected_sigma_inv(&self) -> Result<TiledTensor> {
        let block = self.weights.mf_expected_sigma_inv()?;
        Ok(TiledTensor::from_matrix(self.n_nodes, &block))
    }

    /// N×N matrix of E[log|Σ|].
    ///
    /// # Errors
    ///
    /// Propagates [`WeightProcess::mf_expected_logdet_sigma`] errors.
    pub fn mf_expected_logdet_sigma(&self) -> Result<Matrix<f64>> {
        let value = self.weights.mf_expected_logdet_sigma()?;
        Ok(Matrix::filled(self.n_nodes, self.n_nodes, value))
    }

    /// Draws a realized network: adjacency first, then one weight vector per
    /// present edge. Absent edges get zero weights.
    ///
    /// # Errors
    ///
    /// Propagates sampling errors from either process.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SampledNetwork> {
        let adjacency = self.adjacency.sample(rng)?;
        let n = self.n_nodes;
        let b = self.weight_dim;
        let mut weights = vec![0.0; n * n * b];
        for i in 0..n {
            for j in 0..n {
                if adjacency.get(i, j) == 1.0 {
                    let w = self.weights.sample(rng)?;
                    let start = (i * n + j) * b;
                    weights[start..start + b].copy_from_slice(w.as_slice());
                }
            }
        }
        trace!(n_nodes = n, weight_dim = b, "sampled network");
        SampledNetwork::new(adjacency, weights, b)
    }

    /// Adjacency log likelihood plus the weight log density of every present
    /// edge.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `network` has a different
    /// N or B, and propagates errors from either process.
    pub fn log_likelihood(&self, network: &SampledNetwork) -> Result<f64> {
        if network.n_nodes() != self.n_nodes {
            return Err(NetworkError::dimension_mismatch(
                "network nodes",
                self.n_nodes,
                network.n_nodes(),
            ));
        }
        if network.weight_dim() != self.weight_dim {
            return Err(NetworkError::dimension_mismatch(
                "network weight dim",
                self.weight_dim,
                network.weight_dim(),
            ));
        }
        let mut ll = self.adjacency.log_likelihood(network.adjacency())?;
        for i in 0..self.n_nodes {
            for j in 0..self.n_nodes {
                if network.has_edge(i, j) {
                    ll += self.weights.log_likelihood(network.weight(i, j))?;
                }
            }
        }
        Ok(ll)
    }
}

fn gaussian_weights(weight_dim: usize, prior: Option<NiwParams>) -> Result<GaussianWeights> {
    match prior {
        Some(prior) => GaussianWeights::new(weight_dim, prior),
        None => GaussianWeights::with_default_prior(weight_dim),
    }
}

impl GaussianErdosRenyi {
    /// Erdős–Rényi edges with probability `p` and B-dimensional Gaussian
    /// weights. `weight_prior` defaults to [`NiwParams::default_for`].
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `n_nodes` or
    /// `weight_dim` is zero and [`NetworkError::InvalidParameter`] for an
    /// invalid `p` or weight prior.
    pub fn new(
        n_nodes: usize,
        weight_dim: usize,
        p: f64,
        weight_prior: Option<NiwParams>,
    ) -> Result<Self> {
        let adjacency = FixedSparsityEdges::new(n_nodes, p)?;
        let weights = gaussian_weights(weight_dim, weight_prior)?;
        Self::from_parts(n_nodes, weight_dim, adjacency, weights)
    }

    /// Edge probability.
    #[must_use]
    pub fn sparsity(&self) -> f64 {
        self.adjacency.p()
    }

    /// Replaces the edge probability.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidParameter`] if `p ∉ (0, 1)`.
    pub fn set_sparsity(&mut self, p: f64) -> Result<()> {
        self.adjacency.set_p(p)
    }
}

impl GaussianWeightedEigenmodel {
    /// Eigenmodel edges over a `n_features`-dimensional latent space with
    /// B-dimensional Gaussian weights.
    ///
    /// The latent state starts uninitialized; call
    /// [`initialize`](Self::initialize) or
    /// [`initialize_from_prior`](Self::initialize_from_prior) before reading
    /// adjacency quantities.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if any size is zero and
    /// [`NetworkError::InvalidParameter`] for an invalid prior.
    pub fn new(
        n_nodes: usize,
        weight_dim: usize,
        n_features: usize,
        prior: EmbeddingPrior,
        weight_prior: Option<NiwParams>,
    ) -> Result<Self> {
        let adjacency = LatentFeatureEdges::new(n_nodes, n_features, prior)?;
        let weights = gaussian_weights(weight_dim, weight_prior)?;
        Self::from_parts(n_nodes, weight_dim, adjacency, weights)
    }

    /// Latent dimension D.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.adjacency.n_features()
    }

    /// The N×D embedding matrix.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if embeddings are unset.
    pub fn features(&self) -> Result<&Matrix<f64>> {
        self.adjacency.store().features()
    }

    /// The per-node random effects.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if random effects are unset.
    pub fn effects(&self) -> Result<&[f64]> {
        self.adjacency.store().effects()
    }

    /// The global bias μ₀.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if the bias is unset.
    pub fn bias(&self) -> Result<f64> {
        self.adjacency.store().bias()
    }

    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `features` is not N×D
    /// and [`NetworkError::InvalidParameter`] for a non-finite entry.
    pub fn set_embeddings(&mut self, features: Matrix<f64>) -> Result<()> {
        self.adjacency.set_embeddings(features)
    }

    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `effects.len() != N`
    /// and [`NetworkError::InvalidParameter`] for a non-finite entry.
    pub fn set_effects(&mut self, effects: Vec<f64>) -> Result<()> {
        self.adjacency.set_effects(effects)
    }

    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidParameter`] if `bias` is not finite.
    pub fn set_bias(&mut self, bias: f64) -> Result<()> {
        self.adjacency.set_bias(bias)
    }

    /// Sets supplied latent values and draws the rest from the prior.
    ///
    /// # Errors
    ///
    /// See [`LatentEmbeddingStore::initialize`](super::LatentEmbeddingStore::initialize).
    pub fn initialize<R: Rng + ?Sized>(&mut self, init: EmbeddingInit, rng: &mut R) -> Result<()> {
        self.adjacency.initialize(init, rng)
    }

    /// Draws every latent value from the prior.
    pub fn initialize_from_prior<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.adjacency.initialize_from_prior(rng);
    }
}

#[cfg(test)]
#[path = "distribution_tests.rs"]
mod tests;
