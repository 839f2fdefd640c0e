//! Core traits for the two factors of a weighted network model.
//!
//! An [`AdjacencyProcess`] decides whether an edge exists; a
//! [`WeightProcess`] decides what value an existing edge carries. Both
//! expose the mean-field expectations an external variational driver needs.

use crate::error::{NetworkError, Result};
use crate::primitives::{Matrix, Vector};
use rand::Rng;

/// Stochastic rule for edge existence over a fixed set of N nodes.
///
/// # Examples
///
/// ```
/// use weighted_networks::prelude::*;
///
/// let edges = FixedSparsityEdges::new(3, 0.5).unwrap();
/// let log_p = edges.mf_expected_log_p().unwrap();
/// assert_eq!(log_p.shape(), (3, 3));
/// assert!((log_p.get(0, 2) - 0.5_f64.ln()).abs() < 1e-12);
/// ```
pub trait AdjacencyProcess {
    /// Number of nodes N.
    fn n_nodes(&self) -> usize;

    /// N×N matrix of edge probabilities, every entry in (0, 1).
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if latent state is unset and
    /// [`NetworkError::InvalidParameter`] if latent state overflows a logit.
    fn edge_probability_matrix(&self) -> Result<Matrix<f64>>;

    /// N×N matrix of E[log p] under the variational posterior.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if latent state is unset.
    fn mf_expected_log_p(&self) -> Result<Matrix<f64>>;

    /// N×N matrix of E[log(1 - p)] under the variational posterior.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if latent state is unset.
    fn mf_expected_log_notp(&self) -> Result<Matrix<f64>>;

    /// Bernoulli log likelihood of a realized 0/1 adjacency matrix.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `adjacency` is not N×N,
    /// [`NetworkError::InvalidParameter`] if an entry is not 0 or 1.
    fn log_likelihood(&self, adjacency: &Matrix<f64>) -> Result<f64> {
        validate_adjacency(adjacency, self.n_nodes())?;
        let log_p = self.mf_expected_log_p()?;
        let log_notp = self.mf_expected_log_notp()?;
        Ok(adjacency
            .as_slice()
            .iter()
            .zip(log_p.as_slice().iter().zip(log_notp.as_slice()))
            .map(|(&a, (&lp, &lnp))| if a == 1.0 { lp } else { lnp })
            .sum())
    }

    /// Draws a realized N×N adjacency matrix with entries in {0, 1}.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Uninitialized`] if latent state is unset.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Matrix<f64>>
    where
        Self: Sized,
    {
        let probs = self.edge_probability_matrix()?;
        Ok(probs.map(|p| if rng.gen::<f64>() < p { 1.0 } else { 0.0 }))
    }
}

/// Gaussian distribution over the B-dimensional weight of an existing edge.
///
/// The weight distribution is shared by every node pair.
pub trait WeightProcess {
    /// Weight dimension B.
    fn dim(&self) -> usize;

    /// Current point estimate of the weight mean.
    fn mu(&self) -> &Vector<f64>;

    /// Current point estimate of the weight covariance.
    fn sigma(&self) -> &Matrix<f64>;

    /// E[μ] under the variational posterior.
    fn mf_expected_mu(&self) -> Vector<f64>;

    /// E[μμᵀ] under the variational posterior.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidParameter`] if the variational mean and
    /// scale matrix disagree in shape.
    fn mf_expected_mumu_t(&self) -> Result<Matrix<f64>>;

    /// E[Σ⁻¹] under the variational posterior.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidParameter`] if the scale matrix cannot
    /// be inverted.
    fn mf_expected_sigma_inv(&self) -> Result<Matrix<f64>>;

    /// E[log |Σ|] under the variational posterior.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidParameter`] if the scale matrix is not
    /// positive definite.
    fn mf_expected_logdet_sigma(&self) -> Result<f64>;

    /// Gaussian log density of one weight vector under the point estimate.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `weight.len() != B`.
    fn log_likelihood(&self, weight: &[f64]) -> Result<f64>;

    /// Draws one weight vector from N(μ, Σ).
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidParameter`] if Σ is not positive definite.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vector<f64>>
    where
        Self: Sized;
}

/// Checks that `adjacency` is an N×N matrix with entries in {0, 1}.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidDimension`] on a shape mismatch and
/// [`NetworkError::InvalidParameter`] on a non-binary entry.
pub fn validate_adjacency(adjacency: &Matrix<f64>, n_nodes: usize) -> Result<()> {
    if adjacency.shape() != (n_nodes, n_nodes) {
        return Err(NetworkError::shape_mismatch(
            "adjacency",
            (n_nodes, n_nodes),
            adjacency.shape(),
        ));
    }
    if let Some(&bad) = adjacency
        .as_slice()
        .iter()
        .find(|&&a| a != 0.0 && a != 1.0)
    {
        return Err(NetworkError::invalid_parameter(
            "adjacency entry",
            bad,
            "0 or 1",
        ));
    }
    Ok(())
}
