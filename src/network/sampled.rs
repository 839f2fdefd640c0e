//! A realized draw from a weighted network distribution.

use crate::error::{NetworkError, Result};
use crate::primitives::Matrix;
use crate::traits::validate_adjacency;
use serde::{Deserialize, Serialize};

/// Realized adjacency `A` (N×N, entries 0/1) and weights `W` (N×N×B).
///
/// Weights are stored row-major as `W[i, j, b]`. Absent edges carry a zero
/// weight vector.
///
/// # Example
///
/// ```
/// use weighted_networks::network::SampledNetwork;
/// use weighted_networks::primitives::Matrix;
///
/// let a = Matrix::from_vec(2, 2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// let w = vec![0.0, 0.0, 1.5, -0.5, -2.0, 0.5, 0.0, 0.0];
/// let net = SampledNetwork::new(a, w, 2).unwrap();
///
/// let strength = net.signed_strength();
/// assert_eq!(strength.get(0, 1), 1.0);
/// assert_eq!(net.strength_limit(), 1.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledNetwork {
    n_nodes: usize,
    weight_dim: usize,
    adjacency: Matrix<f64>,
    weights: Vec<f64>,
}

impl SampledNetwork {
    /// Assembles a realized network.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidDimension`] if `adjacency` is not
    /// square, `weight_dim == 0` or `weights.len() != N·N·B`, and
    /// [`NetworkError::InvalidParameter`] for a non-binary adjacency entry.
    pub fn new(adjacency: Matrix<f64>, weights: Vec<f64>, weight_dim: usize) -> Result<Self> {
        let n_nodes = adjacency.n_rows();
        validate_adjacency(&adjacency, n_nodes)?;
        if weight_dim == 0 {
            return Err(NetworkError::dimension_mismatch("weight dim (> 0)", 1, 0));
        }
        let expected = n_nodes * n_nodes * weight_dim;
        if weights.len() != expected {
            return Err(NetworkError::dimension_mismatch(
                "weights (N*N*B)",
                expected,
                weights.len(),
            ));
        }
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

    /// The N×N 0/1 adjacency matrix.
    #[must_use]
    pub fn adjacency(&self) -> &Matrix<f64> {
        &self.adjacency
    }

    /// Flat row-major N×N×B weights.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// True if the edge `i → j` is present.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not a node index.
    #[must_use]
    pub fn has_edge(&self, i: usize, j: usize) -> bool {
        self.adjacency.get(i, j) == 1.0
    }

    /// Weight vector of the pair `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not a node index.
    #[must_use]
    pub fn weight(&self, i: usize, j: usize) -> &[f64] {
        assert!(
            i < self.n_nodes && j < self.n_nodes,
            "node pair ({i}, {j}) out of bounds for {} nodes",
            self.n_nodes
        );
        let start = (i * self.n_nodes + j) * self.weight_dim;
        &self.weights[start..start + self.weight_dim]
    }

    /// Number of present edges.
    #[must_use]
    pub fn n_edges(&self) -> usize {
        self.adjacency.as_slice().iter().filter(|&&a| a == 1.0).count()
    }

    /// `A ⊙ Σ_b W[:, :, b]`, the per-pair signed edge strength a renderer
    /// colours by.
    #[must_use]
    pub fn signed_strength(&self) -> Matrix<f64> {
        let n = self.n_nodes;
        let mut strength = Matrix::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                if self.has_edge(i, j) {
                    strength.set(i, j, self.weight(i, j).iter().sum());
                }
            }
        }
        strength
    }

    /// Largest absolute signed strength; a symmetric colour limit.
    #[must_use]
    pub fn strength_limit(&self) -> f64 {
        self.signed_strength()
            .as_slice()
            .iter()
            .fold(0.0, |acc, &s| acc.max(s.abs()))
    }
}
