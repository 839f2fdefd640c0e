//! Broadcast view of one dense block over an N×N grid of node pairs.
//!
//! Node-pair-invariant quantities (the weight mean, covariance and their
//! mean-field expectations) are stored once and indexed as if they were a
//! dense `N×N×...` tensor. Memory stays O(block) until [`TiledTensor::to_dense`]
//! is called.

use super::{Matrix, Vector};
use serde::{Deserialize, Serialize};

/// An `N×N×block_shape` tensor whose every `(i, j)` slice is the same block.
///
/// # Examples
///
/// ```
/// use weighted_networks::primitives::{TiledTensor, Vector};
///
/// let mu = Vector::from_slice(&[0.5, -1.0]);
/// let t = TiledTensor::from_vector(3, &mu);
/// assert_eq!(t.shape(), vec![3, 3, 2]);
/// assert_eq!(t.get(&[2, 1, 1]), -1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiledTensor {
    n_nodes: usize,
    block_shape: Vec<usize>,
    block: Vec<f64>,
}

impl TiledTensor {
    /// Tiles a length-B vector into an `N×N×B` tensor.
    #[must_use]
    pub fn from_vector(n_nodes: usize, block: &Vector<f64>) -> Self {
        Self {
            n_nodes,
            block_shape: vec![block.len()],
            block: block.as_slice().to_vec(),
        }
    }

    /// Tiles an R×C matrix into an `N×N×R×C` tensor.
    #[must_use]
    pub fn from_matrix(n_nodes: usize, block: &Matrix<f64>) -> Self {
        let (rows, cols) = block.shape();
        Self {
            n_nodes,
            block_shape: vec![rows, cols],
            block: block.as_slice().to_vec(),
        }
    }

    /// Number of nodes N along each of the two leading axes.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Full logical shape `[N, N, block_shape...]`.
    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = vec![self.n_nodes, self.n_nodes];
        shape.extend_from_slice(&self.block_shape);
        shape
    }

    /// Shape of the trailing block.
    #[must_use]
    pub fn block_shape(&self) -> &[usize] {
        &self.block_shape
    }

    /// Number of logical elements in the dense view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n_nodes * self.n_nodes * self.block.len()
    }

    /// Returns true if the dense view has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The block shared by every node pair, row-major.
    #[must_use]
    pub fn shared_block(&self) -> &[f64] {
        &self.block
    }

    /// Slice for node pair `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not a node index.
    #[must_use]
    pub fn block(&self, i: usize, j: usize) -> &[f64] {
        assert!(
            i < self.n_nodes && j < self.n_nodes,
            "node pair ({i}, {j}) out of bounds for {} nodes",
            self.n_nodes
        );
        &self.block
    }

    /// Element at a full `[i, j, k...]` index.
    ///
    /// # Panics
    ///
    /// Panics if the index has the wrong rank or is out of bounds.
    #[must_use]
    pub fn get(&self, index: &[usize]) -> f64 {
        assert_eq!(
            index.len(),
            self.block_shape.len() + 2,
            "index rank must match tensor rank"
        );
        let block = self.block(index[0], index[1]);
        let mut offset = 0;
        for (&k, &dim) in index[2..].iter().zip(&self.block_shape) {
            assert!(k < dim, "index {k} out of bounds for axis of size {dim}");
            offset = offset * dim + k;
        }
        block[offset]
    }

    /// Materializes the row-major dense tensor.
    #[must_use]
    pub fn to_dense(&self) -> Vec<f64> {
        let pairs = self.n_nodes * self.n_nodes;
        let mut dense = Vec::with_capacity(pairs * self.block.len());
        for _ in 0..pairs {
            dense.extend_from_slice(&self.block);
        }
        dense
    }
}
