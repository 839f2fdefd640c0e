//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use weighted_networks::prelude::*;
//! ```

pub use crate::bayesian::{GaussianWeights, NiwParams};
pub use crate::error::NetworkError;
pub use crate::network::{
    EmbeddingInit, EmbeddingPrior, FixedSparsityEdges, GaussianErdosRenyi,
    GaussianWeightedEigenmodel, LatentEmbeddingStore, LatentFeatureEdges, SampledNetwork,
    WeightedNetworkDistribution,
};
pub use crate::primitives::{Matrix, TiledTensor, Vector};
pub use crate::traits::{AdjacencyProcess, WeightProcess};
