//! Weighted network models.
//!
//! A weighted network over N nodes is generated by two independent factors:
//! an adjacency process that decides whether each directed edge exists and
//! a weight process that gives every existing edge a B-dimensional weight.
//!
//! - [`FixedSparsityEdges`]: every edge exists with the same probability
//! - [`LatentFeatureEdges`]: logistic eigenmodel over node embeddings
//! - [`WeightedNetworkDistribution`]: the product of both factors, with
//!   the aliases [`GaussianErdosRenyi`] and [`GaussianWeightedEigenmodel`]
//!
//! # Example
//!
//! ```
//! use weighted_networks::network::{EmbeddingPrior, GaussianWeightedEigenmodel};
//! use rand::SeedableRng;
//!
//! let mut model =
//!     GaussianWeightedEigenmodel::new(5, 2, 3, EmbeddingPrior::default(), None).unwrap();
//! model.initialize_from_prior(&mut rand::rngs::StdRng::seed_from_u64(7));
//!
//! let log_p = model.mf_expected_log_p().unwrap();
//! let e_mu = model.mf_expected_mu();
//! assert_eq!(log_p.shape(), (5, 5));
//! assert_eq!(e_mu.shape(), vec![5, 5, 2]);
//! ```

mod adjacency;
mod distribution;
mod embedding;
mod sampled;

pub use adjacency::{FixedSparsityEdges, LatentFeatureEdges};
pub use distribution::{GaussianErdosRenyi, GaussianWeightedEigenmodel, WeightedNetworkDistribution};
pub use embedding::{EmbeddingInit, EmbeddingPrior, LatentEmbeddingStore};
pub use sampled::SampledNetwork;

#[cfg(test)]
#[path = "tests_network_contract.rs"]
mod tests_network_contract;
