//! Weighted Networks: factorized random graph models for mean-field
//! variational inference.
//!
//! A weighted network is generated by an adjacency process (does the edge
//! `i → j` exist) and an independent weight process (which value does an
//! existing edge carry). Each process exposes closed-form mean-field
//! expectations of its sufficient statistics; an external inference driver
//! reads them and pushes updated parameters back through setters.
//!
//! # Quick Start
//!
//! ```
//! use weighted_networks::prelude::*;
//!
//! // Three nodes, two-dimensional weights, edge probability 0.5
//! let model = GaussianErdosRenyi::new(3, 2, 0.5, None).unwrap();
//!
//! let log_p = model.mf_expected_log_p().unwrap();
//! assert!((log_p.get(0, 1) - 0.5_f64.ln()).abs() < 1e-12);
//!
//! let e_mu = model.mf_expected_mu();
//! assert_eq!(e_mu.shape(), vec![3, 3, 2]);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Vector, Matrix and tiled tensor views
//! - [`stats`]: Logistic link helpers, digamma, Gaussian draws
//! - [`bayesian`]: Gaussian weights with a Normal-Inverse-Wishart prior
//! - [`network`]: Adjacency processes, latent embeddings and the joint distribution
//! - [`traits`]: `AdjacencyProcess` and `WeightProcess`
//! - [`error`]: Error type shared by every fallible operation
//!
//! # Logging
//!
//! Construction and parameter updates emit `tracing` events at `debug`
//! level; dense recomputation emits `trace` events. The library never
//! installs a subscriber.

pub mod bayesian;
pub mod error;
pub mod network;
pub mod prelude;
pub mod primitives;
pub mod stats;
pub mod traits;

pub use error::{NetworkError, Result};
pub use primitives::{Matrix, TiledTensor, Vector};
pub use traits::{AdjacencyProcess, WeightProcess};
