//! Bayesian weight models.
//!
//! Edge weights follow a multivariate Gaussian whose mean and covariance
//! carry a conjugate Normal-Inverse-Wishart prior. The model exposes the
//! closed-form mean-field expectations a variational driver combines with
//! the adjacency expectations.
//!
//! # Example
//!
//! ```
//! use weighted_networks::bayesian::{GaussianWeights, NiwParams};
//! use weighted_networks::primitives::Vector;
//! use weighted_networks::traits::WeightProcess;
//!
//! let mut weights = GaussianWeights::with_default_prior(2).unwrap();
//!
//! // A driver pushes an updated variational posterior.
//! let posterior = NiwParams::default_for(2)
//!     .with_mu_0(Vector::from_slice(&[0.3, -0.1]))
//!     .with_kappa_0(11.0)
//!     .with_nu_0(14.0);
//! weights.set_variational(posterior).unwrap();
//!
//! assert_eq!(weights.mf_expected_mu().as_slice(), &[0.3, -0.1]);
//! ```

mod weights;

pub use weights::{GaussianWeights, NiwParams};
