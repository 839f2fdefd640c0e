//! Scalar statistics: logistic link helpers, digamma, Gaussian densities
//! and Gaussian draws.
//!
//! # Examples
//!
//! ```
//! use weighted_networks::stats::{log_sigmoid, sigmoid};
//!
//! let x = 2.5;
//! assert!((log_sigmoid(x) - sigmoid(x).ln()).abs() < 1e-12);
//! ```

pub mod sampling;
pub mod special;

pub use sampling::{normal, normal_vec, standard_normal};
pub use special::{digamma, log_sigmoid, logit, normal_log_pdf, sigmoid};
