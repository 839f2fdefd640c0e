//! Core compute primitives (Vector, Matrix, TiledTensor).
//!
//! Dense row-major storage in `f64`; the network models build every
//! probability and expectation on top of these.

mod matrix;
mod tiled;
mod vector;

pub use matrix::Matrix;
pub use tiled::TiledTensor;
pub use vector::Vector;

#[cfg(test)]
#[path = "tests_matrix_contract.rs"]
mod tests_matrix_contract;
