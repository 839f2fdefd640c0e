// =========================================================================
// FALSIFY-MX: SPD matrix routines and tiled views
//
// Claims checked here:
//   - L Lᵀ reconstructs A for the Cholesky factor
//   - A · A⁻¹ = I for the SPD inverse
//   - log|A| from the Cholesky factor agrees with the product of pivots
//   - a tiled view densifies to N² copies of its block
//
// References:
//   - Golub & Van Loan (2013) "Matrix Computations"
// =========================================================================

use super::*;

fn spd_3x3() -> Matrix<f64> {
    Matrix::from_vec(3, 3, vec![4.0, 2.0, 0.6, 2.0, 5.0, 1.0, 0.6, 1.0, 3.0]).expect("valid")
}

/// FALSIFY-MX-001: L Lᵀ = A
#[test]
fn falsify_mx_001_cholesky_reconstructs() {
    let a = spd_3x3();
    let l = a.cholesky().expect("SPD");
    let llt = l.matmul(&l.transpose()).expect("square");
    for i in 0..3 {
        for j in 0..3 {
            assert!(
                (llt.get(i, j) - a.get(i, j)).abs() < 1e-12,
                "FALSIFIED MX-001: (L Lᵀ)[{i},{j}]={} != {}",
                llt.get(i, j),
                a.get(i, j)
            );
        }
    }
}

/// FALSIFY-MX-002: A A⁻¹ = I
#[test]
fn falsify_mx_002_inverse_is_inverse() {
    let a = spd_3x3();
    let prod = a.matmul(&a.inverse_spd().expect("SPD")).expect("square");
    let eye = Matrix::eye(3);
    for i in 0..3 {
        for j in 0..3 {
            assert!(
                (prod.get(i, j) - eye.get(i, j)).abs() < 1e-12,
                "FALSIFIED MX-002: (A A⁻¹)[{i},{j}]={}",
                prod.get(i, j)
            );
        }
    }
}

/// FALSIFY-MX-003: log|diag(d)| = Σ log dᵢ
#[test]
fn falsify_mx_003_log_det_diagonal() {
    let mut a = Matrix::zeros(3, 3);
    for (i, d) in [0.5, 2.0, 7.0].into_iter().enumerate() {
        a.set(i, i, d);
    }
    let expected = 0.5_f64.ln() + 2.0_f64.ln() + 7.0_f64.ln();
    let got = a.log_det_spd().expect("SPD");
    assert!(
        (got - expected).abs() < 1e-12,
        "FALSIFIED MX-003: log|A|={got}, expected {expected}"
    );
}

/// FALSIFY-MX-004: indefinite matrices are rejected
#[test]
fn falsify_mx_004_indefinite_rejected() {
    let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 2.0, 1.0]).expect("valid");
    assert!(a.cholesky().is_err(), "FALSIFIED MX-004: indefinite accepted");
    assert!(a.inverse_spd().is_err());
    assert!(a.log_det_spd().is_err());
}

/// FALSIFY-MX-005: a tiled block densifies to N² copies
#[test]
fn falsify_mx_005_tiled_dense() {
    let block = spd_3x3();
    let t = TiledTensor::from_matrix(4, &block);
    let dense = t.to_dense();
    assert_eq!(dense.len(), t.len(), "FALSIFIED MX-005: dense length");
    for chunk in dense.chunks(9) {
        assert_eq!(chunk, block.as_slice(), "FALSIFIED MX-005: chunk differs");
    }
}

mod mx_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    /// FALSIFY-MX-006-prop: A Aᵀ + n I is accepted and inverted
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn falsify_mx_006_prop_gram_inverse(
            n in 1..5usize,
            data in proptest::collection::vec(-3.0f64..3.0, 16),
        ) {
            let a = Matrix::from_vec(n, n, data[..n * n].to_vec()).expect("valid");
            let gram = a
                .matmul(&a.transpose())
                .expect("square")
                .add(&Matrix::eye(n).mul_scalar(n as f64))
                .expect("square");
            let inv = gram.inverse_spd().expect("SPD");
            let prod = gram.matmul(&inv).expect("square");
            for i in 0..n {
                for j in 0..n {
                    let target = if i == j { 1.0 } else { 0.0 };
                    prop_assert!(
                        (prod.get(i, j) - target).abs() < 1e-9,
                        "FALSIFIED MX-006-prop: (A A⁻¹)[{},{}]={}", i, j, prod.get(i, j)
                    );
                }
            }
        }
    }

    /// FALSIFY-MX-007-prop: every tiled index reads the shared block
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn falsify_mx_007_prop_tiled_get(
            n in 1..6usize,
            block in proptest::collection::vec(-10.0f64..10.0, 1..6),
        ) {
            let v = Vector::from_vec(block.clone());
            let t = TiledTensor::from_vector(n, &v);
            prop_assert_eq!(t.shape(), vec![n, n, block.len()]);
            for i in 0..n {
                for j in 0..n {
                    for (k, &expected) in block.iter().enumerate() {
                        prop_assert_eq!(t.get(&[i, j, k]), expected);
                    }
                }
            }
        }
    }
}
