// =========================================================================
// FALSIFY-WN: weighted network distribution contract
//
// Claims checked here:
//   - edge probabilities stay strictly inside (0, 1) for any finite logit
//   - plug-in expectations equal log σ(±x) of the current logit
//   - fixed sparsity broadcasts log p and log(1 - p)
//   - weight tensors are node-pair invariant tilings of the weight process
//   - every tensor has the documented shape
//   - latent state that overflows a logit is an error, never NaN
//
// References:
//   - Hoff (2008) "Modeling homophily and stochastic equivalence in
//     symmetric relational data"
//   - Blei, Kucukelbir & McAuliffe (2017) "Variational Inference: A Review
//     for Statisticians"
// =========================================================================

use super::*;
use crate::bayesian::NiwParams;
use crate::primitives::Matrix;
use crate::stats::{log_sigmoid, sigmoid};
use crate::traits::{AdjacencyProcess, WeightProcess};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// FALSIFY-WN-001: N=3, B=2, p=0.5 gives P = 0.5 and E[log p] ≈ -0.693
#[test]
fn falsify_wn_001_baseline_values() {
    let model = GaussianErdosRenyi::new(3, 2, 0.5, None).expect("valid model");
    let p = model.p().expect("always available");
    let log_p = model.mf_expected_log_p().expect("always available");
    for (&pij, &lij) in p.as_slice().iter().zip(log_p.as_slice()) {
        assert_eq!(pij, 0.5, "FALSIFIED WN-001: P entry {pij}");
        assert!(
            (lij - (-0.693_147_18)).abs() < 1e-8,
            "FALSIFIED WN-001: E[log p] entry {lij}"
        );
    }
}

/// FALSIFY-WN-002: a 3×3 embedding matrix is rejected when D = 2
#[test]
fn falsify_wn_002_embedding_shape() {
    let mut model = GaussianWeightedEigenmodel::new(3, 2, 2, EmbeddingPrior::default(), None)
        .expect("valid model");
    let err = model.set_embeddings(Matrix::zeros(3, 3));
    assert!(
        matches!(err, Err(ref e) if e.is_invalid_dimension()),
        "FALSIFIED WN-002: got {err:?}"
    );
}

/// FALSIFY-WN-003: a fresh eigenmodel refuses to report expectations
#[test]
fn falsify_wn_003_fresh_eigenmodel_uninitialized() {
    let model = GaussianWeightedEigenmodel::new(5, 1, 2, EmbeddingPrior::default(), None)
        .expect("valid model");
    let err = model.mf_expected_log_p();
    assert!(
        matches!(err, Err(ref e) if e.is_uninitialized()),
        "FALSIFIED WN-003: got {err:?}"
    );
}

/// FALSIFY-WN-004: saturated logits still give probabilities in (0, 1)
#[test]
fn falsify_wn_004_saturated_logits() {
    for bias in [-1e4, -745.0, 0.0, 37.0, 1e4] {
        let mut edges = LatentFeatureEdges::new(2, 1, EmbeddingPrior::default()).expect("valid");
        edges.set_embeddings(Matrix::zeros(2, 1)).expect("2x1");
        edges.set_effects(vec![0.0, 0.0]).expect("length 2");
        edges.set_bias(bias).expect("finite");
        let p = edges.edge_probability_matrix().expect("initialized");
        for &x in p.as_slice() {
            assert!(
                x > 0.0 && x < 1.0,
                "FALSIFIED WN-004: p={x} for bias={bias}"
            );
        }
    }
}

/// FALSIFY-WN-009: huge finite embeddings yield an error instead of NaN
#[test]
fn falsify_wn_009_overflow_is_not_nan() {
    let mut model = GaussianWeightedEigenmodel::new(2, 1, 2, EmbeddingPrior::default(), None)
        .expect("valid model");
    model
        .set_embeddings(Matrix::from_vec(2, 2, vec![1e200, 1e200, 1e200, -1e200]).expect("2x2"))
        .expect("finite entries");
    model.set_effects(vec![0.0, 0.0]).expect("length 2");
    model.set_bias(0.0).expect("finite");

    let p = model.p();
    assert!(
        matches!(p, Err(ref e) if e.is_invalid_parameter()),
        "FALSIFIED WN-009: P = {p:?}"
    );
    let log_p = model.mf_expected_log_p();
    assert!(
        matches!(log_p, Err(ref e) if e.is_invalid_parameter()),
        "FALSIFIED WN-009: E[log p] = {log_p:?}"
    );

    let nan = model.set_embeddings(Matrix::from_vec(2, 2, vec![f64::NAN; 4]).expect("2x2"));
    assert!(
        matches!(nan, Err(ref e) if e.is_invalid_parameter()),
        "FALSIFIED WN-009: NaN embeddings accepted"
    );
}

mod wn_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    fn initialized_edges(n: usize, d: usize, seed: u64, sigma_f: f64) -> LatentFeatureEdges {
        let prior = EmbeddingPrior::default().with_sigma_f(sigma_f);
        let mut edges = LatentFeatureEdges::new(n, d, prior).expect("valid");
        edges.initialize_from_prior(&mut StdRng::seed_from_u64(seed));
        edges
    }

    /// FALSIFY-WN-005-prop: fixed sparsity broadcasts log p and log(1 - p)
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn falsify_wn_005_prop_fixed_sparsity(
            n in 1..12usize,
            p in 1e-6..(1.0 - 1e-6),
        ) {
            let edges = FixedSparsityEdges::new(n, p).expect("valid");
            let log_p = edges.mf_expected_log_p().expect("always");
            let log_notp = edges.mf_expected_log_notp().expect("always");
            prop_assert_eq!(log_p.shape(), (n, n));
            for (&a, &b) in log_p.as_slice().iter().zip(log_notp.as_slice()) {
                prop_assert!(a == p.ln(), "FALSIFIED WN-005-prop: log p={}", a);
                prop_assert!(b == (1.0 - p).ln(), "FALSIFIED WN-005-prop: log(1-p)={}", b);
            }
        }
    }

    /// FALSIFY-WN-006-prop: probabilities in (0, 1) and p + (1 - p) = 1
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(40))]

        #[test]
        fn falsify_wn_006_prop_probability_bounds(
            n in 1..8usize,
            d in 1..4usize,
            seed in 0..1000u64,
            sigma_f in 0.1..30.0f64,
        ) {
            let edges = initialized_edges(n, d, seed, sigma_f);
            let p = edges.edge_probability_matrix().expect("initialized");
            let log_p = edges.mf_expected_log_p().expect("initialized");
            let log_notp = edges.mf_expected_log_notp().expect("initialized");
            for ((&pij, &lp), &lnp) in p.as_slice().iter().zip(log_p.as_slice()).zip(log_notp.as_slice()) {
                prop_assert!(pij > 0.0 && pij < 1.0, "FALSIFIED WN-006-prop: p={}", pij);
                prop_assert!(lp.is_finite() && lnp.is_finite());
                prop_assert!((pij + (1.0 - pij) - 1.0).abs() < 1e-15);
            }
        }
    }

    /// FALSIFY-WN-007-prop: plug-in expectations are log σ(±logit)
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(40))]

        #[test]
        fn falsify_wn_007_prop_plug_in(
            n in 1..8usize,
            d in 1..4usize,
            seed in 0..1000u64,
        ) {
            let edges = initialized_edges(n, d, seed, 1.0);
            let log_p = edges.mf_expected_log_p().expect("initialized");
            let log_notp = edges.mf_expected_log_notp().expect("initialized");
            for i in 0..n {
                for j in 0..n {
                    let x = edges.store().logit(i, j).expect("initialized");
                    prop_assert_eq!(log_p.get(i, j), log_sigmoid(x));
                    prop_assert_eq!(log_notp.get(i, j), log_sigmoid(-x));
                    prop_assert!((log_p.get(i, j) - sigmoid(x).ln()).abs() < 1e-10);
                }
            }
        }
    }

    /// FALSIFY-WN-008-prop: weight tensors tile the weight process
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        #[test]
        fn falsify_wn_008_prop_tiling(
            n in 1..6usize,
            b in 1..4usize,
            kappa in 0.5..20.0f64,
            extra_nu in 0.5..10.0f64,
        ) {
            let prior = NiwParams::default_for(b)
                .with_kappa_0(kappa)
                .with_nu_0(b as f64 + 1.0 + extra_nu);
            let model = GaussianErdosRenyi::new(n, b, 0.3, Some(prior)).expect("valid");
            let w = model.weights();

            let mu = model.mu();
            let sigma = model.sigma();
            let e_mumu = model.mf_expected_mumu_t().expect("B x B");
            let e_inv = model.mf_expected_sigma_inv().expect("SPD");
            let e_logdet = model.mf_expected_logdet_sigma().expect("SPD");
            let logdet = w.mf_expected_logdet_sigma().expect("SPD");

            prop_assert_eq!(mu.shape(), vec![n, n, b]);
            prop_assert_eq!(sigma.shape(), vec![n, n, b, b]);
            prop_assert_eq!(e_mumu.shape(), vec![n, n, b, b]);
            prop_assert_eq!(e_inv.shape(), vec![n, n, b, b]);
            prop_assert_eq!(e_logdet.shape(), (n, n));

            let dense_mu = mu.to_dense();
            for pair in dense_mu.chunks(b) {
                prop_assert_eq!(pair, w.mu().as_slice());
            }
            for &v in e_logdet.as_slice() {
                prop_assert_eq!(v, logdet);
            }
        }
    }
}
