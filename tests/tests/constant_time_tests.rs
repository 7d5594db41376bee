//! Timing comparisons for the secret-dependent code paths
//!
//! Each test times two input classes that a branching implementation would
//! treat differently. They are ignored by default because shared CI runners
//! are too noisy; run them with `cargo test -p dpair-tests -- --ignored`.

use dpair_algorithms::bls12_381::{Fp, G1Projective, G2Projective, Gt, Scalar};
use dpair_tests::constant_time::{TestConfig, TimingTester};
use rand::rngs::OsRng;
use std::hint::black_box;

fn assert_constant_time<A, B>(name: &str, config: TestConfig, mut a: A, mut b: B)
where
    A: FnMut(),
    B: FnMut(),
{
    for _ in 0..config.num_warmup {
        a();
        b();
    }

    let tester = TimingTester::new(config.num_samples, config.num_iterations);
    let t1 = tester.measure(&mut a);
    let t2 = tester.measure(&mut b);

    let analysis = tester
        .analyze_constant_time(&t1, &t2, config.mean_ratio_max, config.combined_score_threshold)
        .unwrap_or_else(|e| panic!("{name}: {e}"));
    println!("{}", analysis.report(name));

    assert!(
        analysis.is_constant_time,
        "{} is not constant-time: combined_score={:.3} (threshold: {:.3})",
        name,
        analysis.combined_score,
        config.combined_score_threshold
    );
}

#[test]
#[ignore = "timing-sensitive"]
fn g1_scalar_mul_constant_time() {
    let p = G1Projective::random(OsRng);
    let sparse = Scalar::one();
    let dense = -Scalar::one();

    assert_constant_time(
        "G1 scalar multiplication",
        TestConfig::for_scalar_mul(),
        || {
            black_box(p * black_box(sparse));
        },
        || {
            black_box(p * black_box(dense));
        },
    );
}

#[test]
#[ignore = "timing-sensitive"]
fn g2_scalar_mul_constant_time() {
    let p = G2Projective::random(OsRng);
    let sparse = Scalar::from(2u64);
    let dense = Scalar::random(OsRng);

    assert_constant_time(
        "G2 scalar multiplication",
        TestConfig::for_scalar_mul(),
        || {
            black_box(p * black_box(sparse));
        },
        || {
            black_box(p * black_box(dense));
        },
    );
}

#[test]
#[ignore = "timing-sensitive"]
fn fp_invert_constant_time() {
    let small = Fp::one();
    let large = -Fp::one();

    assert_constant_time(
        "Fp inversion",
        TestConfig::for_field(),
        || {
            black_box(black_box(small).invert());
        },
        || {
            black_box(black_box(large).invert());
        },
    );
}

#[test]
#[ignore = "timing-sensitive"]
fn gt_pow_constant_time() {
    let g = Gt::generator();
    let sparse = Scalar::one();
    let dense = -Scalar::one();

    assert_constant_time(
        "Gt exponentiation",
        TestConfig::for_gt_pow(),
        || {
            black_box(g.pow(black_box(&sparse)));
        },
        || {
            black_box(g.pow(black_box(&dense)));
        },
    );
}
