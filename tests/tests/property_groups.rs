//! Property-based tests for G1 and G2

use dpair_algorithms::bls12_381::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn scalar() -> impl Strategy<Value = Scalar> {
    any::<u64>().prop_map(|seed| Scalar::random(ChaCha20Rng::seed_from_u64(seed)))
}

fn g1() -> impl Strategy<Value = G1Projective> {
    any::<u64>().prop_map(|seed| G1Projective::random(ChaCha20Rng::seed_from_u64(seed)))
}

fn g2() -> impl Strategy<Value = G2Projective> {
    any::<u64>().prop_map(|seed| G2Projective::random(ChaCha20Rng::seed_from_u64(seed)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn g1_group_law(a in g1(), b in g1(), c in g1()) {
        prop_assert_eq!(a + b, b + a);
        prop_assert_eq!((a + b) + c, a + (b + c));
        prop_assert_eq!(a - a, G1Projective::identity());
        prop_assert_eq!(a * Scalar::from(2u64), a.double());
    }

    #[test]
    fn g1_scalar_distributes(p in g1(), s in scalar(), t in scalar()) {
        prop_assert_eq!(p * (s + t), p * s + p * t);
        prop_assert_eq!((p * s) * t, p * (s * t));
    }

    #[test]
    fn g1_encodings_round_trip(p in g1()) {
        let a = G1Affine::from(p);
        prop_assert_eq!(G1Affine::from_compressed(&a.to_compressed()).unwrap(), a);
        prop_assert_eq!(G1Affine::from_uncompressed(&a.to_uncompressed()).unwrap(), a);
    }

    #[test]
    fn g1_msm_matches_naive(seed in any::<u64>(), n in 1usize..24) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let points: Vec<G1Affine> = (0..n)
            .map(|_| G1Affine::from(G1Projective::random(&mut rng)))
            .collect();
        let scalars: Vec<Scalar> = (0..n).map(|_| Scalar::random(&mut rng)).collect();
        let naive: G1Projective = points.iter().zip(&scalars).map(|(p, s)| p * s).sum();
        prop_assert_eq!(G1Projective::msm(&points, &scalars).unwrap(), naive);
    }

    #[test]
    fn g2_group_law(a in g2(), b in g2()) {
        prop_assert_eq!(a + b, b + a);
        prop_assert_eq!(a - b + b, a);
        prop_assert_eq!(a * Scalar::from(2u64), a.double());
    }

    #[test]
    fn g2_scalar_distributes(p in g2(), s in scalar(), t in scalar()) {
        prop_assert_eq!(p * (s + t), p * s + p * t);
    }

    #[test]
    fn g2_encodings_round_trip(p in g2()) {
        let a = G2Affine::from(p);
        prop_assert_eq!(G2Affine::from_compressed(&a.to_compressed()).unwrap(), a);
        prop_assert_eq!(G2Affine::from_uncompressed(&a.to_uncompressed()).unwrap(), a);
    }

    #[test]
    fn g2_msm_matches_naive(seed in any::<u64>(), n in 1usize..12) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let points: Vec<G2Affine> = (0..n)
            .map(|_| G2Affine::from(G2Projective::random(&mut rng)))
            .collect();
        let scalars: Vec<Scalar> = (0..n).map(|_| Scalar::random(&mut rng)).collect();
        let naive: G2Projective = points.iter().zip(&scalars).map(|(p, s)| p * s).sum();
        prop_assert_eq!(G2Projective::msm(&points, &scalars).unwrap(), naive);
    }

    #[test]
    fn hashed_points_are_in_subgroup(msg in prop::collection::vec(any::<u8>(), 0..64)) {
        use dpair_api::HashToCurve;
        let dst = b"DPAIR-PROPTEST-BLS12381G1_XMD:SHA-256_SSWU_RO_";
        let p = G1Projective::hash_to_curve(&msg, dst).unwrap();
        prop_assert!(bool::from(p.is_torsion_free()));
        let q = G2Projective::encode_to_curve(&msg, dst).unwrap();
        prop_assert!(bool::from(q.is_torsion_free()));
    }
}
