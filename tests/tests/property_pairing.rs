//! Property-based tests for the pairing and the multi-pairing engine

use dpair_algorithms::bls12_381::{
    multi_miller_loop, pairing, Engine, G1Affine, G1Projective, G2Affine, G2Prepared,
    G2Projective, Gt, Scalar,
};
use dpair_api::PairingEngine;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn scalar() -> impl Strategy<Value = Scalar> {
    any::<u64>().prop_map(|seed| Scalar::random(ChaCha20Rng::seed_from_u64(seed)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(6))]

    #[test]
    fn pairing_is_bilinear(a in scalar(), b in scalar()) {
        let p = G1Affine::from(G1Projective::generator() * a);
        let q = G2Affine::from(G2Projective::generator() * b);
        prop_assert_eq!(pairing(&p, &q), Gt::generator().pow(&(a * b)));
    }

    #[test]
    fn multi_pairing_matches_product(seed in any::<u64>(), n in 1usize..5) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let pairs: Vec<(G1Affine, G2Affine)> = (0..n)
            .map(|_| {
                (
                    G1Affine::from(G1Projective::random(&mut rng)),
                    G2Affine::from(G2Projective::random(&mut rng)),
                )
            })
            .collect();

        let expected: Gt = pairs.iter().map(|(p, q)| pairing(p, q)).product();

        let prepared: Vec<G2Prepared> = pairs.iter().map(|(_, q)| G2Prepared::from(q)).collect();
        let terms: Vec<(&G1Affine, &G2Prepared)> =
            pairs.iter().zip(&prepared).map(|((p, _), q)| (p, q)).collect();
        prop_assert_eq!(multi_miller_loop(&terms).final_exponentiation(), expected);

        let mut engine = Engine::new();
        for (p, q) in &pairs {
            engine.add_pair(p, q);
        }
        prop_assert_eq!(engine.result(), expected);
    }

    #[test]
    fn engine_accepts_balanced_products(a in scalar()) {
        // e(aG1, G2) * e(-G1, aG2) = 1
        let ap = G1Affine::from(G1Projective::generator() * a);
        let aq = G2Affine::from(G2Projective::generator() * a);
        let mut engine = Engine::new();
        engine
            .add_pair(&ap, &G2Affine::generator())
            .add_pair_inv_g1(&G1Affine::generator(), &aq);
        prop_assert!(engine.check());
    }

    #[test]
    fn gt_encoding_round_trips(a in scalar()) {
        let x = Gt::generator().pow(&a);
        prop_assert_eq!(Gt::from_bytes(&x.to_bytes()).unwrap(), x);
    }
}
