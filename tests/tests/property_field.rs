//! Property-based tests for the BLS12-381 field tower and scalar field

use dpair_algorithms::bls12_381::{Fp, Fp12, Fp2, Fp6, Scalar};
use proptest::prelude::*;
use rand_chacha::ChaCha20Rng;
use rand::SeedableRng;

fn fp() -> impl Strategy<Value = Fp> {
    any::<u64>().prop_map(|seed| Fp::random(ChaCha20Rng::seed_from_u64(seed)))
}

fn fp2() -> impl Strategy<Value = Fp2> {
    any::<u64>().prop_map(|seed| Fp2::random(ChaCha20Rng::seed_from_u64(seed)))
}

fn fp6() -> impl Strategy<Value = Fp6> {
    any::<u64>().prop_map(|seed| Fp6::random(ChaCha20Rng::seed_from_u64(seed)))
}

fn fp12() -> impl Strategy<Value = Fp12> {
    any::<u64>().prop_map(|seed| Fp12::random(ChaCha20Rng::seed_from_u64(seed)))
}

fn scalar() -> impl Strategy<Value = Scalar> {
    any::<u64>().prop_map(|seed| Scalar::random(ChaCha20Rng::seed_from_u64(seed)))
}

proptest! {
    #[test]
    fn fp_ring_axioms(a in fp(), b in fp(), c in fp()) {
        prop_assert_eq!(a + b, b + a);
        prop_assert_eq!(a * b, b * a);
        prop_assert_eq!((a + b) + c, a + (b + c));
        prop_assert_eq!((a * b) * c, a * (b * c));
        prop_assert_eq!(a * (b + c), a * b + a * c);
        prop_assert_eq!(a - a, Fp::zero());
        prop_assert_eq!(a.square(), a * a);
    }

    #[test]
    fn fp_inverse(a in fp()) {
        prop_assume!(!bool::from(a.is_zero()));
        let inv = a.invert().unwrap();
        prop_assert_eq!(a * inv, Fp::one());
    }

    #[test]
    fn fp_sqrt_of_square(a in fp()) {
        let s = a.square().sqrt().unwrap();
        prop_assert!(s == a || s == -a);
    }

    #[test]
    fn fp_bytes_round_trip(a in fp()) {
        prop_assert_eq!(Fp::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn fp2_field_axioms(a in fp2(), b in fp2(), c in fp2()) {
        prop_assert_eq!(a * (b + c), a * b + a * c);
        prop_assert_eq!((a * b) * c, a * (b * c));
        prop_assert_eq!(a.square(), a * a);
        if let Some(inv) = Option::<Fp2>::from(a.invert()) {
            prop_assert_eq!(a * inv, Fp2::one());
        }
    }

    #[test]
    fn fp2_sqrt_of_square(a in fp2()) {
        let s = a.square().sqrt().unwrap();
        prop_assert!(s == a || s == -a);
    }

    #[test]
    fn fp2_bytes_round_trip(a in fp2()) {
        prop_assert_eq!(Fp2::from_bytes(&a.to_bytes()).unwrap(), a);
    }

    #[test]
    fn fp6_field_axioms(a in fp6(), b in fp6()) {
        prop_assert_eq!(a * b, b * a);
        prop_assert_eq!(a.square(), a * a);
        if let Some(inv) = Option::<Fp6>::from(a.invert()) {
            prop_assert_eq!(a * inv, Fp6::one());
        }
    }

    #[test]
    fn fp12_field_axioms(a in fp12(), b in fp12()) {
        prop_assert_eq!(a * b, b * a);
        prop_assert_eq!(a.square(), a * a);
        prop_assert_eq!((a * b).frobenius_map(), a.frobenius_map() * b.frobenius_map());
        if let Some(inv) = Option::<Fp12>::from(a.invert()) {
            prop_assert_eq!(a * inv, Fp12::one());
        }
    }

    #[test]
    fn scalar_field_axioms(a in scalar(), b in scalar(), c in scalar()) {
        prop_assert_eq!(a * (b + c), a * b + a * c);
        prop_assert_eq!(a - b + b, a);
        prop_assert_eq!(Scalar::from_bytes(&a.to_bytes()).unwrap(), a);
        if let Some(inv) = Option::<Scalar>::from(a.invert()) {
            prop_assert_eq!(a * inv, Scalar::one());
        }
    }

    #[test]
    fn scalar_sqrt_of_square(a in scalar()) {
        let s = a.square().sqrt().unwrap();
        prop_assert!(s == a || s == -a);
    }
}
