//! RFC 9380 known-answer tests for both BLS12-381 random-oracle suites

use dpair_algorithms::bls12_381::hash_to_curve::{hash_to_field, XmdExpander};
use dpair_algorithms::bls12_381::{Fp, Fp2, G1Affine, G1Projective, G2Affine, G2Projective};
use dpair_api::HashToCurve;
use dpair_tests::vectors::{Fp2Hex, G1_DST, G1_VECTORS, G2_DST, G2_VECTORS};
use sha2::Sha256;

fn fp(hex_str: &str) -> Fp {
    let mut bytes = [0u8; 48];
    bytes.copy_from_slice(&hex::decode(hex_str).expect("hex"));
    Fp::from_bytes(&bytes).expect("canonical field element")
}

fn fp2(v: &Fp2Hex) -> Fp2 {
    Fp2 {
        c0: fp(v.0),
        c1: fp(v.1),
    }
}

#[test]
fn g1_hash_to_field() {
    let exp = XmdExpander::<Sha256>::new(G1_DST.as_bytes()).unwrap();
    for v in G1_VECTORS {
        let u = hash_to_field::<Fp, _>(&exp, &v.msg.bytes(), 2).unwrap();
        assert_eq!(u[0], fp(v.u[0]), "{:?}", v.msg);
        assert_eq!(u[1], fp(v.u[1]), "{:?}", v.msg);
    }
}

#[test]
fn g1_map_to_curve() {
    for v in G1_VECTORS {
        for (u, q) in v.u.iter().zip(v.q.iter()) {
            let p = G1Affine::from(G1Projective::map_to_curve(&fp(u)));
            assert_eq!(p.x(), fp(q.0));
            assert_eq!(p.y(), fp(q.1));
        }
    }
}

#[test]
fn g1_hash_to_curve() {
    for v in G1_VECTORS {
        let p = G1Affine::hash_to_curve(&v.msg.bytes(), G1_DST.as_bytes()).unwrap();
        assert_eq!(p.x(), fp(v.p.0), "{:?}", v.msg);
        assert_eq!(p.y(), fp(v.p.1), "{:?}", v.msg);
        assert!(bool::from(p.is_torsion_free()));

        // the compressed form decodes with the subgroup check
        assert_eq!(G1Affine::from_compressed(&p.to_compressed()).unwrap(), p);
    }
}

#[test]
fn g2_hash_to_field() {
    let exp = XmdExpander::<Sha256>::new(G2_DST.as_bytes()).unwrap();
    for v in G2_VECTORS {
        let u = hash_to_field::<Fp2, _>(&exp, &v.msg.bytes(), 2).unwrap();
        assert_eq!(u[0], fp2(&v.u[0]), "{:?}", v.msg);
        assert_eq!(u[1], fp2(&v.u[1]), "{:?}", v.msg);
    }
}

#[test]
fn g2_map_to_curve() {
    for v in G2_VECTORS {
        for (u, q) in v.u.iter().zip(v.q.iter()) {
            let p = G2Affine::from(G2Projective::map_to_curve(&fp2(u)));
            assert_eq!(p.x(), fp2(&q.0));
            assert_eq!(p.y(), fp2(&q.1));
        }
    }
}

#[test]
fn g2_hash_to_curve() {
    for v in G2_VECTORS {
        let p = G2Affine::hash_to_curve(&v.msg.bytes(), G2_DST.as_bytes()).unwrap();
        assert_eq!(p.x(), fp2(&v.p.0), "{:?}", v.msg);
        assert_eq!(p.y(), fp2(&v.p.1), "{:?}", v.msg);
        assert!(bool::from(p.is_torsion_free()));
        assert_eq!(G2Affine::from_compressed(&p.to_compressed()).unwrap(), p);
    }
}
