//! Elliptic curve primitives
//!
//! Constant-time arithmetic for the pairing-friendly BLS12-381 curve.

pub mod bls12_381;

pub use bls12_381::{
    pairing as bls12_381_pairing, Engine as Bls12_381Engine, G1Affine as Bls12_381G1Affine,
    G1Projective as Bls12_381G1, G2Affine as Bls12_381G2Affine, G2Projective as Bls12_381G2,
    Gt as Bls12_381Gt, Scalar as Bls12_381Scalar,
};
