//! BLS12-381 pairing-friendly elliptic curve implementation.
//!
//! E1: y² = x³ + 4 over Fp and its M-type sextic twist E2: y² = x³ + 4(u + 1)
//! over Fp2, with the optimal ate pairing into the order-r subgroup of Fp12.
//!
//! **Warning:** Unaudited implementation. Use at your own risk.

#[macro_use]
mod macros;

pub mod field;
pub mod g1;
pub mod g2;
pub mod hash_to_curve;
pub(crate) mod msm;
pub mod pairings;
pub mod scalar;

#[cfg(test)]
mod tests;

pub use field::{Fp, Fp12, Fp2, Fp6};
pub use g1::{G1Affine, G1Projective};
pub use g2::{G2Affine, G2Projective};
pub use hash_to_curve::{Expander, Suite, XmdExpander, XofExpander};
pub use pairings::{multi_miller_loop, pairing, Engine, G2Prepared, Gt, MillerLoopResult};
pub use scalar::Scalar;
