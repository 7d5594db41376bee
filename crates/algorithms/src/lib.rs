//! Constant-time BLS12-381 arithmetic
//!
//! This crate provides the field tower, the G1/G2 groups, RFC 9380
//! hash-to-curve and the optimal ate pairing used by `dpair`. The library
//! is usable in both `std` and `no_std` environments; an allocator is
//! required for multi-scalar multiplication, the pairing engine and
//! `expand_message` buffers.
//!
//! # Security
//!
//! - Field, scalar and group arithmetic on secret values runs in constant
//!   time: fixed-latency Montgomery multiplication, branch-free inversion and
//!   table lookups by linear scan.
//! - `sqrt`, `invert` and canonical decoding report failure through
//!   `subtle::CtOption` instead of branching.
//! - Multi-scalar multiplication and the subgroup checks run in variable
//!   time and are meant for public inputs.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result, ResultExt};

// Elliptic curve primitives
pub mod ec;
pub use ec::bls12_381;
pub use ec::bls12_381::{
    pairing, Engine, G1Affine, G1Projective, G2Affine, G2Projective, Gt, MillerLoopResult, Scalar,
};
