//! Constant values for the dpair pairing engine
//!
//! Everything here is a compile-time constant: curve parameters, wire sizes,
//! hash-to-curve suite identifiers and engine tuning knobs. Downstream crates
//! read these values instead of repeating literals.

#![no_std]

pub mod curves;
pub mod hash_to_curve;

pub use curves::bls12_381;
