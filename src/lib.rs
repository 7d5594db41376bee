//! # dpair
//!
//! A pure Rust, constant-time BLS12-381 pairing engine.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! dpair = "0.4"
//! ```
//!
//! ```
//! use dpair::prelude::*;
//!
//! let p = G1Affine::generator();
//! let q = G2Affine::generator();
//!
//! let mut engine = Engine::new();
//! engine.add_pair(&p, &q).add_pair_inv_g1(&p, &q);
//! assert!(engine.check());
//! ```
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `alloc`: MSM, multi-pairing and hash-to-curve on `no_std` targets with an allocator
//! - `zeroize`: Zeroizing support for field elements, scalars and Gt
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`dpair-api`]: Error type and the serialization, hash-to-curve and pairing traits
//! - [`dpair-params`]: Curve constants, encoding sizes and hash-to-curve suite identifiers
//! - [`dpair-algorithms`]: Field tower, groups, hash-to-curve and pairing arithmetic

#![cfg_attr(not(feature = "std"), no_std)]

pub use dpair_algorithms as algorithms;
pub use dpair_api as api;
pub use dpair_params as params;

pub use dpair_algorithms::bls12_381;

// Re-export the crates that appear in the public API
pub use rand_core;
pub use subtle;
#[cfg(feature = "zeroize")]
pub use zeroize;

/// Common imports for dpair users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{HashToCurve, PairingEngine};

    #[cfg(feature = "alloc")]
    pub use crate::api::Serialize;

    // Re-export the curve types
    pub use crate::bls12_381::{
        multi_miller_loop, pairing, Engine, G1Affine, G1Projective, G2Affine, G2Prepared,
        G2Projective, Gt, MillerLoopResult, Scalar, Suite,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::rand_core::OsRng;
    use crate::subtle::ConstantTimeEq;

    #[test]
    fn reexported_crates_drive_the_curve_api() {
        let s = Scalar::random(&mut OsRng);
        let p = G1Affine::generator() * s;
        assert!(bool::from(p.ct_eq(&(G1Affine::generator() * s))));
    }
}
