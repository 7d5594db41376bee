//! Public API traits and types for the dpair pairing engine
//!
//! This crate provides the public API surface shared by the dpair crates:
//! the error type returned across crate boundaries and the traits that the
//! curve implementation plugs into (serialization, hash-to-curve, pairing).

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result, ResultExt};

// Re-export all traits from the traits module
pub use traits::{HashToCurve, PairingEngine};

#[cfg(feature = "alloc")]
pub use traits::{Serialize, SerializeSecret};

// Re-export trait modules for direct access
pub use traits::{hash_to_curve, pairing};

#[cfg(feature = "alloc")]
pub use traits::serialize;
