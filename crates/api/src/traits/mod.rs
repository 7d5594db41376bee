//! Trait definitions implemented by the curve crate

pub mod hash_to_curve;
pub mod pairing;
#[cfg(feature = "alloc")]
pub mod serialize;

pub use hash_to_curve::HashToCurve;
pub use pairing::PairingEngine;
#[cfg(feature = "alloc")]
pub use serialize::{Serialize, SerializeSecret};
