//! Parameters of supported pairing-friendly curves

pub mod bls12_381;
