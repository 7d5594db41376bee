//! Hashing arbitrary messages onto a prime-order group

use crate::Result;

/// Deterministic maps from byte strings to group elements
///
/// Implementations follow RFC 9380: `hash_to_curve` is the random-oracle
/// encoding (`_RO_` suites) and `encode_to_curve` the non-uniform one
/// (`_NU_` suites). Both fail only on an invalid domain separation tag.
pub trait HashToCurve: Sized {
    /// Hash `msg` to a uniformly distributed group element
    fn hash_to_curve(msg: &[u8], dst: &[u8]) -> Result<Self>;

    /// Encode `msg` to a group element with a non-uniform distribution
    fn encode_to_curve(msg: &[u8], dst: &[u8]) -> Result<Self>;
}
