//! `hash_to_field` (RFC 9380, section 5.2) for Fp, Fp2 and the scalar field

use alloc::vec::Vec;

use dpair_params::hash_to_curve::{FP_UNIFORM_BYTES, SCALAR_UNIFORM_BYTES};

use super::expand::Expander;
use crate::ec::bls12_381::field::{Fp, Fp2};
use crate::ec::bls12_381::Scalar;
use crate::error::Result;

/// A field that can be sampled from uniform bytes
pub trait HashToField: Sized {
    /// Bytes consumed per element: `m * L`
    const LEN: usize;

    /// Reduce exactly `LEN` big-endian bytes to a field element
    fn from_okm(okm: &[u8]) -> Self;
}

impl HashToField for Fp {
    const LEN: usize = FP_UNIFORM_BYTES;

    fn from_okm(okm: &[u8]) -> Fp {
        let mut wide = [0u8; 96];
        wide[96 - FP_UNIFORM_BYTES..].copy_from_slice(&okm[..FP_UNIFORM_BYTES]);
        Fp::from_bytes_wide(&wide)
    }
}

impl HashToField for Fp2 {
    const LEN: usize = 2 * FP_UNIFORM_BYTES;

    fn from_okm(okm: &[u8]) -> Fp2 {
        Fp2 {
            c0: Fp::from_okm(&okm[..FP_UNIFORM_BYTES]),
            c1: Fp::from_okm(&okm[FP_UNIFORM_BYTES..]),
        }
    }
}

impl HashToField for Scalar {
    const LEN: usize = SCALAR_UNIFORM_BYTES;

    fn from_okm(okm: &[u8]) -> Scalar {
        let mut wide = [0u8; 64];
        wide[64 - SCALAR_UNIFORM_BYTES..].copy_from_slice(&okm[..SCALAR_UNIFORM_BYTES]);
        Scalar::from_bytes_wide(&wide)
    }
}

/// Hash `msg` to `count` field elements
pub fn hash_to_field<T, E>(expander: &E, msg: &[u8], count: usize) -> Result<Vec<T>>
where
    T: HashToField,
    E: Expander,
{
    let uniform_bytes = expander.expand_message(msg, count * T::LEN)?;
    Ok(uniform_bytes.chunks_exact(T::LEN).map(T::from_okm).collect())
}

/// Hash `msg` to a single scalar
pub fn hash_to_scalar<E: Expander>(expander: &E, msg: &[u8]) -> Result<Scalar> {
    let okm = expander.expand_message(msg, Scalar::LEN)?;
    Ok(Scalar::from_okm(&okm))
}
