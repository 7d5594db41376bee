//! `expand_message` variants from RFC 9380, section 5.3

use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;

use digest::crypto_common::BlockSizeUser;
use digest::{ExtendableOutput, FixedOutput, Update};
use dpair_params::hash_to_curve::{
    MAX_DST_LEN, MAX_EXPAND_LEN, MAX_XMD_BLOCKS, OVERSIZE_DST_SALT, SECURITY_BITS,
};

use crate::error::{validate, Result};

/// Stretches a message into a uniformly random byte string bound to a
/// domain separation tag fixed at construction
pub trait Expander {
    /// The DST actually fed to the hash, after oversize reduction
    fn dst(&self) -> &[u8];

    /// Produce `len_in_bytes` pseudo-random bytes from `msg`
    fn expand_message(&self, msg: &[u8], len_in_bytes: usize) -> Result<Vec<u8>>;
}

/// `DST_prime = DST || I2OSP(len(DST), 1)`
fn dst_prime(dst: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(dst.len() + 1);
    out.extend_from_slice(dst);
    // dst is at most MAX_DST_LEN bytes once constructed
    out.push(dst.len() as u8);
    out
}

/// `I2OSP(len_in_bytes, 2)` after checking the RFC bound
fn length_prefix(len_in_bytes: usize) -> Result<[u8; 2]> {
    validate::max_length("expand_message output", len_in_bytes, MAX_EXPAND_LEN)?;
    Ok((len_in_bytes as u16).to_be_bytes())
}

/// `expand_message_xmd` over a fixed-output hash such as SHA-256
#[derive(Clone, Debug)]
pub struct XmdExpander<D> {
    dst: Vec<u8>,
    _digest: PhantomData<D>,
}

impl<D> XmdExpander<D>
where
    D: FixedOutput + Update + BlockSizeUser + Default,
{
    /// Bind the expander to `dst`; tags longer than 255 bytes are replaced
    /// by `H("H2C-OVERSIZE-DST-" || dst)`
    pub fn new(dst: &[u8]) -> Result<Self> {
        validate::non_empty("DST", dst.len())?;
        let dst = if dst.len() > MAX_DST_LEN {
            D::default()
                .chain(OVERSIZE_DST_SALT)
                .chain(dst)
                .finalize_fixed()
                .to_vec()
        } else {
            dst.to_vec()
        };

        Ok(XmdExpander {
            dst,
            _digest: PhantomData,
        })
    }
}

impl<D> Expander for XmdExpander<D>
where
    D: FixedOutput + Update + BlockSizeUser + Default,
{
    fn dst(&self) -> &[u8] {
        &self.dst
    }

    fn expand_message(&self, msg: &[u8], len_in_bytes: usize) -> Result<Vec<u8>> {
        let b_in_bytes = D::output_size();
        let ell = len_in_bytes.div_ceil(b_in_bytes);
        validate::parameter(
            ell <= MAX_XMD_BLOCKS,
            "len_in_bytes",
            "expand_message_xmd needs more than 255 hash blocks",
        )?;
        let l_i_b_str = length_prefix(len_in_bytes)?;
        let dst_prime = dst_prime(&self.dst);
        let z_pad = vec![0u8; D::block_size()];

        let b_0 = D::default()
            .chain(&z_pad)
            .chain(msg)
            .chain(l_i_b_str)
            .chain([0u8])
            .chain(&dst_prime)
            .finalize_fixed();

        let mut uniform_bytes = Vec::with_capacity(ell * b_in_bytes);
        let mut b_i = D::default()
            .chain(&b_0)
            .chain([1u8])
            .chain(&dst_prime)
            .finalize_fixed();
        uniform_bytes.extend_from_slice(&b_i);

        for i in 2..=ell {
            let mut mixed = b_0.clone();
            for (m, b) in mixed.iter_mut().zip(b_i.iter()) {
                *m ^= b;
            }
            b_i = D::default()
                .chain(&mixed)
                .chain([i as u8])
                .chain(&dst_prime)
                .finalize_fixed();
            uniform_bytes.extend_from_slice(&b_i);
        }

        uniform_bytes.truncate(len_in_bytes);
        Ok(uniform_bytes)
    }
}

/// `expand_message_xof` over an extendable-output function such as SHAKE256
#[derive(Clone, Debug)]
pub struct XofExpander<H> {
    dst: Vec<u8>,
    _xof: PhantomData<H>,
}

impl<H> XofExpander<H>
where
    H: ExtendableOutput + Update + Default,
{
    /// Bind the expander to `dst`; tags longer than 255 bytes are replaced
    /// by `H("H2C-OVERSIZE-DST-" || dst, 2k/8)` with k = 128
    pub fn new(dst: &[u8]) -> Result<Self> {
        validate::non_empty("DST", dst.len())?;
        let dst = if dst.len() > MAX_DST_LEN {
            let mut reduced = vec![0u8; 2 * SECURITY_BITS / 8];
            H::default()
                .chain(OVERSIZE_DST_SALT)
                .chain(dst)
                .finalize_xof_into(&mut reduced);
            reduced
        } else {
            dst.to_vec()
        };

        Ok(XofExpander {
            dst,
            _xof: PhantomData,
        })
    }
}

impl<H> Expander for XofExpander<H>
where
    H: ExtendableOutput + Update + Default,
{
    fn dst(&self) -> &[u8] {
        &self.dst
    }

    fn expand_message(&self, msg: &[u8], len_in_bytes: usize) -> Result<Vec<u8>> {
        let l_i_b_str = length_prefix(len_in_bytes)?;
        let mut uniform_bytes = vec![0u8; len_in_bytes];
        H::default()
            .chain(msg)
            .chain(l_i_b_str)
            .chain(dst_prime(&self.dst))
            .finalize_xof_into(&mut uniform_bytes);
        Ok(uniform_bytes)
    }
}
