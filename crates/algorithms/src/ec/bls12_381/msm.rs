//! Shared helpers for the Pippenger bucket method used by G1 and G2

/// Scalar width covered by the Pippenger windows
pub(crate) const SCALAR_BITS: usize = 256;

/// Bucket window width for an MSM over `n` terms
///
/// Roughly `ln(n) + 2`, computed from the integer logarithm so it stays
/// available without floating point support.
pub(crate) fn window_size(n: usize) -> usize {
    if n < 32 {
        3
    } else {
        (n.ilog2() as usize * 69) / 100 + 2
    }
}

/// Extract the `width`-bit digit of a little-endian 256-bit integer starting
/// at bit `offset`
pub(crate) fn window_digit(limbs: &[u64; 4], offset: usize, width: usize) -> usize {
    let limb = offset / 64;
    let shift = offset % 64;
    if limb >= limbs.len() {
        return 0;
    }

    let mut v = limbs[limb] >> shift;
    if shift + width > 64 && limb + 1 < limbs.len() {
        v |= limbs[limb + 1] << (64 - shift);
    }
    (v & ((1u64 << width) - 1)) as usize
}

/// Number of windows covering the full scalar width
pub(crate) fn window_count(width: usize) -> usize {
    SCALAR_BITS.div_ceil(width)
}
