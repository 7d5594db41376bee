//! Optimal ate pairing over BLS12-381 and the target group Gt
//!
//! Lines are evaluated in homogeneous projective coordinates on the M-type
//! twist and folded into the accumulator with sparse `mul_by_014` products.
//! Every pair added to a [`multi_miller_loop`] shares one squaring chain, so
//! a product of n pairings costs one final exponentiation.

use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::Product;
use core::ops::{Mul, MulAssign};

use dpair_api::PairingEngine;
use dpair_params::bls12_381::{
    BLS_X, BLS_X_HAMMING_WEIGHT, BLS_X_IS_NEGATIVE, ENGINE_FLUSH_THRESHOLD, GT_SIZE,
    GT_WIDE_SIZE, SCALAR_MUL_WINDOW,
};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use tracing::{debug, instrument, trace};

use super::field::{Fp, Fp12, Fp2, Fp6};
use super::g1::G1Affine;
use super::g2::{G2Affine, G2Projective, B3};
use super::scalar::MODULUS as SCALAR_MODULUS;
use super::Scalar;
use crate::error::{validate, Error, Result};

/// 1/2 in Montgomery form
const TWO_INV: Fp = Fp::from_raw_unchecked([
    0x1804_0000_0001_5554,
    0x8550_0005_3ab0_0001,
    0x633c_b57c_253c_276f,
    0x6e22_d1ec_31eb_b502,
    0xd391_6126_f2d1_4ca2,
    0x17fb_b857_1a00_6596,
]);

/// Line evaluations per prepared point: one per doubling, one per set bit
/// of |x| below the leading one
const LINE_COUNT: usize = (BLS_X.ilog2() + BLS_X_HAMMING_WEIGHT - 1) as usize;

/// e(G1, G2) for the fixed generators
const GENERATOR: Fp12 = Fp12 {
    c0: Fp6 {
        c0: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x1972_e433_a01f_85c5,
                0x97d3_2b76_fd77_2538,
                0xc8ce_546f_c96b_cdf9,
                0xcef6_3e73_66d4_0614,
                0xa611_3427_8184_3780,
                0x13f3_448a_3fc6_d825,
            ]),
            c1: Fp::from_raw_unchecked([
                0xd263_31b0_2e9d_6995,
                0x9d68_a482_f779_7e7d,
                0x9c9b_2924_8d39_ea92,
                0xf480_1ca2_e131_07aa,
                0xa16c_0732_bdbc_b066,
                0x083c_a4af_ba36_0478,
            ]),
        },
        c1: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x59e2_61db_0916_b641,
                0x2716_b6f4_b23e_960d,
                0xc8e5_5b10_a0bd_9c45,
                0x0bdb_0bd9_9c4d_eda8,
                0x8cf8_9ebf_57fd_aac5,
                0x12d6_b792_9e77_7a5e,
            ]),
            c1: Fp::from_raw_unchecked([
                0x5fc8_5188_b0e1_5f35,
                0x34a0_6e3a_8f09_6365,
                0xdb31_26a6_e02a_d62c,
                0xfc6f_5aa9_7d9a_990b,
                0xa12f_55f5_eb89_c210,
                0x1723_703a_926f_8889,
            ]),
        },
        c2: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x9358_8f29_7182_8778,
                0x43f6_5b86_11ab_7585,
                0x3183_aaf5_ec27_9fdf,
                0xfa73_d7e1_8ac9_9df6,
                0x64e1_76a6_a64c_99b0,
                0x179f_a78c_5838_8f1f,
            ]),
            c1: Fp::from_raw_unchecked([
                0x672a_0a11_ca2a_ef12,
                0x0d11_b9b5_2aa3_f16b,
                0xa444_12d0_699d_056e,
                0xc01d_0177_221a_5ba5,
                0x66e0_cede_6c73_5529,
                0x05f5_a71e_9fdd_c339,
            ]),
        },
    },
    c1: Fp6 {
        c0: Fp2 {
            c0: Fp::from_raw_unchecked([
                0xd30a_88a1_b062_c679,
                0x5ac5_6a5d_35fc_8304,
                0xd0c8_34a6_a81f_290d,
                0xcd54_30c2_da37_07c7,
                0xf0c2_7ff7_8050_0af0,
                0x0924_5da6_e2d7_2eae,
            ]),
            c1: Fp::from_raw_unchecked([
                0x9f2e_0676_791b_5156,
                0xe2d1_c823_4918_fe13,
                0x4c9e_459f_3c56_1bf4,
                0xa3e8_5e53_b9d3_e3c1,
                0x820a_121e_21a7_0020,
                0x15af_6183_41c5_9acc,
            ]),
        },
        c1: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x7c95_658c_2499_3ab1,
                0x73eb_3872_1ca8_86b9,
                0x5256_d749_4774_34bc,
                0x8ba4_1902_ea50_4a8b,
                0x04a3_d3f8_0c86_ce6d,
                0x18a6_4a87_fb68_6eaa,
            ]),
            c1: Fp::from_raw_unchecked([
                0xbb83_e71b_b920_cf26,
                0x2a52_77ac_92a7_3945,
                0xfc0e_e59f_94f0_46a0,
                0x7158_cdf3_7860_58f7,
                0x7cc1_061b_82f9_45f6,
                0x03f8_47aa_9fdb_e567,
            ]),
        },
        c2: Fp2 {
            c0: Fp::from_raw_unchecked([
                0x8078_dba5_6134_e657,
                0x1cd7_ec9a_4399_8a6e,
                0xb1aa_599a_1a99_3766,
                0xc9a0_f62f_0842_ee44,
                0x8e15_9be3_b605_dffa,
                0x0c86_ba0d_4af1_3fc2,
            ]),
            c1: Fp::from_raw_unchecked([
                0xe80f_f2a0_6a52_ffb1,
                0x7694_ca48_721a_906c,
                0x7583_183e_03b0_8514,
                0xf567_afdd_40ce_e4e2,
                0x9a6d_96d2_e526_a5fc,
                0x197e_9f49_861f_2242,
            ]),
        },
    },
};

/// Iterate the bits of |x| below the leading one, most significant first
fn loop_bits() -> impl Iterator<Item = bool> {
    (0..BLS_X.ilog2()).rev().map(|i| (BLS_X >> i) & 1 == 1)
}

/// Result of a Miller loop, before the final exponentiation
#[derive(Copy, Clone, Debug)]
pub struct MillerLoopResult(pub(crate) Fp12);

impl Default for MillerLoopResult {
    fn default() -> Self {
        MillerLoopResult(Fp12::one())
    }
}

impl ConditionallySelectable for MillerLoopResult {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        MillerLoopResult(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl<'a, 'b> Mul<&'b MillerLoopResult> for &'a MillerLoopResult {
    type Output = MillerLoopResult;

    #[inline]
    fn mul(self, rhs: &'b MillerLoopResult) -> MillerLoopResult {
        MillerLoopResult(self.0 * rhs.0)
    }
}

impl_binops_multiplicative!(MillerLoopResult, MillerLoopResult);

/// `f^x` for the negative curve parameter, valid in the cyclotomic subgroup
fn exp_by_x(f: &Fp12) -> Fp12 {
    let tmp = f.cyclotomic_exp(BLS_X);
    if BLS_X_IS_NEGATIVE {
        tmp.conjugate()
    } else {
        tmp
    }
}

impl MillerLoopResult {
    /// Raise to `(p^12 - 1) / r`, landing in Gt
    pub fn final_exponentiation(&self) -> Gt {
        let f = self.0;

        // f^((p^6 - 1)(p^2 + 1)). A Miller loop never yields zero; a zero
        // accumulator maps to zero, which is not a member of Gt.
        let t = f.invert().map(|inv| f.conjugate() * inv).unwrap_or(Fp12::zero());
        let t = t.frobenius_map().frobenius_map() * t;

        // 3 * Phi_12(p) / r = (x - 1)^2 (x + p) (x^2 + p^2 - 1) + 3
        let a = exp_by_x(&t) * t.conjugate();
        let a = exp_by_x(&a) * a.conjugate();
        let b = exp_by_x(&a) * a.frobenius_map();
        let c = exp_by_x(&exp_by_x(&b)) * b.frobenius_map().frobenius_map() * b.conjugate();

        Gt(c * t.cyclotomic_square() * t)
    }
}

/// Element of the order-r subgroup of Fp12, written multiplicatively
#[derive(Copy, Clone, Debug)]
pub struct Gt(pub(crate) Fp12);

impl Default for Gt {
    fn default() -> Self {
        Gt::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Gt {}

impl fmt::Display for Gt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ConstantTimeEq for Gt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl ConditionallySelectable for Gt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Gt(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl Eq for Gt {}
impl PartialEq for Gt {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a, 'b> Mul<&'b Gt> for &'a Gt {
    type Output = Gt;

    #[inline]
    fn mul(self, rhs: &'b Gt) -> Gt {
        Gt(self.0 * rhs.0)
    }
}

impl_binops_multiplicative!(Gt, Gt);

impl<T> Product<T> for Gt
where
    T: Borrow<Gt>,
{
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc * item.borrow())
    }
}

fn lookup(table: &[Fp12], idx: u8) -> Fp12 {
    let mut out = Fp12::one();
    for (i, entry) in table.iter().enumerate() {
        out.conditional_assign(entry, (i as u8).ct_eq(&idx));
    }
    out
}

/// Square-and-multiply over the full field, for elements not yet known to
/// lie in the cyclotomic subgroup
fn pow_vartime(f: &Fp12, by: &[u64; 4]) -> Fp12 {
    let mut res = Fp12::one();
    for e in by.iter().rev() {
        for i in (0..64).rev() {
            res = res.square();
            if ((*e >> i) & 1) == 1 {
                res *= f;
            }
        }
    }
    res
}

impl Gt {
    /// The group identity, 1 in Fp12.
    pub fn identity() -> Gt {
        Gt(Fp12::one())
    }

    /// e(G1, G2) for the fixed generators.
    pub fn generator() -> Gt {
        Gt(GENERATOR)
    }

    /// Uniformly random element.
    pub fn random(rng: impl RngCore) -> Gt {
        Gt::generator().pow(&Scalar::random(rng))
    }

    /// Whether this is the identity.
    pub fn is_identity(&self) -> Choice {
        self.0.ct_eq(&Fp12::one())
    }

    /// Whether the element has order dividing r.
    pub fn is_torsion_free(&self) -> Choice {
        pow_vartime(&self.0, &SCALAR_MODULUS).ct_eq(&Fp12::one())
    }

    /// Square using the cyclotomic squaring.
    pub fn square(&self) -> Gt {
        Gt(self.0.cyclotomic_square())
    }

    /// Inverse; on the unit circle this is the conjugate.
    pub fn invert(&self) -> Gt {
        Gt(self.0.conjugate())
    }

    /// Exponentiation by a secret scalar with a fixed 4-bit window and a
    /// constant-time table scan per digit.
    pub fn pow(&self, by: &Scalar) -> Gt {
        let mut table = [Fp12::one(); 1 << SCALAR_MUL_WINDOW];
        for i in 1..table.len() {
            table[i] = table[i - 1] * self.0;
        }

        let mut acc = Fp12::one();
        for &digit in by.nibbles_be().iter() {
            for _ in 0..SCALAR_MUL_WINDOW {
                acc = acc.cyclotomic_square();
            }
            acc *= lookup(&table, digit);
        }
        Gt(acc)
    }

    /// Encode as twelve big-endian base-field elements.
    pub fn to_bytes(&self) -> [u8; GT_SIZE] {
        self.0.to_bytes()
    }

    /// Decode a canonical encoding and check subgroup membership.
    pub fn from_bytes(bytes: &[u8; GT_SIZE]) -> Result<Gt> {
        let f = Option::<Fp12>::from(Fp12::from_bytes(bytes))
            .ok_or(Error::Range { context: "Gt element" })?;
        let gt = Gt(f);
        if bool::from(gt.is_torsion_free()) {
            Ok(gt)
        } else {
            Err(Error::NotInSubgroup { context: "Gt element" })
        }
    }

    /// Decode two concatenated encodings and return their product.
    pub fn from_bytes_wide(bytes: &[u8; GT_WIDE_SIZE]) -> Result<Gt> {
        let mut lo = [0u8; GT_SIZE];
        let mut hi = [0u8; GT_SIZE];
        lo.copy_from_slice(&bytes[..GT_SIZE]);
        hi.copy_from_slice(&bytes[GT_SIZE..]);
        Ok(Gt::from_bytes(&lo)? * Gt::from_bytes(&hi)?)
    }
}

#[cfg(feature = "alloc")]
impl dpair_api::Serialize for Gt {
    fn from_bytes(bytes: &[u8]) -> dpair_api::Result<Self> {
        validate::length("Gt element", bytes.len(), GT_SIZE)?;
        let mut buf = [0u8; GT_SIZE];
        buf.copy_from_slice(bytes);
        Ok(Gt::from_bytes(&buf)?)
    }

    fn to_bytes(&self) -> Vec<u8> {
        Gt::to_bytes(self).to_vec()
    }
}

/// Line coefficients of a G2 point, computed once and reusable across
/// Miller loops
#[derive(Clone, Debug)]
pub struct G2Prepared {
    infinity: Choice,
    coeffs: Vec<(Fp2, Fp2, Fp2)>,
}

impl From<G2Affine> for G2Prepared {
    fn from(q: G2Affine) -> G2Prepared {
        let infinity = q.is_identity();
        // identity lines are discarded in the loop; trace the generator instead
        let q = G2Affine::conditional_select(&q, &G2Affine::generator(), infinity);

        let mut coeffs = Vec::with_capacity(LINE_COUNT);
        let mut r = G2Projective::from(q);
        for bit in loop_bits() {
            coeffs.push(doubling_step(&mut r));
            if bit {
                coeffs.push(addition_step(&mut r, &q));
            }
        }

        G2Prepared { infinity, coeffs }
    }
}

impl<'a> From<&'a G2Affine> for G2Prepared {
    fn from(q: &'a G2Affine) -> G2Prepared {
        G2Prepared::from(*q)
    }
}

/// Double `r` and return the tangent line (Costello-Lange-Naehrig, eprint
/// 2010/354)
fn doubling_step(r: &mut G2Projective) -> (Fp2, Fp2, Fp2) {
    let a = (r.x * r.y).mul_by_fp(&TWO_INV);
    let b = r.y.square();
    let c = r.z.square();
    let e = B3 * c;
    let f = e + e + e;
    let g = (b + f).mul_by_fp(&TWO_INV);
    let h = (r.y + r.z).square() - (b + c);
    let i = e - b;
    let j = r.x.square();
    let e_sq = e.square();

    r.x = a * (b - f);
    r.y = g.square() - (e_sq + e_sq + e_sq);
    r.z = b * h;

    (i, j + j + j, -h)
}

/// Add `q` to `r` and return the chord through them
fn addition_step(r: &mut G2Projective, q: &G2Affine) -> (Fp2, Fp2, Fp2) {
    let theta = r.y - q.y * r.z;
    let lambda = r.x - q.x * r.z;
    let c = theta.square();
    let d = lambda.square();
    let e = lambda * d;
    let f = r.z * c;
    let g = r.x * d;
    let h = e + f - g.double();

    r.x = lambda * h;
    r.y = theta * (g - h) - e * r.y;
    r.z = r.z * e;

    (theta * q.x - lambda * q.y, -theta, lambda)
}

/// Multiply a line evaluated at `p` into `f`
fn ell(f: &Fp12, coeffs: &(Fp2, Fp2, Fp2), p: &G1Affine) -> Fp12 {
    f.mul_by_014(
        &coeffs.0,
        &coeffs.1.mul_by_fp(&p.x),
        &coeffs.2.mul_by_fp(&p.y),
    )
}

fn apply_lines(f: Fp12, terms: &[(&G1Affine, &G2Prepared)], idx: usize) -> Fp12 {
    terms.iter().fold(f, |f, (p, q)| {
        let skip = p.is_identity() | q.infinity;
        let next = ell(&f, &q.coeffs[idx], p);
        Fp12::conditional_select(&next, &f, skip)
    })
}

/// Product of Miller loops over all `terms`, sharing one squaring chain.
/// Pairs with an identity on either side contribute 1.
#[instrument(level = "debug", skip_all, fields(pairs = terms.len()))]
pub fn multi_miller_loop(terms: &[(&G1Affine, &G2Prepared)]) -> MillerLoopResult {
    let mut f = Fp12::one();
    let mut idx = 0;
    for bit in loop_bits() {
        f = f.square();
        f = apply_lines(f, terms, idx);
        idx += 1;
        if bit {
            f = apply_lines(f, terms, idx);
            idx += 1;
        }
    }

    if BLS_X_IS_NEGATIVE {
        f = f.conjugate();
    }
    MillerLoopResult(f)
}

/// e(p, q)
pub fn pairing(p: &G1Affine, q: &G2Affine) -> Gt {
    let q = G2Prepared::from(q);
    multi_miller_loop(&[(p, &q)]).final_exponentiation()
}

/// Accumulates a product of pairings and pays for one final exponentiation
///
/// Pairs are buffered and folded into the running Miller loop product once
/// `ENGINE_FLUSH_THRESHOLD` of them are pending, and again when the result
/// is requested.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    pending: Vec<(G1Affine, G2Affine)>,
    acc: MillerLoopResult,
    pairs: usize,
}

impl Engine {
    /// An empty engine whose product is the identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs multiplied in since the last reset, identity pairs excluded.
    pub fn len(&self) -> usize {
        self.pairs
    }

    /// True when no pair contributes to the product.
    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    fn push(&mut self, p: G1Affine, q: G2Affine) {
        if bool::from(p.is_identity() | q.is_identity()) {
            trace!("identity pair skipped");
            return;
        }
        self.pending.push((p, q));
        self.pairs += 1;
        if self.pending.len() >= ENGINE_FLUSH_THRESHOLD {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let prepared: Vec<(G1Affine, G2Prepared)> = self
            .pending
            .drain(..)
            .map(|(p, q)| (p, G2Prepared::from(q)))
            .collect();
        let terms: Vec<(&G1Affine, &G2Prepared)> = prepared.iter().map(|(p, q)| (p, q)).collect();
        self.acc *= multi_miller_loop(&terms);
        debug!(pairs = terms.len(), "flushed pending pairs");
    }
}

impl PairingEngine for Engine {
    type G1 = G1Affine;
    type G2 = G2Affine;
    type Gt = Gt;

    fn add_pair(&mut self, p: &G1Affine, q: &G2Affine) -> &mut Self {
        self.push(*p, *q);
        self
    }

    fn add_pair_inv_g1(&mut self, p: &G1Affine, q: &G2Affine) -> &mut Self {
        self.push(-p, *q);
        self
    }

    fn add_pair_inv_g2(&mut self, p: &G1Affine, q: &G2Affine) -> &mut Self {
        self.push(*p, -q);
        self
    }

    fn reset(&mut self) -> &mut Self {
        self.pending.clear();
        self.acc = MillerLoopResult::default();
        self.pairs = 0;
        self
    }

    #[instrument(level = "debug", skip_all, fields(pairs = self.pairs))]
    fn result(&mut self) -> Gt {
        self.flush();
        let gt = self.acc.final_exponentiation();
        self.reset();
        gt
    }

    fn check(&mut self) -> bool {
        bool::from(self.result().is_identity())
    }
}
