//! G₂ group implementation for BLS12-381.

use alloc::vec;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use dpair_params::bls12_381::{
    BLS_X, BLS_X_IS_NEGATIVE, FLAG_COMPRESSED, FLAG_INFINITY, FLAG_MASK, FLAG_SORT, FP2_SIZE,
    FP_SIZE, G2_COMPRESSED_SIZE, G2_UNCOMPRESSED_SIZE, SCALAR_MUL_WINDOW,
};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use tracing::{instrument, trace};

use super::field::fp::Fp;
use super::field::fp2::Fp2;
use super::msm;
use super::Scalar;
use crate::error::{validate, Error, Result};

/// G₂ affine point representation.
#[derive(Copy, Clone, Debug)]
pub struct G2Affine {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    infinity: Choice,
}

impl Default for G2Affine {
    fn default() -> G2Affine {
        G2Affine::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for G2Affine {}

impl fmt::Display for G2Affine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G2Projective> for G2Affine {
    fn from(p: &'a G2Projective) -> G2Affine {
        let zinv = p.z.invert().unwrap_or(Fp2::zero());
        let x = p.x * zinv;
        let y = p.y * zinv;

        let tmp = G2Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        };

        G2Affine::conditional_select(&tmp, &G2Affine::identity(), zinv.is_zero())
    }
}

impl From<G2Projective> for G2Affine {
    fn from(p: G2Projective) -> G2Affine {
        G2Affine::from(&p)
    }
}

impl ConstantTimeEq for G2Affine {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.infinity & other.infinity)
            | ((!self.infinity)
                & (!other.infinity)
                & self.x.ct_eq(&other.x)
                & self.y.ct_eq(&other.y))
    }
}

impl ConditionallySelectable for G2Affine {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G2Affine {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            y: Fp2::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl Eq for G2Affine {}
impl PartialEq for G2Affine {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a G2Affine {
    type Output = G2Affine;

    #[inline]
    fn neg(self) -> G2Affine {
        G2Affine {
            x: self.x,
            y: Fp2::conditional_select(&-self.y, &Fp2::one(), self.infinity),
            infinity: self.infinity,
        }
    }
}

impl Neg for G2Affine {
    type Output = G2Affine;

    #[inline]
    fn neg(self) -> G2Affine {
        -&self
    }
}

impl<'a, 'b> Add<&'b G2Projective> for &'a G2Affine {
    type Output = G2Projective;

    #[inline]
    fn add(self, rhs: &'b G2Projective) -> G2Projective {
        rhs.add_mixed(self)
    }
}

impl<'a, 'b> Add<&'b G2Affine> for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn add(self, rhs: &'b G2Affine) -> G2Projective {
        self.add_mixed(rhs)
    }
}

impl<'a, 'b> Sub<&'b G2Projective> for &'a G2Affine {
    type Output = G2Projective;

    #[inline]
    fn sub(self, rhs: &'b G2Projective) -> G2Projective {
        self + &(-rhs)
    }
}

impl<'a, 'b> Sub<&'b G2Affine> for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn sub(self, rhs: &'b G2Affine) -> G2Projective {
        self + &(-rhs)
    }
}

impl<T> Sum<T> for G2Projective
where
    T: Borrow<G2Projective>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc + item.borrow())
    }
}

impl_binops_additive!(G2Projective, G2Affine);
impl_add_sub_specify_output!(G2Affine, G2Projective, G2Projective);

/// Curve constant B = 4(u+1)
const B: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0xaa27_0000_000c_fff3,
        0x53cc_0032_fc34_000a,
        0x478f_e97a_6b0a_807f,
        0xb1d3_7ebe_e6ba_24d7,
        0x8ec9_733b_bf78_ab2f,
        0x09d6_4551_3d83_de7e,
    ]),
    c1: Fp::from_raw_unchecked([
        0xaa27_0000_000c_fff3,
        0x53cc_0032_fc34_000a,
        0x478f_e97a_6b0a_807f,
        0xb1d3_7ebe_e6ba_24d7,
        0x8ec9_733b_bf78_ab2f,
        0x09d6_4551_3d83_de7e,
    ]),
};

/// 3B for the complete formulas
pub(crate) const B3: Fp2 = Fp2::add(&Fp2::add(&B, &B), &B);

/// 1 / (u+1)^((p-1)/3)
const PSI_COEFF_X: Fp2 = Fp2 {
    c0: Fp::zero(),
    c1: Fp::from_raw_unchecked([
        0x890d_c9e4_8675_45c3,
        0x2af3_2253_3285_a5d5,
        0x5088_0866_309b_7e2c,
        0xa20d_1b8c_7e88_1024,
        0x14e4_f04f_e2db_9068,
        0x14e5_6d3f_1564_853a,
    ]),
};

/// 1 / (u+1)^((p-1)/2)
const PSI_COEFF_Y: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x3e2f_585d_a55c_9ad1,
        0x4294_213d_86c1_8183,
        0x3828_44c8_8b62_3732,
        0x92ad_2afd_1910_3e18,
        0x1d79_4e4f_ac7c_f0b9,
        0x0bd5_92fc_7d82_5ec8,
    ]),
    c1: Fp::from_raw_unchecked([
        0x7bcf_a7a2_5aa3_0fda,
        0xdc17_dec1_2a92_7e7c,
        0x2f08_8dd8_6b4e_bef1,
        0xd1ca_2087_da74_d4a7,
        0x2da2_5966_96ce_bc1d,
        0x0e2b_7eed_bbfd_87d2,
    ]),
};

/// 1 / 2^((p-1)/3)
const PSI2_COEFF_X: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0xcd03_c9e4_8671_f071,
        0x5dab_2246_1fcd_a5d2,
        0x5870_42af_d385_1b95,
        0x8eb6_0ebe_01ba_cb9e,
        0x03f9_7d6e_83d0_50d2,
        0x18f0_2065_5463_8741,
    ]),
    c1: Fp::zero(),
};

const GENERATOR_X: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0xf5f2_8fa2_0294_0a10,
        0xb3f5_fb26_87b4_961a,
        0xa1a8_93b5_3e2a_e580,
        0x9894_999d_1a3c_aee9,
        0x6f67_b763_1863_366b,
        0x0581_9192_4350_bcd7,
    ]),
    c1: Fp::from_raw_unchecked([
        0xa5a9_c075_9e23_f606,
        0xaaa0_c59d_bccd_60c3,
        0x3bb1_7e18_e286_7806,
        0x1b1a_b6cc_8541_b367,
        0xc2b6_ed0e_f215_8547,
        0x1192_2a09_7360_edf3,
    ]),
};

const GENERATOR_Y: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x4c73_0af8_6049_4c4a,
        0x597c_fa1f_5e36_9c5a,
        0xe7e6_856c_aa0a_635a,
        0xbbef_b5e9_6e0d_495f,
        0x07d3_a975_f0ef_25a2,
        0x0083_fd8e_7e80_dae5,
    ]),
    c1: Fp::from_raw_unchecked([
        0xadc0_fc92_df64_b05d,
        0x18aa_270a_2b14_61dc,
        0x86ad_ac6a_3be4_eba0,
        0x7949_5c4e_c93d_a33a,
        0xe717_5850_a43c_caed,
        0x0b2b_c2a1_63de_1bf2,
    ]),
};

#[inline(always)]
fn mul_by_3b(a: Fp2) -> Fp2 {
    a * B3
}

/// Write a coordinate in point-encoding order: c1 then c0
fn encode_fp2(a: &Fp2) -> [u8; FP2_SIZE] {
    let mut res = [0u8; FP2_SIZE];
    res[..FP_SIZE].copy_from_slice(&a.c1.to_bytes());
    res[FP_SIZE..].copy_from_slice(&a.c0.to_bytes());
    res
}

/// Split a point-encoded coordinate (c1 then c0) into canonical Fp2, or
/// report which context failed
fn decode_fp2(bytes: &[u8], context: &'static str) -> Result<Fp2> {
    let mut c1 = [0u8; FP_SIZE];
    let mut c0 = [0u8; FP_SIZE];
    c1.copy_from_slice(&bytes[..FP_SIZE]);
    c0.copy_from_slice(&bytes[FP_SIZE..FP2_SIZE]);
    let c = Fp::from_bytes(&c1).and_then(|c1| Fp::from_bytes(&c0).map(|c0| Fp2 { c0, c1 }));
    Option::<Fp2>::from(c).ok_or(Error::Range { context })
}

impl G2Affine {
    /// Point at infinity.
    pub fn identity() -> G2Affine {
        G2Affine {
            x: Fp2::zero(),
            y: Fp2::one(),
            infinity: Choice::from(1u8),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G2Affine {
        G2Affine {
            x: GENERATOR_X,
            y: GENERATOR_Y,
            infinity: Choice::from(0u8),
        }
    }

    /// Affine x coordinate; zero for the identity
    pub fn x(&self) -> Fp2 {
        Fp2::conditional_select(&self.x, &Fp2::zero(), self.infinity)
    }

    /// Affine y coordinate; zero for the identity
    pub fn y(&self) -> Fp2 {
        Fp2::conditional_select(&self.y, &Fp2::zero(), self.infinity)
    }

    /// Compress to 96 bytes.
    pub fn to_compressed(&self) -> [u8; G2_COMPRESSED_SIZE] {
        let mut res = encode_fp2(&self.x());

        res[0] |= FLAG_COMPRESSED;
        res[0] |= u8::conditional_select(&0u8, &FLAG_INFINITY, self.infinity);
        res[0] |= u8::conditional_select(
            &0u8,
            &FLAG_SORT,
            (!self.infinity) & self.y.lexicographically_largest(),
        );
        res
    }

    /// Serialize to 192 bytes uncompressed.
    pub fn to_uncompressed(&self) -> [u8; G2_UNCOMPRESSED_SIZE] {
        let mut res = [0; G2_UNCOMPRESSED_SIZE];
        res[..FP2_SIZE].copy_from_slice(&encode_fp2(&self.x()));
        res[FP2_SIZE..].copy_from_slice(&encode_fp2(&self.y()));

        res[0] |= u8::conditional_select(&0u8, &FLAG_INFINITY, self.infinity);
        res
    }

    /// Deserialize from uncompressed bytes, including the subgroup check.
    pub fn from_uncompressed(bytes: &[u8; G2_UNCOMPRESSED_SIZE]) -> Result<Self> {
        let p = Self::from_uncompressed_unchecked(bytes)?;
        subgroup_check(p)
    }

    /// Deserialize from uncompressed bytes; checks flags, canonicity and the
    /// curve equation but not subgroup membership.
    pub fn from_uncompressed_unchecked(bytes: &[u8; G2_UNCOMPRESSED_SIZE]) -> Result<Self> {
        const CONTEXT: &str = "G2 uncompressed encoding";

        let flags = bytes[0] & FLAG_MASK;
        validate::range(flags & (FLAG_COMPRESSED | FLAG_SORT) == 0, CONTEXT)?;

        let mut buf = *bytes;
        buf[0] &= !FLAG_MASK;

        if flags & FLAG_INFINITY != 0 {
            validate::range(buf.iter().all(|&b| b == 0), CONTEXT)?;
            return Ok(G2Affine::identity());
        }

        let x = decode_fp2(&buf[..FP2_SIZE], CONTEXT)?;
        let y = decode_fp2(&buf[FP2_SIZE..], CONTEXT)?;

        let p = G2Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        };
        if !bool::from(p.is_on_curve()) {
            return Err(Error::NotOnCurve { context: CONTEXT });
        }
        Ok(p)
    }

    /// Deserialize from compressed bytes, including the subgroup check.
    pub fn from_compressed(bytes: &[u8; G2_COMPRESSED_SIZE]) -> Result<Self> {
        let p = Self::from_compressed_unchecked(bytes)?;
        subgroup_check(p)
    }

    /// Deserialize from compressed bytes; recovers y from the curve equation
    /// but does not check subgroup membership.
    pub fn from_compressed_unchecked(bytes: &[u8; G2_COMPRESSED_SIZE]) -> Result<Self> {
        const CONTEXT: &str = "G2 compressed encoding";

        let flags = bytes[0] & FLAG_MASK;
        validate::range(flags & FLAG_COMPRESSED != 0, CONTEXT)?;
        let sort = Choice::from(u8::from(flags & FLAG_SORT != 0));

        let mut buf = *bytes;
        buf[0] &= !FLAG_MASK;

        if flags & FLAG_INFINITY != 0 {
            let canonical = flags & FLAG_SORT == 0 && buf.iter().all(|&b| b == 0);
            validate::range(canonical, CONTEXT)?;
            return Ok(G2Affine::identity());
        }

        let x = decode_fp2(&buf, CONTEXT)?;
        let y = Option::<Fp2>::from(((x.square() * x) + B).sqrt())
            .ok_or(Error::NotOnCurve { context: CONTEXT })?;
        let y = Fp2::conditional_select(&y, &-y, y.lexicographically_largest() ^ sort);

        Ok(G2Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        })
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Check if on curve y² = x³ + B.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() - (self.x.square() * self.x)).ct_eq(&B) | self.infinity
    }

    /// Subgroup check: ψ(P) == [x]P
    pub fn is_torsion_free(&self) -> Choice {
        // Section 4 of https://eprint.iacr.org/2021/1130, proof in https://eprint.iacr.org/2022/352
        let p = G2Projective::from(*self);
        p.psi().ct_eq(&p.mul_by_x())
    }
}

fn subgroup_check(p: G2Affine) -> Result<G2Affine> {
    if bool::from(p.is_torsion_free()) {
        Ok(p)
    } else {
        Err(Error::NotInSubgroup {
            context: "G2 point",
        })
    }
}

/// G₂ projective point representation.
#[derive(Copy, Clone, Debug)]
pub struct G2Projective {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    pub(crate) z: Fp2,
}

impl Default for G2Projective {
    fn default() -> G2Projective {
        G2Projective::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for G2Projective {}

impl fmt::Display for G2Projective {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G2Affine> for G2Projective {
    fn from(p: &'a G2Affine) -> G2Projective {
        G2Projective {
            x: p.x,
            y: p.y,
            z: Fp2::conditional_select(&Fp2::one(), &Fp2::zero(), p.infinity),
        }
    }
}

impl From<G2Affine> for G2Projective {
    fn from(p: G2Affine) -> G2Projective {
        G2Projective::from(&p)
    }
}

impl ConstantTimeEq for G2Projective {
    fn ct_eq(&self, other: &Self) -> Choice {
        let x1 = self.x * other.z;
        let x2 = other.x * self.z;
        let y1 = self.y * other.z;
        let y2 = other.y * self.z;
        let self_is_zero = self.z.is_zero();
        let other_is_zero = other.z.is_zero();

        (self_is_zero & other_is_zero)
            | ((!self_is_zero) & (!other_is_zero) & x1.ct_eq(&x2) & y1.ct_eq(&y2))
    }
}

impl ConditionallySelectable for G2Projective {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G2Projective {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            y: Fp2::conditional_select(&a.y, &b.y, choice),
            z: Fp2::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl Eq for G2Projective {}
impl PartialEq for G2Projective {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn neg(self) -> G2Projective {
        G2Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl Neg for G2Projective {
    type Output = G2Projective;

    #[inline]
    fn neg(self) -> G2Projective {
        -&self
    }
}

impl<'a, 'b> Add<&'b G2Projective> for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn add(self, rhs: &'b G2Projective) -> G2Projective {
        self.add(rhs)
    }
}

impl<'a, 'b> Sub<&'b G2Projective> for &'a G2Projective {
    type Output = G2Projective;

    #[inline]
    fn sub(self, rhs: &'b G2Projective) -> G2Projective {
        self + &(-rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a G2Projective {
    type Output = G2Projective;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        self.multiply(other)
    }
}

impl<'a, 'b> Mul<&'b G2Projective> for &'a Scalar {
    type Output = G2Projective;

    #[inline]
    fn mul(self, rhs: &'b G2Projective) -> Self::Output {
        rhs * self
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a G2Affine {
    type Output = G2Projective;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        G2Projective::from(self).multiply(other)
    }
}

impl<'a, 'b> Mul<&'b G2Affine> for &'a Scalar {
    type Output = G2Projective;

    #[inline]
    fn mul(self, rhs: &'b G2Affine) -> Self::Output {
        rhs * self
    }
}

impl_binops_additive!(G2Projective, G2Projective);
impl_binops_multiplicative!(G2Projective, Scalar);
impl_binops_multiplicative_mixed!(G2Affine, Scalar, G2Projective);
impl_binops_multiplicative_mixed!(Scalar, G2Affine, G2Projective);
impl_binops_multiplicative_mixed!(Scalar, G2Projective, G2Projective);

fn lookup(table: &[G2Projective], idx: u8) -> G2Projective {
    let mut out = G2Projective::identity();
    for (i, entry) in table.iter().enumerate() {
        out.conditional_assign(entry, (i as u8).ct_eq(&idx));
    }
    out
}

impl G2Projective {
    /// Point at infinity.
    pub fn identity() -> G2Projective {
        G2Projective {
            x: Fp2::zero(),
            y: Fp2::one(),
            z: Fp2::zero(),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G2Projective {
        G2Projective {
            x: GENERATOR_X,
            y: GENERATOR_Y,
            z: Fp2::one(),
        }
    }

    /// Random point of the prime-order subgroup.
    pub fn random(mut rng: impl RngCore) -> Self {
        loop {
            let x = Fp2::random(&mut rng);
            let flip_sign = rng.next_u32() % 2 != 0;

            let p = ((x.square() * x) + B).sqrt().map(|y| G2Affine {
                x,
                y: if flip_sign { -y } else { y },
                infinity: 0.into(),
            });

            if let Some(p) = Option::<G2Affine>::from(p) {
                let p = G2Projective::from(p).clear_cofactor();
                if !bool::from(p.is_identity()) {
                    return p;
                }
            }
        }
    }

    /// Multi-scalar multiplication with Pippenger's bucket method.
    ///
    /// Runs in time that depends on the scalars; use it with public inputs.
    /// An empty input yields the identity.
    #[instrument(skip_all, fields(n = points.len()))]
    pub fn msm(points: &[G2Affine], scalars: &[Scalar]) -> Result<Self> {
        validate::same_length("G2 msm", points.len(), scalars.len())?;
        if points.is_empty() {
            return Ok(G2Projective::identity());
        }

        let c = msm::window_size(points.len());
        trace!(window = c, "pippenger");

        let limbs: Vec<[u64; 4]> = scalars.iter().map(Scalar::to_integer).collect();
        let mut buckets = vec![G2Projective::identity(); (1 << c) - 1];
        let mut acc = G2Projective::identity();

        for w in (0..msm::window_count(c)).rev() {
            for _ in 0..c {
                acc = acc.double();
            }

            buckets
                .iter_mut()
                .for_each(|b| *b = G2Projective::identity());
            for (p, k) in points.iter().zip(limbs.iter()) {
                let digit = msm::window_digit(k, w * c, c);
                if digit != 0 {
                    buckets[digit - 1] += p;
                }
            }

            let mut running = G2Projective::identity();
            let mut window_sum = G2Projective::identity();
            for b in buckets.iter().rev() {
                running += b;
                window_sum += running;
            }
            acc += window_sum;
        }

        Ok(acc)
    }

    /// Multi-scalar multiplication over projective inputs
    pub fn multi_exp(points: &[G2Projective], scalars: &[Scalar]) -> Result<Self> {
        validate::same_length("G2 multi_exp", points.len(), scalars.len())?;
        G2Projective::msm(&G2Projective::batch_normalize(points), scalars)
    }

    /// Point doubling.
    pub fn double(&self) -> G2Projective {
        // Algorithm 9 from https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.y.square();
        let z3 = t0 + t0;
        let z3 = z3 + z3;
        let z3 = z3 + z3;
        let t1 = self.y * self.z;
        let t2 = self.z.square();
        let t2 = mul_by_3b(t2);
        let x3 = t2 * z3;
        let y3 = t0 + t2;
        let z3 = t1 * z3;
        let t1 = t2 + t2;
        let t2 = t1 + t2;
        let t0 = t0 - t2;
        let y3 = t0 * y3;
        let y3 = x3 + y3;
        let t1 = self.x * self.y;
        let x3 = t0 * t1;
        let x3 = x3 + x3;

        let tmp = G2Projective { x: x3, y: y3, z: z3 };
        G2Projective::conditional_select(&tmp, &G2Projective::identity(), self.is_identity())
    }

    /// Point addition.
    pub fn add(&self, rhs: &G2Projective) -> G2Projective {
        // Algorithm 7 from https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.x * rhs.x;
        let t1 = self.y * rhs.y;
        let t2 = self.z * rhs.z;
        let t3 = self.x + self.y;
        let t4 = rhs.x + rhs.y;
        let t3 = t3 * t4;
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = self.y + self.z;
        let x3 = rhs.y + rhs.z;
        let t4 = t4 * x3;
        let x3 = t1 + t2;
        let t4 = t4 - x3;
        let x3 = self.x + self.z;
        let y3 = rhs.x + rhs.z;
        let x3 = x3 * y3;
        let y3 = t0 + t2;
        let y3 = x3 - y3;
        let x3 = t0 + t0;
        let t0 = x3 + t0;
        let t2 = mul_by_3b(t2);
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = mul_by_3b(y3);
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        G2Projective { x: x3, y: y3, z: z3 }
    }

    /// Mixed addition with affine point.
    pub fn add_mixed(&self, rhs: &G2Affine) -> G2Projective {
        // Algorithm 8 from https://eprint.iacr.org/2015/1060.pdf
        let t0 = self.x * rhs.x;
        let t1 = self.y * rhs.y;
        let t3 = rhs.x + rhs.y;
        let t4 = self.x + self.y;
        let t3 = t3 * t4;
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = rhs.y * self.z;
        let t4 = t4 + self.y;
        let y3 = rhs.x * self.z;
        let y3 = y3 + self.x;
        let x3 = t0 + t0;
        let t0 = x3 + t0;
        let t2 = mul_by_3b(self.z);
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = mul_by_3b(y3);
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        let tmp = G2Projective { x: x3, y: y3, z: z3 };
        G2Projective::conditional_select(&tmp, self, rhs.is_identity())
    }

    fn multiply(&self, by: &Scalar) -> G2Projective {
        let mut table = [G2Projective::identity(); 1 << SCALAR_MUL_WINDOW];
        for i in 1..table.len() {
            table[i] = table[i - 1] + self;
        }

        let mut acc = G2Projective::identity();
        for &digit in by.nibbles_be().iter() {
            for _ in 0..SCALAR_MUL_WINDOW {
                acc = acc.double();
            }
            acc += lookup(&table, digit);
        }
        acc
    }

    /// Untwist-Frobenius-twist endomorphism ψ
    pub(crate) fn psi(&self) -> G2Projective {
        G2Projective {
            x: self.x.frobenius_map() * PSI_COEFF_X,
            y: self.y.frobenius_map() * PSI_COEFF_Y,
            z: self.z.frobenius_map(),
        }
    }

    /// ψ², computed directly
    pub(crate) fn psi2(&self) -> G2Projective {
        G2Projective {
            x: self.x * PSI2_COEFF_X,
            y: self.y.neg(),
            z: self.z,
        }
    }

    /// Multiply by the (negative) curve parameter x.
    pub(crate) fn mul_by_x(&self) -> G2Projective {
        let mut xself = G2Projective::identity();
        let mut x = BLS_X >> 1;
        let mut acc = *self;
        while x != 0 {
            acc = acc.double();
            if x % 2 == 1 {
                xself += acc;
            }
            x >>= 1;
        }
        if BLS_X_IS_NEGATIVE {
            xself = -xself;
        }
        xself
    }

    /// Budroni-Pintore cofactor clearing (eprint 2017/419, section 4.1):
    /// [x² - x - 1]P + [x - 1]ψ(P) + ψ²(2P)
    pub fn clear_cofactor(&self) -> G2Projective {
        let t1 = self.mul_by_x();
        let t2 = self.psi();
        self.double().psi2() + (t1 + t2).mul_by_x() - t1 - t2 - *self
    }

    /// Convert many points to affine form with a single inversion.
    pub fn batch_normalize(points: &[Self]) -> Vec<G2Affine> {
        let mut out = vec![G2Affine::identity(); points.len()];

        let mut acc = Fp2::one();
        for (p, q) in points.iter().zip(out.iter_mut()) {
            q.x = acc;
            acc = Fp2::conditional_select(&(acc * p.z), &acc, p.is_identity());
        }

        acc = acc.invert().unwrap_or(Fp2::zero());

        for (p, q) in points.iter().rev().zip(out.iter_mut().rev()) {
            let skip = p.is_identity();
            let tmp = q.x * acc;
            acc = Fp2::conditional_select(&(acc * p.z), &acc, skip);
            q.x = p.x * tmp;
            q.y = p.y * tmp;
            q.infinity = Choice::from(0u8);
            *q = G2Affine::conditional_select(q, &G2Affine::identity(), skip);
        }
        out
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Curve membership check: Y²Z = X³ + bZ³.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() * self.z).ct_eq(&(self.x.square() * self.x + self.z.square() * self.z * B))
            | self.z.is_zero()
    }

    /// Subgroup membership check.
    pub fn is_torsion_free(&self) -> Choice {
        G2Affine::from(self).is_torsion_free()
    }

    /// Convert to affine coordinates.
    pub fn to_affine(&self) -> G2Affine {
        G2Affine::from(self)
    }
}

#[cfg(feature = "alloc")]
impl dpair_api::Serialize for G2Affine {
    fn from_bytes(bytes: &[u8]) -> dpair_api::Result<Self> {
        validate::length("G2 point", bytes.len(), G2_COMPRESSED_SIZE)?;
        let mut buf = [0u8; G2_COMPRESSED_SIZE];
        buf.copy_from_slice(bytes);
        Ok(G2Affine::from_compressed(&buf)?)
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.to_compressed().to_vec()
    }
}
