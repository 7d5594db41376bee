//! G₁ group implementation for BLS12-381.

use alloc::vec;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use dpair_params::bls12_381::{
    BLS_X, BLS_X_IS_NEGATIVE, FLAG_COMPRESSED, FLAG_INFINITY, FLAG_MASK, FLAG_SORT, FP_SIZE,
    G1_COMPRESSED_SIZE, G1_UNCOMPRESSED_SIZE, SCALAR_MUL_WINDOW,
};
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use tracing::{instrument, trace};

use super::field::fp::Fp;
use super::msm;
use super::Scalar;
use crate::error::{validate, Error, Result};

/// G₁ affine point representation.
#[derive(Copy, Clone, Debug)]
pub struct G1Affine {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    infinity: Choice,
}

impl Default for G1Affine {
    fn default() -> G1Affine {
        G1Affine::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for G1Affine {}

impl fmt::Display for G1Affine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G1Projective> for G1Affine {
    fn from(p: &'a G1Projective) -> G1Affine {
        let zinv = p.z.invert().unwrap_or(Fp::zero());
        let x = p.x * zinv;
        let y = p.y * zinv;

        let tmp = G1Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        };

        G1Affine::conditional_select(&tmp, &G1Affine::identity(), zinv.is_zero())
    }
}

impl From<G1Projective> for G1Affine {
    fn from(p: G1Projective) -> G1Affine {
        G1Affine::from(&p)
    }
}

impl ConstantTimeEq for G1Affine {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.infinity & other.infinity)
            | ((!self.infinity)
                & (!other.infinity)
                & self.x.ct_eq(&other.x)
                & self.y.ct_eq(&other.y))
    }
}

impl ConditionallySelectable for G1Affine {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G1Affine {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl Eq for G1Affine {}
impl PartialEq for G1Affine {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a G1Affine {
    type Output = G1Affine;

    #[inline]
    fn neg(self) -> G1Affine {
        G1Affine {
            x: self.x,
            y: Fp::conditional_select(&-self.y, &Fp::one(), self.infinity),
            infinity: self.infinity,
        }
    }
}

impl Neg for G1Affine {
    type Output = G1Affine;

    #[inline]
    fn neg(self) -> G1Affine {
        -&self
    }
}

impl<'a, 'b> Add<&'b G1Projective> for &'a G1Affine {
    type Output = G1Projective;

    #[inline]
    fn add(self, rhs: &'b G1Projective) -> G1Projective {
        rhs.add_mixed(self)
    }
}

impl<'a, 'b> Add<&'b G1Affine> for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn add(self, rhs: &'b G1Affine) -> G1Projective {
        self.add_mixed(rhs)
    }
}

impl<'a, 'b> Sub<&'b G1Projective> for &'a G1Affine {
    type Output = G1Projective;

    #[inline]
    fn sub(self, rhs: &'b G1Projective) -> G1Projective {
        self + &(-rhs)
    }
}

impl<'a, 'b> Sub<&'b G1Affine> for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn sub(self, rhs: &'b G1Affine) -> G1Projective {
        self + &(-rhs)
    }
}

impl<T> Sum<T> for G1Projective
where
    T: Borrow<G1Projective>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::identity(), |acc, item| acc + item.borrow())
    }
}

impl_binops_additive!(G1Projective, G1Affine);
impl_add_sub_specify_output!(G1Affine, G1Projective, G1Projective);

// Curve parameter b = 4
const B: Fp = Fp::from_raw_unchecked([
    0xaa27_0000_000c_fff3,
    0x53cc_0032_fc34_000a,
    0x478f_e97a_6b0a_807f,
    0xb1d3_7ebe_e6ba_24d7,
    0x8ec9_733b_bf78_ab2f,
    0x09d6_4551_3d83_de7e,
]);

/// Cube root of unity in Fp
pub const BETA: Fp = Fp::from_raw_unchecked([
    0x30f1_361b_798a_64e8,
    0xf3b8_ddab_7ece_5a2a,
    0x16a8_ca3a_c615_77f7,
    0xc26a_2ff8_74fd_029b,
    0x3636_b766_6070_1c6e,
    0x051b_a4ab_241b_6160,
]);

const GENERATOR_X: Fp = Fp::from_raw_unchecked([
    0x5cb3_8790_fd53_0c16,
    0x7817_fc67_9976_fff5,
    0x154f_95c7_143b_a1c1,
    0xf0ae_6acd_f3d0_e747,
    0xedce_6ecc_21db_f440,
    0x1201_7741_9e0b_fb75,
]);

const GENERATOR_Y: Fp = Fp::from_raw_unchecked([
    0xbaac_93d5_0ce7_2271,
    0x8c22_631a_7918_fd8e,
    0xdd59_5f13_5707_25ce,
    0x51ac_5829_5040_5194,
    0x0e1c_8c3f_ad00_59c0,
    0x0bbc_3efc_5008_a26a,
]);

fn endomorphism(p: &G1Affine) -> G1Affine {
    let mut res = *p;
    res.x *= BETA;
    res
}

impl G1Affine {
    /// Point at infinity.
    pub fn identity() -> G1Affine {
        G1Affine {
            x: Fp::zero(),
            y: Fp::one(),
            infinity: Choice::from(1u8),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G1Affine {
        G1Affine {
            x: GENERATOR_X,
            y: GENERATOR_Y,
            infinity: Choice::from(0u8),
        }
    }

    /// Affine x coordinate; zero for the identity
    pub fn x(&self) -> Fp {
        Fp::conditional_select(&self.x, &Fp::zero(), self.infinity)
    }

    /// Affine y coordinate; zero for the identity
    pub fn y(&self) -> Fp {
        Fp::conditional_select(&self.y, &Fp::zero(), self.infinity)
    }

    /// Check if point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Curve membership check.
    pub fn is_on_curve(&self) -> Choice {
        (self.y.square() - (self.x.square() * self.x)).ct_eq(&B) | self.infinity
    }

    /// Subgroup check: φ(P) == -[x²]P
    pub fn is_torsion_free(&self) -> Choice {
        let minus_x_squared_times_p = G1Projective::from(self).mul_by_x().mul_by_x().neg();
        let endomorphism_p = endomorphism(self);
        minus_x_squared_times_p.ct_eq(&G1Projective::from(endomorphism_p))
    }

    /// Compress to 48 bytes.
    pub fn to_compressed(&self) -> [u8; G1_COMPRESSED_SIZE] {
        let mut res = self.x().to_bytes();
        res[0] |= FLAG_COMPRESSED;
        res[0] |= u8::conditional_select(&0u8, &FLAG_INFINITY, self.infinity);
        res[0] |= u8::conditional_select(
            &0u8,
            &FLAG_SORT,
            (!self.infinity) & self.y.lexicographically_largest(),
        );
        res
    }

    /// Serialize to 96 bytes uncompressed.
    pub fn to_uncompressed(&self) -> [u8; G1_UNCOMPRESSED_SIZE] {
        let mut res = [0; G1_UNCOMPRESSED_SIZE];
        res[..FP_SIZE].copy_from_slice(&self.x().to_bytes());
        res[FP_SIZE..].copy_from_slice(&self.y().to_bytes());
        res[0] |= u8::conditional_select(&0u8, &FLAG_INFINITY, self.infinity);
        res
    }

    /// Deserialize from uncompressed bytes, including the subgroup check.
    pub fn from_uncompressed(bytes: &[u8; G1_UNCOMPRESSED_SIZE]) -> Result<Self> {
        let p = Self::from_uncompressed_unchecked(bytes)?;
        subgroup_check(p)
    }

    /// Deserialize from uncompressed bytes; checks flags, canonicity and the
    /// curve equation but not subgroup membership.
    pub fn from_uncompressed_unchecked(bytes: &[u8; G1_UNCOMPRESSED_SIZE]) -> Result<Self> {
        const CONTEXT: &str = "G1 uncompressed encoding";

        let flags = bytes[0] & FLAG_MASK;
        validate::range(flags & (FLAG_COMPRESSED | FLAG_SORT) == 0, CONTEXT)?;

        let mut xb = [0u8; FP_SIZE];
        let mut yb = [0u8; FP_SIZE];
        xb.copy_from_slice(&bytes[..FP_SIZE]);
        yb.copy_from_slice(&bytes[FP_SIZE..]);
        xb[0] &= !FLAG_MASK;

        if flags & FLAG_INFINITY != 0 {
            let all_zero = xb.iter().chain(yb.iter()).all(|&b| b == 0);
            validate::range(all_zero, CONTEXT)?;
            return Ok(G1Affine::identity());
        }

        let x = Option::<Fp>::from(Fp::from_bytes(&xb)).ok_or(Error::Range { context: CONTEXT })?;
        let y = Option::<Fp>::from(Fp::from_bytes(&yb)).ok_or(Error::Range { context: CONTEXT })?;

        let p = G1Affine {
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
    pub fn from_compressed(bytes: &[u8; G1_COMPRESSED_SIZE]) -> Result<Self> {
        let p = Self::from_compressed_unchecked(bytes)?;
        subgroup_check(p)
    }

    /// Deserialize from compressed bytes; recovers y from the curve equation
    /// but does not check subgroup membership.
    pub fn from_compressed_unchecked(bytes: &[u8; G1_COMPRESSED_SIZE]) -> Result<Self> {
        const CONTEXT: &str = "G1 compressed encoding";

        let flags = bytes[0] & FLAG_MASK;
        validate::range(flags & FLAG_COMPRESSED != 0, CONTEXT)?;
        let sort = Choice::from(u8::from(flags & FLAG_SORT != 0));

        let mut xb = *bytes;
        xb[0] &= !FLAG_MASK;

        if flags & FLAG_INFINITY != 0 {
            let canonical = flags & FLAG_SORT == 0 && xb.iter().all(|&b| b == 0);
            validate::range(canonical, CONTEXT)?;
            return Ok(G1Affine::identity());
        }

        let x = Option::<Fp>::from(Fp::from_bytes(&xb)).ok_or(Error::Range { context: CONTEXT })?;
        let y = Option::<Fp>::from(((x.square() * x) + B).sqrt())
            .ok_or(Error::NotOnCurve { context: CONTEXT })?;
        let y = Fp::conditional_select(&y, &-y, y.lexicographically_largest() ^ sort);

        Ok(G1Affine {
            x,
            y,
            infinity: Choice::from(0u8),
        })
    }
}

fn subgroup_check(p: G1Affine) -> Result<G1Affine> {
    if bool::from(p.is_torsion_free()) {
        Ok(p)
    } else {
        Err(Error::NotInSubgroup {
            context: "G1 point",
        })
    }
}

/// G₁ projective point representation.
#[derive(Copy, Clone, Debug)]
pub struct G1Projective {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    pub(crate) z: Fp,
}

impl Default for G1Projective {
    fn default() -> G1Projective {
        G1Projective::identity()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for G1Projective {}

impl fmt::Display for G1Projective {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl<'a> From<&'a G1Affine> for G1Projective {
    fn from(p: &'a G1Affine) -> G1Projective {
        G1Projective {
            x: p.x,
            y: p.y,
            z: Fp::conditional_select(&Fp::one(), &Fp::zero(), p.infinity),
        }
    }
}

impl From<G1Affine> for G1Projective {
    fn from(p: G1Affine) -> G1Projective {
        G1Projective::from(&p)
    }
}

impl ConstantTimeEq for G1Projective {
    fn ct_eq(&self, other: &Self) -> Choice {
        // (X1/Z1, Y1/Z1) == (X2/Z2, Y2/Z2) without inversions
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

impl ConditionallySelectable for G1Projective {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G1Projective {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            z: Fp::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl Eq for G1Projective {}
impl PartialEq for G1Projective {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl<'a> Neg for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn neg(self) -> G1Projective {
        G1Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl Neg for G1Projective {
    type Output = G1Projective;

    #[inline]
    fn neg(self) -> G1Projective {
        -&self
    }
}

impl<'a, 'b> Add<&'b G1Projective> for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn add(self, rhs: &'b G1Projective) -> G1Projective {
        self.add(rhs)
    }
}

impl<'a, 'b> Sub<&'b G1Projective> for &'a G1Projective {
    type Output = G1Projective;

    #[inline]
    fn sub(self, rhs: &'b G1Projective) -> G1Projective {
        self + &(-rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a G1Projective {
    type Output = G1Projective;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        self.multiply(other)
    }
}

impl<'a, 'b> Mul<&'b G1Projective> for &'a Scalar {
    type Output = G1Projective;

    #[inline]
    fn mul(self, rhs: &'b G1Projective) -> Self::Output {
        rhs * self
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a G1Affine {
    type Output = G1Projective;

    fn mul(self, other: &'b Scalar) -> Self::Output {
        G1Projective::from(self).multiply(other)
    }
}

impl<'a, 'b> Mul<&'b G1Affine> for &'a Scalar {
    type Output = G1Projective;

    #[inline]
    fn mul(self, rhs: &'b G1Affine) -> Self::Output {
        rhs * self
    }
}

impl_binops_additive!(G1Projective, G1Projective);
impl_binops_multiplicative!(G1Projective, Scalar);
impl_binops_multiplicative_mixed!(G1Affine, Scalar, G1Projective);
impl_binops_multiplicative_mixed!(Scalar, G1Affine, G1Projective);
impl_binops_multiplicative_mixed!(Scalar, G1Projective, G1Projective);

#[inline(always)]
fn mul_by_3b(a: Fp) -> Fp {
    let a = a + a; // 2
    let a = a + a; // 4
    a + a + a // 12
}

/// Constant-time read of `table[idx]`: every entry is touched
fn lookup(table: &[G1Projective], idx: u8) -> G1Projective {
    let mut out = G1Projective::identity();
    for (i, entry) in table.iter().enumerate() {
        out.conditional_assign(entry, (i as u8).ct_eq(&idx));
    }
    out
}

impl G1Projective {
    /// Point at infinity.
    pub fn identity() -> G1Projective {
        G1Projective {
            x: Fp::zero(),
            y: Fp::one(),
            z: Fp::zero(),
        }
    }

    /// Fixed generator.
    pub fn generator() -> G1Projective {
        G1Projective {
            x: GENERATOR_X,
            y: GENERATOR_Y,
            z: Fp::one(),
        }
    }

    /// Random point of the prime-order subgroup.
    pub fn random(mut rng: impl RngCore) -> Self {
        loop {
            let x = Fp::random(&mut rng);
            let flip_sign = rng.next_u32() % 2 != 0;

            let p = ((x.square() * x) + B).sqrt().map(|y| G1Affine {
                x,
                y: if flip_sign { -y } else { y },
                infinity: 0.into(),
            });

            if let Some(p) = Option::<G1Affine>::from(p) {
                let p = G1Projective::from(p).clear_cofactor();
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
    pub fn msm(points: &[G1Affine], scalars: &[Scalar]) -> Result<Self> {
        validate::same_length("G1 msm", points.len(), scalars.len())?;
        if points.is_empty() {
            return Ok(G1Projective::identity());
        }

        let c = msm::window_size(points.len());
        trace!(window = c, "pippenger");

        let limbs: Vec<[u64; 4]> = scalars.iter().map(Scalar::to_integer).collect();
        let mut buckets = vec![G1Projective::identity(); (1 << c) - 1];
        let mut acc = G1Projective::identity();

        for w in (0..msm::window_count(c)).rev() {
            for _ in 0..c {
                acc = acc.double();
            }

            buckets
                .iter_mut()
                .for_each(|b| *b = G1Projective::identity());
            for (p, k) in points.iter().zip(limbs.iter()) {
                let digit = msm::window_digit(k, w * c, c);
                if digit != 0 {
                    buckets[digit - 1] += p;
                }
            }

            // sum_j j * bucket[j] via running sums
            let mut running = G1Projective::identity();
            let mut window_sum = G1Projective::identity();
            for b in buckets.iter().rev() {
                running += b;
                window_sum += running;
            }
            acc += window_sum;
        }

        Ok(acc)
    }

    /// Multi-scalar multiplication over projective inputs
    pub fn multi_exp(points: &[G1Projective], scalars: &[Scalar]) -> Result<Self> {
        validate::same_length("G1 multi_exp", points.len(), scalars.len())?;
        G1Projective::msm(&G1Projective::batch_normalize(points), scalars)
    }

    /// Point doubling.
    pub fn double(&self) -> G1Projective {
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

        let tmp = G1Projective { x: x3, y: y3, z: z3 };
        G1Projective::conditional_select(&tmp, &G1Projective::identity(), self.is_identity())
    }

    /// Point addition.
    pub fn add(&self, rhs: &G1Projective) -> G1Projective {
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

        G1Projective { x: x3, y: y3, z: z3 }
    }

    /// Mixed addition with affine point.
    pub fn add_mixed(&self, rhs: &G1Affine) -> G1Projective {
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

        let tmp = G1Projective { x: x3, y: y3, z: z3 };
        G1Projective::conditional_select(&tmp, self, rhs.is_identity())
    }

    /// Fixed-window scalar multiplication: per 4-bit digit, four doublings,
    /// one full-table lookup and one addition regardless of the digit.
    fn multiply(&self, by: &Scalar) -> G1Projective {
        let mut table = [G1Projective::identity(); 1 << SCALAR_MUL_WINDOW];
        for i in 1..table.len() {
            table[i] = table[i - 1] + self;
        }

        let mut acc = G1Projective::identity();
        for &digit in by.nibbles_be().iter() {
            for _ in 0..SCALAR_MUL_WINDOW {
                acc = acc.double();
            }
            acc += lookup(&table, digit);
        }
        acc
    }

    /// Multiply by the (negative) curve parameter x.
    pub(crate) fn mul_by_x(&self) -> G1Projective {
        let mut xself = G1Projective::identity();
        let mut x = BLS_X >> 1;
        let mut tmp = *self;
        while x != 0 {
            tmp = tmp.double();
            if x % 2 == 1 {
                xself += tmp;
            }
            x >>= 1;
        }
        if BLS_X_IS_NEGATIVE {
            xself = -xself;
        }
        xself
    }

    /// Multiply by h_eff = 1 - x, mapping any curve point into the
    /// prime-order subgroup.
    pub fn clear_cofactor(&self) -> G1Projective {
        self - self.mul_by_x()
    }

    /// Convert many points to affine form with a single inversion.
    pub fn batch_normalize(points: &[Self]) -> Vec<G1Affine> {
        let mut out = vec![G1Affine::identity(); points.len()];

        let mut acc = Fp::one();
        for (p, q) in points.iter().zip(out.iter_mut()) {
            // Stash the running product in the x slot until the backward pass.
            q.x = acc;
            acc = Fp::conditional_select(&(acc * p.z), &acc, p.is_identity());
        }

        // Product of non-zero z coordinates, always invertible.
        acc = acc.invert().unwrap_or(Fp::zero());

        for (p, q) in points.iter().rev().zip(out.iter_mut().rev()) {
            let skip = p.is_identity();
            let tmp = q.x * acc;
            acc = Fp::conditional_select(&(acc * p.z), &acc, skip);
            q.x = p.x * tmp;
            q.y = p.y * tmp;
            q.infinity = Choice::from(0u8);
            *q = G1Affine::conditional_select(q, &G1Affine::identity(), skip);
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
        G1Affine::from(self).is_torsion_free()
    }

    /// Convert to affine coordinates.
    pub fn to_affine(&self) -> G1Affine {
        G1Affine::from(self)
    }
}

#[cfg(feature = "alloc")]
impl dpair_api::Serialize for G1Affine {
    fn from_bytes(bytes: &[u8]) -> dpair_api::Result<Self> {
        validate::length("G1 point", bytes.len(), G1_COMPRESSED_SIZE)?;
        let mut buf = [0u8; G1_COMPRESSED_SIZE];
        buf.copy_from_slice(bytes);
        Ok(G1Affine::from_compressed(&buf)?)
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.to_compressed().to_vec()
    }
}
