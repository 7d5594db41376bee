//! BLS12-381 base field `GF(p)` where p = 0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use dpair_params::bls12_381::FP_WIDE_SIZE;
use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::arith::{adc, binary_invert, cmp_limbs, mac, sbb};

// ============================================================================
// Field Constants
// ============================================================================

/// Field modulus p, little-endian limbs
pub(crate) const MODULUS: [u64; 6] = [
    0xb9fe_ffff_ffff_aaab,
    0x1eab_fffe_b153_ffff,
    0x6730_d2a0_f6b0_f624,
    0x6477_4b84_f385_12bf,
    0x4b1b_a7b6_434b_acd7,
    0x1a01_11ea_397f_e69a,
];

/// INV = -(p^{-1} mod 2^64) mod 2^64
const INV: u64 = 0x89f3_fffc_fffc_fffd;

/// R = 2^384 mod p
const R: Fp = Fp([
    0x7609_0000_0002_fffd,
    0xebf4_000b_c40c_0002,
    0x5f48_9857_53c7_58ba,
    0x77ce_5853_7052_5745,
    0x5c07_1a97_a256_ec6d,
    0x15f6_5ec3_fa80_e493,
]);

/// R^2 = 2^768 mod p
const R2: Fp = Fp([
    0xf4df_1f34_1c34_1746,
    0x0a76_e6a6_09d1_04f1,
    0x8de5_476c_4c95_b6d5,
    0x67eb_88a9_939d_83c0,
    0x9a79_3e85_b519_952d,
    0x1198_8fe5_92ca_e3aa,
]);

/// R^3 = 2^1152 mod p
const R3: Fp = Fp([
    0xed48_ac6b_d94c_a1e0,
    0x315f_831e_03a7_adf8,
    0x9a53_352a_615e_29dd,
    0x34c0_4e5e_921e_1761,
    0x2512_d435_6572_4728,
    0x0aa6_3460_9175_5d4d,
]);

/// (p + 1) / 4
const P_PLUS_1_DIV_4: [u64; 6] = [
    0xee7f_bfff_ffff_eaab,
    0x07aa_ffff_ac54_ffff,
    0xd9cc_34a8_3dac_3d89,
    0xd91d_d2e1_3ce1_44af,
    0x92c6_e9ed_90d2_eb35,
    0x0680_447a_8e5f_f9a6,
];

/// (p - 1) / 2
const P_MINUS_1_DIV_2: [u64; 6] = [
    0xdcff_7fff_ffff_d555,
    0x0f55_ffff_58a9_ffff,
    0xb398_6950_7b58_7b12,
    0xb23b_a5c2_79c2_895f,
    0x258d_d3db_21a5_d66b,
    0x0d00_88f5_1cbf_f34d,
];

// ============================================================================
// Field Element Type
// ============================================================================

/// Element of the base field, stored in Montgomery form `aR mod p`
#[derive(Copy, Clone)]
pub struct Fp(pub(crate) [u64; 6]);

// ============================================================================
// Wide Products and Reduction
// ============================================================================

/// Schoolbook 384x384 -> 768-bit product
#[inline(always)]
const fn mul_wide(a: &[u64; 6], b: &[u64; 6]) -> [u64; 12] {
    let mut t = [0u64; 12];
    let mut i = 0;
    while i < 6 {
        let mut carry = 0;
        let mut j = 0;
        while j < 6 {
            let (v, c) = mac(t[i + j], a[i], b[j], carry);
            t[i + j] = v;
            carry = c;
            j += 1;
        }
        t[i + 6] = carry;
        i += 1;
    }
    t
}

/// Squaring: off-diagonal products once, doubled, then the diagonal
#[inline(always)]
const fn square_wide(a: &[u64; 6]) -> [u64; 12] {
    let mut t = [0u64; 12];
    let mut i = 0;
    while i < 5 {
        let mut carry = 0;
        let mut j = i + 1;
        while j < 6 {
            let (v, c) = mac(t[i + j], a[i], a[j], carry);
            t[i + j] = v;
            carry = c;
            j += 1;
        }
        t[i + 6] = carry;
        i += 1;
    }

    let mut k = 11;
    while k > 0 {
        t[k] = (t[k] << 1) | (t[k - 1] >> 63);
        k -= 1;
    }
    t[0] <<= 1;

    let mut carry = 0;
    i = 0;
    while i < 6 {
        let (v, c) = mac(t[2 * i], a[i], a[i], carry);
        t[2 * i] = v;
        let (v, c) = adc(t[2 * i + 1], 0, c);
        t[2 * i + 1] = v;
        carry = c;
        i += 1;
    }
    t
}

impl Fp {
    /// Subtract p once if the value is not already below it
    #[inline]
    const fn subtract_p(&self) -> Fp {
        let mut r = [0u64; 6];
        let mut borrow = 0;
        let mut i = 0;
        while i < 6 {
            let (d, b) = sbb(self.0[i], MODULUS[i], borrow);
            r[i] = d;
            borrow = b;
            i += 1;
        }

        // borrow is all-ones when self < p
        i = 0;
        while i < 6 {
            r[i] = (self.0[i] & borrow) | (r[i] & !borrow);
            i += 1;
        }
        Fp(r)
    }

    /// Montgomery reduction of a 768-bit value
    #[inline(always)]
    pub(crate) const fn montgomery_reduce(t: [u64; 12]) -> Fp {
        let mut t = t;
        let mut hi = 0u64;
        let mut i = 0;
        while i < 6 {
            let k = t[i].wrapping_mul(INV);
            let (_, mut carry) = mac(t[i], k, MODULUS[0], 0);
            let mut j = 1;
            while j < 6 {
                let (v, c) = mac(t[i + j], k, MODULUS[j], carry);
                t[i + j] = v;
                carry = c;
                j += 1;
            }
            let (v, c) = adc(t[i + 6], hi, carry);
            t[i + 6] = v;
            hi = c;
            i += 1;
        }

        (&Fp([t[6], t[7], t[8], t[9], t[10], t[11]])).subtract_p()
    }

    /// Canonical little-endian limbs (out of Montgomery form)
    #[inline]
    pub const fn to_integer(&self) -> [u64; 6] {
        let mut t = [0u64; 12];
        let mut i = 0;
        while i < 6 {
            t[i] = self.0[i];
            i += 1;
        }
        Fp::montgomery_reduce(t).0
    }
}

// ============================================================================
// Core Field Operations
// ============================================================================

impl Fp {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Fp {
        Fp([0, 0, 0, 0, 0, 0])
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Fp {
        R
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Fp::zero())
    }

    /// Wrap limbs that are already in Montgomery form
    pub const fn from_raw_unchecked(v: [u64; 6]) -> Fp {
        Fp(v)
    }

    /// Lift a small integer into the field
    pub const fn from_u64(v: u64) -> Fp {
        (&Fp([v, 0, 0, 0, 0, 0])).mul(&R2)
    }

    /// Lift canonical little-endian limbs into the field, if they are below p
    pub fn from_integer(limbs: [u64; 6]) -> CtOption<Fp> {
        let (lt, _) = cmp_limbs(&limbs, &MODULUS);
        let is_some = Choice::from((lt & 1) as u8);
        CtOption::new((&Fp(limbs)).mul(&R2), is_some)
    }

    /// Add two field elements
    #[inline]
    pub const fn add(&self, rhs: &Fp) -> Fp {
        let mut d = [0u64; 6];
        let mut carry = 0;
        let mut i = 0;
        while i < 6 {
            let (s, c) = adc(self.0[i], rhs.0[i], carry);
            d[i] = s;
            carry = c;
            i += 1;
        }
        (&Fp(d)).subtract_p()
    }

    /// Double a field element
    #[inline]
    pub const fn double(&self) -> Fp {
        self.add(self)
    }

    /// Subtract two field elements
    #[inline]
    pub const fn sub(&self, rhs: &Fp) -> Fp {
        (&rhs.neg()).add(self)
    }

    /// Negate a field element
    #[inline]
    pub const fn neg(&self) -> Fp {
        let mut d = [0u64; 6];
        let mut borrow = 0;
        let mut i = 0;
        while i < 6 {
            let (s, b) = sbb(MODULUS[i], self.0[i], borrow);
            d[i] = s;
            borrow = b;
            i += 1;
        }

        // p - 0 must map back to 0
        let mask = (((self.0[0] | self.0[1] | self.0[2] | self.0[3] | self.0[4] | self.0[5]) == 0)
            as u64)
            .wrapping_sub(1);

        i = 0;
        while i < 6 {
            d[i] &= mask;
            i += 1;
        }
        Fp(d)
    }

    /// Multiply two field elements
    #[inline]
    pub const fn mul(&self, rhs: &Fp) -> Fp {
        Fp::montgomery_reduce(mul_wide(&self.0, &rhs.0))
    }

    /// Square this element
    #[inline]
    pub const fn square(&self) -> Self {
        Fp::montgomery_reduce(square_wide(&self.0))
    }
}

// ============================================================================
// Exponentiation, Inversion and Square Roots
// ============================================================================

impl Fp {
    /// Exponentiation by a public exponent (little-endian limbs)
    pub fn pow_vartime(&self, by: &[u64; 6]) -> Self {
        let mut res = Self::one();
        for e in by.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if ((*e >> i) & 1) == 1 {
                    res *= self;
                }
            }
        }
        res
    }

    /// Exponentiation with a fixed sequence of operations for every exponent
    pub fn pow(&self, by: &[u64; 6]) -> Self {
        let mut res = Self::one();
        for e in by.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                let tmp = res * self;
                res.conditional_assign(&tmp, Choice::from(((*e >> i) & 1) as u8));
            }
        }
        res
    }

    /// Square root; the flag is false when `self` is not a quadratic residue
    #[inline]
    pub fn sqrt(&self) -> CtOption<Self> {
        // p = 3 mod 4
        let sqrt = self.pow_vartime(&P_PLUS_1_DIV_4);
        CtOption::new(sqrt, sqrt.square().ct_eq(self))
    }

    /// Legendre symbol test: true for zero and for nonzero squares
    pub fn is_square(&self) -> Choice {
        let l = self.pow_vartime(&P_MINUS_1_DIV_2);
        l.ct_eq(&Fp::one()) | self.is_zero()
    }

    /// Multiplicative inverse; the flag is false for zero
    #[inline]
    pub fn invert(&self) -> CtOption<Self> {
        // v = (aR)^-1 as a plain integer, and Montgomery form of a^-1 is v * R^2
        let v = binary_invert(&self.0, &MODULUS);
        let inv = (&Fp(v)).mul(&R3);
        CtOption::new(inv, !self.is_zero())
    }

    /// True when the canonical value exceeds (p-1)/2
    pub fn lexicographically_largest(&self) -> Choice {
        let (lt, eq) = cmp_limbs(&self.to_integer(), &P_MINUS_1_DIV_2);
        Choice::from((!(lt | eq) & 1) as u8)
    }

    /// Parity of the canonical value (RFC 9380 `sgn0` for m = 1)
    pub fn sgn0(&self) -> Choice {
        Choice::from((self.to_integer()[0] & 1) as u8)
    }

    /// Compare canonical integer values
    ///
    /// The limb comparison runs in constant time; the returned `Ordering`
    /// itself is not secret-independent.
    pub fn compare(&self, other: &Fp) -> Ordering {
        let (lt, eq) = cmp_limbs(&self.to_integer(), &other.to_integer());
        if eq != 0 {
            Ordering::Equal
        } else if lt != 0 {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

// ============================================================================
// Serialization
// ============================================================================

fn be_limbs<const N: usize>(bytes: &[u8]) -> [u64; N] {
    let mut limbs = [0u64; N];
    for (i, chunk) in bytes.chunks_exact(8).enumerate() {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        limbs[N - 1 - i] = u64::from_be_bytes(buf);
    }
    limbs
}

impl Fp {
    /// Decode from 48 big-endian bytes; the flag is false for values >= p
    pub fn from_bytes(bytes: &[u8; 48]) -> CtOption<Fp> {
        Fp::from_integer(be_limbs::<6>(bytes))
    }

    /// Reduce 96 big-endian bytes modulo p
    pub fn from_bytes_wide(bytes: &[u8; FP_WIDE_SIZE]) -> Fp {
        let high = Fp(be_limbs::<6>(&bytes[..48]));
        let low = Fp(be_limbs::<6>(&bytes[48..]));
        // value = high * 2^384 + low; Montgomery form = high*R^2 + low*R
        low * R2 + high * R3
    }

    /// Encode to 48 big-endian bytes
    pub fn to_bytes(self) -> [u8; 48] {
        let limbs = self.to_integer();
        let mut res = [0u8; 48];
        for (i, chunk) in res.chunks_exact_mut(8).enumerate() {
            chunk.copy_from_slice(&limbs[5 - i].to_be_bytes());
        }
        res
    }

    /// Uniformly random field element
    pub fn random(mut rng: impl RngCore) -> Fp {
        let mut bytes = [0u8; FP_WIDE_SIZE];
        rng.fill_bytes(&mut bytes);
        Fp::from_bytes_wide(&bytes)
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x")?;
        for &b in self.to_bytes().iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl Default for Fp {
    fn default() -> Self {
        Fp::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Fp {}

impl ConstantTimeEq for Fp {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
            & self.0[4].ct_eq(&other.0[4])
            & self.0[5].ct_eq(&other.0[5])
    }
}

impl Eq for Fp {}
impl PartialEq for Fp {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u64; 6];
        for (i, limb) in out.iter_mut().enumerate() {
            *limb = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Fp(out)
    }
}

impl<'a> Neg for &'a Fp {
    type Output = Fp;
    #[inline]
    fn neg(self) -> Fp {
        self.neg()
    }
}

impl Neg for Fp {
    type Output = Fp;
    #[inline]
    fn neg(self) -> Fp {
        -&self
    }
}

impl<'a, 'b> Sub<&'b Fp> for &'a Fp {
    type Output = Fp;
    #[inline]
    fn sub(self, rhs: &'b Fp) -> Fp {
        self.sub(rhs)
    }
}

impl<'a, 'b> Add<&'b Fp> for &'a Fp {
    type Output = Fp;
    #[inline]
    fn add(self, rhs: &'b Fp) -> Fp {
        self.add(rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp> for &'a Fp {
    type Output = Fp;
    #[inline]
    fn mul(self, rhs: &'b Fp) -> Fp {
        self.mul(rhs)
    }
}

impl_binops_additive!(Fp, Fp);
impl_binops_multiplicative!(Fp, Fp);
