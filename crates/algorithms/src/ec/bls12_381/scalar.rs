//! BLS12-381 scalar field F_q where q = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "alloc")]
use dpair_api::serialize::Zeroizing;

use super::field::arith::{adc, binary_invert, cmp_limbs, mac, sbb};
#[cfg(feature = "alloc")]
use crate::error::Error;
use crate::error::{validate, Result};
use dpair_params::bls12_381::{SCALAR_SIZE, SCALAR_TWO_ADICITY, SCALAR_WIDE_SIZE};

/// Scalar field element of BLS12-381
/// Internal: Four 64-bit limbs in little-endian Montgomery form
#[derive(Clone, Copy, Eq)]
pub struct Scalar(pub(crate) [u64; 4]);

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x")?;
        for &b in self.to_bytes().iter() {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<u64> for Scalar {
    fn from(val: u64) -> Scalar {
        (&Scalar([val, 0, 0, 0])).mul(&R2)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

impl PartialEq for Scalar {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Scalar([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

/// r, little-endian limbs
pub(crate) const MODULUS: [u64; 4] = [
    0xffff_ffff_0000_0001,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
];

/// INV = -(q^{-1} mod 2^64) mod 2^64
const INV: u64 = 0xffff_fffe_ffff_ffff;

/// R = 2^256 mod q
const R: Scalar = Scalar([
    0x0000_0001_ffff_fffe,
    0x5884_b7fa_0003_4802,
    0x998c_4fef_ecbc_4ff5,
    0x1824_b159_acc5_056f,
]);

/// R^2 = 2^512 mod q
const R2: Scalar = Scalar([
    0xc999_e990_f3f2_9c6d,
    0x2b6c_edcb_8792_5c23,
    0x05d3_1496_7254_398f,
    0x0748_d9d9_9f59_ff11,
]);

/// R^3 = 2^768 mod q
const R3: Scalar = Scalar([
    0xc62c_1807_439b_73af,
    0x1b3e_0d18_8cf0_6990,
    0x73d1_3c71_c7b5_f418,
    0x6e2a_5bb9_c8db_33e9,
]);

// q - 1 = 2^S * T with T odd

/// (T - 1) / 2
const T_MINUS_1_DIV_2: [u64; 4] = [
    0x7fff_2dff_7fff_ffff,
    0x04d0_ec02_a9de_d201,
    0x94ce_bea4_199c_ec04,
    0x0000_0000_39f6_d3a9,
];

/// 7^T, a primitive 2^S-th root of unity (Montgomery form)
const ROOT_OF_UNITY: Scalar = Scalar([
    0xb9b5_8d8c_5f0e_466a,
    0x5b1b_4c80_1819_d7ec,
    0x0af5_3ae3_52a3_1e64,
    0x5bf3_adda_19e9_b27b,
]);

impl<'a> Neg for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn neg(self) -> Scalar {
        self.neg()
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    #[inline]
    fn neg(self) -> Scalar {
        -&self
    }
}

impl<'a, 'b> Sub<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn sub(self, rhs: &'b Scalar) -> Scalar {
        self.sub(rhs)
    }
}

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn add(self, rhs: &'b Scalar) -> Scalar {
        self.add(rhs)
    }
}

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    #[inline]
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        self.mul(rhs)
    }
}

impl_binops_additive!(Scalar, Scalar);
impl_binops_multiplicative!(Scalar, Scalar);

impl Default for Scalar {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Scalar {}

#[cfg(feature = "alloc")]
impl dpair_api::SerializeSecret for Scalar {
    fn from_bytes(bytes: &[u8]) -> dpair_api::Result<Self> {
        validate::length("scalar", bytes.len(), SCALAR_SIZE)?;
        let mut buf = Zeroizing::new([0u8; SCALAR_SIZE]);
        buf.copy_from_slice(bytes);
        Option::<Scalar>::from(Scalar::from_bytes(&buf)).ok_or_else(|| {
            Error::Range {
                context: "scalar encoding",
            }
            .into()
        })
    }

    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        let buf = Zeroizing::new(self.to_bytes());
        Zeroizing::new(buf.to_vec())
    }
}

fn be_limbs<const N: usize>(bytes: &[u8]) -> [u64; N] {
    let mut limbs = [0u64; N];
    for (i, chunk) in bytes.chunks_exact(8).enumerate() {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(chunk);
        limbs[N - 1 - i] = u64::from_be_bytes(buf);
    }
    limbs
}

impl Scalar {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Scalar {
        Scalar([0, 0, 0, 0])
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Scalar {
        R
    }

    /// Check if element is zero
    #[inline]
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Scalar::zero())
    }

    /// Double this element
    #[inline]
    pub const fn double(&self) -> Scalar {
        self.add(self)
    }

    /// Uniformly random scalar (wide reduction of 64 random bytes)
    pub fn random(mut rng: impl RngCore) -> Scalar {
        let mut bytes = [0u8; SCALAR_WIDE_SIZE];
        rng.fill_bytes(&mut bytes);
        Scalar::from_bytes_wide(&bytes)
    }

    /// Decode 32 big-endian bytes; the flag is false for values >= q
    pub fn from_bytes(bytes: &[u8; SCALAR_SIZE]) -> CtOption<Scalar> {
        let limbs = be_limbs::<4>(bytes);
        let (lt, _) = cmp_limbs(&limbs, &MODULUS);
        let is_some = Choice::from((lt & 1) as u8);
        CtOption::new((&Scalar(limbs)).mul(&R2), is_some)
    }

    /// Encode as 32 big-endian bytes
    pub fn to_bytes(&self) -> [u8; SCALAR_SIZE] {
        let limbs = self.to_integer();
        let mut res = [0u8; SCALAR_SIZE];
        for (i, chunk) in res.chunks_exact_mut(8).enumerate() {
            chunk.copy_from_slice(&limbs[3 - i].to_be_bytes());
        }
        res
    }

    /// Reduce 64 big-endian bytes modulo q
    pub fn from_bytes_wide(bytes: &[u8; SCALAR_WIDE_SIZE]) -> Scalar {
        let high = Scalar(be_limbs::<4>(&bytes[..32]));
        let low = Scalar(be_limbs::<4>(&bytes[32..]));
        // value = high * 2^256 + low
        low * R2 + high * R3
    }

    /// Reduce a uniformly distributed big-endian string of 48 or 64 bytes
    pub fn from_uniform_bytes(bytes: &[u8]) -> Result<Scalar> {
        validate::parameter(
            bytes.len() == 48 || bytes.len() == SCALAR_WIDE_SIZE,
            "uniform bytes",
            "expected 48 or 64 bytes",
        )?;
        let mut wide = [0u8; SCALAR_WIDE_SIZE];
        wide[SCALAR_WIDE_SIZE - bytes.len()..].copy_from_slice(bytes);
        Ok(Scalar::from_bytes_wide(&wide))
    }

    /// Converts from canonical little-endian limbs, reducing modulo q
    pub const fn from_raw(val: [u64; 4]) -> Self {
        (&Scalar(val)).mul(&R2)
    }

    /// Canonical little-endian limbs (out of Montgomery form)
    pub const fn to_integer(&self) -> [u64; 4] {
        Scalar::montgomery_reduce([self.0[0], self.0[1], self.0[2], self.0[3], 0, 0, 0, 0]).0
    }

    /// Four-bit windows of the canonical value, most significant first
    pub(crate) fn nibbles_be(&self) -> [u8; 2 * SCALAR_SIZE] {
        let bytes = self.to_bytes();
        let mut out = [0u8; 2 * SCALAR_SIZE];
        for (i, b) in bytes.iter().enumerate() {
            out[2 * i] = b >> 4;
            out[2 * i + 1] = b & 0x0f;
        }
        out
    }

    /// Compare canonical integer values
    ///
    /// The limb comparison runs in constant time; the returned `Ordering`
    /// itself is not secret-independent.
    pub fn compare(&self, other: &Scalar) -> Ordering {
        let (lt, eq) = cmp_limbs(&self.to_integer(), &other.to_integer());
        if eq != 0 {
            Ordering::Equal
        } else if lt != 0 {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Squares this element
    #[inline]
    pub const fn square(&self) -> Scalar {
        self.mul(self)
    }

    /// Exponentiation by a public exponent
    pub fn pow_vartime(&self, by: &[u64; 4]) -> Self {
        let mut res = Self::one();
        for e in by.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();
                if ((*e >> i) & 1) == 1 {
                    res.mul_assign(self);
                }
            }
        }
        res
    }

    /// Exponentiation with a fixed sequence of operations for every exponent
    pub fn pow(&self, by: &[u64; 4]) -> Self {
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

    /// Constant-time Tonelli-Shanks (RFC 9380, Appendix I.4); the flag is false
    /// for non-residues
    pub fn sqrt(&self) -> CtOption<Self> {
        let mut z = self.pow_vartime(&T_MINUS_1_DIV_2);
        let mut t = z.square() * self;
        z *= self;
        let mut b = t;
        let mut c = ROOT_OF_UNITY;

        for i in (2..=SCALAR_TWO_ADICITY).rev() {
            for _ in 2..i {
                b = b.square();
            }
            let e = b.ct_eq(&Scalar::one());
            let zc = z * c;
            z = Scalar::conditional_select(&zc, &z, e);
            c = c.square();
            let tc = t * c;
            t = Scalar::conditional_select(&tc, &t, e);
            b = t;
        }

        CtOption::new(z, z.square().ct_eq(self))
    }

    /// Multiplicative inverse; the flag is false for zero
    pub fn invert(&self) -> CtOption<Self> {
        let v = binary_invert(&self.0, &MODULUS);
        CtOption::new((&Scalar(v)).mul(&R3), !self.is_zero())
    }

    #[inline(always)]
    const fn montgomery_reduce(t: [u64; 8]) -> Self {
        let mut t = t;
        let mut hi = 0u64;
        let mut i = 0;
        while i < 4 {
            let k = t[i].wrapping_mul(INV);
            let (_, mut carry) = mac(t[i], k, MODULUS[0], 0);
            let mut j = 1;
            while j < 4 {
                let (v, c) = mac(t[i + j], k, MODULUS[j], carry);
                t[i + j] = v;
                carry = c;
                j += 1;
            }
            let (v, c) = adc(t[i + 4], hi, carry);
            t[i + 4] = v;
            hi = c;
            i += 1;
        }

        (&Scalar([t[4], t[5], t[6], t[7]])).sub(&Scalar(MODULUS))
    }

    /// Multiplies two scalars
    #[inline]
    pub const fn mul(&self, rhs: &Self) -> Self {
        let mut t = [0u64; 8];
        let mut i = 0;
        while i < 4 {
            let mut carry = 0;
            let mut j = 0;
            while j < 4 {
                let (v, c) = mac(t[i + j], self.0[i], rhs.0[j], carry);
                t[i + j] = v;
                carry = c;
                j += 1;
            }
            t[i + 4] = carry;
            i += 1;
        }
        Scalar::montgomery_reduce(t)
    }

    /// Subtracts `rhs` from `self`, returning the result
    #[inline]
    pub const fn sub(&self, rhs: &Self) -> Self {
        let mut d = [0u64; 4];
        let mut borrow = 0;
        let mut i = 0;
        while i < 4 {
            let (v, b) = sbb(self.0[i], rhs.0[i], borrow);
            d[i] = v;
            borrow = b;
            i += 1;
        }

        // On underflow borrow is all-ones; add the modulus back
        let mut carry = 0;
        i = 0;
        while i < 4 {
            let (v, c) = adc(d[i], MODULUS[i] & borrow, carry);
            d[i] = v;
            carry = c;
            i += 1;
        }
        Scalar(d)
    }

    /// Adds `rhs` to `self`, returning the result
    #[inline]
    pub const fn add(&self, rhs: &Self) -> Self {
        let mut d = [0u64; 4];
        let mut carry = 0;
        let mut i = 0;
        while i < 4 {
            let (v, c) = adc(self.0[i], rhs.0[i], carry);
            d[i] = v;
            carry = c;
            i += 1;
        }

        // Attempt to subtract the modulus, to ensure the value is smaller than the modulus
        (&Scalar(d)).sub(&Scalar(MODULUS))
    }

    /// Negates `self`
    #[inline]
    pub const fn neg(&self) -> Self {
        let mut d = [0u64; 4];
        let mut borrow = 0;
        let mut i = 0;
        while i < 4 {
            let (v, b) = sbb(MODULUS[i], self.0[i], borrow);
            d[i] = v;
            borrow = b;
            i += 1;
        }

        // Zero maps to zero, not to q
        let mask = (((self.0[0] | self.0[1] | self.0[2] | self.0[3]) == 0) as u64).wrapping_sub(1);

        Scalar([d[0] & mask, d[1] & mask, d[2] & mask, d[3] & mask])
    }
}

impl From<Scalar> for [u8; SCALAR_SIZE] {
    fn from(value: Scalar) -> [u8; SCALAR_SIZE] {
        value.to_bytes()
    }
}

impl<'a> From<&'a Scalar> for [u8; SCALAR_SIZE] {
    fn from(value: &'a Scalar) -> [u8; SCALAR_SIZE] {
        value.to_bytes()
    }
}

impl<T> core::iter::Sum<T> for Scalar
where
    T: core::borrow::Borrow<Scalar>,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::zero(), |acc, item| acc + item.borrow())
    }
}

impl<T> core::iter::Product<T> for Scalar
where
    T: core::borrow::Borrow<Scalar>,
{
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        iter.fold(Self::one(), |acc, item| acc * item.borrow())
    }
}

// Tests
#[test]
fn test_inv() {
    // Verify INV constant
    let mut inv = 1u64;
    for _ in 0..63 {
        inv = inv.wrapping_mul(inv);
        inv = inv.wrapping_mul(MODULUS[0]);
    }
    inv = inv.wrapping_neg();
    assert_eq!(inv, INV);
}

#[cfg(feature = "std")]
#[test]
fn test_debug() {
    assert_eq!(
        format!("{:?}", Scalar::zero()),
        "0x0000000000000000000000000000000000000000000000000000000000000000"
    );
    assert_eq!(
        format!("{:?}", Scalar::one()),
        "0x0000000000000000000000000000000000000000000000000000000000000001"
    );
    // R is the Montgomery form of 1
    assert_eq!(
        format!("{:?}", R),
        "0x0000000000000000000000000000000000000000000000000000000000000001"
    );
}

#[test]
fn test_to_bytes_big_endian() {
    assert_eq!(Scalar::zero().to_bytes(), [0u8; 32]);

    let mut one = [0u8; 32];
    one[31] = 1;
    assert_eq!(Scalar::one().to_bytes(), one);
    assert_eq!(R.to_bytes(), one);

    assert_eq!(
        (-&Scalar::one()).to_bytes(),
        [
            0x73, 0xed, 0xa7, 0x53, 0x29, 0x9d, 0x7d, 0x48, 0x33, 0x39, 0xd8, 0x08, 0x09, 0xa1,
            0xd8, 0x05, 0x53, 0xbd, 0xa4, 0x02, 0xff, 0xfe, 0x5b, 0xfe, 0xff, 0xff, 0xff, 0xff,
            0x00, 0x00, 0x00, 0x00
        ]
    );
}

#[test]
fn test_from_bytes_rejects_non_canonical() {
    let mut a = R2;
    for _ in 0..100 {
        let bytes = a.to_bytes();
        assert_eq!(Scalar::from_bytes(&bytes).unwrap(), a);
        assert_eq!(Scalar::from_bytes(&(-a).to_bytes()).unwrap(), -a);
        a = a.square();
    }

    // q itself
    let mut q = [0u8; 32];
    q.copy_from_slice(&(-&Scalar::one()).to_bytes());
    q[31] = 0x01;
    assert!(bool::from(Scalar::from_bytes(&q).is_none()));
    assert!(bool::from(Scalar::from_bytes(&[0xff; 32]).is_none()));
}

#[cfg(test)]
const LARGEST: Scalar = Scalar([
    0xffff_ffff_0000_0000,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
]);

#[test]
fn test_addition() {
    let mut tmp = LARGEST;
    tmp += &LARGEST;

    assert_eq!(
        tmp,
        Scalar([
            0xffff_fffe_ffff_ffff,
            0x53bd_a402_fffe_5bfe,
            0x3339_d808_09a1_d805,
            0x73ed_a753_299d_7d48,
        ])
    );

    let mut tmp = LARGEST;
    tmp += &Scalar([1, 0, 0, 0]);

    assert_eq!(tmp, Scalar::zero());
}

#[test]
fn test_inversion() {
    assert!(bool::from(Scalar::zero().invert().is_none()));
    assert_eq!(Scalar::one().invert().unwrap(), Scalar::one());
    assert_eq!((-&Scalar::one()).invert().unwrap(), -&Scalar::one());

    let mut tmp = R2;
    for _ in 0..100 {
        let mut tmp2 = tmp.invert().unwrap();
        tmp2.mul_assign(&tmp);
        assert_eq!(tmp2, Scalar::one());

        // agrees with Fermat
        let q_minus_2 = [MODULUS[0] - 2, MODULUS[1], MODULUS[2], MODULUS[3]];
        assert_eq!(tmp.invert().unwrap(), tmp.pow_vartime(&q_minus_2));

        tmp.add_assign(&R2);
    }
}

#[test]
fn test_sqrt() {
    assert_eq!(Scalar::zero().sqrt().unwrap(), Scalar::zero());
    assert_eq!(Scalar::one().sqrt().unwrap(), Scalar::one());

    let four = Scalar::from(4u64);
    let two = Scalar::from(2u64);
    let sqrt_four = four.sqrt().unwrap();
    assert!(sqrt_four == two || sqrt_four == -two);

    // 5 is a quadratic non-residue modulo q
    assert!(bool::from(Scalar::from(5u64).sqrt().is_none()));

    // q = 1 mod 4, so -1 is a residue
    let neg_one = -Scalar::one();
    assert_eq!(neg_one.sqrt().unwrap().square(), neg_one);

    let mut val = R2;
    for _ in 0..100 {
        let sq = val.square();
        let sqrt = sq.sqrt().unwrap();
        assert!(sqrt == val || sqrt == -val);
        val += R;
    }
}

#[test]
fn test_pow_matches_vartime() {
    let base = Scalar::from(0x1234_5678u64);
    let exp = [0xdead_beef_0000_0001, 7, 0, 1];
    assert_eq!(base.pow(&exp), base.pow_vartime(&exp));
}

#[test]
fn test_from_raw() {
    assert_eq!(
        Scalar::from_raw([
            0x0001_ffff_fffd,
            0x5884_b7fa_0003_4802,
            0x998c_4fef_ecbc_4ff5,
            0x1824_b159_acc5_056f,
        ]),
        Scalar::from_raw([0xffff_ffff_ffff_ffff; 4])
    );

    assert_eq!(Scalar::from_raw(MODULUS), Scalar::zero());
    assert_eq!(Scalar::from_raw([1, 0, 0, 0]), R);
}

#[test]
fn test_from_bytes_wide() {
    // 2^256 mod q == R
    let mut wide = [0u8; 64];
    wide[31] = 1;
    assert_eq!(Scalar::from_bytes_wide(&wide), Scalar::from_raw(R.0));

    // q reduces to zero from either half
    let mut q_wide = [0u8; 64];
    let mut q = (-&Scalar::one()).to_bytes();
    q[31] += 1;
    q_wide[32..].copy_from_slice(&q);
    assert_eq!(Scalar::from_bytes_wide(&q_wide), Scalar::zero());

    let short = Scalar::from_uniform_bytes(&[0u8; 48]).unwrap();
    assert_eq!(short, Scalar::zero());
    assert!(Scalar::from_uniform_bytes(&[0u8; 32]).is_err());
}

#[test]
fn test_nibbles() {
    let s = Scalar::from(0xabu64);
    let n = s.nibbles_be();
    assert_eq!(n[62], 0xa);
    assert_eq!(n[63], 0xb);
    assert!(n[..62].iter().all(|&x| x == 0));
}

#[cfg(feature = "zeroize")]
#[test]
fn test_zeroize() {
    use zeroize::Zeroize;

    let mut a = Scalar::from_raw([
        0x1fff_3231_233f_fffd,
        0x4884_b7fa_0003_4802,
        0x998c_4fef_ecbc_4ff3,
        0x1824_b159_acc5_0562,
    ]);
    a.zeroize();
    assert!(bool::from(a.is_zero()));
}
