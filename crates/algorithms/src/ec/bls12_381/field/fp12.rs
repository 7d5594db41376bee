//! Quadratic extension `Fp12 = Fp6[w] / (w^2 - v)`, the pairing target field

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;
use super::fp2::Fp2;
use super::fp6::Fp6;

/// xi^((p-1)/6), applied to the w coefficient by the Frobenius map
const FROBENIUS_COEFF_W: Fp2 = Fp2 {
    c0: Fp::from_raw_unchecked([
        0x0708_9552_b319_d465,
        0xc669_5f92_b50a_8313,
        0x97e8_3ccc_d117_228f,
        0xa35b_aeca_b2dc_29ee,
        0x1ce3_93ea_5daa_ce4d,
        0x08f2_220f_b0fb_66eb,
    ]),
    c1: Fp::from_raw_unchecked([
        0xb2f6_6aad_4ce5_d646,
        0x5842_a06b_fc49_7cec,
        0xcf48_95d4_2599_d394,
        0xc11b_9cba_40a8_e8d0,
        0x2e38_13cb_e5a0_de89,
        0x110e_efda_8884_7faf,
    ]),
};

/// Serialized size: twelve base-field elements
pub const FP12_BYTES: usize = 12 * 48;

/// Element `c0 + c1 * w`
#[derive(Copy, Clone)]
pub struct Fp12 {
    /// Constant coefficient
    pub c0: Fp6,
    /// Coefficient of w
    pub c1: Fp6,
}

impl From<Fp> for Fp12 {
    fn from(f: Fp) -> Fp12 {
        Fp12::from(Fp2::from(f))
    }
}

impl From<Fp2> for Fp12 {
    fn from(f: Fp2) -> Fp12 {
        Fp12 {
            c0: Fp6::from(f),
            c1: Fp6::zero(),
        }
    }
}

impl From<Fp6> for Fp12 {
    fn from(f: Fp6) -> Fp12 {
        Fp12 {
            c0: f,
            c1: Fp6::zero(),
        }
    }
}

impl Eq for Fp12 {}
impl PartialEq for Fp12 {
    fn eq(&self, other: &Fp12) -> bool {
        self.ct_eq(other).into()
    }
}

impl Default for Fp12 {
    fn default() -> Self {
        Fp12::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Fp12 {}

impl fmt::Debug for Fp12 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} + ({:?})*w", self.c0, self.c1)
    }
}

impl ConditionallySelectable for Fp12 {
    #[inline(always)]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp12 {
            c0: Fp6::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp6::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl ConstantTimeEq for Fp12 {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

/// Squares a + b*s in Fp4 = Fp2[s]/(s^2 - xi), returning (c0, c1)
#[inline(always)]
fn fp4_square(a: Fp2, b: Fp2) -> (Fp2, Fp2) {
    let t0 = a.square();
    let t1 = b.square();
    let c0 = t1.mul_by_nonresidue() + t0;
    let c1 = (a + b).square() - t0 - t1;
    (c0, c1)
}

impl Fp12 {
    /// Additive identity
    #[inline]
    pub fn zero() -> Self {
        Fp12 {
            c0: Fp6::zero(),
            c1: Fp6::zero(),
        }
    }

    /// Multiplicative identity
    #[inline]
    pub fn one() -> Self {
        Fp12 {
            c0: Fp6::one(),
            c1: Fp6::zero(),
        }
    }

    /// Uniformly random element
    pub fn random(mut rng: impl RngCore) -> Self {
        Fp12 {
            c0: Fp6::random(&mut rng),
            c1: Fp6::random(&mut rng),
        }
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Sparse product with a line `c0 + c1 v + c4 v w`
    pub fn mul_by_014(&self, c0: &Fp2, c1: &Fp2, c4: &Fp2) -> Fp12 {
        let aa = self.c0.mul_by_01(c0, c1);
        let bb = self.c1.mul_by_1(c4);
        let o = c1 + c4;
        let c1 = self.c1 + self.c0;
        let c1 = c1.mul_by_01(c0, &o);
        let c1 = c1 - aa - bb;
        let c0 = bb;
        let c0 = c0.mul_by_nonresidue();
        let c0 = c0 + aa;

        Fp12 { c0, c1 }
    }

    /// Conjugation over Fp6; equals the p^6 Frobenius and, in the cyclotomic
    /// subgroup, the inverse
    #[inline(always)]
    pub fn conjugate(&self) -> Self {
        Fp12 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// Raise to the p-th power
    #[inline(always)]
    pub fn frobenius_map(&self) -> Self {
        let c0 = self.c0.frobenius_map();
        let c1 = self.c1.frobenius_map();
        let c1 = c1 * Fp6::from(FROBENIUS_COEFF_W);

        Fp12 { c0, c1 }
    }

    /// Square this element
    #[inline]
    pub fn square(&self) -> Self {
        let ab = self.c0 * self.c1;
        let c0c1 = self.c0 + self.c1;
        let c0 = self.c1.mul_by_nonresidue();
        let c0 = c0 + self.c0;
        let c0 = c0 * c0c1;
        let c0 = c0 - ab;
        let c1 = ab + ab;
        let c0 = c0 - ab.mul_by_nonresidue();

        Fp12 { c0, c1 }
    }

    /// Granger-Scott squaring, valid only for elements of the cyclotomic subgroup
    pub fn cyclotomic_square(&self) -> Self {
        let mut z0 = self.c0.c0;
        let mut z4 = self.c0.c1;
        let mut z3 = self.c0.c2;
        let mut z2 = self.c1.c0;
        let mut z1 = self.c1.c1;
        let mut z5 = self.c1.c2;

        let (t0, t1) = fp4_square(z0, z1);

        // 3 * t0 - 2 * z0
        z0 = t0 - z0;
        z0 = z0 + z0 + t0;

        // 3 * t1 + 2 * z1
        z1 = t1 + z1;
        z1 = z1 + z1 + t1;

        let (t0, t1) = fp4_square(z2, z3);
        let (t2, t3) = fp4_square(z4, z5);

        z4 = t0 - z4;
        z4 = z4 + z4 + t0;

        z5 = t1 + z5;
        z5 = z5 + z5 + t1;

        let t0 = t3.mul_by_nonresidue();
        z2 = t0 + z2;
        z2 = z2 + z2 + t0;

        z3 = t2 - z3;
        z3 = z3 + z3 + t2;

        Fp12 {
            c0: Fp6 {
                c0: z0,
                c1: z4,
                c2: z3,
            },
            c1: Fp6 {
                c0: z2,
                c1: z1,
                c2: z5,
            },
        }
    }

    /// Exponentiation by a public 64-bit exponent using cyclotomic squarings
    pub fn cyclotomic_exp(&self, by: u64) -> Self {
        let mut tmp = Fp12::one();
        let mut found_one = false;
        for i in (0..64).rev() {
            let bit = (by >> i) & 1 == 1;
            if found_one {
                tmp = tmp.cyclotomic_square();
            } else {
                found_one = bit;
            }

            if bit {
                tmp *= self;
            }
        }
        tmp
    }

    /// Multiplicative inverse; the flag is false for zero
    pub fn invert(&self) -> CtOption<Self> {
        (self.c0.square() - self.c1.square().mul_by_nonresidue())
            .invert()
            .map(|t| Fp12 {
                c0: self.c0 * t,
                c1: self.c1 * -t,
            })
    }

    fn coefficients(&self) -> [Fp; 12] {
        let mut out = [Fp::zero(); 12];
        let parts = [
            self.c0.c0, self.c0.c1, self.c0.c2, self.c1.c0, self.c1.c1, self.c1.c2,
        ];
        for (i, c) in parts.iter().enumerate() {
            out[2 * i] = c.c0;
            out[2 * i + 1] = c.c1;
        }
        out
    }

    /// Encode as twelve 48-byte big-endian base-field elements, real parts first
    pub fn to_bytes(&self) -> [u8; FP12_BYTES] {
        let mut res = [0u8; FP12_BYTES];
        for (chunk, c) in res.chunks_exact_mut(48).zip(self.coefficients().iter()) {
            chunk.copy_from_slice(&c.to_bytes());
        }
        res
    }

    /// Decode the layout written by [`Fp12::to_bytes`]; the flag is false if any
    /// coefficient is not canonical
    pub fn from_bytes(bytes: &[u8; FP12_BYTES]) -> CtOption<Self> {
        let mut coeffs = [Fp::zero(); 12];
        let mut valid = Choice::from(1u8);
        for (c, chunk) in coeffs.iter_mut().zip(bytes.chunks_exact(48)) {
            let mut buf = [0u8; 48];
            buf.copy_from_slice(chunk);
            let decoded = Fp::from_bytes(&buf);
            valid &= decoded.is_some();
            *c = decoded.unwrap_or(Fp::zero());
        }

        let fp2 = |i: usize| Fp2 {
            c0: coeffs[2 * i],
            c1: coeffs[2 * i + 1],
        };
        let value = Fp12 {
            c0: Fp6 {
                c0: fp2(0),
                c1: fp2(1),
                c2: fp2(2),
            },
            c1: Fp6 {
                c0: fp2(3),
                c1: fp2(4),
                c2: fp2(5),
            },
        };
        CtOption::new(value, valid)
    }
}

impl<'a, 'b> Mul<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn mul(self, other: &'b Fp12) -> Self::Output {
        let aa = self.c0 * other.c0;
        let bb = self.c1 * other.c1;
        let o = other.c0 + other.c1;
        let c1 = self.c1 + self.c0;
        let c1 = c1 * o;
        let c1 = c1 - aa;
        let c1 = c1 - bb;
        let c0 = bb.mul_by_nonresidue();
        let c0 = c0 + aa;

        Fp12 { c0, c1 }
    }
}

impl<'a, 'b> Add<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn add(self, rhs: &'b Fp12) -> Self::Output {
        Fp12 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }
}

impl<'a> Neg for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn neg(self) -> Self::Output {
        Fp12 {
            c0: -self.c0,
            c1: -self.c1,
        }
    }
}

impl Neg for Fp12 {
    type Output = Fp12;

    #[inline]
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl<'a, 'b> Sub<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;

    #[inline]
    fn sub(self, rhs: &'b Fp12) -> Self::Output {
        Fp12 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }
}

impl_binops_additive!(Fp12, Fp12);
impl_binops_multiplicative!(Fp12, Fp12);
