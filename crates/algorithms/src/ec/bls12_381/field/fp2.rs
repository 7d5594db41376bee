//! Quadratic extension `Fp2 = Fp[u] / (u^2 + 1)`

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand_core::RngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use super::fp::Fp;

/// (p - 3) / 4
const P_MINUS_3_DIV_4: [u64; 6] = [
    0xee7f_bfff_ffff_eaaa,
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

/// Element `c0 + c1 * u`
#[derive(Copy, Clone)]
pub struct Fp2 {
    /// Real part
    pub c0: Fp,
    /// Coefficient of u
    pub c1: Fp,
}

impl fmt::Debug for Fp2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} + {:?}*u", self.c0, self.c1)
    }
}

impl Default for Fp2 {
    fn default() -> Self {
        Fp2::zero()
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for Fp2 {}

impl From<Fp> for Fp2 {
    fn from(f: Fp) -> Fp2 {
        Fp2 { c0: f, c1: Fp::zero() }
    }
}

impl ConstantTimeEq for Fp2 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl Eq for Fp2 {}
impl PartialEq for Fp2 {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp2 {
            c0: Fp::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl<'a> Neg for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn neg(self) -> Fp2 {
        self.neg()
    }
}

impl Neg for Fp2 {
    type Output = Fp2;

    #[inline]
    fn neg(self) -> Fp2 {
        -&self
    }
}

impl<'a, 'b> Sub<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn sub(self, rhs: &'b Fp2) -> Fp2 {
        self.sub(rhs)
    }
}

impl<'a, 'b> Add<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn add(self, rhs: &'b Fp2) -> Fp2 {
        self.add(rhs)
    }
}

impl<'a, 'b> Mul<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn mul(self, rhs: &'b Fp2) -> Fp2 {
        self.mul(rhs)
    }
}

impl_binops_additive!(Fp2, Fp2);
impl_binops_multiplicative!(Fp2, Fp2);

impl Fp2 {
    /// Additive identity
    #[inline]
    pub const fn zero() -> Fp2 {
        Fp2 {
            c0: Fp::zero(),
            c1: Fp::zero(),
        }
    }

    /// Multiplicative identity
    #[inline]
    pub const fn one() -> Fp2 {
        Fp2 {
            c0: Fp::one(),
            c1: Fp::zero(),
        }
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    /// Uniformly random element
    pub fn random(mut rng: impl RngCore) -> Fp2 {
        Fp2 {
            c0: Fp::random(&mut rng),
            c1: Fp::random(&mut rng),
        }
    }

    /// Add two elements
    #[inline]
    pub const fn add(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: (&self.c0).add(&rhs.c0),
            c1: (&self.c1).add(&rhs.c1),
        }
    }

    /// Subtract two elements
    #[inline]
    pub const fn sub(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: (&self.c0).sub(&rhs.c0),
            c1: (&self.c1).sub(&rhs.c1),
        }
    }

    /// Negate an element
    #[inline]
    pub const fn neg(&self) -> Fp2 {
        Fp2 {
            c0: (&self.c0).neg(),
            c1: (&self.c1).neg(),
        }
    }

    /// Double an element
    #[inline]
    pub const fn double(&self) -> Fp2 {
        Fp2 {
            c0: self.c0.double(),
            c1: self.c1.double(),
        }
    }

    /// Karatsuba product with three base-field multiplications
    #[inline]
    pub const fn mul(&self, rhs: &Fp2) -> Fp2 {
        let aa = (&self.c0).mul(&rhs.c0);
        let bb = (&self.c1).mul(&rhs.c1);
        let s = (&self.c0).add(&self.c1);
        let t = (&rhs.c0).add(&rhs.c1);

        Fp2 {
            c0: (&aa).sub(&bb),
            c1: (&(&s).mul(&t)).sub(&(&aa).add(&bb)),
        }
    }

    /// Complex squaring: (a + b)(a - b) + 2ab u
    #[inline]
    pub const fn square(&self) -> Fp2 {
        let a = (&self.c0).add(&self.c1);
        let b = (&self.c0).sub(&self.c1);
        let c = self.c0.double();

        Fp2 {
            c0: (&a).mul(&b),
            c1: (&c).mul(&self.c1),
        }
    }

    /// Multiply both coefficients by a base-field element
    #[inline]
    pub const fn mul_by_fp(&self, rhs: &Fp) -> Fp2 {
        Fp2 {
            c0: (&self.c0).mul(rhs),
            c1: (&self.c1).mul(rhs),
        }
    }

    /// Multiply by the sextic non-residue xi = u + 1
    #[inline]
    pub const fn mul_by_nonresidue(&self) -> Fp2 {
        // (c0 + c1 u)(1 + u) = (c0 - c1) + (c0 + c1) u
        Fp2 {
            c0: (&self.c0).sub(&self.c1),
            c1: (&self.c0).add(&self.c1),
        }
    }

    /// Complex conjugation
    #[inline]
    pub const fn conjugate(&self) -> Fp2 {
        Fp2 {
            c0: self.c0,
            c1: (&self.c1).neg(),
        }
    }

    /// Raise to the p-th power; this is conjugation in Fp2
    #[inline]
    pub const fn frobenius_map(&self) -> Fp2 {
        self.conjugate()
    }

    /// Norm down to Fp: c0^2 + c1^2
    #[inline]
    pub fn norm(&self) -> Fp {
        self.c0.square() + self.c1.square()
    }

    /// Multiplicative inverse; the flag is false for zero
    pub fn invert(&self) -> CtOption<Self> {
        self.norm().invert().map(|t| Fp2 {
            c0: self.c0 * t,
            c1: -(self.c1 * t),
        })
    }

    /// Exponentiation by a public exponent
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

    /// Square root (eprint 2012/685, Algorithm 9); the flag is false for non-squares
    pub fn sqrt(&self) -> CtOption<Self> {
        let a1 = self.pow_vartime(&P_MINUS_3_DIV_4);
        let alpha = a1.square() * self;
        let x0 = a1 * self;

        // alpha == -1: the root is u * x0
        let rotated = Fp2 {
            c0: -x0.c1,
            c1: x0.c0,
        };
        let general = (alpha + Fp2::one()).pow_vartime(&P_MINUS_1_DIV_2) * x0;
        let candidate = Fp2::conditional_select(
            &general,
            &rotated,
            alpha.ct_eq(&(-Fp2::one())),
        );

        CtOption::new(candidate, candidate.square().ct_eq(self))
    }

    /// True for zero and for nonzero squares
    pub fn is_square(&self) -> Choice {
        self.norm().is_square()
    }

    /// RFC 9380 `sgn0` for m = 2
    pub fn sgn0(&self) -> Choice {
        let sign_0 = self.c0.sgn0();
        let zero_0 = self.c0.is_zero();
        let sign_1 = self.c1.sgn0();
        sign_0 | (zero_0 & sign_1)
    }

    /// Ordering used by the compressed point flags: c1 first, then c0
    pub fn lexicographically_largest(&self) -> Choice {
        self.c1.lexicographically_largest()
            | (self.c1.is_zero() & self.c0.lexicographically_largest())
    }

    /// Decode 96 big-endian bytes, real part first
    pub fn from_bytes(bytes: &[u8; 96]) -> CtOption<Fp2> {
        let mut c0 = [0u8; 48];
        let mut c1 = [0u8; 48];
        c0.copy_from_slice(&bytes[..48]);
        c1.copy_from_slice(&bytes[48..]);

        Fp::from_bytes(&c0).and_then(|c0| Fp::from_bytes(&c1).map(|c1| Fp2 { c0, c1 }))
    }

    /// Encode to 96 big-endian bytes, real part first
    pub fn to_bytes(self) -> [u8; 96] {
        let mut res = [0u8; 96];
        res[..48].copy_from_slice(&self.c0.to_bytes());
        res[48..].copy_from_slice(&self.c1.to_bytes());
        res
    }
}
