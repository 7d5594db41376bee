//! Simplified Shallue-van de Woestijne-Ulas map (RFC 9380, section 6.6.2)
//! and isogeny evaluation, shared by G1 and G2

use core::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallySelectable, CtOption};

use crate::ec::bls12_381::field::{Fp, Fp2};

/// A base field carrying the constants of an isogenous curve
/// `y² = x³ + A'x + B'` and the SSWU non-square `Z`
pub(crate) trait SswuField:
    Copy
    + ConditionallySelectable
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// A' of the isogenous curve
    const ISO_A: Self;
    /// B' of the isogenous curve
    const ISO_B: Self;
    /// Non-square Z
    const Z: Self;

    fn zero() -> Self;
    fn one() -> Self;
    fn square(&self) -> Self;
    fn invert(&self) -> CtOption<Self>;
    fn sqrt(&self) -> CtOption<Self>;
    fn is_zero(&self) -> Choice;
    fn sgn0(&self) -> Choice;
}

/// Map `u` to an affine point on the isogenous curve, in constant time
pub(crate) fn map_to_curve_simple_swu<F: SswuField>(u: &F) -> (F, F) {
    let a = F::ISO_A;
    let b = F::ISO_B;
    let z = F::Z;

    // tv1 = Z²u⁴ + Zu²
    let zu2 = z * u.square();
    let tv1 = zu2.square() + zu2;

    // x1 = B(tv1 + 1) / (-A tv1), or B / (ZA) when tv1 = 0
    let x1_num = b * (tv1 + F::one());
    let x1_den = F::conditional_select(&(-(a * tv1)), &(z * a), tv1.is_zero());
    let x1 = x1_num * x1_den.invert().unwrap_or(F::zero());

    let gx1 = x1.square() * x1 + a * x1 + b;
    let x2 = zu2 * x1;
    let gx2 = x2.square() * x2 + a * x2 + b;

    let y1 = gx1.sqrt();
    let y2 = gx2.sqrt();
    let gx1_is_square = y1.is_some();

    let x = F::conditional_select(&x2, &x1, gx1_is_square);
    let y = F::conditional_select(
        &y2.unwrap_or(F::zero()),
        &y1.unwrap_or(F::zero()),
        gx1_is_square,
    );

    let y = F::conditional_select(&y, &(-y), u.sgn0() ^ y.sgn0());
    (x, y)
}

/// `leading * x^n + sum(coeffs[i] * x^i)` with `n = coeffs.len()`
fn horner<F: SswuField>(coeffs: &[F], x: &F, leading: F) -> F {
    coeffs.iter().rev().fold(leading, |acc, c| acc * *x + *c)
}

/// Rational map coefficients, lowest degree first. The denominators are
/// monic and their leading coefficient is left out.
pub(crate) struct Isogeny<F: 'static> {
    pub x_num: &'static [F],
    pub x_den: &'static [F],
    pub y_num: &'static [F],
    pub y_den: &'static [F],
}

impl<F: SswuField> Isogeny<F> {
    /// Evaluate the isogeny at `(x, y)` and return homogeneous projective
    /// coordinates on the target curve
    pub(crate) fn map(&self, x: &F, y: &F) -> (F, F, F) {
        let xn = horner(self.x_num, x, F::zero());
        let xd = horner(self.x_den, x, F::one());
        let yn = horner(self.y_num, x, F::zero());
        let yd = horner(self.y_den, x, F::one());

        // x = xn / xd, y = y * yn / yd
        (xn * yd, *y * yn * xd, xd * yd)
    }
}

macro_rules! impl_sswu_field {
    ($field:ident) => {
        fn zero() -> Self {
            $field::zero()
        }

        fn one() -> Self {
            $field::one()
        }

        fn square(&self) -> Self {
            $field::square(self)
        }

        fn invert(&self) -> CtOption<Self> {
            $field::invert(self)
        }

        fn sqrt(&self) -> CtOption<Self> {
            $field::sqrt(self)
        }

        fn is_zero(&self) -> Choice {
            $field::is_zero(self)
        }

        fn sgn0(&self) -> Choice {
            $field::sgn0(self)
        }
    };
}

impl SswuField for Fp {
    const ISO_A: Fp = super::g1::SSWU_ELLP_A;
    const ISO_B: Fp = super::g1::SSWU_ELLP_B;
    const Z: Fp = super::g1::SSWU_Z;

    impl_sswu_field!(Fp);
}

impl SswuField for Fp2 {
    const ISO_A: Fp2 = super::g2::SSWU_ELLP_A;
    const ISO_B: Fp2 = super::g2::SSWU_ELLP_B;
    const Z: Fp2 = super::g2::SSWU_Z;

    impl_sswu_field!(Fp2);
}
