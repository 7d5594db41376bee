//! Limb arithmetic shared by the base field and the scalar field.

/// Compute a + b + carry, returning (result, carry)
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a - (b + borrow), returning (result, borrow)
///
/// The returned borrow is either 0 or `u64::MAX`, so it doubles as a mask.
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Compute a + (b * c) + carry, returning (result, carry)
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

// ============================================================================
// Masked multi-limb helpers
// ============================================================================

/// `a - b` over N limbs, returning the difference and a borrow mask
#[inline(always)]
fn sub_limbs<const N: usize>(a: &[u64; N], b: &[u64; N]) -> ([u64; N], u64) {
    let mut out = [0u64; N];
    let mut borrow = 0;
    for i in 0..N {
        let (d, br) = sbb(a[i], b[i], borrow);
        out[i] = d;
        borrow = br;
    }
    (out, borrow)
}

/// `a + (b & mask)` over N limbs; the final carry is discarded
#[inline(always)]
fn add_masked<const N: usize>(a: &[u64; N], b: &[u64; N], mask: u64) -> [u64; N] {
    let mut out = [0u64; N];
    let mut carry = 0;
    for i in 0..N {
        let (s, c) = adc(a[i], b[i] & mask, carry);
        out[i] = s;
        carry = c;
    }
    out
}

#[inline(always)]
fn select<const N: usize>(a: &[u64; N], b: &[u64; N], mask: u64) -> [u64; N] {
    let mut out = [0u64; N];
    for i in 0..N {
        out[i] = (a[i] & !mask) | (b[i] & mask);
    }
    out
}

#[inline(always)]
fn shr1<const N: usize>(a: &mut [u64; N]) {
    for i in 0..N - 1 {
        a[i] = (a[i] >> 1) | (a[i + 1] << 63);
    }
    a[N - 1] >>= 1;
}

/// Three-way comparison of two N-limb integers, as (less mask, equal mask)
#[inline(always)]
pub(crate) fn cmp_limbs<const N: usize>(a: &[u64; N], b: &[u64; N]) -> (u64, u64) {
    let (diff, lt) = sub_limbs(a, b);
    let mut acc = 0u64;
    for d in diff.iter() {
        acc |= d;
    }
    // acc == 0 iff every limb of the difference is zero
    let nonzero = (acc | acc.wrapping_neg()) >> 63;
    let eq = nonzero.wrapping_sub(1);
    (lt, eq)
}

// ============================================================================
// Constant-time inversion
// ============================================================================

/// Binary extended Euclid over N limbs with a fixed iteration count.
///
/// Returns `v` such that `v * x == 1 (mod modulus)` when `x` is nonzero; for `x == 0`
/// the output is meaningless and callers mask it with the zero flag. Every iteration
/// performs the same sequence of limb operations; the data-dependent decisions are
/// applied through masks. Requires `2 * modulus < 2^(64N)`.
pub(crate) fn binary_invert<const N: usize>(x: &[u64; N], modulus: &[u64; N]) -> [u64; N] {
    let mut a = *x;
    let mut b = *modulus;
    let mut u = [0u64; N];
    u[0] = 1;
    let mut v = [0u64; N];

    for _ in 0..(2 * 64 * N) {
        let odd = (a[0] & 1).wrapping_neg();

        // if a is odd and a < b: swap (a, u) <-> (b, v)
        let (_, lt) = sub_limbs(&a, &b);
        let swap = odd & lt;
        let (na, nb) = (select(&a, &b, swap), select(&b, &a, swap));
        let (nu, nv) = (select(&u, &v, swap), select(&v, &u, swap));
        a = na;
        b = nb;
        u = nu;
        v = nv;

        // if a is odd: a -= b, u = (u - v) mod m
        let (diff, _) = sub_limbs(&a, &b);
        a = select(&a, &diff, odd);
        let (du, borrow) = sub_limbs(&u, &v);
        let du = add_masked(&du, modulus, borrow);
        u = select(&u, &du, odd);

        // a /= 2, u /= 2 (mod m)
        shr1(&mut a);
        let u_odd = (u[0] & 1).wrapping_neg();
        u = add_masked(&u, modulus, u_odd);
        shr1(&mut u);
    }

    v
}
