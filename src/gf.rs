//! GF(2^m) arithmetic for m in {12, 13}.
//!
//! Every operation is straight-line bit manipulation on a `u64` scratch word:
//! no table lookups and no branches on operand values. Carry-less products are
//! formed with ordinary integer multiplies whose operands are spread out so
//! that carries land in bits that are masked away ("holes"), see
//! <https://www.bearssl.org/constanttime.html#ghash-for-gcm>.
//!
//! Ref: Classic McEliece `gf.c` (`gf_mul`, `gf_sq2`, `gf_sqmul`, `gf_sq2mul`, `gf_frac`).

use hybrid_array::typenum::{U12, U13};

use crate::param::{Field, Gf};

/// GF(2^12) with modulus x^12 + x^3 + 1 (mceliece348864)
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gf4096;

impl Field for Gf4096 {
    type Bits = U12;
    const MODULUS: u32 = 0x1009;
}

/// GF(2^13) with modulus x^13 + x^4 + x^3 + x + 1 (all other parameter sets)
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gf8192;

impl Field for Gf8192 {
    type Bits = U13;
    const MODULUS: u32 = 0x201B;
}

/// Addition in characteristic 2 is XOR.
#[inline]
#[must_use]
pub const fn add(a: Gf, b: Gf) -> Gf {
    a ^ b
}

/// Low-order terms of the modulus, i.e. `MODULUS - x^m`.
#[inline(always)]
pub(crate) fn taps<F: Field>() -> u32 {
    F::MODULUS & u32::from(F::MASK)
}

/// Reduces a carry-less product whose highest possibly-set bit is `top`.
///
/// Bits at or above `m` are folded down with `x^m = taps(x)` in chunks no wider
/// than `m - deg(taps)`, so the bits a chunk produces always land below it and
/// are picked up by the next chunk. Chunk boundaries depend only on the field.
#[inline(always)]
fn reduce<F: Field>(mut x: u64, top: usize) -> Gf {
    let m = F::BITS;
    let taps = taps::<F>();
    let width = m - (31 - taps.leading_zeros() as usize);

    let mut hi = top;
    while hi >= m {
        let lo = (hi + 1).saturating_sub(width).max(m);
        let t = x & (((1u64 << (hi + 1 - lo)) - 1) << lo);
        for e in 0..m {
            if (taps >> e) & 1 == 1 {
                x ^= t >> (m - e);
            }
        }
        hi = lo - 1;
    }

    (x as Gf) & F::MASK
}

/// Multiplies two field elements.
///
/// Each operand is split into four interleaved bit groups so that every
/// integer partial product keeps its carries inside the three-bit gaps.
#[must_use]
pub fn mul<F: Field>(a: Gf, b: Gf) -> Gf {
    const M0: u64 = 0x1111_1111_1111_1111;
    const M1: u64 = 0x2222_2222_2222_2222;
    const M2: u64 = 0x4444_4444_4444_4444;
    const M3: u64 = 0x8888_8888_8888_8888;

    debug_assert!(a <= F::MASK && b <= F::MASK, "operands must be reduced");

    let x = u64::from(a);
    let y = u64::from(b);

    let (x0, x1, x2, x3) = (x & M0, x & M1, x & M2, x & M3);
    let (y0, y1, y2, y3) = (y & M0, y & M1, y & M2, y & M3);

    let z0 = (x0 * y0) ^ (x1 * y3) ^ (x2 * y2) ^ (x3 * y1);
    let z1 = (x0 * y1) ^ (x1 * y0) ^ (x2 * y3) ^ (x3 * y2);
    let z2 = (x0 * y2) ^ (x1 * y1) ^ (x2 * y0) ^ (x3 * y3);
    let z3 = (x0 * y3) ^ (x1 * y2) ^ (x2 * y1) ^ (x3 * y0);

    let z = (z0 & M0) | (z1 & M1) | (z2 & M2) | (z3 & M3);

    reduce::<F>(z, 2 * F::BITS - 2)
}

/// Squares a field element.
#[inline]
#[must_use]
pub fn sq<F: Field>(a: Gf) -> Gf {
    mul::<F>(a, a)
}

/// Computes `a^4` by spreading bit `i` of `a` to bit `4i`.
#[must_use]
pub fn sq2<F: Field>(a: Gf) -> Gf {
    let mut x = u64::from(a);
    x = (x | (x << 24)) & 0x0000_00FF_0000_00FF;
    x = (x | (x << 12)) & 0x000F_000F_000F_000F;
    x = (x | (x << 6)) & 0x0303_0303_0303_0303;
    x = (x | (x << 3)) & 0x1111_1111_1111_1111;

    reduce::<F>(x, 4 * F::BITS - 4)
}

/// Computes `a^2 * b` without a separate squaring pass.
///
/// `a^2 = sum a_i x^(2i)`. Bits `j` and `j + h` of `a` are paired (with
/// `h = ceil(m/2)`) so one integer multiply by `b` yields both `a_j x^(2j) b`
/// and `a_(j+h) x^(2j+2h) b` without overlap.
#[must_use]
pub fn sq_mul<F: Field>(a: Gf, b: Gf) -> Gf {
    let h = F::BITS.div_ceil(2);
    let a = u64::from(a);
    let b = u64::from(b);

    let a = a ^ (a << h);
    let pair = 1 | (1u64 << (2 * h));

    let mut x = 0u64;
    for j in 0..h {
        x ^= (b * (a & (pair << j))) << j;
    }

    reduce::<F>(x, 3 * F::BITS - 3)
}

/// Computes `a^4 * b`, pairing bits as in [`sq_mul`] with a spacing of `4h`.
#[must_use]
pub fn sq2_mul<F: Field>(a: Gf, b: Gf) -> Gf {
    let h = F::BITS.div_ceil(2);
    let a = u64::from(a);
    let b = u64::from(b);

    let a = a ^ (a << (3 * h));
    let pair = 1 | (1u64 << (4 * h));

    let mut x = 0u64;
    for j in 0..h {
        x ^= (b * (a & (pair << j))) << (3 * j);
    }

    reduce::<F>(x, 5 * F::BITS - 5)
}

/// Raises `b` to `2^(m-1) - 1` with the Itoh-Tsujii chain shared by
/// [`div`] and the bitsliced inversion.
///
/// `b^3`, then `b^15`, then four exponent bits per `sq2`/`sq2_mul` round,
/// finishing the last one to three bits with `sq2_mul` by `b^3` and/or
/// `sq_mul` by `b`.
#[inline]
fn pow_half_order<F: Field>(b: Gf) -> Gf {
    let target = F::BITS - 1;

    let b3 = sq_mul::<F>(b, b);
    let b15 = sq2_mul::<F>(b3, b3);

    let mut out = b15;
    let mut bits = 4;
    while bits + 4 <= target {
        out = sq2_mul::<F>(sq2::<F>(out), b15);
        bits += 4;
    }
    if target - bits >= 2 {
        out = sq2_mul::<F>(out, b3);
        bits += 2;
    }
    if target - bits == 1 {
        out = sq_mul::<F>(out, b);
    }

    out
}

/// Computes `a / b = b^(2^m - 2) * a`.
///
/// Division by zero yields zero.
#[must_use]
pub fn div<F: Field>(a: Gf, b: Gf) -> Gf {
    sq_mul::<F>(pow_half_order::<F>(b), a)
}

/// Multiplicative inverse; `inv(0) = 0`.
#[inline]
#[must_use]
pub fn inv<F: Field>(a: Gf) -> Gf {
    div::<F>(1, a)
}

/// Reverses the `m` low bits of `a`.
///
/// Maps an evaluation-table index to the field element evaluated there.
#[inline]
#[must_use]
pub fn bitrev<F: Field>(a: Gf) -> Gf {
    a.reverse_bits() >> (16 - F::BITS)
}
