//! Field arithmetic on bitsliced blocks: 64 lanes per operation.
//!
//! The lane-wise semantics of every function here are those of the scalar
//! operation with the same name in [`crate::gf`].

use crate::bitslice::Block;
use crate::gf::taps;
use crate::param::{Field, Gf};

/// Largest supported field degree
pub(crate) const MAX_BITS: usize = 13;

const PROD_LEN: usize = 2 * MAX_BITS - 1;

/// Folds planes `m..2m-1` of an unreduced product down with `x^m = taps(x)`.
///
/// Planes are processed from the top so that every plane a fold lands on
/// above `m` is itself folded later.
#[inline(always)]
fn reduce<F: Field>(prod: &mut [u64; PROD_LEN]) -> Block<F> {
    let m = F::BITS;
    let taps = taps::<F>();

    for k in (m..2 * m - 1).rev() {
        let hi = prod[k];
        for e in 0..m {
            if (taps >> e) & 1 == 1 {
                prod[k - m + e] ^= hi;
            }
        }
    }

    Block::<F>::from_fn(|i| prod[i])
}

/// Lane-wise sum.
#[must_use]
pub fn add<F: Field>(a: &Block<F>, b: &Block<F>) -> Block<F> {
    Block::<F>::from_fn(|i| a[i] ^ b[i])
}

/// Lane-wise product.
#[must_use]
pub fn mul<F: Field>(a: &Block<F>, b: &Block<F>) -> Block<F> {
    debug_assert!(F::BITS <= MAX_BITS);
    let m = F::BITS;

    let mut prod = [0u64; PROD_LEN];
    for i in 0..m {
        for j in 0..m {
            prod[i + j] ^= a[i] & b[j];
        }
    }

    reduce::<F>(&mut prod)
}

/// Lane-wise square. Squaring is linear in characteristic 2, so plane `i`
/// simply moves to plane `2i` before reduction.
#[must_use]
pub fn sq<F: Field>(a: &Block<F>) -> Block<F> {
    let mut prod = [0u64; PROD_LEN];
    for (i, &plane) in a.iter().enumerate() {
        prod[2 * i] = plane;
    }

    reduce::<F>(&mut prod)
}

/// Lane-wise `a^4`.
#[inline]
#[must_use]
pub fn sq2<F: Field>(a: &Block<F>) -> Block<F> {
    sq::<F>(&sq::<F>(a))
}

/// Lane-wise `a^2 * b`.
#[inline]
#[must_use]
pub fn sq_mul<F: Field>(a: &Block<F>, b: &Block<F>) -> Block<F> {
    mul::<F>(&sq::<F>(a), b)
}

/// Lane-wise `a^4 * b`.
#[inline]
#[must_use]
pub fn sq2_mul<F: Field>(a: &Block<F>, b: &Block<F>) -> Block<F> {
    mul::<F>(&sq2::<F>(a), b)
}

/// Lane-wise inverse; zero lanes stay zero.
///
/// # Algorithm
///
/// Same addition chain as the scalar inversion: `b^3`, `b^15`, then four
/// exponent bits per round until `b^(2^(m-1) - 1)`, and a final squaring
/// gives `b^(2^m - 2)`.
#[must_use]
pub fn inv<F: Field>(b: &Block<F>) -> Block<F> {
    let target = F::BITS - 1;

    let b3 = sq_mul::<F>(b, b);
    let b15 = sq2_mul::<F>(&b3, &b3);

    let mut out = b15.clone();
    let mut bits = 4;
    while bits + 4 <= target {
        out = sq2_mul::<F>(&sq2::<F>(&out), &b15);
        bits += 4;
    }
    if target - bits >= 2 {
        out = sq2_mul::<F>(&out, &b3);
        bits += 2;
    }
    if target - bits == 1 {
        out = sq_mul::<F>(&out, b);
    }

    sq::<F>(&out)
}

/// Places the same element in all 64 lanes.
#[must_use]
pub fn broadcast<F: Field>(a: Gf) -> Block<F> {
    Block::<F>::from_fn(|plane| 0u64.wrapping_sub(u64::from((a >> plane) & 1)))
}
