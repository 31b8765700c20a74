//! Additive FFT (Fast Fourier Transform) over GF(2^m).
//!
//! Evaluates a polynomial at every element of the field and returns the
//! results as a table of bitsliced blocks, which is the form the batch
//! inverter and the matrix builder consume.
//!
//! # Output Order
//!
//! The table has `2^m / 64` blocks. Lane `r` of block `b` holds `f(a)` with
//! `a = bitrev(64·b + r)`: bit `k` of the table index selects the basis
//! element `x^(m-1-k)`.
//!
//! # References
//!
//! - **Gao-Mateer (2010)**: Shuhong Gao and Todd Mateer, "Additive Fast Fourier Transforms
//!   over Finite Fields", IEEE Transactions on Information Theory 56 (2010), 6265-6272.
//!   <http://www.math.clemson.edu/~sgao/papers/GM10.pdf>
//!
//! - **Bernstein-Chou-Schwabe (2013)**: Daniel J. Bernstein, Tung Chou, and Peter Schwabe,
//!   "McBits: fast constant-time code-based cryptography", CHES 2013.
//!   <https://binary.cr.yp.to/mcbits-20130616.pdf>
//!
//! # Algorithm Overview
//!
//! With basis `d_0, ..., d_(m-1)` (initially `d_k = x^(m-1-k)`), every point is
//! `P = Σ c_k d_k` where `c_k` is bit `k` of its table index. One level peels
//! the lowest remaining basis element `d = d_l`:
//!
//! 1. **Twist**: `h(x) -> h(d·x)`, so that `P = d·(c_l + Q)` with
//!    `Q = Σ_(k>l) c_k γ_k` and `γ_k = d_k / d`.
//! 2. **Radix conversion**: `h = h0(x²+x) + x·h1(x²+x)`.
//! 3. **Recurse**: `Q² + Q = Σ_(k>l) c_k δ_k` with `δ_k = γ_k² + γ_k`, so `h0`
//!    and `h1` are evaluated over the basis `δ`.
//! 4. **Combine**: `h(P) = u + Q·v` for `c_l = 0` and `u + (Q+1)·v` for
//!    `c_l = 1`, where `u, v` are the values of `h0, h1`.
//!
//! The first six levels (one per lane-index bit) run on scalar coefficients
//! and leave 64 small polynomials. Those are evaluated side by side, one per
//! lane, at every point of the remaining basis with bitsliced Horner steps.
//! Six rounds of in-block lane butterflies then apply step 4 in reverse
//! level order; the `c_l` bit of the lane index takes over the position that
//! held the `h0`/`h1` choice.

use alloc::vec;
use alloc::vec::Vec;

use zeroize::Zeroizing;

use crate::bitslice::{Block, LANES, encode};
use crate::gf;
use crate::param::{Field, Gf};
use crate::vect::{self, MAX_BITS};

/// Table-index bits addressed by the lane position
const LANE_BITS: usize = 6;

/// Lanes whose bit `l` is clear, per butterfly level `l`
const LANE_MASKS: [u64; LANE_BITS] = [
    0x5555_5555_5555_5555,
    0x3333_3333_3333_3333,
    0x0F0F_0F0F_0F0F_0F0F,
    0x00FF_00FF_00FF_00FF,
    0x0000_FFFF_0000_FFFF,
    0x0000_0000_FFFF_FFFF,
];

/// Evaluations of one polynomial at every field element, 64 per block
pub type EvalTable<F> = Vec<Block<F>>;

// ============================================================================
// Internal Helper Functions
// ============================================================================

/// Computes all subset sums of a given set.
///
/// `sums[i]` is the XOR of the elements of `set` selected by the bits of `i`.
///
/// # Example
/// ```text
/// set = [a, b, c]
/// sums = [0, a, b, a^b, c, a^c, b^c, a^b^c]
/// ```
fn subset_sums(set: &[Gf]) -> Vec<Gf> {
    let mut sums = vec![0 as Gf; 1 << set.len()];
    for (i, &x) in set.iter().enumerate() {
        let stride = 1 << i;
        for j in 0..stride {
            sums[stride + j] = x ^ sums[j];
        }
    }
    sums
}

/// Replaces `f(x)` by `f(d·x)`.
fn twist<F: Field>(f: &mut [Gf], d: Gf) {
    let mut pow = 1;
    for c in f.iter_mut().skip(1) {
        pow = gf::mul::<F>(pow, d);
        *c = gf::mul::<F>(*c, pow);
    }
}

/// Performs radix conversion on a polynomial.
///
/// Computes `f0, f1` such that `f(x) = f0(x²+x) + x·f1(x²+x)`, each with half
/// as many coefficients as `f`. The length of `f` must be a power of two, at
/// least 2.
///
/// # Algorithm
///
/// For `n = len(f)` and `k = n/4`, `(x²+x)^k = x^(2k) + x^k`, so folding every
/// coefficient at or above `2k` down by `k` (top first) divides `f` into
/// `R + (x²+x)^k·Q` with `R, Q` of length `2k`. Converting `R` and `Q` and
/// concatenating the halves gives the result.
///
/// # Example
/// ```text
/// f  = [c0, c1, c2, c3]
/// f0 = [c0, c2^c3]
/// f1 = [c1^c2^c3, c3]
/// ```
fn radix(f: &[Gf]) -> (Vec<Gf>, Vec<Gf>) {
    let n = f.len();
    debug_assert!(n.is_power_of_two() && n >= 2);

    if n == 2 {
        return (vec![f[0]], vec![f[1]]);
    }

    let k = n / 4;
    let mut g = Zeroizing::new(f.to_vec());
    for i in (2 * k..n).rev() {
        g[i - k] ^= g[i];
    }

    let (mut f0, mut f1) = radix(&g[..2 * k]);
    let (q0, q1) = radix(&g[2 * k..]);
    f0.extend_from_slice(&q0);
    f1.extend_from_slice(&q1);

    (f0, f1)
}

// ============================================================================
// Public API
// ============================================================================

/// Evaluates `poly` (coefficients in increasing degree) at every element of
/// GF(2^m).
///
/// Returns `2^m / 64` blocks in the order described in the module docs. The
/// polynomial may have any length up to `2^(m-1)` coefficients.
#[must_use]
pub fn evaluate<F: Field>(poly: &[Gf]) -> EvalTable<F> {
    let m = F::BITS;
    debug_assert!(!poly.is_empty() && poly.len() <= F::ORDER / 2);

    let size = poly.len().next_power_of_two().max(LANES);

    let mut basis: [Gf; MAX_BITS] =
        core::array::from_fn(|k| if k < m { 1 << (m - 1 - k) } else { 0 });
    let mut gammas = [[0 as Gf; MAX_BITS]; LANE_BITS];

    // Scalar levels: polys[p*len..(p+1)*len] is the sub-polynomial reached by
    // the h0/h1 choices in the bits of p.
    let mut polys = Zeroizing::new(vec![0 as Gf; size]);
    polys[..poly.len()].copy_from_slice(poly);
    let mut len = size;

    for level in 0..LANE_BITS {
        let d = basis[level];
        let half = len / 2;

        let mut next = Zeroizing::new(vec![0 as Gf; size]);
        for p in 0..size / len {
            let h = &mut polys[p * len..(p + 1) * len];
            twist::<F>(h, d);
            let (h0, h1) = radix(h);

            let q = p | (1 << level);
            next[p * half..(p + 1) * half].copy_from_slice(&h0);
            next[q * half..(q + 1) * half].copy_from_slice(&h1);
        }
        polys = next;
        len = half;

        let d_inv = gf::inv::<F>(d);
        for k in level + 1..m {
            let gamma = gf::mul::<F>(basis[k], d_inv);
            gammas[level][k] = gamma;
            basis[k] = gf::sq::<F>(gamma) ^ gamma;
        }
    }

    // Lane j holds sub-polynomial j; evaluate all 64 at each remaining point.
    let coeffs: Vec<Block<F>> = (0..len)
        .map(|c| encode::<F>(&core::array::from_fn(|lane| polys[lane * len + c])))
        .collect();

    let mut table: EvalTable<F> = subset_sums(&basis[LANE_BITS..m])
        .into_iter()
        .map(|point| {
            let x = vect::broadcast::<F>(point);
            let mut acc = coeffs[len - 1].clone();
            for c in coeffs[..len - 1].iter().rev() {
                acc = vect::add::<F>(&vect::mul::<F>(&acc, &x), c);
            }
            acc
        })
        .collect();

    for level in (0..LANE_BITS).rev() {
        let gamma = &gammas[level];
        let s = 1 << level;
        let lo = LANE_MASKS[level];

        let lane_part: [Gf; LANES] = core::array::from_fn(|r| {
            let mut acc = 0;
            for (k, &g) in gamma.iter().enumerate().take(LANE_BITS).skip(level + 1) {
                if (r >> k) & 1 == 1 {
                    acc ^= g;
                }
            }
            acc
        });
        let lane_part = encode::<F>(&lane_part);
        let block_part = subset_sums(&gamma[LANE_BITS..m]);

        for (block, &bp) in table.iter_mut().zip(block_part.iter()) {
            let q = vect::add::<F>(&lane_part, &vect::broadcast::<F>(bp));
            let u = Block::<F>::from_fn(|i| block[i] & lo);
            let v = Block::<F>::from_fn(|i| (block[i] >> s) & lo);
            let w = vect::add::<F>(&u, &vect::mul::<F>(&q, &v));
            *block = Block::<F>::from_fn(|i| w[i] | ((w[i] ^ v[i]) << s));
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitslice::decode;
    use crate::gf::{Gf4096, Gf8192, bitrev};
    use crate::test_util::TestRng;

    /// Horner evaluation, one point at a time (testing only).
    fn eval_slow<F: Field>(poly: &[Gf], x: Gf) -> Gf {
        poly.iter().rev().fold(0, |acc, &c| gf::mul::<F>(acc, x) ^ c)
    }

    /// Checks every table entry against direct evaluation.
    fn assert_matches_bruteforce<F: Field>(poly: &[Gf]) {
        let table = evaluate::<F>(poly);
        assert_eq!(table.len(), F::ORDER / LANES);

        for (b, block) in table.iter().enumerate() {
            let lanes = decode::<F>(block);
            for (r, &got) in lanes.iter().enumerate() {
                let a = bitrev::<F>((b * LANES + r) as Gf);
                assert_eq!(got, eval_slow::<F>(poly, a), "block {b} lane {r} (a={a:#x})");
            }
        }
    }

    fn random_monic<F: Field>(rng: &mut TestRng, degree: usize) -> Vec<Gf> {
        let mut poly: Vec<Gf> = (0..degree).map(|_| rng.next_gf::<F>()).collect();
        poly.push(1);
        poly
    }

    // ============================================================================
    // Tests for subset_sums
    // ============================================================================

    #[test]
    fn subset_sums_single_elements() {
        let set = [0x100, 0x80, 0x40, 0x3];
        let sums = subset_sums(&set);
        assert_eq!(sums.len(), 16);
        assert_eq!(sums[0], 0, "empty subset");
        assert_eq!(sums[1], 0x100);
        assert_eq!(sums[2], 0x80);
        assert_eq!(sums[4], 0x40);
        assert_eq!(sums[8], 0x3);
        assert_eq!(sums[0b1011], 0x100 ^ 0x80 ^ 0x3);
        assert_eq!(sums[15], 0x100 ^ 0x80 ^ 0x40 ^ 0x3);
    }

    // ============================================================================
    // Tests for radix conversion
    // ============================================================================

    #[test]
    fn radix_four_coefficients() {
        let (f0, f1) = radix(&[5, 7, 11, 13]);
        assert_eq!(f0, [5, 11 ^ 13]);
        assert_eq!(f1, [7 ^ 11 ^ 13, 13]);
    }

    #[test]
    fn radix_verify_reconstruction() {
        let mut rng = TestRng::new();
        for n in [2, 4, 8, 32, 128] {
            let f: Vec<Gf> = (0..n).map(|_| rng.next_gf::<Gf8192>()).collect();
            let (f0, f1) = radix(&f);
            assert_eq!(f0.len(), n / 2);
            assert_eq!(f1.len(), n / 2);

            for _ in 0..50 {
                let x = rng.next_gf::<Gf8192>();
                let y = gf::sq::<Gf8192>(x) ^ x;
                let reconstructed = eval_slow::<Gf8192>(&f0, y)
                    ^ gf::mul::<Gf8192>(x, eval_slow::<Gf8192>(&f1, y));
                assert_eq!(eval_slow::<Gf8192>(&f, x), reconstructed, "n={n} x={x:#x}");
            }
        }
    }

    #[test]
    fn twist_scales_argument() {
        let mut rng = TestRng::new();
        let f: Vec<Gf> = (0..16).map(|_| rng.next_gf::<Gf4096>()).collect();
        let d = rng.next_nonzero_gf::<Gf4096>();
        let mut g = f.clone();
        twist::<Gf4096>(&mut g, d);

        for _ in 0..50 {
            let x = rng.next_gf::<Gf4096>();
            assert_eq!(
                eval_slow::<Gf4096>(&g, x),
                eval_slow::<Gf4096>(&f, gf::mul::<Gf4096>(d, x))
            );
        }
    }

    // ============================================================================
    // Tests comparing FFT to bruteforce
    // ============================================================================

    #[test]
    fn fft_constant_polynomial() {
        let table = evaluate::<Gf4096>(&[0x123]);
        for block in &table {
            assert_eq!(decode::<Gf4096>(block), [0x123; LANES]);
        }
    }

    #[test]
    fn fft_linear_has_single_root() {
        // f(x) = x + a vanishes only at a
        let a = 0x0ABC;
        let table = evaluate::<Gf8192>(&[a, 1]);

        let mut roots = Vec::new();
        for (b, block) in table.iter().enumerate() {
            for (r, &v) in decode::<Gf8192>(block).iter().enumerate() {
                if v == 0 {
                    roots.push(bitrev::<Gf8192>((b * LANES + r) as Gf));
                }
            }
        }
        assert_eq!(roots, [a]);
    }

    #[test]
    fn fft_matches_bruteforce_low_degree() {
        assert_matches_bruteforce::<Gf4096>(&[7, 13, 1]);
        assert_matches_bruteforce::<Gf8192>(&[0x1FFF, 0, 0, 0x42, 0x1000]);
    }

    #[test]
    fn fft_matches_bruteforce_gf4096() {
        let mut rng = TestRng::new();
        assert_matches_bruteforce::<Gf4096>(&random_monic::<Gf4096>(&mut rng, 64));
        assert_matches_bruteforce::<Gf4096>(&random_monic::<Gf4096>(&mut rng, 100));
    }

    #[test]
    fn fft_matches_bruteforce_gf8192() {
        let mut rng = TestRng::new();
        for t in [96, 119, 128] {
            assert_matches_bruteforce::<Gf8192>(&random_monic::<Gf8192>(&mut rng, t));
        }
    }
}
