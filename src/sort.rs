//! Data-oblivious sorting of 64-bit keys.
//!
//! The sequence of compare-exchange positions depends only on the slice
//! length, never on the keys, and each compare-exchange is a branch-free
//! conditional swap.

use subtle::{ConditionallySelectable, ConstantTimeGreater};

/// Orders `x[lo]` and `x[hi]` so that `x[lo] <= x[hi]`.
#[inline(always)]
fn minmax(x: &mut [u64], lo: usize, hi: usize) {
    let mut a = x[lo];
    let mut b = x[hi];
    let swap = a.ct_gt(&b);
    u64::conditional_swap(&mut a, &mut b, swap);
    x[lo] = a;
    x[hi] = b;
}

/// Sorts `x` ascending with Batcher's bitonic network.
///
/// # Panics
///
/// The length must be a power of two (every evaluation table covers exactly
/// `2^m` entries).
pub fn sort_u64(x: &mut [u64]) {
    let n = x.len();
    assert!(n.is_power_of_two(), "sort_u64: length must be a power of two");

    let mut k = 2;
    while k <= n {
        let mut j = k / 2;
        while j > 0 {
            for i in 0..n {
                let l = i ^ j;
                if l > i {
                    if i & k == 0 {
                        minmax(x, i, l);
                    } else {
                        minmax(x, l, i);
                    }
                }
            }
            j /= 2;
        }
        k *= 2;
    }
}
