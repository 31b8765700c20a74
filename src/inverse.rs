//! Batch inversion of an evaluation table.

use alloc::vec;
use alloc::vec::Vec;

use zeroize::Zeroize;

use crate::bitslice::Block;
use crate::param::Field;
use crate::vect;

/// Inverts every lane of every block with a single bitsliced inversion.
///
/// # Algorithm
///
/// Montgomery's trick, block-wise:
/// ```text
/// p_0 = e_0,  p_i = p_(i-1) · e_i
/// r   = p_(n-1)^-1
/// for i = n-1 down to 1:  out_i = p_(i-1) · r,  r = r · e_i
/// out_0 = r
/// ```
/// A zero in any lane zeroes the running product of that lane, so every
/// output in that lane is zero as well.
#[must_use]
pub fn batch_invert<F: Field>(evals: &[Block<F>]) -> Vec<Block<F>> {
    let n = evals.len();
    let Some(first) = evals.first() else {
        return Vec::new();
    };

    let mut prods = Vec::with_capacity(n);
    prods.push(first.clone());
    for (i, e) in evals.iter().enumerate().skip(1) {
        let p = vect::mul::<F>(&prods[i - 1], e);
        prods.push(p);
    }

    let mut out = vec![Block::<F>::default(); n];
    let mut running = vect::inv::<F>(&prods[n - 1]);
    for i in (1..n).rev() {
        out[i] = vect::mul::<F>(&prods[i - 1], &running);
        running = vect::mul::<F>(&running, &evals[i]);
    }
    out[0] = running;

    prods.zeroize();
    out
}
