//! Sorting the support by the secret permutation.
//!
//! Every field element gets a 64-bit key carrying its inverse evaluation, its
//! table index and its permutation tag:
//!
//! ```text
//!  63  62 ............ 31  30 ..... 2m  2m-1 ..... m  m-1 ...... 0
//! | 0 |      tag (32)     |    zero    | 1/g(a) (m) |  index (m) |
//! ```
//!
//! The tag occupies the top field, so sorting the keys sorts the support by
//! tag and carries the other two fields along. Bits `2m..31` are always zero
//! (`2m <= 26`), so `key >> 31` is exactly the tag.

use alloc::vec::Vec;

use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::bitslice::{Block, LANES, decode, split_two};
use crate::error::PkGenError;
use crate::param::{Field, Gf};
use crate::sort::sort_u64;

/// Position of the permutation tag inside a sort key
pub(crate) const TAG_SHIFT: u32 = 31;

/// The support after sorting, ready for the matrix builder.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SortedSupport<F: Field> {
    /// Table index of the element placed at each position
    pub pi: Vec<Gf>,
    /// Support element `a` per position, 64 per block
    pub support: Vec<Block<F>>,
    /// `1/g(a)` per position, 64 per block
    pub values: Vec<Block<F>>,
}

/// Packs one support element into its sort key.
#[inline]
#[must_use]
pub fn sort_key<F: Field>(inverse: Gf, index: usize, tag: u32) -> u64 {
    debug_assert!(index < F::ORDER);
    (u64::from(tag) << TAG_SHIFT) | (u64::from(inverse) << F::BITS) | index as u64
}

/// Sorts the inverse evaluations by permutation tag.
///
/// `inverses` is the inverted evaluation table (`2^m/64` blocks) and `perm`
/// holds one tag per field element. Fails when two elements share a tag; the
/// scan over adjacent keys runs to the end either way.
///
/// # Panics
///
/// If `perm` does not have exactly `2^m` entries.
pub fn sort_support<F: Field>(
    inverses: &[Block<F>],
    perm: &[u32],
) -> Result<SortedSupport<F>, PkGenError> {
    assert_eq!(perm.len(), F::ORDER, "permutation must cover every field element");
    debug_assert_eq!(inverses.len() * LANES, F::ORDER);

    let mut keys = Zeroizing::new(Vec::with_capacity(F::ORDER));
    for (b, block) in inverses.iter().enumerate() {
        for (r, &inverse) in decode::<F>(block).iter().enumerate() {
            let index = b * LANES + r;
            keys.push(sort_key::<F>(inverse, index, perm[index]));
        }
    }

    sort_u64(&mut keys);

    let mut duplicate = Choice::from(0);
    for pair in keys.windows(2) {
        duplicate |= (pair[0] >> TAG_SHIFT).ct_eq(&(pair[1] >> TAG_SHIFT));
    }
    if bool::from(duplicate) {
        return Err(PkGenError::NonInjectivePermutation);
    }

    let pi = keys.iter().map(|&key| (key as Gf) & F::MASK).collect();
    let (support, values) = keys.chunks_exact(LANES).map(split_two::<F>).unzip();

    Ok(SortedSupport {
        pi,
        support,
        values,
    })
}
