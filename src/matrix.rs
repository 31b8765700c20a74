//! Bit matrices over GF(2) and the Vandermonde-style check matrix builder.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::param::Field;
use crate::permute::SortedSupport;
use crate::vect;

/// Row-major bit matrix, each row packed into little-endian 64-bit words.
///
/// Column `c` of row `r` is bit `c % 64` of word `c / 64`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct BitMatrix {
    rows: usize,
    words: usize,
    data: Vec<u64>,
}

impl BitMatrix {
    /// All-zero matrix of `rows` rows by `words · 64` columns.
    #[must_use]
    pub fn zero(rows: usize, words: usize) -> Self {
        Self {
            rows,
            words,
            data: vec![0; rows * words],
        }
    }

    /// `n × n` identity, padded to whole words.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut id = Self::zero(n, n.div_ceil(64));
        for i in 0..n {
            id.row_mut(i)[i / 64] = 1 << (i % 64);
        }
        id
    }

    /// Number of rows
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Words per row
    #[must_use]
    pub fn words(&self) -> usize {
        self.words
    }

    /// Packed words of row `r`
    #[must_use]
    pub fn row(&self, r: usize) -> &[u64] {
        &self.data[r * self.words..(r + 1) * self.words]
    }

    /// Mutable packed words of row `r`
    pub fn row_mut(&mut self, r: usize) -> &mut [u64] {
        &mut self.data[r * self.words..(r + 1) * self.words]
    }

    /// Bit at `(r, c)` as 0 or 1
    #[inline]
    #[must_use]
    pub fn bit(&self, r: usize, c: usize) -> u64 {
        (self.data[r * self.words + c / 64] >> (c % 64)) & 1
    }

    /// `row[dst] ^= row[src] & mask`, with `mask` either 0 or all ones.
    #[inline]
    pub fn add_row_masked(&mut self, dst: usize, src: usize, mask: u64) {
        for w in 0..self.words {
            let v = self.data[src * self.words + w] & mask;
            self.data[dst * self.words + w] ^= v;
        }
    }

    /// Copy of the first `words` words of every row.
    #[must_use]
    pub fn left_words(&self, words: usize) -> Self {
        debug_assert!(words <= self.words);
        let mut out = Self::zero(self.rows, words);
        for r in 0..self.rows {
            out.row_mut(r).copy_from_slice(&self.row(r)[..words]);
        }
        out
    }

    /// Product `self · other` over GF(2); `self` needs at least `other.rows()`
    /// columns.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        debug_assert!(self.words * 64 >= other.rows);
        let mut out = Self::zero(self.rows, other.words);
        for r in 0..self.rows {
            for k in 0..other.rows {
                let mask = 0u64.wrapping_sub(self.bit(r, k));
                for w in 0..other.words {
                    out.data[r * other.words + w] ^= other.data[k * other.words + w] & mask;
                }
            }
        }
        out
    }
}

impl fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitMatrix")
            .field("rows", &self.rows)
            .field("words", &self.words)
            .finish_non_exhaustive()
    }
}

/// Builds the `(m·t) × (64·blocks)` check matrix from the sorted support.
///
/// Row `k·m + b` holds bit `b` of `a_j^k / g(a_j)` in column `j`: block `j`
/// of the values is the seed and every further power multiplies in the
/// support block once.
#[must_use]
pub fn build_check_matrix<F: Field>(
    sorted: &SortedSupport<F>,
    t: usize,
    blocks: usize,
) -> BitMatrix {
    let m = F::BITS;
    let mut h = BitMatrix::zero(m * t, blocks);

    let columns = sorted.support.iter().zip(&sorted.values).take(blocks);
    for (j, (alpha, value)) in columns.enumerate() {
        let mut power = value.clone();
        for k in 0..t {
            if k > 0 {
                power = vect::mul::<F>(&power, alpha);
            }
            for (b, &plane) in power.iter().enumerate() {
                h.row_mut(k * m + b)[j] = plane;
            }
        }
        power.zeroize();
    }

    h
}
