//! Reducing the public columns and serializing the public key.

use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::matrix::BitMatrix;
use crate::param::ParameterSet;

/// Serialized public key: `PK_NROWS` rows of `PK_ROW_BYTES` bytes.
///
/// Row `r` holds columns `PK_NROWS..SYS_N` of the reduced check matrix,
/// least significant bit first.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey<P: ParameterSet> {
    bytes: Vec<u8>,
    _params: PhantomData<P>,
}

impl<P: ParameterSet> PublicKey<P> {
    /// Wraps serialized key bytes.
    ///
    /// # Panics
    ///
    /// If `bytes` is not exactly `PK_BYTES` long.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        assert_eq!(bytes.len(), P::PK_BYTES, "public key length");
        Self {
            bytes,
            _params: PhantomData,
        }
    }

    /// View the key as a byte slice.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bytes of row `r`.
    #[must_use]
    pub fn row(&self, r: usize) -> &[u8] {
        &self.bytes[r * P::PK_ROW_BYTES..(r + 1) * P::PK_ROW_BYTES]
    }

    /// Copy of the key bytes.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Consume the wrapper and return the bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl<P: ParameterSet> AsRef<[u8]> for PublicKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<P: ParameterSet> core::fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("params", &P::NAME)
            .field("len", &P::PK_BYTES)
            .finish_non_exhaustive()
    }
}

/// Writes the low `out.len()` bytes of `word`, little-endian.
#[inline]
pub(crate) fn store_le(out: &mut [u8], word: u64) {
    out.copy_from_slice(&word.to_le_bytes()[..out.len()]);
}

/// Packs one row of public columns.
///
/// `words` starts at the word holding the first public column, which sits at
/// bit `tail` of `words[0]`. Bits past `cols` in the final byte are cleared.
fn pack_row(words: &[u64], tail: usize, cols: usize, out: &mut [u8]) {
    for (q, chunk) in out.chunks_mut(8).enumerate() {
        let lo = words.get(q).copied().unwrap_or(0);
        let word = if tail == 0 {
            lo
        } else {
            let hi = words.get(q + 1).copied().unwrap_or(0);
            (lo >> tail) | (hi << (64 - tail))
        };
        store_le(chunk, word);
    }

    if cols % 8 != 0
        && let Some(last) = out.last_mut()
    {
        *last &= (1 << (cols % 8)) - 1;
    }
}

/// Applies `transform` to the public columns of `h` and serializes them.
///
/// Each output row is the masked XOR of the original rows selected by the
/// corresponding transform row, restricted to the words from
/// `PK_NROWS / 64` onward.
#[must_use]
pub fn serialize_public<P: ParameterSet>(h: &BitMatrix, transform: &BitMatrix) -> PublicKey<P> {
    let rows = P::PK_NROWS;
    let block_idx = rows / 64;
    let tail = rows % 64;
    debug_assert_eq!(h.rows(), rows);
    debug_assert_eq!(h.words(), P::NBLOCKS_H);

    let mut bytes = vec![0u8; P::PK_BYTES];
    let mut acc = vec![0u64; P::NBLOCKS_H - block_idx];

    for (r, out) in bytes.chunks_exact_mut(P::PK_ROW_BYTES).enumerate() {
        acc.fill(0);
        for k in 0..rows {
            let mask = 0u64.wrapping_sub(transform.bit(r, k));
            for (a, &w) in acc.iter_mut().zip(&h.row(k)[block_idx..]) {
                *a ^= w & mask;
            }
        }
        pack_row(&acc, tail, P::PK_NCOLS, out);
    }

    PublicKey::from_bytes(bytes)
}
