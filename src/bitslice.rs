//! Bitsliced representation of 64 field elements.
//!
//! A [`Block`] holds `m` words; bit `r` of word `j` is bit `j` of the `r`-th
//! packed element. One word-wide AND/XOR then acts on the same bit-plane of
//! all 64 elements at once, which is how the block arithmetic gets 64
//! field operations per instruction sequence.
//!
//! ```text
//!              lane 63 ...  lane 1  lane 0
//! block[0]   = a63.b0  ...  a1.b0   a0.b0
//! block[1]   = a63.b1  ...  a1.b1   a0.b1
//!   ...
//! block[m-1] = a63.bm-1 ... a1.bm-1 a0.bm-1
//! ```

use hybrid_array::Array;

use crate::param::{Field, Gf};

/// Number of field elements packed into one block
pub const LANES: usize = 64;

/// `m` bit-planes of 64 field elements
pub type Block<F> = Array<u64, <F as Field>::Bits>;

/// Packs 64 field elements into bit-planes.
#[must_use]
pub fn encode<F: Field>(plain: &[Gf; LANES]) -> Block<F> {
    Block::<F>::from_fn(|plane| {
        let mut word = 0u64;
        for (lane, &x) in plain.iter().enumerate() {
            word |= u64::from((x >> plane) & 1) << lane;
        }
        word
    })
}

/// Unpacks bit-planes back into 64 field elements.
#[must_use]
pub fn decode<F: Field>(block: &Block<F>) -> [Gf; LANES] {
    let mut plain = [0 as Gf; LANES];
    for (lane, x) in plain.iter_mut().enumerate() {
        for (plane, word) in block.iter().enumerate() {
            *x |= (((word >> lane) & 1) as Gf) << plane;
        }
    }
    plain
}

/// Splits 64 packed `(value << m) | index` words into two blocks.
///
/// Returns `(support, value)`: `value` holds bits `m..2m` of each word, while
/// `support` holds the low `m` bits read in reverse order, i.e. the field
/// element `bitrev(index)` that the evaluation table stored at `index`.
#[must_use]
pub fn split_two<F: Field>(words: &[u64]) -> (Block<F>, Block<F>) {
    assert_eq!(words.len(), LANES, "split_two: expected one word per lane");
    let m = F::BITS;

    let support = Block::<F>::from_fn(|plane| {
        let mut word = 0u64;
        for (lane, &w) in words.iter().enumerate() {
            word |= ((w >> (m - 1 - plane)) & 1) << lane;
        }
        word
    });
    let value = Block::<F>::from_fn(|plane| {
        let mut word = 0u64;
        for (lane, &w) in words.iter().enumerate() {
            word |= ((w >> (plane + m)) & 1) << lane;
        }
        word
    });

    (support, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gf::{Gf4096, Gf8192, bitrev};
    use crate::test_util::TestRng;

    fn random_lanes<F: Field>(rng: &mut TestRng) -> [Gf; LANES] {
        core::array::from_fn(|_| rng.next_gf::<F>())
    }

    #[test]
    fn round_trip() {
        let mut rng = TestRng::new();
        for _ in 0..100 {
            let x = random_lanes::<Gf8192>(&mut rng);
            assert_eq!(decode::<Gf8192>(&encode::<Gf8192>(&x)), x);

            let y = random_lanes::<Gf4096>(&mut rng);
            assert_eq!(decode::<Gf4096>(&encode::<Gf4096>(&y)), y);
        }
    }

    #[test]
    fn single_lane_layout() {
        let mut plain = [0 as Gf; LANES];
        plain[5] = 0b1_0000_0000_0101;
        let block = encode::<Gf8192>(&plain);

        assert_eq!(block.len(), 13);
        assert_eq!(block[0], 1 << 5);
        assert_eq!(block[1], 0);
        assert_eq!(block[2], 1 << 5);
        assert_eq!(block[12], 1 << 5);
        assert!(block[3..12].iter().all(|&w| w == 0));
    }

    #[test]
    fn split_two_separates_fields() {
        let mut rng = TestRng::new();
        let values = random_lanes::<Gf8192>(&mut rng);
        let indices = random_lanes::<Gf8192>(&mut rng);
        let words: [u64; LANES] =
            core::array::from_fn(|r| (u64::from(values[r]) << 13) | u64::from(indices[r]));

        let (support, value) = split_two::<Gf8192>(&words);

        assert_eq!(decode::<Gf8192>(&value), values);
        let support = decode::<Gf8192>(&support);
        for r in 0..LANES {
            assert_eq!(support[r], bitrev::<Gf8192>(indices[r]), "lane {r}");
        }
    }

    #[test]
    fn split_two_ignores_bits_above_value() {
        let words = [u64::MAX << 12; LANES];
        let (support, value) = split_two::<Gf4096>(&words);
        assert!(support.iter().all(|&w| w == 0));
        assert!(value.iter().all(|&w| w == u64::MAX));
    }
}
