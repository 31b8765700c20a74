#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//!
//! # Security Warning
//!
//! **DO NOT USE THIS LIBRARY IN PRODUCTION.**
//!
//! This is an educational implementation for learning and experimentation.
//! It has not been audited, may contain timing side-channels, and provides
//! no security guarantees.
//!
//! # Usage
//!
//! ```
//! use mcpkgen::mceliece348864::Mceliece348864Params;
//! use mcpkgen::{IrrBytes, ParameterSet, PkGen, PkGenError};
//!
//! // Obviously don't do this irl
//! let mut irr = IrrBytes::<Mceliece348864Params>::default();
//! irr[0] = 0x01; // g(x) = x^64 + 1
//! let perm: Vec<u32> = (0..4096u32).map(|i| i.wrapping_mul(0x9E37_79B9)).collect();
//!
//! match PkGen::generate::<Mceliece348864Params>(&irr, &perm) {
//!     Ok(out) => assert_eq!(out.public_key.as_bytes().len(), Mceliece348864Params::PK_BYTES),
//!     Err(e) => assert!(e.is_retryable()),
//! }
//! ```

extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod test_util;

/// GF(2^m) scalar arithmetic
pub mod gf;

/// Bitsliced blocks of 64 field elements
pub mod bitslice;

/// Bitsliced block arithmetic
mod vect;

/// Batch evaluation of a polynomial over the whole field
pub mod fft;

/// Batch inversion of evaluations
mod inverse;

/// Oblivious sorting network
mod sort;

/// Support ordering by the secret permutation
mod permute;

/// Bit matrices and the check matrix builder
pub mod matrix;

/// Systematic-form elimination
pub mod gauss;

/// Public column reduction and key serialization
mod pk;

/// Public-key generation pipeline
mod pk_gen;

mod error;

mod param;

pub use error::PkGenError;
pub use param::{Field, Gf, GoppaCoeffs, IrrBytes, ParameterSet};
pub use pk::PublicKey;
pub use pk_gen::{Permutation, PkGen, PkGenOutput, SYSTEMATIC_PIVOTS, load_irr};

/// mceliece348864 parameter set (NIST Security Level 1)
pub mod mceliece348864 {
    use super::ParameterSet;
    use crate::gf::Gf4096;
    use hybrid_array::sizes::{U64, U128};

    /// mceliece348864 parameter set implementation
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct Mceliece348864Params;

    impl ParameterSet for Mceliece348864Params {
        const NAME: &'static str = "mceliece348864";
        type Field = Gf4096;
        type SysT = U64;
        type IrrBytes = U128; // 2 * 64
        const SYS_N: usize = 3488;
    }
}

/// mceliece460896 parameter set (NIST Security Level 3)
pub mod mceliece460896 {
    use super::ParameterSet;
    use crate::gf::Gf8192;
    use hybrid_array::sizes::{U96, U192};

    /// mceliece460896 parameter set implementation
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct Mceliece460896Params;

    impl ParameterSet for Mceliece460896Params {
        const NAME: &'static str = "mceliece460896";
        type Field = Gf8192;
        type SysT = U96;
        type IrrBytes = U192; // 2 * 96
        const SYS_N: usize = 4608;
    }
}

/// mceliece6688128 parameter set (NIST Security Level 5)
pub mod mceliece6688128 {
    use super::ParameterSet;
    use crate::gf::Gf8192;
    use hybrid_array::sizes::{U128, U256};

    /// mceliece6688128 parameter set implementation
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct Mceliece6688128Params;

    impl ParameterSet for Mceliece6688128Params {
        const NAME: &'static str = "mceliece6688128";
        type Field = Gf8192;
        type SysT = U128;
        type IrrBytes = U256; // 2 * 128
        const SYS_N: usize = 6688;
    }
}

/// mceliece6960119 parameter set (NIST Security Level 5)
///
/// Neither `m·t = 1547` nor `n - m·t = 5413` is aligned: the public block
/// starts at bit 11 of a word and every row ends mid-byte.
pub mod mceliece6960119 {
    use super::ParameterSet;
    use crate::gf::Gf8192;
    use hybrid_array::sizes::{U119, U238};

    /// mceliece6960119 parameter set implementation
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct Mceliece6960119Params;

    impl ParameterSet for Mceliece6960119Params {
        const NAME: &'static str = "mceliece6960119";
        type Field = Gf8192;
        type SysT = U119;
        type IrrBytes = U238; // 2 * 119
        const SYS_N: usize = 6960;
    }
}

/// mceliece8192128 parameter set (NIST Security Level 5)
pub mod mceliece8192128 {
    use super::ParameterSet;
    use crate::gf::Gf8192;
    use hybrid_array::sizes::{U128, U256};

    /// mceliece8192128 parameter set implementation
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct Mceliece8192128Params;

    impl ParameterSet for Mceliece8192128Params {
        const NAME: &'static str = "mceliece8192128";
        type Field = Gf8192;
        type SysT = U128;
        type IrrBytes = U256; // 2 * 128
        const SYS_N: usize = 8192;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mceliece348864::Mceliece348864Params;
    use mceliece460896::Mceliece460896Params;
    use mceliece6688128::Mceliece6688128Params;
    use mceliece6960119::Mceliece6960119Params;
    use mceliece8192128::Mceliece8192128Params;

    fn shape<P: ParameterSet>() -> [usize; 7] {
        [
            P::GF_BITS,
            P::SYS_T,
            P::PK_NROWS,
            P::PK_NCOLS,
            P::PK_ROW_BYTES,
            P::NBLOCKS_H,
            P::NBLOCKS_I,
        ]
    }

    #[test]
    fn derived_sizes() {
        assert_eq!(shape::<Mceliece348864Params>(), [12, 64, 768, 2720, 340, 55, 12]);
        assert_eq!(shape::<Mceliece460896Params>(), [13, 96, 1248, 3360, 420, 72, 20]);
        assert_eq!(shape::<Mceliece6688128Params>(), [13, 128, 1664, 5024, 628, 105, 26]);
        assert_eq!(shape::<Mceliece6960119Params>(), [13, 119, 1547, 5413, 677, 109, 25]);
        assert_eq!(shape::<Mceliece8192128Params>(), [13, 128, 1664, 6528, 816, 128, 26]);
    }

    #[test]
    fn public_key_sizes() {
        assert_eq!(Mceliece348864Params::PK_BYTES, 261_120);
        assert_eq!(Mceliece460896Params::PK_BYTES, 524_160);
        assert_eq!(Mceliece6688128Params::PK_BYTES, 1_044_992);
        assert_eq!(Mceliece6960119Params::PK_BYTES, 1_047_319);
        assert_eq!(Mceliece8192128Params::PK_BYTES, 1_357_824);
    }

    #[test]
    fn irr_bytes_hold_two_bytes_per_coefficient() {
        assert_eq!(IrrBytes::<Mceliece348864Params>::default().len(), 128);
        assert_eq!(IrrBytes::<Mceliece460896Params>::default().len(), 192);
        assert_eq!(IrrBytes::<Mceliece6688128Params>::default().len(), 256);
        assert_eq!(IrrBytes::<Mceliece6960119Params>::default().len(), 238);
        assert_eq!(IrrBytes::<Mceliece8192128Params>::default().len(), 256);
    }
}
