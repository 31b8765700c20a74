use core::fmt::Debug;

use hybrid_array::{Array, ArraySize, typenum::Unsigned};

/// A field element of GF(2^m), stored in the low `m` bits.
pub type Gf = u16;

/// Binary extension field GF(2^m) used by a parameter set.
///
/// Scalar arithmetic in [`crate::gf`] and the bitsliced block arithmetic
/// are generic over this trait. The reduction steps are derived from
/// [`Field::MODULUS`] at monomorphization time, so one implementation serves
/// every field.
pub trait Field: Default + Clone + Debug + PartialEq + Eq + 'static {
    /// Field degree `m` as a type, used to size bitsliced blocks
    type Bits: ArraySize;

    /// Modulus polynomial, including the `x^m` term
    const MODULUS: u32;

    /// Field degree `m`
    const BITS: usize = <Self::Bits as Unsigned>::USIZE;

    /// Number of field elements, `2^m`
    const ORDER: usize = 1 << Self::BITS;

    /// Mask selecting the `m` low bits of a [`Gf`]
    const MASK: Gf = ((1u32 << (Self::BITS as u32)) - 1) as Gf;
}

/// Classic McEliece parameter set trait
///
/// Carries the compile-time shape of one systematic Classic McEliece variant.
/// Derived sizes default from `m`, `t` and `n` and should not be overridden.
pub trait ParameterSet: Default + Clone + Debug + PartialEq + Eq + 'static {
    /// Human readable name, used in log events
    const NAME: &'static str;

    /// Underlying GF(2^m)
    type Field: Field;

    /// Degree `t` of the Goppa polynomial (error-correction capacity)
    type SysT: ArraySize;

    /// Size in bytes of the serialized Goppa polynomial, `2 * t`
    type IrrBytes: ArraySize;

    /// Code length `n`
    const SYS_N: usize;

    /// Field degree `m`
    const GF_BITS: usize = <Self::Field as Field>::BITS;

    /// Degree `t` of the Goppa polynomial
    const SYS_T: usize = <Self::SysT as Unsigned>::USIZE;

    /// Rows of the check matrix, `m * t`
    const PK_NROWS: usize = Self::GF_BITS * Self::SYS_T;

    /// Columns of the public block, `n - m * t`
    const PK_NCOLS: usize = Self::SYS_N - Self::PK_NROWS;

    /// Bytes per serialized public key row
    const PK_ROW_BYTES: usize = Self::PK_NCOLS.div_ceil(8);

    /// Public key size in bytes
    const PK_BYTES: usize = Self::PK_NROWS * Self::PK_ROW_BYTES;

    /// Bitsliced blocks covering every field element, `2^m / 64`
    const EVAL_BLOCKS: usize = <Self::Field as Field>::ORDER / 64;

    /// 64-column blocks covering the whole check matrix
    const NBLOCKS_H: usize = Self::SYS_N.div_ceil(64);

    /// 64-column blocks covering the systematic (left) part
    const NBLOCKS_I: usize = Self::PK_NROWS.div_ceil(64);
}

/// Goppa polynomial coefficients without the implicit leading 1
pub type GoppaCoeffs<P> = Array<Gf, <P as ParameterSet>::SysT>;

/// Serialized Goppa polynomial: `t` little-endian 2-byte coefficients
pub type IrrBytes<P> = Array<u8, <P as ParameterSet>::IrrBytes>;
