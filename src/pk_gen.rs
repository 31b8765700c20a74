//! Systematic public-key generation.
//!
//! One call runs the whole pipeline for one attempt:
//!
//! ```text
//! g ──fft──> g(a) ──batch_invert──> 1/g(a) ──sort by perm──> (pi, a, 1/g(a))
//!   ──build──> H ──reduce──> T ──T·H_pub──> public key bytes
//! ```
//!
//! The two rejections are reported as [`PkGenError`]; the caller samples new
//! secrets and tries again.

use alloc::vec::Vec;
use core::fmt;

use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::PkGenError;
use crate::fft;
use crate::gauss::reduce;
use crate::inverse::batch_invert;
use crate::matrix::build_check_matrix;
use crate::param::{Field, Gf, GoppaCoeffs, IrrBytes, ParameterSet};
use crate::permute::sort_support;
use crate::pk::{PublicKey, serialize_public};

/// Pivot word of a systematic key: the 32 columns of the pivot window that
/// semi-systematic variants may move all stay in place.
pub const SYSTEMATIC_PIVOTS: u64 = 0xFFFF_FFFF;

/// Accepted support ordering: entry `j` is the table index placed at column
/// `j`. Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Permutation(Vec<Gf>);

impl Permutation {
    /// View the permutation as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Gf] {
        &self.0
    }

    /// Number of entries (`2^m`).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a generated permutation.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[Gf]> for Permutation {
    #[inline]
    fn as_ref(&self) -> &[Gf] {
        &self.0
    }
}

impl fmt::Debug for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permutation([REDACTED; {}])", self.0.len())
    }
}

/// Everything a successful attempt hands back to the key-generation driver.
#[derive(Debug)]
pub struct PkGenOutput<P: ParameterSet> {
    /// Serialized public key
    pub public_key: PublicKey<P>,
    /// Support ordering, written into the private key
    pub pi: Permutation,
    /// Pivot bookkeeping word, written into the private key
    pub pivots: u64,
}

/// Parses `t` little-endian 2-byte Goppa coefficients, keeping `m` bits of
/// each.
#[must_use]
pub fn load_irr<P: ParameterSet>(bytes: &IrrBytes<P>) -> GoppaCoeffs<P> {
    debug_assert_eq!(bytes.len(), 2 * P::SYS_T);
    GoppaCoeffs::<P>::from_fn(|i| {
        u16::from_le_bytes([bytes[2 * i], bytes[2 * i + 1]]) & <P::Field as Field>::MASK
    })
}

/// Public-key generator for the systematic parameter sets.
pub struct PkGen;

impl PkGen {
    /// Generates the public key from serialized Goppa coefficients and a
    /// candidate permutation (one 32-bit tag per field element).
    ///
    /// # Errors
    ///
    /// [`PkGenError::NonInjectivePermutation`] if two tags collide and
    /// [`PkGenError::SingularPivot`] if the check matrix has no systematic
    /// form. Both call for fresh secrets.
    ///
    /// # Panics
    ///
    /// If `perm.len() != 2^m`.
    pub fn generate<P: ParameterSet>(
        irr: &IrrBytes<P>,
        perm: &[u32],
    ) -> Result<PkGenOutput<P>, PkGenError> {
        let mut g = load_irr::<P>(irr);
        let out = Self::generate_from_coeffs::<P>(&g, perm);
        g.zeroize();
        out
    }

    /// Same as [`PkGen::generate`], from already parsed coefficients
    /// `g_0, ..., g_(t-1)` of the monic Goppa polynomial.
    ///
    /// # Errors
    ///
    /// See [`PkGen::generate`].
    ///
    /// # Panics
    ///
    /// If `perm.len() != 2^m`.
    pub fn generate_from_coeffs<P: ParameterSet>(
        g: &GoppaCoeffs<P>,
        perm: &[u32],
    ) -> Result<PkGenOutput<P>, PkGenError> {
        assert_eq!(
            perm.len(),
            <P::Field as Field>::ORDER,
            "permutation must cover every field element"
        );

        let mut poly = Zeroizing::new(Vec::with_capacity(P::SYS_T + 1));
        poly.extend_from_slice(g);
        poly.push(1);

        let evals = Zeroizing::new(fft::evaluate::<P::Field>(&poly));
        let inverses = Zeroizing::new(batch_invert::<P::Field>(&evals));

        let sorted = sort_support::<P::Field>(&inverses, perm).inspect_err(|_| {
            debug!(params = P::NAME, "rejected: permutation tags collide");
        })?;

        let h = build_check_matrix::<P::Field>(&sorted, P::SYS_T, P::NBLOCKS_H);
        let reduction = reduce(&h).inspect_err(|_| {
            debug!(params = P::NAME, "rejected: no systematic form");
        })?;

        let public_key = serialize_public::<P>(&h, reduction.transform());
        trace!(params = P::NAME, bytes = P::PK_BYTES, "public key generated");

        Ok(PkGenOutput {
            public_key,
            pi: Permutation(sorted.pi.clone()),
            pivots: SYSTEMATIC_PIVOTS,
        })
    }
}
