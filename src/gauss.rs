//! Constant-time reduction of the check matrix to systematic form.
//!
//! Only the left square block takes part in the elimination. Every
//! elementary row operation is mirrored into a transform matrix that starts
//! as the identity, so the public columns can be reduced afterwards in one
//! pass when the public key is serialized.

use crate::error::PkGenError;
use crate::matrix::BitMatrix;

/// Outcome of a successful elimination.
#[derive(Debug)]
pub struct Reduction {
    transform: BitMatrix,
    reduced: BitMatrix,
}

impl Reduction {
    /// Net row transform `T` with `T · H_left = I`.
    #[must_use]
    pub fn transform(&self) -> &BitMatrix {
        &self.transform
    }

    /// Left block of the check matrix after reduction (the identity, plus
    /// whatever public columns share its last word).
    #[must_use]
    pub fn reduced(&self) -> &BitMatrix {
        &self.reduced
    }
}

/// Adds row `src` into row `dst` of both matrices when `mask` is all ones.
#[inline(always)]
fn add_both(mat: &mut BitMatrix, ops: &mut BitMatrix, dst: usize, src: usize, mask: u64) {
    mat.add_row_masked(dst, src, mask);
    ops.add_row_masked(dst, src, mask);
}

/// Gauss-Jordan elimination on the first `h.rows()` columns of `h`.
///
/// # Algorithm
///
/// Forward pass, for each pivot row `r`:
/// 1. While bit `(r, r)` is clear, every lower row is added into row `r`
///    (mask from the pivot bit, no branch), which sets it if any lower row
///    has it.
/// 2. A clear pivot after that means the block is singular.
/// 3. Row `r` is added into each lower row whose bit in column `r` is set.
///
/// Backward pass, rows in decreasing order: row `r` is added into each upper
/// row whose bit in column `r` is set, leaving the identity.
///
/// The only secret-dependent branch is the failure exit.
pub fn reduce(h: &BitMatrix) -> Result<Reduction, PkGenError> {
    let rows = h.rows();
    let mut mat = h.left_words(rows.div_ceil(64));
    let mut ops = BitMatrix::identity(rows);

    for row in 0..rows {
        for k in row + 1..rows {
            let mask = mat.bit(row, row).wrapping_sub(1);
            add_both(&mut mat, &mut ops, row, k, mask);
        }

        if mat.bit(row, row) == 0 {
            return Err(PkGenError::SingularPivot);
        }

        for k in row + 1..rows {
            let mask = 0u64.wrapping_sub(mat.bit(k, row));
            add_both(&mut mat, &mut ops, k, row, mask);
        }
    }

    for row in (0..rows).rev() {
        for k in 0..row {
            let mask = 0u64.wrapping_sub(mat.bit(k, row));
            add_both(&mut mat, &mut ops, k, row, mask);
        }
    }

    Ok(Reduction {
        transform: ops,
        reduced: mat,
    })
}
