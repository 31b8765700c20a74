use thiserror::Error;

/// Reasons a public-key generation attempt is rejected.
///
/// Both are routine outcomes of randomized key generation: the caller draws
/// fresh secret inputs and runs the whole pipeline again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PkGenError {
    /// Two support elements received the same permutation tag.
    #[error("candidate permutation is not injective")]
    NonInjectivePermutation,

    /// The left square block of the check matrix is not invertible.
    #[error("check matrix has no systematic form")]
    SingularPivot,
}

impl PkGenError {
    /// Whether retrying with fresh randomness can succeed.
    ///
    /// Always `true`: neither failure depends on anything but the sampled
    /// secrets.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::NonInjectivePermutation | Self::SingularPivot => true,
        }
    }
}
