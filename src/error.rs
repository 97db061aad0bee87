//! Error types for batch encoding.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by parameter validation and the batch encoder.
///
/// All failures are deterministic functions of the inputs and are raised
/// synchronously; none are transient. Construction-time failures
/// ([`Error::UnsupportedScheme`], [`Error::UnsupportedModulus`]) prevent a
/// usable encoder from being produced at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A length, range, or handle argument violated the encoder's contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The encryption parameters do not denote the integer (BFV) scheme.
    #[error("encryption parameters are not valid for batching: scheme must be BFV")]
    UnsupportedScheme,

    /// The plain modulus admits no primitive 2n-th root of unity, so the
    /// slot decomposition does not exist for this parameter set.
    #[error("plain modulus does not support batching for this polynomial degree")]
    UnsupportedModulus,
}
