//! Encryption parameters and the validated context.
//!
//! Parameters carry the scheme tag, ring degree, and plain modulus. A
//! [`Context`] validates them once at construction and records whether the
//! slot decomposition exists for the pair `(n, t)`; consumers such as the
//! batch encoder check that flag at their own construction instead of on
//! every call.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::prime::is_prime;

/// Largest supported plain modulus bit width.
pub const MAX_PLAIN_MODULUS_BITS: u32 = 60;

/// Smallest and largest supported ring degrees.
pub const MIN_POLY_MODULUS_DEGREE: usize = 2;
pub const MAX_POLY_MODULUS_DEGREE: usize = 1 << 17;

/// Encryption scheme tag, decided once at parameter construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemeType {
    /// Integer arithmetic scheme; the only one that supports batching.
    Bfv,
    /// Approximate arithmetic scheme; uses a different encoder entirely.
    Ckks,
}

/// User-supplied encryption parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionParams {
    /// Scheme the parameters belong to.
    pub scheme: SchemeType,
    /// Ring degree n (power of two).
    pub poly_modulus_degree: usize,
    /// Plaintext modulus t. Unused (zero) for CKKS.
    pub plain_modulus: u64,
}

impl EncryptionParams {
    pub fn new(scheme: SchemeType, poly_modulus_degree: usize, plain_modulus: u64) -> Self {
        Self {
            scheme,
            poly_modulus_degree,
            plain_modulus,
        }
    }

    /// Check structural validity of the parameters.
    pub fn validate(&self) -> Result<()> {
        let n = self.poly_modulus_degree;
        if !n.is_power_of_two() || !(MIN_POLY_MODULUS_DEGREE..=MAX_POLY_MODULUS_DEGREE).contains(&n)
        {
            return Err(Error::InvalidArgument(
                "poly_modulus_degree must be a power of two in the supported range",
            ));
        }
        match self.scheme {
            SchemeType::Bfv => {
                if self.plain_modulus < 2 {
                    return Err(Error::InvalidArgument("plain_modulus must be at least 2"));
                }
                if self.plain_modulus >> MAX_PLAIN_MODULUS_BITS != 0 {
                    return Err(Error::InvalidArgument(
                        "plain_modulus must fit in 60 bits",
                    ));
                }
            }
            SchemeType::Ckks => {
                if self.plain_modulus != 0 {
                    return Err(Error::InvalidArgument(
                        "plain_modulus must be zero for the CKKS scheme",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Validated parameter context.
///
/// Immutable after construction; the batching qualifier is computed here
/// exactly once, so infeasible parameter sets are rejected before any
/// encoder is built on top of them.
#[derive(Debug, Clone)]
pub struct Context {
    params: EncryptionParams,
    batching_enabled: bool,
}

impl Context {
    /// Validate `params` and compute the batching qualifier.
    ///
    /// Batching is enabled iff the scheme is BFV, t is prime, and
    /// t ≡ 1 (mod 2n), which is exactly the condition for a primitive
    /// 2n-th root of unity to exist in Z_t.
    pub fn new(params: EncryptionParams) -> Result<Self> {
        params.validate()?;

        let batching_enabled = params.scheme == SchemeType::Bfv
            && is_prime(params.plain_modulus)
            && (params.plain_modulus - 1) % (2 * params.poly_modulus_degree as u64) == 0;

        tracing::debug!(
            degree = params.poly_modulus_degree,
            plain_modulus = params.plain_modulus,
            batching = batching_enabled,
            "encryption context created"
        );

        Ok(Self {
            params,
            batching_enabled,
        })
    }

    pub fn params(&self) -> &EncryptionParams {
        &self.params
    }

    pub fn scheme(&self) -> SchemeType {
        self.params.scheme
    }

    pub fn poly_modulus_degree(&self) -> usize {
        self.params.poly_modulus_degree
    }

    pub fn plain_modulus(&self) -> u64 {
        self.params.plain_modulus
    }

    /// Whether the slot decomposition exists for these parameters.
    pub fn batching_enabled(&self) -> bool {
        self.batching_enabled
    }
}
