//! Batch (SIMD) plaintext encoding for the BFV homomorphic encryption
//! scheme.
//!
//! When the plain modulus t is a prime with t ≡ 1 (mod 2n), the plaintext
//! ring R_t = Z_t[X]/(X^n + 1) splits, by the Chinese Remainder Theorem,
//! into n independent copies of Z_t. The [`BatchEncoder`] realizes that
//! isomorphism with a negacyclic NTT: a vector of up to n integers becomes
//! one polynomial, and coordinate-wise arithmetic on the vector
//! corresponds to single ring operations on the polynomial.
//!
//! Slots are indexed as a 2 × (n/2) matrix matching the ring's Galois
//! structure, so the row swap and column rotations used by homomorphic
//! rotation line up with how values were packed.
//!
//! This crate only converts between slot vectors and plaintext
//! polynomials. Encryption, evaluation, and key material live elsewhere.
//!
//! # Example
//!
//! ```
//! use bfv_batch::{BatchEncoder, Context, EncryptionParams, Plaintext, SchemeType};
//!
//! let context = Context::new(EncryptionParams::new(SchemeType::Bfv, 64, 257))?;
//! let encoder = BatchEncoder::new(&context)?;
//!
//! let mut plain = Plaintext::new();
//! encoder.encode_signed(&[-3, -2, -1, 0, 1, 2, 3], &mut plain)?;
//!
//! let mut values = Vec::new();
//! encoder.decode_signed(&plain, &mut values)?;
//! assert_eq!(&values[..7], &[-3, -2, -1, 0, 1, 2, 3]);
//! # Ok::<(), bfv_batch::Error>(())
//! ```

pub mod batch;
pub mod error;
pub mod galois;
pub mod math;
pub mod memory;
pub mod params;
pub mod plaintext;

pub use batch::BatchEncoder;
pub use error::{Error, Result};
pub use memory::{MemoryPool, MemoryPoolHandle, PoolBuffer};
pub use params::{Context, EncryptionParams, SchemeType};
pub use plaintext::Plaintext;
