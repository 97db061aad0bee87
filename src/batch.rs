//! SIMD batch encoder for BFV plaintexts.
//!
//! The encoder packs up to n integers mod t into one plaintext polynomial
//! so that coordinate-wise integer operations correspond to single ring
//! operations. Encoding scatters the values through the matrix slot
//! permutation and applies the inverse negacyclic transform; decoding
//! applies the forward transform and gathers back. The transform tables
//! and the permutation are built once at construction and never mutated.
//!
//! # Example
//!
//! ```
//! use bfv_batch::{BatchEncoder, Context, EncryptionParams, Plaintext, SchemeType};
//!
//! let context = Context::new(EncryptionParams::new(SchemeType::Bfv, 64, 257))?;
//! let encoder = BatchEncoder::new(&context)?;
//! assert_eq!(encoder.slot_count(), 64);
//!
//! let mut plain = Plaintext::new();
//! encoder.encode(&[1, 2, 3], &mut plain)?;
//!
//! let mut values = Vec::new();
//! encoder.decode(&plain, &mut values)?;
//! assert_eq!(&values[..3], &[1, 2, 3]);
//! assert!(values[3..].iter().all(|&v| v == 0));
//! # Ok::<(), bfv_batch::Error>(())
//! ```

use tracing::debug;

use crate::error::{Error, Result};
use crate::galois::matrix_index_map;
use crate::math::modular::{from_signed, to_signed};
use crate::math::ntt::NttTables;
use crate::memory::MemoryPoolHandle;
use crate::params::{Context, SchemeType};
use crate::plaintext::Plaintext;

/// Converts between integer slot vectors and BFV plaintext polynomials.
///
/// Construction validates the parameters once: the scheme must be BFV and
/// the plain modulus must admit a primitive 2n-th root of unity. All
/// state is immutable afterwards, so one encoder may serve any number of
/// encode/decode calls, and references to it may be shared across threads.
pub struct BatchEncoder {
    slots: usize,
    modulus: u64,
    tables: NttTables,
    index_map: Vec<usize>,
    pool: MemoryPoolHandle,
}

impl BatchEncoder {
    /// Build an encoder for the given context.
    ///
    /// Fails with [`Error::UnsupportedScheme`] when the context does not
    /// carry BFV parameters, and with [`Error::UnsupportedModulus`] when
    /// the plain modulus does not support batching for this degree.
    pub fn new(context: &Context) -> Result<Self> {
        if context.scheme() != SchemeType::Bfv {
            return Err(Error::UnsupportedScheme);
        }
        if !context.batching_enabled() {
            return Err(Error::UnsupportedModulus);
        }

        let slots = context.poly_modulus_degree();
        let modulus = context.plain_modulus();
        let tables = NttTables::new(slots, modulus)?;
        let index_map = matrix_index_map(slots);

        debug!(slots, modulus, root = tables.root(), "batch encoder ready");

        Ok(Self {
            slots,
            modulus,
            tables,
            index_map,
            pool: MemoryPoolHandle::global(),
        })
    }

    /// Number of slots, equal to the ring degree n.
    pub fn slot_count(&self) -> usize {
        self.slots
    }

    /// Encode unsigned values into `destination`.
    ///
    /// Accepts at most [`slot_count`](Self::slot_count) values, each
    /// reduced mod t; shorter inputs are zero-padded. On success the
    /// destination holds exactly n coefficients in coefficient form. On
    /// failure the destination is left untouched.
    pub fn encode(&self, values: &[u64], destination: &mut Plaintext) -> Result<()> {
        if values.len() > self.slots {
            return Err(Error::InvalidArgument("values count exceeds slot count"));
        }
        if values.iter().any(|&v| v >= self.modulus) {
            return Err(Error::InvalidArgument(
                "slot value is not reduced modulo the plain modulus",
            ));
        }

        destination.resize(self.slots);
        destination.set_zero();
        let coeffs = destination.as_mut_slice();
        for (i, &v) in values.iter().enumerate() {
            coeffs[self.index_map[i]] = v;
        }
        self.tables.inverse_inplace(coeffs);
        Ok(())
    }

    /// Encode signed values into `destination`.
    ///
    /// Values must lie in `[-(t-1)/2, (t-1)/2]`; they are mapped
    /// bijectively onto `[0, t)` before the transform.
    pub fn encode_signed(&self, values: &[i64], destination: &mut Plaintext) -> Result<()> {
        if values.len() > self.slots {
            return Err(Error::InvalidArgument("values count exceeds slot count"));
        }
        let half = ((self.modulus - 1) / 2) as i64;
        if values.iter().any(|&v| v < -half || v > half) {
            return Err(Error::InvalidArgument(
                "signed slot value outside the centered plain modulus range",
            ));
        }

        destination.resize(self.slots);
        destination.set_zero();
        let coeffs = destination.as_mut_slice();
        for (i, &v) in values.iter().enumerate() {
            coeffs[self.index_map[i]] = from_signed(v, self.modulus);
        }
        self.tables.inverse_inplace(coeffs);
        Ok(())
    }

    /// Reinterpret the coefficients of `plain` as unsigned slot values and
    /// encode in place, drawing scratch from the encoder's default pool.
    pub fn encode_in_place(&self, plain: &mut Plaintext) -> Result<()> {
        self.encode_in_place_with_pool(plain, &self.pool)
    }

    /// In-place encode with an explicit scratch pool.
    ///
    /// The plaintext may hold at most n coefficients (missing high slots
    /// read as zero). An uninitialized pool handle is rejected with
    /// [`Error::InvalidArgument`].
    pub fn encode_in_place_with_pool(
        &self,
        plain: &mut Plaintext,
        pool: &MemoryPoolHandle,
    ) -> Result<()> {
        let count = plain.coeff_count();
        if count > self.slots {
            return Err(Error::InvalidArgument(
                "plaintext coefficient count exceeds slot count",
            ));
        }
        if plain.as_slice().iter().any(|&c| c >= self.modulus) {
            return Err(Error::InvalidArgument(
                "plaintext coefficient is not reduced modulo the plain modulus",
            ));
        }

        // Scatter into scratch so the permutation does not alias the
        // in-place storage.
        let mut scratch = pool.acquire(self.slots)?;
        for (i, &v) in plain.as_slice().iter().enumerate() {
            scratch[self.index_map[i]] = v;
        }

        plain.resize(self.slots);
        plain.as_mut_slice().copy_from_slice(&scratch);
        self.tables.inverse_inplace(plain.as_mut_slice());
        Ok(())
    }

    /// Decode `plain` into unsigned slot values.
    ///
    /// Always produces exactly [`slot_count`](Self::slot_count) entries;
    /// plaintexts with fewer than n coefficients read as zero-extended.
    pub fn decode(&self, plain: &Plaintext, destination: &mut Vec<u64>) -> Result<()> {
        self.decode_with_pool(plain, destination, &self.pool)
    }

    /// Decode with an explicit scratch pool.
    pub fn decode_with_pool(
        &self,
        plain: &Plaintext,
        destination: &mut Vec<u64>,
        pool: &MemoryPoolHandle,
    ) -> Result<()> {
        let scratch = self.transform_to_slots(plain, pool)?;
        destination.clear();
        destination.extend(self.index_map.iter().map(|&j| scratch[j]));
        Ok(())
    }

    /// Decode `plain` into signed slot values centered at zero.
    pub fn decode_signed(&self, plain: &Plaintext, destination: &mut Vec<i64>) -> Result<()> {
        self.decode_signed_with_pool(plain, destination, &self.pool)
    }

    /// Signed decode with an explicit scratch pool.
    pub fn decode_signed_with_pool(
        &self,
        plain: &Plaintext,
        destination: &mut Vec<i64>,
        pool: &MemoryPoolHandle,
    ) -> Result<()> {
        let scratch = self.transform_to_slots(plain, pool)?;
        destination.clear();
        destination.extend(
            self.index_map
                .iter()
                .map(|&j| to_signed(scratch[j], self.modulus)),
        );
        Ok(())
    }

    /// Decode in place: afterwards the plaintext's n coefficients hold the
    /// slot values in matrix order.
    pub fn decode_in_place(&self, plain: &mut Plaintext) -> Result<()> {
        self.decode_in_place_with_pool(plain, &self.pool)
    }

    /// In-place decode with an explicit scratch pool.
    pub fn decode_in_place_with_pool(
        &self,
        plain: &mut Plaintext,
        pool: &MemoryPoolHandle,
    ) -> Result<()> {
        let scratch = self.transform_to_slots(plain, pool)?;
        plain.resize(self.slots);
        let coeffs = plain.as_mut_slice();
        for (i, &j) in self.index_map.iter().enumerate() {
            coeffs[i] = scratch[j];
        }
        Ok(())
    }

    /// Validate `plain`, copy it zero-extended into pool scratch, and run
    /// the forward transform. Shared by every decode variant.
    fn transform_to_slots(
        &self,
        plain: &Plaintext,
        pool: &MemoryPoolHandle,
    ) -> Result<crate::memory::PoolBuffer> {
        if plain.coeff_count() > self.slots {
            return Err(Error::InvalidArgument(
                "plaintext coefficient count exceeds slot count",
            ));
        }
        if plain.as_slice().iter().any(|&c| c >= self.modulus) {
            return Err(Error::InvalidArgument(
                "plaintext coefficient is not reduced modulo the plain modulus",
            ));
        }

        let mut scratch = pool.acquire(self.slots)?;
        scratch[..plain.coeff_count()].copy_from_slice(plain.as_slice());
        self.tables.forward_inplace(&mut scratch);
        Ok(scratch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::EncryptionParams;

    fn test_context() -> Context {
        Context::new(EncryptionParams::new(SchemeType::Bfv, 64, 257)).unwrap()
    }

    #[test]
    fn test_construction_rejects_ckks() {
        let ctx = Context::new(EncryptionParams::new(SchemeType::Ckks, 8, 0)).unwrap();
        assert!(matches!(
            BatchEncoder::new(&ctx),
            Err(Error::UnsupportedScheme)
        ));
    }

    #[test]
    fn test_construction_rejects_infeasible_modulus() {
        let ctx = Context::new(EncryptionParams::new(SchemeType::Bfv, 64, 97)).unwrap();
        assert!(matches!(
            BatchEncoder::new(&ctx),
            Err(Error::UnsupportedModulus)
        ));
    }

    #[test]
    fn test_failed_encode_leaves_destination_untouched() {
        let encoder = BatchEncoder::new(&test_context()).unwrap();
        let mut plain = Plaintext::from_coeffs(vec![7, 7, 7]);
        let original = plain.clone();

        let oversized = vec![1u64; 65];
        assert!(encoder.encode(&oversized, &mut plain).is_err());
        assert_eq!(plain, original);

        assert!(encoder.encode(&[257], &mut plain).is_err());
        assert_eq!(plain, original);
    }

    #[test]
    fn test_encode_pads_to_full_degree() {
        let encoder = BatchEncoder::new(&test_context()).unwrap();
        let mut plain = Plaintext::new();
        encoder.encode(&[9], &mut plain).unwrap();
        assert_eq!(plain.coeff_count(), 64);
    }
}
