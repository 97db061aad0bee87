//! Negacyclic Number-Theoretic Transform over Z_t[X]/(X^n + 1).
//!
//! The forward transform evaluates a polynomial at the odd powers of a
//! primitive 2n-th root of unity ψ, which realizes the CRT isomorphism
//! between R_t = Z_t[X]/(X^n + 1) and n copies of Z_t. The inverse
//! transform interpolates back and scales by n^(-1).
//!
//! Twiddle factors are stored in bit-reversed order so both butterfly
//! passes walk the tables sequentially: the forward pass is Cooley-Tukey
//! decimation-in-time (natural order in, bit-reversed evaluation order
//! out), the inverse is Gentleman-Sande decimation-in-frequency. All
//! arithmetic widens to `u128` before reduction, so the transform is exact
//! for moduli up to 60 bits.
//!
//! # Example
//!
//! ```
//! use bfv_batch::math::ntt::NttTables;
//!
//! let tables = NttTables::new(64, 257).unwrap();
//!
//! let mut values: Vec<u64> = (0..64).collect();
//! tables.forward_inplace(&mut values);
//! tables.inverse_inplace(&mut values);
//! assert_eq!(values, (0..64).collect::<Vec<u64>>());
//! ```

use crate::error::{Error, Result};

use super::modular::{add_mod, mul_mod, sub_mod, try_inv_mod};
use super::root::minimal_primitive_root;

/// Reverse the low `bits` bits of `x`.
#[inline]
pub fn reverse_bits(x: usize, bits: u32) -> usize {
    if bits == 0 {
        0
    } else {
        x.reverse_bits() >> (usize::BITS - bits)
    }
}

/// Precomputed root-power tables for the negacyclic transform.
///
/// Built once per `(n, t)` pair and immutable afterwards; the tables hold
/// the forward powers of ψ, the powers of ψ^(-1), and n^(-1) mod t. They
/// may be shared read-only across threads without synchronization.
#[derive(Clone, Debug)]
pub struct NttTables {
    /// Transform size (power of two).
    n: usize,
    log_n: u32,
    /// Plain modulus t.
    modulus: u64,
    /// Minimal primitive 2n-th root of unity mod t.
    root: u64,
    /// root_powers[i] = ψ^bitrev(i), i in 0..n.
    root_powers: Vec<u64>,
    /// inv_root_powers[i] = ψ^(-bitrev(i)), i in 0..n.
    inv_root_powers: Vec<u64>,
    /// n^(-1) mod t for inverse scaling.
    inv_degree: u64,
}

impl NttTables {
    /// Build transform tables for size `n` and modulus `t`.
    ///
    /// Fails with [`Error::UnsupportedModulus`] when no primitive 2n-th
    /// root of unity exists mod `t`, i.e. when t ≢ 1 (mod 2n).
    pub fn new(n: usize, modulus: u64) -> Result<Self> {
        if !n.is_power_of_two() || n < 2 {
            return Err(Error::InvalidArgument(
                "transform size must be a power of two and at least 2",
            ));
        }
        let log_n = n.trailing_zeros();

        let root = minimal_primitive_root(2 * n as u64, modulus)
            .ok_or(Error::UnsupportedModulus)?;
        let inv_root = try_inv_mod(root, modulus).ok_or(Error::UnsupportedModulus)?;
        let inv_degree = try_inv_mod(n as u64, modulus).ok_or(Error::UnsupportedModulus)?;

        let root_powers = Self::bit_reversed_powers(root, n, log_n, modulus);
        let inv_root_powers = Self::bit_reversed_powers(inv_root, n, log_n, modulus);

        Ok(Self {
            n,
            log_n,
            modulus,
            root,
            root_powers,
            inv_root_powers,
            inv_degree,
        })
    }

    /// Transform size n.
    pub fn degree(&self) -> usize {
        self.n
    }

    /// Modulus t.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// The primitive 2n-th root of unity the tables are built from.
    pub fn root(&self) -> u64 {
        self.root
    }

    fn bit_reversed_powers(base: u64, n: usize, log_n: u32, modulus: u64) -> Vec<u64> {
        let mut powers = vec![0u64; n];
        let mut power = 1u64;
        for i in 0..n {
            powers[reverse_bits(i, log_n)] = power;
            power = mul_mod(power, base, modulus);
        }
        powers
    }

    /// Forward transform: coefficient form to slot (evaluation) form.
    ///
    /// Operates in place on exactly `n` residues in `[0, t)`; output slots
    /// are in bit-reversed evaluation order.
    pub fn forward_inplace(&self, values: &mut [u64]) {
        debug_assert_eq!(values.len(), self.n);
        let q = self.modulus;

        let mut gap = self.n;
        let mut m = 1;
        while m < self.n {
            gap >>= 1;
            for i in 0..m {
                let j1 = 2 * i * gap;
                let w = self.root_powers[m + i];
                for j in j1..j1 + gap {
                    let u = values[j];
                    let v = mul_mod(values[j + gap], w, q);
                    values[j] = add_mod(u, v, q);
                    values[j + gap] = sub_mod(u, v, q);
                }
            }
            m <<= 1;
        }
    }

    /// Inverse transform: slot form back to coefficient form, scaled by
    /// n^(-1). Exact algebraic inverse of [`Self::forward_inplace`].
    pub fn inverse_inplace(&self, values: &mut [u64]) {
        debug_assert_eq!(values.len(), self.n);
        let q = self.modulus;

        let mut gap = 1;
        let mut m = self.n;
        while m > 1 {
            let h = m >> 1;
            let mut j1 = 0;
            for i in 0..h {
                let w = self.inv_root_powers[h + i];
                for j in j1..j1 + gap {
                    let u = values[j];
                    let v = values[j + gap];
                    values[j] = add_mod(u, v, q);
                    values[j + gap] = mul_mod(sub_mod(u, v, q), w, q);
                }
                j1 += 2 * gap;
            }
            gap <<= 1;
            m = h;
        }

        for v in values.iter_mut() {
            *v = mul_mod(*v, self.inv_degree, q);
        }
    }

    /// log2 of the transform size.
    pub fn log_degree(&self) -> u32 {
        self.log_n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_bits() {
        assert_eq!(reverse_bits(0, 3), 0);
        assert_eq!(reverse_bits(1, 3), 4);
        assert_eq!(reverse_bits(3, 3), 6);
        assert_eq!(reverse_bits(5, 3), 5);
        assert_eq!(reverse_bits(0, 0), 0);
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        assert!(matches!(
            NttTables::new(48, 257),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            NttTables::new(1, 257),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_infeasible_modulus() {
        // 97 - 1 = 96 is not divisible by 128
        assert!(matches!(
            NttTables::new(64, 97),
            Err(Error::UnsupportedModulus)
        ));
    }

    #[test]
    fn test_roundtrip_small() {
        let tables = NttTables::new(16, 257).unwrap();
        let original: Vec<u64> = (0..16).collect();
        let mut values = original.clone();

        tables.forward_inplace(&mut values);
        tables.inverse_inplace(&mut values);
        assert_eq!(values, original);
    }

    #[test]
    fn test_roundtrip_fermat_prime() {
        let tables = NttTables::new(1024, 65537).unwrap();
        let original: Vec<u64> = (0..1024u64).map(|i| (i * 12345) % 65537).collect();
        let mut values = original.clone();

        tables.forward_inplace(&mut values);
        tables.inverse_inplace(&mut values);
        assert_eq!(values, original);
    }

    #[test]
    fn test_roundtrip_60_bit_modulus() {
        let q: u64 = 1152921504606830593;
        let tables = NttTables::new(256, q).unwrap();
        let original: Vec<u64> = (0..256u64).map(|i| q - 1 - i * 1000).collect();
        let mut values = original.clone();

        tables.forward_inplace(&mut values);
        tables.inverse_inplace(&mut values);
        assert_eq!(values, original);
    }

    #[test]
    fn test_zero_is_fixed_point() {
        let tables = NttTables::new(64, 257).unwrap();
        let mut values = vec![0u64; 64];
        tables.forward_inplace(&mut values);
        assert!(values.iter().all(|&v| v == 0));
        tables.inverse_inplace(&mut values);
        assert!(values.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_constant_polynomial_maps_to_constant_slots() {
        // A degree-0 polynomial evaluates to the same value at every root.
        let tables = NttTables::new(64, 257).unwrap();
        let mut values = vec![0u64; 64];
        values[0] = 42;
        tables.forward_inplace(&mut values);
        assert!(values.iter().all(|&v| v == 42));

        tables.inverse_inplace(&mut values);
        assert_eq!(values[0], 42);
        assert!(values[1..].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_linearity() {
        let q = 257u64;
        let tables = NttTables::new(128, q).unwrap();

        let a: Vec<u64> = (0..128u64).map(|i| i % q).collect();
        let b: Vec<u64> = (0..128u64).map(|i| (i * 3 + 7) % q).collect();

        let mut a_ntt = a.clone();
        let mut b_ntt = b.clone();
        tables.forward_inplace(&mut a_ntt);
        tables.forward_inplace(&mut b_ntt);

        let mut sum: Vec<u64> = a
            .iter()
            .zip(&b)
            .map(|(&x, &y)| (x + y) % q)
            .collect();
        tables.forward_inplace(&mut sum);

        for i in 0..128 {
            assert_eq!(sum[i], (a_ntt[i] + b_ntt[i]) % q);
        }
    }

    #[test]
    fn test_negacyclic_wraparound() {
        // In R_t, X * X^(n-1) = X^n = -1: multiply via pointwise product
        // in the evaluation domain and check the sign wrap.
        let q = 257u64;
        let n = 64;
        let tables = NttTables::new(n, q).unwrap();

        let mut a = vec![0u64; n];
        a[1] = 1;
        let mut b = vec![0u64; n];
        b[n - 1] = 1;

        tables.forward_inplace(&mut a);
        tables.forward_inplace(&mut b);

        let mut product: Vec<u64> = a
            .iter()
            .zip(&b)
            .map(|(&x, &y)| crate::math::modular::mul_mod(x, y, q))
            .collect();
        tables.inverse_inplace(&mut product);

        assert_eq!(product[0], q - 1);
        assert!(product[1..].iter().all(|&v| v == 0));
    }
}
