//! Slot-order permutation induced by the ring's Galois structure.
//!
//! The multiplicative group (Z/2nZ)^* acting on R_t = Z_t[X]/(X^n + 1) is
//! generated by 3 and 2n - 1. Under that action the n slots form a
//! 2 × (n/2) matrix: powers of 3 rotate within a row, and X ↦ X^(-1)
//! (the element 2n - 1) swaps the two rows. The batch encoder exposes
//! slots in this row-major matrix order, while the transform engine
//! produces evaluations in bit-reversed order; [`matrix_index_map`] is the
//! fixed bijection between the two.

use crate::math::ntt::reverse_bits;

/// Generators of (Z/2nZ)^* for power-of-two n: the column generator 3 and
/// the row-swap element 2n - 1.
pub fn galois_generators(n: usize) -> (u64, u64) {
    debug_assert!(n.is_power_of_two() && n >= 2);
    (3, 2 * n as u64 - 1)
}

/// Build the slot-index permutation for ring degree `n`.
///
/// `map[i]` is the transform-domain position of matrix slot `i`. Row 0
/// holds slots `0..n/2`, row 1 holds `n/2..n`; the i-th column corresponds
/// to the evaluation point ψ^(3^i mod 2n), and the second row to its
/// inverse point. The result is a bijection on `{0, .., n-1}` computed
/// once at encoder construction and reused for every encode and decode.
pub fn matrix_index_map(n: usize) -> Vec<usize> {
    debug_assert!(n.is_power_of_two() && n >= 2);
    let log_n = n.trailing_zeros();
    let row_size = n >> 1;
    let m = (n as u64) << 1;
    let (gen, _) = galois_generators(n);

    let mut map = vec![0usize; n];
    let mut pos: u64 = 1;
    for i in 0..row_size {
        // Odd power of psi for this column and its negacyclic reflection.
        let index1 = ((pos - 1) >> 1) as usize;
        let index2 = ((m - pos - 1) >> 1) as usize;

        map[i] = reverse_bits(index1, log_n);
        map[row_size + i] = reverse_bits(index2, log_n);

        pos = (pos * gen) & (m - 1);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators() {
        assert_eq!(galois_generators(64), (3, 127));
        assert_eq!(galois_generators(2048), (3, 4095));
    }

    #[test]
    fn test_index_map_is_bijection() {
        for n in [2usize, 4, 8, 64, 256, 4096] {
            let map = matrix_index_map(n);
            let mut seen = vec![false; n];
            for &j in &map {
                assert!(j < n);
                assert!(!seen[j], "duplicate target {} for n={}", j, n);
                seen[j] = true;
            }
        }
    }

    #[test]
    fn test_first_slot_is_first_evaluation() {
        // Column 0 of row 0 is the evaluation at psi itself, which the
        // transform engine writes at position 0.
        for n in [4usize, 64, 1024] {
            let map = matrix_index_map(n);
            assert_eq!(map[0], 0);
        }
    }

    #[test]
    fn test_rows_partition_evaluations() {
        // The two rows must cover reflected index pairs: slot i and slot
        // n/2 + i point at evaluation exponents summing to 2n.
        let n = 64usize;
        let map = matrix_index_map(n);
        let log_n = n.trailing_zeros();
        let row_size = n / 2;
        for i in 0..row_size {
            let e1 = 2 * reverse_bits(map[i], log_n) + 1;
            let e2 = 2 * reverse_bits(map[row_size + i], log_n) + 1;
            assert_eq!(e1 + e2, 2 * n);
        }
    }
}
