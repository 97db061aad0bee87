//! Deterministic primality testing for 64-bit moduli.

use super::modular::{mul_mod, pow_mod};

/// Witnesses that make Miller-Rabin deterministic for all 64-bit inputs.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Deterministic Miller-Rabin primality test for `u64`.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &WITNESSES {
        if n == p {
            return true;
        }
        if n % p == 0 {
            return false;
        }
    }

    // Write n - 1 = d * 2^r with d odd.
    let mut d = n - 1;
    let r = d.trailing_zeros();
    d >>= r;

    'witness: for &a in &WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..r {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
