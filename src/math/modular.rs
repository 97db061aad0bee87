//! Modular arithmetic over Z_t.
//!
//! All operations keep values as non-negative residues in `[0, t)` and widen
//! to `u128` before reducing, so they are exact for moduli up to 60 bits.

/// Add two residues modulo `t`.
#[inline]
pub fn add_mod(a: u64, b: u64, t: u64) -> u64 {
    let sum = a + b;
    if sum >= t {
        sum - t
    } else {
        sum
    }
}

/// Subtract two residues modulo `t`.
#[inline]
pub fn sub_mod(a: u64, b: u64, t: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        t - b + a
    }
}

/// Multiply two residues modulo `t`.
#[inline]
pub fn mul_mod(a: u64, b: u64, t: u64) -> u64 {
    let prod = (a as u128) * (b as u128);
    (prod % (t as u128)) as u64
}

/// Negate a residue modulo `t`.
#[inline]
pub fn neg_mod(a: u64, t: u64) -> u64 {
    if a == 0 {
        0
    } else {
        t - a
    }
}

/// Raise `base` to the power `exp` modulo `t` by square-and-multiply.
pub fn pow_mod(mut base: u64, mut exp: u64, t: u64) -> u64 {
    let mut result = 1u64;
    base %= t;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, t);
        }
        exp >>= 1;
        base = mul_mod(base, base, t);
    }
    result
}

/// Invert `a` modulo `t` using the extended Euclidean algorithm.
///
/// Returns `None` when `a` and `t` are not coprime.
pub fn try_inv_mod(a: u64, t: u64) -> Option<u64> {
    let (g, x, _) = extended_gcd((a % t) as i128, t as i128);
    if g != 1 {
        None
    } else {
        Some(((x % t as i128 + t as i128) % t as i128) as u64)
    }
}

fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    if a == 0 {
        (b, 0, 1)
    } else {
        let (g, x, y) = extended_gcd(b % a, a);
        (g, y - (b / a) * x, x)
    }
}

/// Map a signed value in `[-(t-1)/2, (t-1)/2]` to its residue in `[0, t)`.
#[inline]
pub fn from_signed(val: i64, t: u64) -> u64 {
    if val >= 0 {
        val as u64
    } else {
        t - val.unsigned_abs()
    }
}

/// Map a residue in `[0, t)` back to the signed range centered at zero.
#[inline]
pub fn to_signed(val: u64, t: u64) -> i64 {
    if val <= t / 2 {
        val as i64
    } else {
        -((t - val) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: u64 = 257;
    const T60: u64 = 1152921504606830593;

    #[test]
    fn test_add_sub() {
        assert_eq!(add_mod(200, 100, T), 43);
        assert_eq!(sub_mod(3, 10, T), T - 7);
        assert_eq!(add_mod(T60 - 1, 2, T60), 1);
    }

    #[test]
    fn test_mul_no_overflow_at_60_bits() {
        let a = T60 - 1;
        // (t-1)^2 ≡ 1 (mod t)
        assert_eq!(mul_mod(a, a, T60), 1);
    }

    #[test]
    fn test_pow() {
        assert_eq!(pow_mod(2, 8, T), 256);
        assert_eq!(pow_mod(2, 16, T), 1);
        assert_eq!(pow_mod(0, 0, T), 1);
    }

    #[test]
    fn test_inverse() {
        let inv = try_inv_mod(64, T).unwrap();
        assert_eq!(mul_mod(64, inv, T), 1);
        assert_eq!(try_inv_mod(2, 256), None);

        let inv = try_inv_mod(2048, T60).unwrap();
        assert_eq!(mul_mod(2048, inv, T60), 1);
    }

    #[test]
    fn test_neg() {
        assert_eq!(neg_mod(0, T), 0);
        assert_eq!(neg_mod(5, T), 252);
    }

    #[test]
    fn test_signed_mapping_roundtrip() {
        for v in -128i64..=128 {
            assert_eq!(to_signed(from_signed(v, T), T), v);
        }
        assert_eq!(from_signed(-1, T), 256);
        assert_eq!(to_signed(256, T), -1);
    }
}
