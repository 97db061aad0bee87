//! Primitive root-of-unity search modulo a prime.
//!
//! Batching over R_t = Z_t[X]/(X^n + 1) requires a primitive 2n-th root of
//! unity ψ in Z_t, which exists iff t ≡ 1 (mod 2n). The search raises
//! candidate generators to the power (t - 1)/2n and verifies the order of
//! the result is exactly 2n.

use super::modular::{mul_mod, pow_mod};

/// Check whether `root` has order exactly `order` modulo `t`.
///
/// `order` must be a power of two, so it suffices that `root^(order/2) ≡ -1`.
pub fn is_primitive_root(root: u64, order: u64, t: u64) -> bool {
    debug_assert!(order.is_power_of_two());
    if root == 0 {
        return false;
    }
    pow_mod(root, order / 2, t) == t - 1
}

/// Find a primitive `order`-th root of unity modulo the prime `t`.
///
/// Returns `None` when `order` does not divide `t - 1`, in which case no
/// such root exists and batching is structurally impossible.
pub fn find_primitive_root(order: u64, t: u64) -> Option<u64> {
    debug_assert!(order.is_power_of_two());
    if (t - 1) % order != 0 {
        return None;
    }
    let exp = (t - 1) / order;
    for g in 2..t {
        let candidate = pow_mod(g, exp, t);
        if is_primitive_root(candidate, order, t) {
            return Some(candidate);
        }
    }
    None
}

/// Find the smallest primitive `order`-th root of unity modulo `t`.
///
/// The primitive roots of a power-of-two order form the odd powers of any
/// one of them; the minimum over those is deterministic for a given
/// parameter set, which keeps the transform tables reproducible.
pub fn minimal_primitive_root(order: u64, t: u64) -> Option<u64> {
    let root = find_primitive_root(order, t)?;
    let generator_sq = mul_mod(root, root, t);

    let mut candidate = root;
    let mut min = root;
    for _ in 1..order / 2 {
        candidate = mul_mod(candidate, generator_sq, t);
        if candidate < min {
            min = candidate;
        }
    }
    Some(min)
}
