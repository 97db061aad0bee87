//! Number-theoretic primitives for batch encoding.
//!
//! The batch encoder works over the plaintext ring R_t = Z_t[X]/(X^n + 1).
//! This module supplies the exact arithmetic that ring requires:
//!
//! - **Modular arithmetic** over Z_t with widening reduction
//! - **Deterministic primality testing** for the plain modulus
//! - **Primitive root-of-unity search** in the multiplicative group of Z_t
//! - **Negacyclic NTT** realizing the CRT slot isomorphism
//!
//! Everything here is exact integer arithmetic; no floating point is
//! involved anywhere.

pub mod modular;
pub mod ntt;
pub mod prime;
pub mod root;

pub use modular::{add_mod, from_signed, mul_mod, neg_mod, pow_mod, sub_mod, to_signed, try_inv_mod};
pub use ntt::NttTables;
pub use prime::is_prime;
pub use root::{find_primitive_root, is_primitive_root, minimal_primitive_root};
