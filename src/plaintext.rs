//! Plaintext polynomial container.
//!
//! A [`Plaintext`] holds the coefficients of an element of
//! Z_t[X]/(X^n + 1). Before batch encoding it carries coefficient-form
//! data; after an in-place encode the same storage holds slot values in
//! permuted transform order. The container itself does not track which
//! interpretation applies; callers must not mix the two.
//!
//! The textual form follows the usual hex-polynomial convention:
//! `"6x^5 + 5x^4 + 4x^3 + 3x^2 + 2x^1 + 1"`, with coefficients in
//! hexadecimal and a lone `"0"` for the zero polynomial. Both
//! [`std::fmt::Display`] and [`std::str::FromStr`] speak this format.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Polynomial with unsigned 64-bit coefficients.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plaintext {
    coeffs: Vec<u64>,
}

impl Plaintext {
    /// Empty plaintext with no coefficients.
    pub fn new() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// Zero polynomial with `count` coefficients.
    pub fn zero(count: usize) -> Self {
        Self {
            coeffs: vec![0; count],
        }
    }

    /// Plaintext owning the given coefficient vector.
    pub fn from_coeffs(coeffs: Vec<u64>) -> Self {
        Self { coeffs }
    }

    /// Number of stored coefficients.
    pub fn coeff_count(&self) -> usize {
        self.coeffs.len()
    }

    /// Number of coefficients up to and including the highest nonzero one.
    pub fn significant_coeff_count(&self) -> usize {
        self.coeffs
            .iter()
            .rposition(|&c| c != 0)
            .map_or(0, |i| i + 1)
    }

    /// True when every coefficient is zero (or none are stored).
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    /// Grow or shrink to `count` coefficients, zero-filling on growth.
    pub fn resize(&mut self, count: usize) {
        self.coeffs.resize(count, 0);
    }

    /// Set every stored coefficient to zero.
    pub fn set_zero(&mut self) {
        self.coeffs.fill(0);
    }

    /// Coefficients as a slice, lowest degree first.
    pub fn as_slice(&self) -> &[u64] {
        &self.coeffs
    }

    /// Mutable view of the coefficient storage.
    pub fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.coeffs
    }
}

impl Index<usize> for Plaintext {
    type Output = u64;

    fn index(&self, index: usize) -> &u64 {
        &self.coeffs[index]
    }
}

impl IndexMut<usize> for Plaintext {
    fn index_mut(&mut self, index: usize) -> &mut u64 {
        &mut self.coeffs[index]
    }
}

impl fmt::Display for Plaintext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let significant = self.significant_coeff_count();
        if significant == 0 {
            return write!(f, "0");
        }
        let mut first = true;
        for i in (0..significant).rev() {
            let c = self.coeffs[i];
            if c == 0 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            if i == 0 {
                write!(f, "{:X}", c)?;
            } else {
                write!(f, "{:X}x^{}", c, i)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Plaintext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        const MALFORMED: Error = Error::InvalidArgument("malformed polynomial string");

        let mut terms: Vec<(usize, u64)> = Vec::new();
        let mut degree = 0usize;
        for term in s.split('+') {
            let term = term.trim();
            if term.is_empty() {
                return Err(MALFORMED);
            }
            let (coeff, exponent) = match term.find('x') {
                None => (u64::from_str_radix(term, 16).map_err(|_| MALFORMED)?, 0),
                Some(pos) => {
                    let coeff_str = &term[..pos];
                    let coeff = if coeff_str.is_empty() {
                        1
                    } else {
                        u64::from_str_radix(coeff_str, 16).map_err(|_| MALFORMED)?
                    };
                    let exp_str = &term[pos + 1..];
                    let exponent = if exp_str.is_empty() {
                        1
                    } else {
                        exp_str
                            .strip_prefix('^')
                            .ok_or(MALFORMED)?
                            .parse::<usize>()
                            .map_err(|_| MALFORMED)?
                    };
                    (coeff, exponent)
                }
            };
            degree = degree.max(exponent);
            terms.push((exponent, coeff));
        }

        let mut plain = Plaintext::zero(degree + 1);
        for (exponent, coeff) in terms {
            plain.coeffs[exponent] = coeff;
        }
        Ok(plain)
    }
}
