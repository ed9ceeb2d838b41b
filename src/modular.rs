//! # Modular — Exact Modular Arithmetic over Arbitrary-Precision Integers
//!
//! The small toolbox the recovery engine in `crack.rs` is built on:
//! canonical reduction into `[0, m)`, modular inverse, and modular division.
//! Everything is exact `rug::Integer` (GMP) arithmetic: the inputs are
//! generator states of arbitrary size, and a single rounded intermediate
//! would silently corrupt the recovered parameters.
//!
//! ## Modular Division
//!
//! `mod_divide(a, b, m)` returns the unique `x ∈ [0, m)` with
//! `x·b ≡ a (mod m)`. It exists iff `gcd(b, m) = 1`; the inverse is obtained
//! from GMP's extended Euclidean algorithm (`Integer::invert`). When the
//! divisor is not invertible the congruence has zero or several solutions,
//! so the operation fails with a typed [`ModularError::NonInvertibleDivisor`]
//! instead of returning one of them. The caller decides what that means:
//! for the cracker it is an expected property of some observation windows,
//! not a fault.

use rug::ops::RemRounding;
use rug::Integer;
use thiserror::Error;

/// Failures of the modular-division primitive.
#[derive(Debug, Error)]
pub enum ModularError {
    /// `gcd(divisor, modulus) != 1`: no inverse exists, the congruence has
    /// no unique solution. A divisor of 0 is the most common instance.
    #[error("divisor {divisor} is not invertible modulo {modulus}")]
    NonInvertibleDivisor { divisor: Integer, modulus: Integer },
}

/// Reduce `value` to its canonical representative in `[0, modulus)`.
///
/// Euclidean remainder: negative inputs land in range too, e.g.
/// `normalize(-1, 97) == 96`. `modulus` must be positive.
pub fn normalize(value: Integer, modulus: &Integer) -> Integer {
    value.rem_euc(modulus)
}

/// Modular inverse: the unique `v ∈ [0, modulus)` with
/// `value·v ≡ 1 (mod modulus)`, via GMP's extended Euclidean algorithm.
///
/// Fails with [`ModularError::NonInvertibleDivisor`] when
/// `gcd(value, modulus) != 1`. `modulus` must be positive.
pub fn mod_inverse(value: &Integer, modulus: &Integer) -> Result<Integer, ModularError> {
    normalize(value.clone(), modulus)
        .invert(modulus)
        .map_err(|divisor| ModularError::NonInvertibleDivisor {
            divisor,
            modulus: modulus.clone(),
        })
}

/// Modular division: the unique `x ∈ [0, modulus)` with
/// `x·divisor ≡ dividend (mod modulus)`.
///
/// Dividend and divisor may be negative or out of range; both are
/// normalized before use. `modulus` must be positive.
pub fn mod_divide(
    dividend: &Integer,
    divisor: &Integer,
    modulus: &Integer,
) -> Result<Integer, ModularError> {
    let inverse = mod_inverse(divisor, modulus)?;
    let dividend = normalize(dividend.clone(), modulus);
    Ok(normalize(dividend * inverse, modulus))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Integer {
        Integer::from(v)
    }

    #[test]
    fn normalize_handles_negatives_and_overflow() {
        let m = int(97);
        assert_eq!(normalize(int(-1), &m), int(96));
        assert_eq!(normalize(int(-97), &m), int(0));
        assert_eq!(normalize(int(-98), &m), int(96));
        assert_eq!(normalize(int(97), &m), int(0));
        assert_eq!(normalize(int(195), &m), int(1));
        assert_eq!(normalize(int(42), &m), int(42));
    }

    #[test]
    fn mod_inverse_known_values() {
        // 3 * 5 = 15 ≡ 1 (mod 7)
        assert_eq!(mod_inverse(&int(3), &int(7)).unwrap(), int(5));
        // 54 * 9 = 486 = 5*97 + 1
        assert_eq!(mod_inverse(&int(54), &int(97)).unwrap(), int(9));
    }

    #[test]
    fn mod_inverse_normalizes_negative_input() {
        // -43 ≡ 54 (mod 97), so both must yield the same inverse
        let a = mod_inverse(&int(-43), &int(97)).unwrap();
        let b = mod_inverse(&int(54), &int(97)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mod_inverse_rejects_zero_and_shared_factors() {
        assert!(mod_inverse(&int(0), &int(97)).is_err());
        assert!(mod_inverse(&int(6), &int(12)).is_err());
        assert!(mod_inverse(&int(97), &int(97)).is_err());
    }

    #[test]
    fn mod_divide_known_values() {
        // 5 * 54 ≡ 76 (mod 97), so 76 / 54 ≡ 5
        assert_eq!(mod_divide(&int(76), &int(54), &int(97)).unwrap(), int(5));
        // Negative operands normalize first: 76 ≡ -21, 54 ≡ -43 (mod 97)
        assert_eq!(mod_divide(&int(-21), &int(-43), &int(97)).unwrap(), int(5));
    }

    #[test]
    fn mod_divide_satisfies_defining_congruence() {
        let m = int(10007);
        for (a, b) in [(1i64, 3), (9999, 2), (-5, 777), (123456, -89)] {
            let x = mod_divide(&int(a), &int(b), &m).unwrap();
            assert!(x >= 0u32 && x < m, "quotient {} out of range", x);
            assert_eq!(
                normalize(x * int(b), &m),
                normalize(int(a), &m),
                "x*b != a (mod m) for a={}, b={}",
                a,
                b
            );
        }
    }

    #[test]
    fn mod_divide_non_invertible_divisor_is_an_error() {
        let err = mod_divide(&int(1), &int(0), &int(97)).unwrap_err();
        let ModularError::NonInvertibleDivisor { divisor, modulus } = err;
        assert_eq!(divisor, int(0));
        assert_eq!(modulus, int(97));
    }
}
