// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Exact rational numbers for musical time.
//!
//! Every start time, duration and marker in a piece is a [`Frac`]. A `Frac`
//! is always stored in lowest terms with a strictly positive denominator, so
//! the derived equality is value equality. Ordering is exact cross
//! multiplication; [`Frac::to_f64`] is for display only.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced while building or combining fractions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FracError {
    /// Denominator was zero
    #[error("division by zero: {numerator}/0")]
    DivideByZero {
        /// Numerator that was supplied with the zero denominator
        numerator: i64,
    },
    /// Result does not fit in 64-bit numerator/denominator
    #[error("fraction overflow in {operation}")]
    Overflow {
        /// Operation that overflowed
        operation: &'static str,
    },
    /// Text could not be parsed as `n` or `n/d`
    #[error("invalid fraction {input:?}: {reason}")]
    Parse {
        /// Offending input
        input: String,
        /// Parser message
        reason: String,
    },
}

/// An immutable rational number in canonical form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frac {
    num: i64,
    den: i64,
}

impl Frac {
    /// Zero
    pub const ZERO: Frac = Frac { num: 0, den: 1 };
    /// One
    pub const ONE: Frac = Frac { num: 1, den: 1 };
    /// Minus one
    pub const MINUS_ONE: Frac = Frac { num: -1, den: 1 };

    /// Create a reduced fraction, failing on a zero denominator
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, FracError> {
        if denominator == 0 {
            return Err(FracError::DivideByZero { numerator });
        }
        Self::reduce(numerator as i128, denominator as i128, "construction")
    }

    /// Create a fraction from constant parts.
    ///
    /// Panics on a zero denominator. Only use this with literals written in
    /// source code (fixtures, built-in defaults); anything read from a file or
    /// the command line must go through [`Frac::new`].
    pub fn literal(numerator: i64, denominator: i64) -> Self {
        match Self::new(numerator, denominator) {
            Ok(frac) => frac,
            Err(err) => panic!("{err} (use Frac::new for values that are not constants)"),
        }
    }

    /// Create a whole-number fraction
    pub const fn integer(value: i64) -> Self {
        Self { num: value, den: 1 }
    }

    /// Numerator of the reduced form (carries the sign)
    pub fn numer(&self) -> i64 {
        self.num
    }

    /// Denominator of the reduced form (always positive)
    pub fn denom(&self) -> i64 {
        self.den
    }

    /// Approximate value, for display and coarse hints only
    pub fn to_f64(&self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /// Check if this fraction is zero
    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    /// Check if this fraction is strictly negative
    pub fn is_negative(&self) -> bool {
        self.num < 0
    }

    /// Check if this fraction is strictly positive
    pub fn is_positive(&self) -> bool {
        self.num > 0
    }

    /// Exact sum
    pub fn checked_add(self, rhs: Frac) -> Result<Frac, FracError> {
        let overflow = FracError::Overflow { operation: "addition" };
        let left = self.num as i128 * rhs.den as i128;
        let right = rhs.num as i128 * self.den as i128;
        let num = left.checked_add(right).ok_or(overflow)?;
        Self::reduce(num, self.den as i128 * rhs.den as i128, "addition")
    }

    /// Exact product
    pub fn checked_mul(self, rhs: Frac) -> Result<Frac, FracError> {
        Self::reduce(
            self.num as i128 * rhs.num as i128,
            self.den as i128 * rhs.den as i128,
            "multiplication",
        )
    }

    /// Exact difference, computed as `self + rhs * (-1/1)`
    pub fn checked_sub(self, rhs: Frac) -> Result<Frac, FracError> {
        self.checked_add(rhs.checked_mul(Frac::MINUS_ONE)?)
    }

    /// Absolute value
    pub fn checked_abs(self) -> Result<Frac, FracError> {
        self.num
            .checked_abs()
            .map(|num| Frac { num, den: self.den })
            .ok_or(FracError::Overflow { operation: "absolute value" })
    }

    /// Absolute value, panicking on overflow like the operators
    pub fn abs(self) -> Frac {
        or_panic(self.checked_abs())
    }

    /// Divide out the gcd and move the sign onto the numerator
    fn reduce(num: i128, den: i128, operation: &'static str) -> Result<Self, FracError> {
        let g = gcd(num.unsigned_abs(), den.unsigned_abs()) as i128;
        let (mut num, mut den) = (num / g, den / g);
        if den < 0 {
            num = -num;
            den = -den;
        }
        match (i64::try_from(num), i64::try_from(den)) {
            (Ok(num), Ok(den)) => Ok(Self { num, den }),
            _ => Err(FracError::Overflow { operation }),
        }
    }
}

/// Euclidean gcd, `gcd(a, 0) == a`
fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn or_panic(result: Result<Frac, FracError>) -> Frac {
    match result {
        Ok(frac) => frac,
        Err(err) => panic!("{err}"),
    }
}

impl Default for Frac {
    fn default() -> Self {
        Frac::ZERO
    }
}

impl From<i64> for Frac {
    fn from(value: i64) -> Self {
        Frac::integer(value)
    }
}

impl Ord for Frac {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross multiplication keeps the order.
        let left = self.num as i128 * other.den as i128;
        let right = other.num as i128 * self.den as i128;
        left.cmp(&right)
    }
}

impl PartialOrd for Frac {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Frac {
    type Output = Frac;

    fn add(self, rhs: Frac) -> Frac {
        or_panic(self.checked_add(rhs))
    }
}

impl Sub for Frac {
    type Output = Frac;

    fn sub(self, rhs: Frac) -> Frac {
        or_panic(self.checked_sub(rhs))
    }
}

impl Mul for Frac {
    type Output = Frac;

    fn mul(self, rhs: Frac) -> Frac {
        or_panic(self.checked_mul(rhs))
    }
}

impl Neg for Frac {
    type Output = Frac;

    fn neg(self) -> Frac {
        or_panic(self.checked_mul(Frac::MINUS_ONE))
    }
}

impl fmt::Display for Frac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl FromStr for Frac {
    type Err = FracError;

    /// Parse `n` or `n/d`, reducing the result
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let part = |text: &str| {
            text.trim().parse::<i64>().map_err(|e| FracError::Parse {
                input: s.to_string(),
                reason: e.to_string(),
            })
        };
        match s.split_once('/') {
            Some((num, den)) => Frac::new(part(num)?, part(den)?),
            None => Ok(Frac::integer(part(s)?)),
        }
    }
}

impl Serialize for Frac {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepted on-disk spellings of a fraction
#[derive(Deserialize)]
#[serde(untagged)]
enum FracRepr {
    Integer(i64),
    Text(String),
    Parts { num: i64, den: i64 },
}

impl<'de> Deserialize<'de> for Frac {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let frac = match FracRepr::deserialize(deserializer)? {
            FracRepr::Integer(value) => Ok(Frac::integer(value)),
            FracRepr::Text(text) => text.parse(),
            FracRepr::Parts { num, den } => Frac::new(num, den),
        };
        frac.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_canonical(frac: Frac) -> bool {
        frac.denom() > 0 && gcd(frac.numer().unsigned_abs() as u128, frac.denom() as u128) == 1
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(
            Frac::new(4, 0),
            Err(FracError::DivideByZero { numerator: 4 })
        );
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_literal_panics_on_zero_denominator() {
        let _ = Frac::literal(1, 0);
    }

    #[test]
    fn test_reduced_forms_match() {
        let a = Frac::new(2, 4).unwrap();
        let b = Frac::new(1, 2).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.numer(), 1);
        assert_eq!(a.denom(), 2);
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(format!("{:?}", a), format!("{:?}", b));
    }

    #[test]
    fn test_sign_moves_to_numerator() {
        let f = Frac::new(3, -6).unwrap();
        assert_eq!(f.numer(), -1);
        assert_eq!(f.denom(), 2);

        let g = Frac::new(-3, -6).unwrap();
        assert_eq!(g, Frac::literal(1, 2));

        assert_eq!(Frac::new(0, -7).unwrap(), Frac::ZERO);
    }

    #[test]
    fn test_reduction_idempotent() {
        for n in -24..=24 {
            for d in -24..=24 {
                if d == 0 {
                    continue;
                }
                let once = Frac::new(n, d).unwrap();
                let twice = Frac::new(once.numer(), once.denom()).unwrap();
                assert_eq!(once, twice, "reduce({n}, {d})");
                assert!(is_canonical(once));
            }
        }
    }

    #[test]
    fn test_arithmetic_closure() {
        let values: Vec<Frac> = [(1, 2), (-2, 3), (5, 6), (0, 9), (7, 1), (-4, 8), (3, -9)]
            .iter()
            .map(|&(n, d)| Frac::new(n, d).unwrap())
            .collect();

        for &a in &values {
            for &b in &values {
                assert!(is_canonical(a.checked_add(b).unwrap()));
                assert!(is_canonical(a.checked_sub(b).unwrap()));
                assert!(is_canonical(a.checked_mul(b).unwrap()));
            }
            assert!(is_canonical(a.abs()));
        }
    }

    #[test]
    fn test_arithmetic_values() {
        let half = Frac::literal(1, 2);
        let third = Frac::literal(1, 3);
        assert_eq!(half + third, Frac::literal(5, 6));
        assert_eq!(half - third, Frac::literal(1, 6));
        assert_eq!(third - half, Frac::literal(-1, 6));
        assert_eq!(half * third, Frac::literal(1, 6));
        assert_eq!(-half, Frac::literal(-1, 2));
        assert_eq!(Frac::literal(-5, 3).abs(), Frac::literal(5, 3));
        assert_eq!(Frac::literal(7, 6) - Frac::literal(4, 6), Frac::literal(1, 2));
    }

    #[test]
    fn test_exact_ordering() {
        let mut values = vec![
            Frac::literal(2, 3),
            Frac::literal(-1, 2),
            Frac::literal(1, 3),
            Frac::ZERO,
            Frac::literal(5, 3),
            Frac::literal(4, 6),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Frac::literal(-1, 2),
                Frac::ZERO,
                Frac::literal(1, 3),
                Frac::literal(2, 3),
                Frac::literal(2, 3),
                Frac::literal(5, 3),
            ]
        );
    }

    #[test]
    fn test_ordering_distinguishes_close_values() {
        // These two differ by far less than an f64 ulp around 1.0.
        let a = Frac::new(i64::MAX - 1, i64::MAX).unwrap();
        let b = Frac::new(i64::MAX - 2, i64::MAX - 1).unwrap();
        assert_eq!(a.to_f64(), b.to_f64());
        assert_ne!(a, b);
        assert!(b < a);
    }

    #[test]
    fn test_overflow_is_reported() {
        let big = Frac::integer(i64::MAX);
        assert_eq!(
            big.checked_add(Frac::ONE),
            Err(FracError::Overflow { operation: "addition" })
        );
        assert!(big.checked_mul(big).is_err());
        assert!(Frac::integer(i64::MIN).checked_abs().is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!("3/6".parse::<Frac>().unwrap(), Frac::literal(1, 2));
        assert_eq!(" 4 ".parse::<Frac>().unwrap(), Frac::integer(4));
        assert_eq!("-2 / 8".parse::<Frac>().unwrap(), Frac::literal(-1, 4));
        assert_eq!(
            "1/0".parse::<Frac>(),
            Err(FracError::DivideByZero { numerator: 1 })
        );
        assert!(matches!("one/2".parse::<Frac>(), Err(FracError::Parse { .. })));
    }

    #[test]
    fn test_serde_reduces_on_decode() {
        let text: Frac = serde_yaml::from_str("\"4/6\"").unwrap();
        assert_eq!(text, Frac::literal(2, 3));

        let integer: Frac = serde_yaml::from_str("3").unwrap();
        assert_eq!(integer, Frac::integer(3));

        let parts: Frac = serde_yaml::from_str("{num: 2, den: -4}").unwrap();
        assert_eq!(parts, Frac::literal(-1, 2));

        let encoded = serde_yaml::to_string(&Frac::literal(5, 3)).unwrap();
        assert_eq!(encoded.trim(), "5/3");

        assert!(serde_yaml::from_str::<Frac>("\"1/0\"").is_err());
    }
}
