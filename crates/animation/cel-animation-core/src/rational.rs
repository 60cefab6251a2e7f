//! Exact fractional time.
//!
//! Keyframe and loop-frame times are stored as reduced fractions so that long
//! timelines built from repeated loop deltas never accumulate float drift.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// A reduced fraction with a strictly positive denominator.
///
/// Arithmetic whose reduced result leaves the `i64` range panics, as integer
/// overflow does in debug builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRational")]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

#[derive(Deserialize)]
struct RawRational {
    numerator: i64,
    denominator: i64,
}

impl TryFrom<RawRational> for Rational {
    type Error = AnimationError;

    fn try_from(raw: RawRational) -> Result<Self, Self::Error> {
        Rational::new(raw.numerator, raw.denominator)
    }
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

impl Rational {
    pub const ZERO: Rational = Rational {
        numerator: 0,
        denominator: 1,
    };

    pub const ONE: Rational = Rational {
        numerator: 1,
        denominator: 1,
    };

    /// Create a reduced fraction. Fails on a zero denominator.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, AnimationError> {
        if denominator == 0 {
            return Err(AnimationError::ZeroDenominator);
        }
        Ok(Self::reduced(numerator as i128, denominator as i128))
    }

    #[inline]
    pub const fn from_integer(value: i64) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    fn reduced(numerator: i128, denominator: i128) -> Self {
        let (mut n, mut d) = if denominator < 0 {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        let g = gcd(n, d);
        if g > 1 {
            n /= g;
            d /= g;
        }
        if n == 0 {
            d = 1;
        }
        Self {
            numerator: i64::try_from(n).expect("rational numerator overflow"),
            denominator: i64::try_from(d).expect("rational denominator overflow"),
        }
    }

    #[inline]
    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    #[inline]
    pub fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator,
        }
    }

    /// `a / b` as a float, or 0.0 when `b` is zero.
    #[inline]
    pub fn ratio(a: Rational, b: Rational) -> f64 {
        if b.is_zero() {
            0.0
        } else {
            (a / b).to_f64()
        }
    }

    #[inline]
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    #[inline]
    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Rational {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<i32> for Rational {
    fn from(value: i32) -> Self {
        Self::from_integer(value as i64)
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let d = self.denominator as i128 * other.denominator as i128;
        let n = self.numerator as i128 * other.denominator as i128
            + other.numerator as i128 * self.denominator as i128;
        Self::reduced(n, d)
    }
}

impl AddAssign for Rational {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + -other
    }
}

impl SubAssign for Rational {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::reduced(
            self.numerator as i128 * other.numerator as i128,
            self.denominator as i128 * other.denominator as i128,
        )
    }
}

impl Div for Rational {
    type Output = Self;

    /// Panics when dividing by zero, as integer division does.
    fn div(self, other: Self) -> Self {
        assert!(!other.is_zero(), "attempt to divide a Rational by zero");
        Self::reduced(
            self.numerator as i128 * other.denominator as i128,
            self.denominator as i128 * other.numerator as i128,
        )
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn reduces_and_normalises_sign() {
        let a = r(4, -8);
        assert_eq!(a.numerator(), -1);
        assert_eq!(a.denominator(), 2);
        assert_eq!(r(0, 7), Rational::ZERO);
    }

    #[test]
    fn zero_denominator_is_rejected() {
        assert_eq!(Rational::new(1, 0), Err(AnimationError::ZeroDenominator));
    }

    #[test]
    fn arithmetic_stays_exact() {
        let third = r(1, 3);
        let sum = third + third + third;
        assert_eq!(sum, Rational::ONE);
        assert_eq!(r(1, 2) - r(1, 3), r(1, 6));
        assert_eq!(r(2, 3) * r(3, 4), r(1, 2));
        assert_eq!(r(1, 2) / r(1, 4), Rational::from(2));
    }

    #[test]
    fn ordering_uses_cross_multiplication() {
        assert!(r(1, 3) < r(1, 2));
        assert!(r(-1, 2) < Rational::ZERO);
        assert_eq!(r(2, 4).cmp(&r(1, 2)), Ordering::Equal);
    }

    #[test]
    fn ratio_guards_zero() {
        assert_eq!(Rational::ratio(Rational::ONE, Rational::ZERO), 0.0);
        assert_eq!(Rational::ratio(r(1, 4), r(1, 2)), 0.5);
    }

    #[test]
    fn serde_rejects_zero_denominator() {
        let ok: Rational = serde_json::from_str(r#"{"numerator":2,"denominator":4}"#).unwrap();
        assert_eq!(ok, r(1, 2));
        let bad = serde_json::from_str::<Rational>(r#"{"numerator":1,"denominator":0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn display_formats() {
        assert_eq!(Rational::from(3).to_string(), "3");
        assert_eq!(r(3, 6).to_string(), "1/2");
        assert!(r(6, 3).is_integer());
        assert!(!r(3, 6).is_integer());
    }
}
