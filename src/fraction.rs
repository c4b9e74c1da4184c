//! Exact fractional exchange rates
//!
//! Rates are carried as `numerator / denominator` pairs so that chained
//! conversions stay exact. Products are never reduced to lowest terms: the
//! unreduced pair is what gets reported, so `2/3 * 3/2` stays `6/6`.

use num_traits::{Inv, One};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Unsigned integer width used for both halves of a [`Fraction`]
pub type Quantity = u64;

/// A non-negative rational number, not necessarily in lowest terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fraction {
    numerator: Quantity,
    denominator: Quantity,
}

impl Fraction {
    /// Create a fraction from an explicit pair.
    ///
    /// The denominator must be non-zero; graph construction rejects zero
    /// rates before they can produce one.
    pub const fn new(numerator: Quantity, denominator: Quantity) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub const fn numerator(&self) -> Quantity {
        self.numerator
    }

    pub const fn denominator(&self) -> Quantity {
        self.denominator
    }

    /// Floating approximation of the rate.
    ///
    /// Only good for ordering candidates; reported answers use the exact pair.
    pub fn evaluate(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Multiply, returning `None` if either half overflows
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        Some(Self::new(
            self.numerator.checked_mul(rhs.numerator)?,
            self.denominator.checked_mul(rhs.denominator)?,
        ))
    }

    /// Same value in lowest terms
    pub fn reduced(self) -> Self {
        let g = gcd(self.numerator, self.denominator);
        if g <= 1 {
            return self;
        }
        Self::new(self.numerator / g, self.denominator / g)
    }
}

fn gcd(mut a: Quantity, mut b: Quantity) -> Quantity {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}

impl From<Quantity> for Fraction {
    fn from(value: Quantity) -> Self {
        Self::new(value, 1)
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::from(0)
    }
}

// Halves multiply independently with unsigned wrap-around on overflow.
impl Mul for Fraction {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.numerator.wrapping_mul(rhs.numerator),
            self.denominator.wrapping_mul(rhs.denominator),
        )
    }
}

impl One for Fraction {
    fn one() -> Self {
        Self::from(1)
    }
}

impl Inv for Fraction {
    type Output = Self;

    fn inv(self) -> Self {
        Self::new(self.denominator, self.numerator)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.numerator, self.denominator)
    }
}
