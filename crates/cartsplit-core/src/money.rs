//! # Money Module
//!
//! Provides the `Amount` type for currency values and the relative tolerance
//! comparison used by validation and reconciliation.
//!
//! ## Why Floating Point Here?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SPLITTING IS DIVISION                                                  │
//! │                                                                         │
//! │  Every share is cost ÷ splitters, and every tax share is               │
//! │  (spend ÷ pre-tax total) × tax. Neither result is a whole cent.        │
//! │                                                                         │
//! │  Amounts are kept as f64 and compared with a RELATIVE tolerance:       │
//! │    |a - b| <= max(|a|, |b|) × epsilon                                   │
//! │                                                                         │
//! │  The default epsilon is machine epsilon, so the only slack allowed is  │
//! │  the rounding of the division/multiplication chain itself.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartsplit_core::money::{Amount, Tolerance};
//!
//! let pizza = Amount::new(3.0);
//! let share = pizza / 2;
//! assert_eq!(share.to_string(), "$1.50");
//!
//! assert!(Tolerance::MACHINE.matches(share + share, pizza));
//! assert!(Tolerance::CURRENCY.matches(share, Amount::new(1.51)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

// =============================================================================
// Amount Type
// =============================================================================

/// A currency amount in major units (dollars).
///
/// ## Design Decisions
/// - **f64**: shares and tax shares are fractional by nature
/// - **Single field tuple struct**: zero-cost wrapper, serialized as a bare number
/// - **No currency**: amounts are unitless beyond the `$` used for display
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Wraps a raw value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Amount(value)
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0.0)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Amount(self.0.abs())
    }

    /// Fraction of `whole` this amount represents.
    ///
    /// Callers must ensure `whole` is non-zero.
    #[inline]
    pub fn ratio_of(&self, whole: Amount) -> f64 {
        self.0 / whole.0
    }
}

// =============================================================================
// Tolerance
// =============================================================================

/// How close two amounts must be to count as equal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Scale-invariant: `|a - b| <= max(|a|, |b|) * epsilon`.
    Relative(f64),
    /// Fixed slack in currency units: `|a - b| <= delta`.
    Absolute(f64),
}

impl Tolerance {
    /// Machine epsilon for `f64`. Used by validation and reconciliation.
    pub const MACHINE: Tolerance = Tolerance::Relative(f64::EPSILON);

    /// Two cents. Suitable for checking a person's total, never for engine
    /// reconciliation.
    pub const CURRENCY: Tolerance = Tolerance::Absolute(0.02);

    /// Relative tolerance with a caller-chosen epsilon.
    #[inline]
    pub const fn relative(epsilon: f64) -> Self {
        Tolerance::Relative(epsilon)
    }

    /// Returns true if `a` and `b` are equal within this tolerance.
    pub fn matches(&self, a: Amount, b: Amount) -> bool {
        match *self {
            Tolerance::Relative(epsilon) => approximately_equal(a.0, b.0, epsilon),
            Tolerance::Absolute(delta) => (a.0 - b.0).abs() <= delta,
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::MACHINE
    }
}

/// Relative comparison from Knuth, TAOCP vol. 2 §4.2.2.
///
/// Returns true iff `|a - b| <= max(|a|, |b|) * epsilon`.
///
/// ## Example
/// ```rust
/// use cartsplit_core::approximately_equal;
///
/// assert!(approximately_equal(0.1 + 0.2, 0.3, f64::EPSILON));
/// assert!(!approximately_equal(1.0, 1.001, f64::EPSILON));
/// assert!(approximately_equal(1000.0, 1000.5, 0.001));
/// ```
pub fn approximately_equal(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= a.abs().max(b.abs()) * epsilon
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display rounds to cents, e.g. `$6.57` or `-$1.50`.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0.0 { "-" } else { "" };
        write!(f, "{}${:.2}", sign, self.0.abs())
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount(value)
    }
}

impl Add for Amount {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Amount(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Amount(self.0 - other.0)
    }
}

/// Scaling by a fraction (tax proportion).
impl Mul<f64> for Amount {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f64) -> Self {
        Amount(self.0 * factor)
    }
}

/// Even split among `count` people.
impl Div<usize> for Amount {
    type Output = Self;

    #[inline]
    fn div(self, count: usize) -> Self {
        Amount(self.0 / count as f64)
    }
}

/// Sums left to right, so the result depends on iteration order.
impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, amount| acc + amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
