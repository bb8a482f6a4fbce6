use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (expense amounts,
/// split shares, balances, debts) so that sums never drift the way repeated
/// floating-point additions do. Rounding to the cent happens exactly once, when
/// a value is produced by a division or a ratio ([`Money::div_rounded`],
/// [`Money::mul_ratio`]) or when it crosses the boundary from major units
/// ([`Money::from_major`]). Every rounding is half away from zero.
///
/// The value is signed:
/// - positive = the member is owed money / paid more than used
/// - negative = the member owes money
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!(Money::from_major(0.125), Some(Money::new(13)));
/// ```
///
/// Arithmetic saturates at the bounds of `i64` instead of overflowing, so
/// folding any number of valid amounts never panics:
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!(Money::MAX + Money::CENT, Money::MAX);
/// assert_eq!(Money::MIN - Money::CENT, Money::MIN);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Smallest representable amount (one cent).
    pub const CENT: Money = Money(1);

    pub const MAX: Money = Money(i64::MAX);
    pub const MIN: Money = Money(i64::MIN);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Absolute value.
    #[must_use]
    pub const fn abs(self) -> Money {
        Money(self.0.saturating_abs())
    }

    /// Converts a decimal amount in major units (e.g. `12.5`) to cents,
    /// rounding half away from zero.
    ///
    /// Returns `None` for NaN, infinities and values that do not fit in `i64`
    /// cents.
    #[must_use]
    pub fn from_major(value: f64) -> Option<Money> {
        round_cents(value * 100.0)
    }

    /// Returns the amount in major units, for serialization and display.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Divides the amount into `parts` and rounds the quotient to the cent,
    /// half away from zero.
    ///
    /// Returns [`Money::ZERO`] when `parts` is not positive.
    #[must_use]
    pub fn div_rounded(self, parts: i64) -> Money {
        if parts <= 0 {
            return Money::ZERO;
        }
        let quotient = self.0 / parts;
        let remainder = self.0 % parts;
        if remainder.unsigned_abs() * 2 >= parts.unsigned_abs() {
            Money(quotient + self.0.signum())
        } else {
            Money(quotient)
        }
    }

    /// Multiplies the amount by `numerator / denominator` and rounds to the
    /// cent, half away from zero.
    ///
    /// A zero or non-finite ratio yields [`Money::ZERO`].
    #[must_use]
    pub fn mul_ratio(self, numerator: f64, denominator: f64) -> Money {
        if denominator == 0.0 {
            return Money::ZERO;
        }
        round_cents(self.0 as f64 * numerator / denominator).unwrap_or(Money::ZERO)
    }
}

fn round_cents(raw: f64) -> Option<Money> {
    if !raw.is_finite() {
        return None;
    }
    let rounded = raw.round();
    if rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
        return None;
    }
    Some(Money(rounded as i64))
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_two_decimals() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(1).to_string(), "0.01");
        assert_eq!(Money::new(10).to_string(), "0.10");
        assert_eq!(Money::new(1050).to_string(), "10.50");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn from_major_rounds_half_away_from_zero() {
        assert_eq!(Money::from_major(0.29), Some(Money::new(29)));
        assert_eq!(Money::from_major(-0.125), Some(Money::new(-13)));
        assert_eq!(Money::from_major(100.0), Some(Money::new(10_000)));
        assert_eq!(Money::from_major(f64::NAN), None);
        assert_eq!(Money::from_major(f64::INFINITY), None);
    }

    #[test]
    fn div_rounded_rounds_to_nearest_cent() {
        assert_eq!(Money::new(10_000).div_rounded(3), Money::new(3333));
        assert_eq!(Money::new(20_000).div_rounded(3), Money::new(6667));
        assert_eq!(Money::new(5).div_rounded(2), Money::new(3));
        assert_eq!(Money::new(-5).div_rounded(2), Money::new(-3));
        assert_eq!(Money::new(100).div_rounded(0), Money::ZERO);
    }

    #[test]
    fn mul_ratio_guards_zero_denominator() {
        assert_eq!(Money::new(10_000).mul_ratio(25.0, 100.0), Money::new(2500));
        assert_eq!(Money::new(1).mul_ratio(50.0, 100.0), Money::new(1));
        assert_eq!(Money::new(10_000).mul_ratio(1.0, 0.0), Money::ZERO);
        assert_eq!(Money::new(10_000).mul_ratio(f64::NAN, 1.0), Money::ZERO);
    }

    #[test]
    fn sums_money_values() {
        let total: Money = [Money::new(1), Money::new(2), Money::new(-4)].iter().sum();
        assert_eq!(total, Money::new(-1));
    }

    #[test]
    fn arithmetic_saturates_instead_of_overflowing() {
        let huge = Money::from_major(5.0e16).unwrap();
        assert_eq!(huge + huge, Money::MAX);
        assert_eq!(-huge - huge, Money::MIN);
        assert_eq!(-Money::MIN, Money::MAX);
        assert_eq!(Money::MIN.abs(), Money::MAX);

        let mut total = huge;
        total += huge;
        assert_eq!(total, Money::MAX);
        total -= Money::MAX;
        assert_eq!(total, Money::ZERO);

        let summed: Money = [huge, huge, huge].iter().sum();
        assert_eq!(summed, Money::MAX);
    }
}
