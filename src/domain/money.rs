use serde::{Deserialize, Serialize};
use std::{fmt, iter::Sum, ops::Add, str::FromStr};

use crate::error::DealflowError;

/// A monetary amount in whole cents
///
/// Deal and invoice values are carried around as display strings
/// (`"$12,500"`); `Money` is what those strings mean once parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Adds two amounts, returning `None` on overflow
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl FromStr for Money {
    type Err = DealflowError;

    /// Parses `"$12,500"`, `"$737.50"`, `"1,275"` and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DealflowError::InvalidMoney(s.to_string());

        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let amount = rest.strip_prefix('$').unwrap_or(rest);

        let (grouped, fraction) = match amount.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (amount, ""),
        };
        let whole = ungroup(grouped).ok_or_else(invalid)?;

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > 2 || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -cents } else { cents }))
    }
}

/// Strips thousands separators, accepting only well-formed groups
/// (`12,500`, `1,000,000`); `1,2,,3` and `12,50` are rejected.
fn ungroup(whole: &str) -> Option<String> {
    if !whole.contains(',') {
        return Some(whole.to_string());
    }

    let mut groups = whole.split(',');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 {
        return None;
    }

    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = (abs / 100).to_string();

        // Group the whole part in thousands
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        write!(f, "{}${}.{:02}", sign, grouped, abs % 100)
    }
}

/// Saturates at the `i64` bounds instead of overflowing
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_strings() {
        assert_eq!(Money::from_str("$12,500").unwrap().cents(), 1_250_000);
        assert_eq!(Money::from_str("$737.50").unwrap().cents(), 73_750);
        assert_eq!(Money::from_str("1,275").unwrap().cents(), 127_500);
        assert_eq!(Money::from_str("$295").unwrap().cents(), 29_500);
        assert_eq!(Money::from_str(" $4.5 ").unwrap().cents(), 450);
        assert_eq!(Money::from_str("-$10").unwrap().cents(), -1_000);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("$").is_err());
        assert!(Money::from_str("abc").is_err());
        assert!(Money::from_str("$1.234").is_err());
        assert!(Money::from_str("5%").is_err());
    }

    #[test]
    fn test_parse_rejects_misplaced_separators() {
        assert!(Money::from_str("1,2,,3").is_err());
        assert!(Money::from_str("12,50").is_err());
        assert!(Money::from_str(",500").is_err());
        assert!(Money::from_str("1,000,").is_err());
        assert!(Money::from_str("1234,567").is_err());
        assert!(Money::from_str("$1,000.5,0").is_err());

        assert_eq!(Money::from_str("$1,000,000").unwrap().cents(), 100_000_000);
        assert_eq!(Money::from_str("$12,500.25").unwrap().cents(), 1_250_025);
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_cents(1_250_000).to_string(), "$12,500.00");
        assert_eq!(Money::from_cents(73_750).to_string(), "$737.50");
        assert_eq!(Money::from_cents(28_532_400).to_string(), "$285,324.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-100_000).to_string(), "-$1,000.00");
    }

    #[test]
    fn test_sum() {
        let total: Money = ["$12,500", "$24,000"]
            .iter()
            .map(|s| Money::from_str(s).unwrap())
            .sum();
        assert_eq!(total, Money::from_cents(3_650_000));
    }

    #[test]
    fn test_large_amounts_do_not_overflow() {
        let large = Money::from_str("$50,000,000,000,000,000").unwrap();

        assert_eq!(large.checked_add(large), None);
        assert_eq!(large + large, Money::from_cents(i64::MAX));
        assert_eq!([large, large].into_iter().sum::<Money>(), Money::from_cents(i64::MAX));

        let small = Money::from_cents(-large.cents());
        assert_eq!(small + small, Money::from_cents(i64::MIN));
        assert_eq!(large.checked_add(small), Some(Money::ZERO));
    }
}
