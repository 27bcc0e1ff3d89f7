use serde::{Deserialize, Serialize};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, Sub},
};

use crate::{Result, err};

/// An amount of rupees, stored as whole paise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Self = Self(0);

    /// Largest amount a user may enter: ten lakh crore rupees.
    pub const MAX: Self = Self(1_000_000_000_000 * 100);

    pub const fn from_paise(paise: i64) -> Self {
        Self(paise)
    }

    pub const fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    pub fn paise(self) -> i64 {
        self.0
    }

    pub fn rupees(self) -> i64 {
        self.0 / 100
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Parse a user-entered amount such as `1500` or `1500.5`.
    ///
    /// At most two decimal places are accepted.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim().trim_start_matches('₹').replace(',', "");
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input.as_str()),
        };

        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(err!("amount is empty"));
        }
        if frac.len() > 2 {
            return Err(err!("amount has more than two decimal places"));
        }
        if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return Err(err!("'{input}' is not a number"));
        }

        let too_large = || err!("amount is too large");
        // Only digits are left, so a parse failure is an overflow.
        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| too_large())?
        };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>()? * 10,
            _ => frac.parse()?,
        };

        let paise = whole
            .checked_mul(100)
            .and_then(|p| p.checked_add(frac))
            .filter(|&p| p <= Self::MAX.0)
            .ok_or_else(too_large)?;

        Ok(Self(if negative { -paise } else { paise }))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let rupees = group_indian(abs / 100);
        match abs % 100 {
            0 => write!(f, "{sign}₹{rupees}"),
            paise => write!(f, "{sign}₹{rupees}.{paise:02}"),
        }
    }
}

/// Digit grouping as used in India: `12,34,567`.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

/// Saturates at the `i64` bounds. Use `checked_add` where an overflow must be reported.
impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_rupees() {
        assert_eq!(Amount::parse("1500").unwrap(), Amount::from_rupees(1500));
        assert_eq!(Amount::parse("1500.5").unwrap(), Amount::from_paise(150_050));
        assert_eq!(Amount::parse(" ₹1,200.25 ").unwrap(), Amount::from_paise(120_025));
        assert_eq!(Amount::parse("-3").unwrap(), Amount::from_rupees(-3));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Amount::parse("").is_err());
        assert!(Amount::parse("12.345").is_err());
        assert!(Amount::parse("abc").is_err());
        assert!(Amount::parse("1e5").is_err());
    }

    #[test]
    fn rejects_amounts_above_the_cap() {
        assert_eq!(Amount::parse("1000000000000").unwrap(), Amount::MAX);
        for input in ["1000000000000.01", "92233720368547758.07", "99999999999999999999999"] {
            assert_eq!(Amount::parse(input).unwrap_err().message(), "amount is too large");
        }
    }

    #[test]
    fn arithmetic_never_panics() {
        let near = Amount::from_paise(i64::MAX - 1);
        assert_eq!(near.checked_add(Amount::from_paise(5)), None);
        assert_eq!(near + Amount::from_paise(5), Amount::from_paise(i64::MAX));
        assert_eq!(Amount::from_paise(i64::MIN) - Amount::from_paise(1), Amount::from_paise(i64::MIN));
        assert_eq!(
            Amount::from_rupees(10).checked_sub(Amount::from_rupees(25)),
            Some(Amount::from_rupees(-15))
        );
    }

    #[test]
    fn displays_with_indian_grouping() {
        assert_eq!(Amount::from_rupees(500).to_string(), "₹500");
        assert_eq!(Amount::from_rupees(12_500).to_string(), "₹12,500");
        assert_eq!(Amount::from_rupees(1_234_567).to_string(), "₹12,34,567");
        assert_eq!(Amount::from_paise(-150_005).to_string(), "-₹1,500.05");
    }

    #[test]
    fn sums() {
        let total: Amount = [100, 250, -50].into_iter().map(Amount::from_rupees).sum();
        assert_eq!(total, Amount::from_rupees(300));
    }
}
