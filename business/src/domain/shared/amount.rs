use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::{Signed, Zero};

/// Reasons a numeral cannot become an [`Amount`].
/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount.empty")]
    Empty,
    #[error("amount.negative")]
    Negative,
    #[error("amount.not_numeric")]
    NotNumeric,
    #[error("amount.malformed_grouping")]
    MalformedGrouping,
}

/// Non-negative currency value in canonical form.
///
/// Integers carry no fractional scale and decimals carry no trailing zeros,
/// so `Display` always prints a separator-free numeral (`1250`, `12.5`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigDecimal);

/// Characters that may appear between digit groups and carry no meaning.
const GROUPING_NOISE: [char; 4] = [' ', '\u{a0}', '\u{202f}', '\''];

impl Amount {
    pub fn new(value: BigDecimal) -> Result<Self, AmountError> {
        if value.is_negative() {
            return Err(AmountError::Negative);
        }

        Ok(Self(canonical(value)))
    }

    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    pub fn value(&self) -> &BigDecimal {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parses the canonical form printed by `Display` (`1250`, `1.125`).
    ///
    /// Only digits and a single `.` decimal mark are accepted, so a value
    /// read back from its own output is never reinterpreted as grouped.
    pub fn from_canonical(raw: &str) -> Result<Self, AmountError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }
        if trimmed.starts_with('-') {
            return Err(AmountError::Negative);
        }

        let digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
        let well_formed = match trimmed.split_once('.') {
            Some((integer, fraction)) => digits(integer) && digits(fraction),
            None => digits(trimmed),
        };
        if !well_formed {
            return Err(AmountError::NotNumeric);
        }

        let value = BigDecimal::from_str(trimmed).map_err(|_| AmountError::NotNumeric)?;
        Self::new(value)
    }

    /// Parses a human-written numeral such as `"$ 1.250"`, `"12,50 €"` or
    /// `"1,250.00"` into a canonical amount.
    ///
    /// Leading and trailing currency markers are dropped. Separator rules:
    /// - both `.` and `,` present: the last one is the decimal mark;
    /// - one kind repeated: thousands grouping;
    /// - one separator followed by exactly three digits, with a leading group
    ///   of one to three digits not starting with `0`: thousands grouping;
    /// - anything else: decimal mark.
    pub fn parse(raw: &str) -> Result<Self, AmountError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let first_digit = trimmed
            .find(|c: char| c.is_ascii_digit())
            .ok_or(AmountError::NotNumeric)?;
        let last_digit = trimmed
            .rfind(|c: char| c.is_ascii_digit())
            .unwrap_or(first_digit);

        let prefix = &trimmed[..first_digit];
        if prefix.contains('-') {
            return Err(AmountError::Negative);
        }
        // ".50" and "$,50" keep their leading mark
        let start = if prefix.ends_with(['.', ',']) {
            first_digit - 1
        } else {
            first_digit
        };

        let core = &trimmed[start..=last_digit];
        if core
            .chars()
            .any(|c| !(c.is_ascii_digit() || c == '.' || c == ',' || GROUPING_NOISE.contains(&c)))
        {
            return Err(AmountError::NotNumeric);
        }
        let compact: String = core.chars().filter(|c| !GROUPING_NOISE.contains(c)).collect();

        let (integer, fraction) = split_separators(&compact)?;
        let integer = if integer.is_empty() { "0" } else { integer.as_str() };
        let numeral = match fraction {
            Some(fraction) if !fraction.is_empty() => format!("{}.{}", integer, fraction),
            _ => integer.to_string(),
        };

        let value = BigDecimal::from_str(&numeral).map_err(|_| AmountError::NotNumeric)?;
        Self::new(value)
    }
}

fn canonical(value: BigDecimal) -> BigDecimal {
    if value.is_integer() {
        value.with_scale(0)
    } else {
        value.normalized()
    }
}

/// Splits a compact numeral into its integer digits (grouping removed) and
/// optional fraction digits.
fn split_separators(compact: &str) -> Result<(String, Option<String>), AmountError> {
    let dots = compact.matches('.').count();
    let commas = compact.matches(',').count();

    match (dots, commas) {
        (0, 0) => Ok((compact.to_string(), None)),
        (d, c) if d > 0 && c > 0 => {
            let mark_at = compact.rfind(['.', ',']).ok_or(AmountError::NotNumeric)?;
            let mark = &compact[mark_at..=mark_at];
            let (integer, fraction) = (&compact[..mark_at], &compact[mark_at + 1..]);
            if integer.contains(mark) {
                return Err(AmountError::MalformedGrouping);
            }
            let grouping = if mark == "." { ',' } else { '.' };
            Ok((ungroup(integer, grouping)?, Some(fraction.to_string())))
        }
        (d, c) => {
            let separator = if d > 0 { '.' } else { ',' };
            if d + c > 1 {
                return Ok((ungroup(compact, separator)?, None));
            }

            let (lead, tail) = compact
                .split_once(separator)
                .ok_or(AmountError::NotNumeric)?;
            let is_grouping = tail.len() == 3
                && (1..=3).contains(&lead.len())
                && !lead.starts_with('0');
            if is_grouping {
                Ok((format!("{}{}", lead, tail), None))
            } else {
                Ok((lead.to_string(), Some(tail.to_string())))
            }
        }
    }
}

fn ungroup(integer: &str, separator: char) -> Result<String, AmountError> {
    let mut groups = integer.split(separator);
    let first = groups.next().unwrap_or_default();
    if first.is_empty() || first.len() > 3 {
        return Err(AmountError::MalformedGrouping);
    }

    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 {
            return Err(AmountError::MalformedGrouping);
        }
        digits.push_str(group);
    }
    Ok(digits)
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(canonical(self.0 + rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn amount(raw: &str) -> Amount {
        Amount::parse(raw).unwrap()
    }

    fn decimal(raw: &str) -> BigDecimal {
        BigDecimal::from_str(raw).unwrap()
    }

    #[test]
    fn should_read_period_followed_by_three_digits_as_thousands() {
        assert_eq!(amount("1.250").value(), &decimal("1250"));
        assert_eq!(amount("1.000"), amount("1000"));
    }

    #[test]
    fn should_read_repeated_separator_as_thousands() {
        assert_eq!(amount("1.250.000").value(), &decimal("1250000"));
        assert_eq!(amount("3,400,500").value(), &decimal("3400500"));
    }

    #[test]
    fn should_use_last_separator_as_decimal_mark_when_both_present() {
        assert_eq!(amount("1.250,50").value(), &decimal("1250.5"));
        assert_eq!(amount("1,250.50").value(), &decimal("1250.5"));
    }

    #[test]
    fn should_read_short_fraction_as_decimal() {
        assert_eq!(amount("12.50").value(), &decimal("12.5"));
        assert_eq!(amount("12,5").value(), &decimal("12.5"));
        assert_eq!(amount("0.500").value(), &decimal("0.5"));
        assert_eq!(amount(".75").value(), &decimal("0.75"));
    }

    #[test]
    fn should_drop_currency_markers_and_grouping_spaces() {
        assert_eq!(amount("$ 1.250").value(), &decimal("1250"));
        assert_eq!(amount("1 250 CLP").value(), &decimal("1250"));
        assert_eq!(amount("USD 12.99").value(), &decimal("12.99"));
    }

    #[test]
    fn should_print_canonical_numeral_without_separators() {
        assert_eq!(amount("1.250").to_string(), "1250");
        assert_eq!(amount("1.250,00").to_string(), "1250");
        assert_eq!(amount("12,50").to_string(), "12.5");
    }

    #[test]
    fn should_reject_negative_amounts() {
        assert_eq!(Amount::parse("-1.250"), Err(AmountError::Negative));
        assert_eq!(Amount::parse("$-5"), Err(AmountError::Negative));
        assert_eq!(
            Amount::new(decimal("-0.01")),
            Err(AmountError::Negative)
        );
    }

    #[test]
    fn should_reject_non_numeric_input() {
        assert_eq!(Amount::parse(""), Err(AmountError::Empty));
        assert_eq!(Amount::parse("   "), Err(AmountError::Empty));
        assert_eq!(Amount::parse("twelve"), Err(AmountError::NotNumeric));
        assert_eq!(Amount::parse("12abc34"), Err(AmountError::NotNumeric));
    }

    #[test]
    fn should_reject_malformed_grouping() {
        assert_eq!(Amount::parse("12.50.00"), Err(AmountError::MalformedGrouping));
        assert_eq!(Amount::parse("1.2.3,50"), Err(AmountError::MalformedGrouping));
        assert_eq!(Amount::parse("1,2,50.5"), Err(AmountError::MalformedGrouping));
    }

    #[test]
    fn should_read_canonical_three_decimal_value_literally() {
        let canonical = Amount::new(decimal("1.125")).unwrap();

        let reread = Amount::from_canonical(&canonical.to_string()).unwrap();

        assert_eq!(canonical.to_string(), "1.125");
        assert_eq!(reread, canonical);
    }

    #[test]
    fn should_reject_separators_and_signs_in_canonical_form() {
        assert_eq!(Amount::from_canonical("1,250"), Err(AmountError::NotNumeric));
        assert_eq!(Amount::from_canonical("1.250.000"), Err(AmountError::NotNumeric));
        assert_eq!(Amount::from_canonical("$ 12"), Err(AmountError::NotNumeric));
        assert_eq!(Amount::from_canonical(".5"), Err(AmountError::NotNumeric));
        assert_eq!(Amount::from_canonical("1e3"), Err(AmountError::NotNumeric));
        assert_eq!(Amount::from_canonical("5."), Err(AmountError::NotNumeric));
        assert_eq!(Amount::from_canonical("-3"), Err(AmountError::Negative));
        assert_eq!(Amount::from_canonical(" "), Err(AmountError::Empty));
    }

    #[test]
    fn should_sum_amounts() {
        let total: Amount = vec![amount("1.250"), amount("99.5"), amount("0.5")]
            .into_iter()
            .sum();
        assert_eq!(total.value(), &decimal("1350"));
        assert_eq!(total.to_string(), "1350");
    }

    fn group_thousands(value: u64, separator: char) -> String {
        let digits = value.to_string();
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(separator);
            }
            grouped.push(c);
        }
        grouped
    }

    proptest! {
        #[test]
        fn normalizing_canonical_integer_is_identity(value in 0u64..1_000_000_000_000) {
            let once = Amount::parse(&value.to_string()).unwrap();
            let twice = Amount::from_canonical(&once.to_string()).unwrap();
            prop_assert_eq!(once.value(), &BigDecimal::from(value));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalizing_canonical_cents_is_identity(units in 0u32..10_000_000, cents in 0u32..100) {
            let once = Amount::parse(&format!("{}.{:02}", units, cents)).unwrap();
            let twice = Amount::from_canonical(&once.to_string()).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn normalizing_canonical_millis_is_identity(units in 0u32..1000, millis in 1u32..1000) {
            let value = BigDecimal::from_str(&format!("{}.{:03}", units, millis)).unwrap();
            let once = Amount::new(value.clone()).unwrap();
            let twice = Amount::from_canonical(&once.to_string()).unwrap();
            prop_assert_eq!(once.value(), &value);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn thousands_grouped_numeral_equals_plain_integer(value in 0u64..1_000_000_000_000) {
            let plain = Amount::parse(&value.to_string()).unwrap();
            prop_assert_eq!(&Amount::parse(&group_thousands(value, '.')).unwrap(), &plain);
            prop_assert_eq!(&Amount::parse(&group_thousands(value, ',')).unwrap(), &plain);
        }
    }
}
