//! Prefix ranges: the leading-digit rules of a scheme.

use std::fmt;

use crate::card::MAX_CARD_DIGITS;
use crate::error::SchemeConfigError;

/// A rule over the leading digits of a card number.
///
/// Either a literal prefix (`"34"`) or a closed numeric interval over the
/// first N digits (`"2221-2720"`), where N is the number of digits written
/// for the lower bound. Only constructible through checked constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRange {
    kind: RangeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RangeKind {
    /// Digit values (0-9) that must lead the card number.
    Literal(Vec<u8>),
    /// Leading `width` digits, read as an integer, must lie in `[low, high]`.
    Interval { low: u64, high: u64, width: usize },
}

impl PrefixRange {
    /// Parses the textual form: `"34"` for a literal, `"3528-3589"` for an
    /// interval.
    ///
    /// # Example
    ///
    /// ```
    /// use card_validator::scheme::PrefixRange;
    ///
    /// let jcb = PrefixRange::parse("3528-3589").unwrap();
    /// assert_eq!(jcb.width(), 4);
    /// assert_eq!(jcb.to_string(), "3528-3589");
    ///
    /// assert!(PrefixRange::parse("58-56").is_err());
    /// assert!(PrefixRange::parse("4x").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, SchemeConfigError> {
        match text.split_once('-') {
            None => Self::literal(text),
            Some((low, high)) => {
                if low.is_empty() || high.is_empty() || high.contains('-') {
                    return Err(SchemeConfigError::MalformedRange {
                        range: text.to_string(),
                    });
                }
                Self::interval(low, high)
            }
        }
    }

    /// A literal prefix. Must be a non-empty digit string.
    pub fn literal(prefix: &str) -> Result<Self, SchemeConfigError> {
        let digits = parse_digits(prefix)?;
        Ok(Self {
            kind: RangeKind::Literal(digits),
        })
    }

    /// A numeric interval. Both bounds must be digit strings with
    /// `low <= high`; the width is the number of digits in `low`.
    pub fn interval(low: &str, high: &str) -> Result<Self, SchemeConfigError> {
        let width = parse_digits(low)?.len();
        parse_digits(high)?;

        let low_value = parse_bound(low)?;
        let high_value = parse_bound(high)?;

        if low_value > high_value {
            return Err(SchemeConfigError::InvertedInterval {
                low: low_value,
                high: high_value,
            });
        }

        Ok(Self {
            kind: RangeKind::Interval {
                low: low_value,
                high: high_value,
                width,
            },
        })
    }

    /// Unchecked literal for built-in tables. `digits` must be digit values.
    pub(crate) fn exact(digits: &[u8]) -> Self {
        Self {
            kind: RangeKind::Literal(digits.to_vec()),
        }
    }

    /// Unchecked interval for built-in tables.
    pub(crate) fn between(low: u64, high: u64, width: usize) -> Self {
        Self {
            kind: RangeKind::Interval { low, high, width },
        }
    }

    /// Number of leading digits this range inspects.
    #[inline]
    pub fn width(&self) -> usize {
        match &self.kind {
            RangeKind::Literal(digits) => digits.len(),
            RangeKind::Interval { width, .. } => *width,
        }
    }

    /// Returns true for an interval range.
    #[inline]
    pub fn is_interval(&self) -> bool {
        matches!(self.kind, RangeKind::Interval { .. })
    }

    /// The lowest prefix this range accepts, as digit values.
    pub fn lowest_prefix(&self) -> Vec<u8> {
        match &self.kind {
            RangeKind::Literal(digits) => digits.clone(),
            RangeKind::Interval { low, width, .. } => {
                let mut digits = vec![0u8; *width];
                let mut rest = *low;
                for slot in digits.iter_mut().rev() {
                    *slot = (rest % 10) as u8;
                    rest /= 10;
                }
                digits
            }
        }
    }

    /// Tests the leading digits of `digits` (digit values 0-9).
    ///
    /// Returns `None` when an interval is wider than the card number, which
    /// a checked scheme never allows.
    pub fn matches(&self, digits: &[u8]) -> Option<bool> {
        match &self.kind {
            RangeKind::Literal(prefix) => Some(digits.starts_with(prefix)),
            RangeKind::Interval { low, high, width } => {
                if digits.len() < *width {
                    return None;
                }
                let leading = digits[..*width]
                    .iter()
                    .fold(0u64, |acc, &d| acc * 10 + d as u64);
                Some((*low..=*high).contains(&leading))
            }
        }
    }

    pub(crate) fn check(&self) -> Result<(), SchemeConfigError> {
        match &self.kind {
            RangeKind::Literal(digits) => {
                if digits.is_empty() {
                    return Err(SchemeConfigError::EmptyPrefix);
                }
                if digits.iter().any(|&d| d > 9) {
                    return Err(SchemeConfigError::NonDigitPrefix {
                        range: self.to_string(),
                    });
                }
            }
            RangeKind::Interval { low, high, width } => {
                if *width == 0 {
                    return Err(SchemeConfigError::EmptyPrefix);
                }
                if low > high {
                    return Err(SchemeConfigError::InvertedInterval {
                        low: *low,
                        high: *high,
                    });
                }
            }
        }

        if self.width() > MAX_CARD_DIGITS {
            return Err(SchemeConfigError::PrefixTooLong {
                width: self.width(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for PrefixRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RangeKind::Literal(digits) => {
                for &d in digits {
                    write!(f, "{}", d)?;
                }
                Ok(())
            }
            RangeKind::Interval { low, high, width } => {
                write!(f, "{:0width$}-{}", low, high, width = *width)
            }
        }
    }
}

fn parse_digits(text: &str) -> Result<Vec<u8>, SchemeConfigError> {
    if text.is_empty() {
        return Err(SchemeConfigError::EmptyPrefix);
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SchemeConfigError::NonDigitPrefix {
            range: text.to_string(),
        });
    }
    if text.len() > MAX_CARD_DIGITS {
        return Err(SchemeConfigError::PrefixTooLong { width: text.len() });
    }
    Ok(text.bytes().map(|b| b - b'0').collect())
}

fn parse_bound(text: &str) -> Result<u64, SchemeConfigError> {
    text.parse::<u64>()
        .map_err(|_| SchemeConfigError::MalformedRange {
            range: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> Vec<u8> {
        s.bytes().map(|b| b - b'0').collect()
    }

    #[test]
    fn test_parse_literal() {
        let range = PrefixRange::parse("34").unwrap();
        assert!(!range.is_interval());
        assert_eq!(range.width(), 2);
        assert_eq!(range.to_string(), "34");
    }

    #[test]
    fn test_parse_interval() {
        let range = PrefixRange::parse("56-58").unwrap();
        assert!(range.is_interval());
        assert_eq!(range.width(), 2);
        assert_eq!(range.to_string(), "56-58");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(PrefixRange::parse("").unwrap_err(), SchemeConfigError::EmptyPrefix);
        assert!(matches!(
            PrefixRange::parse("1-2-3").unwrap_err(),
            SchemeConfigError::MalformedRange { .. }
        ));
        assert!(matches!(
            PrefixRange::parse("-5").unwrap_err(),
            SchemeConfigError::MalformedRange { .. }
        ));
        assert!(matches!(
            PrefixRange::parse("5-").unwrap_err(),
            SchemeConfigError::MalformedRange { .. }
        ));
        assert!(matches!(
            PrefixRange::parse("a1-55").unwrap_err(),
            SchemeConfigError::NonDigitPrefix { .. }
        ));
        assert!(matches!(
            PrefixRange::parse(" 4").unwrap_err(),
            SchemeConfigError::NonDigitPrefix { .. }
        ));
        assert_eq!(
            PrefixRange::parse("2720-2221").unwrap_err(),
            SchemeConfigError::InvertedInterval {
                low: 2720,
                high: 2221
            }
        );
        assert_eq!(
            PrefixRange::parse(&"1".repeat(20)).unwrap_err(),
            SchemeConfigError::PrefixTooLong { width: 20 }
        );
    }

    #[test]
    fn test_literal_matches() {
        let range = PrefixRange::parse("37").unwrap();
        assert_eq!(range.matches(&digits("378282246310005")), Some(true));
        assert_eq!(range.matches(&digits("348282246310005")), Some(false));
        assert_eq!(range.matches(&digits("3")), Some(false));
    }

    #[test]
    fn test_interval_matches_bounds() {
        let range = PrefixRange::parse("2221-2720").unwrap();
        assert_eq!(range.matches(&digits("2221000000000000")), Some(true));
        assert_eq!(range.matches(&digits("2720999999999999")), Some(true));
        assert_eq!(range.matches(&digits("2220999999999999")), Some(false));
        assert_eq!(range.matches(&digits("2721000000000000")), Some(false));
    }

    #[test]
    fn test_interval_wider_than_input() {
        let range = PrefixRange::parse("3528-3589").unwrap();
        assert_eq!(range.matches(&digits("353")), None);
    }

    #[test]
    fn test_leading_zero_width() {
        let range = PrefixRange::parse("05-07").unwrap();
        assert_eq!(range.width(), 2);
        assert_eq!(range.to_string(), "05-07");
        assert_eq!(range.lowest_prefix(), vec![0, 5]);
        assert_eq!(range.matches(&digits("0612")), Some(true));
    }

    #[test]
    fn test_lowest_prefix() {
        assert_eq!(PrefixRange::parse("4").unwrap().lowest_prefix(), vec![4]);
        assert_eq!(
            PrefixRange::parse("3528-3589").unwrap().lowest_prefix(),
            vec![3, 5, 2, 8]
        );
    }

    #[test]
    fn test_unchecked_constructors_are_checked_later() {
        assert!(PrefixRange::exact(&[3, 4]).check().is_ok());
        assert_eq!(PrefixRange::exact(&[]).check().unwrap_err(), SchemeConfigError::EmptyPrefix);
        assert!(matches!(
            PrefixRange::exact(&[1, 12]).check().unwrap_err(),
            SchemeConfigError::NonDigitPrefix { .. }
        ));
        assert_eq!(
            PrefixRange::between(58, 56, 2).check().unwrap_err(),
            SchemeConfigError::InvertedInterval { low: 58, high: 56 }
        );
    }
}
