//! Error types for card validation and scheme configuration.
//!
//! `ValidationError` is what callers of the validator see. `SchemeConfigError`
//! describes a malformed scheme table; it only reaches callers wrapped in
//! `ValidationError::ConfigurationDefect` or directly from table construction.

use std::fmt;

use crate::card::{MAX_CARD_DIGITS, MIN_CARD_DIGITS};

/// Errors returned by the validator façade and the scheme classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The normalized input length is outside `[12, 19]`.
    OutOfRange {
        /// The observed length after space removal.
        length: usize,
    },

    /// The normalized input contains something other than ASCII digits.
    InvalidCharacters {
        /// Position of the first offending character in the normalized input.
        position: usize,
        /// The offending character.
        character: char,
    },

    /// The input is structurally valid but matches no configured scheme.
    UnknownScheme,

    /// The scheme table itself is malformed.
    ///
    /// Never produced by the canonical table.
    ConfigurationDefect(SchemeConfigError),
}

/// The kind of a [`ValidationError`], without payload.
///
/// Compare errors by kind when the diagnostic payload does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ValidationError::OutOfRange`].
    OutOfRange,
    /// See [`ValidationError::InvalidCharacters`].
    InvalidCharacters,
    /// See [`ValidationError::UnknownScheme`].
    UnknownScheme,
    /// See [`ValidationError::ConfigurationDefect`].
    ConfigurationDefect,
}

impl ValidationError {
    /// Returns the kind of this error.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::InvalidCharacters { .. } => ErrorKind::InvalidCharacters,
            Self::UnknownScheme => ErrorKind::UnknownScheme,
            Self::ConfigurationDefect(_) => ErrorKind::ConfigurationDefect,
        }
    }

    /// Returns true for errors caused by the shape of the input
    /// (length or characters), as opposed to classification failures.
    #[inline]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange { .. } | Self::InvalidCharacters { .. }
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { length } => {
                write!(f, "card number out of range: got {} characters", length)
            }

            Self::InvalidCharacters {
                position,
                character,
            } => {
                write!(
                    f,
                    "card number must contain only digits (found '{}' at position {})",
                    character.escape_default(),
                    position
                )
            }

            Self::UnknownScheme => write!(f, "unknown card scheme"),

            Self::ConfigurationDefect(inner) => {
                write!(f, "scheme configuration defect: {}", inner)
            }
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigurationDefect(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<SchemeConfigError> for ValidationError {
    fn from(err: SchemeConfigError) -> Self {
        Self::ConfigurationDefect(err)
    }
}

/// A malformed scheme definition or scheme table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeConfigError {
    /// A scheme was given an empty name.
    EmptyName,

    /// A prefix range was given as an empty string.
    EmptyPrefix,

    /// A prefix literal or interval bound contains a non-digit.
    NonDigitPrefix {
        /// The offending range text.
        range: String,
    },

    /// A range has more than one `-` or an empty bound.
    MalformedRange {
        /// The offending range text.
        range: String,
    },

    /// A numeric interval has `low > high`.
    InvertedInterval {
        /// Lower bound.
        low: u64,
        /// Upper bound.
        high: u64,
    },

    /// A prefix is wider than any card number can be.
    PrefixTooLong {
        /// Width of the prefix in digits.
        width: usize,
    },

    /// A scheme has no allowed lengths.
    NoAllowedLengths {
        /// Scheme name.
        scheme: String,
    },

    /// A scheme allows a length no card number can have.
    LengthOutOfBounds {
        /// Scheme name.
        scheme: String,
        /// The unreachable length.
        length: usize,
    },

    /// A prefix range reads more digits than the scheme's shortest card has.
    RangeWiderThanCard {
        /// Scheme name.
        scheme: String,
        /// Width of the range in digits.
        width: usize,
        /// Shortest allowed length of the scheme.
        min_length: usize,
    },

    /// A scheme has no prefix ranges.
    NoPrefixRanges {
        /// Scheme name.
        scheme: String,
    },

    /// The table has no schemes.
    EmptyTable,

    /// Two schemes share a name.
    DuplicateScheme {
        /// The repeated name.
        scheme: String,
    },

    /// The scheme source could not be read.
    Io(String),

    /// The scheme source could not be parsed.
    Parse(String),
}

impl fmt::Display for SchemeConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "scheme name is empty"),
            Self::EmptyPrefix => write!(f, "prefix range is empty"),
            Self::NonDigitPrefix { range } => {
                write!(f, "prefix range {:?} contains non-digit characters", range)
            }
            Self::MalformedRange { range } => {
                write!(f, "invalid range format: {:?}", range)
            }
            Self::InvertedInterval { low, high } => {
                write!(f, "inverted prefix interval: {} > {}", low, high)
            }
            Self::PrefixTooLong { width } => {
                write!(
                    f,
                    "prefix of {} digits is longer than the maximum card length {}",
                    width, MAX_CARD_DIGITS
                )
            }
            Self::NoAllowedLengths { scheme } => {
                write!(f, "scheme {:?} has no allowed lengths", scheme)
            }
            Self::LengthOutOfBounds { scheme, length } => {
                write!(
                    f,
                    "scheme {:?} allows length {}, outside {}-{}",
                    scheme, length, MIN_CARD_DIGITS, MAX_CARD_DIGITS
                )
            }
            Self::RangeWiderThanCard {
                scheme,
                width,
                min_length,
            } => {
                write!(
                    f,
                    "scheme {:?} has a {}-digit prefix range but allows {}-digit cards",
                    scheme, width, min_length
                )
            }
            Self::NoPrefixRanges { scheme } => {
                write!(f, "scheme {:?} has no prefix ranges", scheme)
            }
            Self::EmptyTable => write!(f, "scheme table is empty"),
            Self::DuplicateScheme { scheme } => {
                write!(f, "scheme {:?} is defined more than once", scheme)
            }
            Self::Io(msg) => write!(f, "could not read scheme table: {}", msg),
            Self::Parse(msg) => write!(f, "could not parse scheme table: {}", msg),
        }
    }
}

impl std::error::Error for SchemeConfigError {}

impl From<std::io::Error> for SchemeConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ValidationError::OutOfRange { length: 11 }.to_string(),
            "card number out of range: got 11 characters"
        );

        assert_eq!(
            ValidationError::InvalidCharacters {
                position: 2,
                character: 'h'
            }
            .to_string(),
            "card number must contain only digits (found 'h' at position 2)"
        );

        assert_eq!(
            ValidationError::UnknownScheme.to_string(),
            "unknown card scheme"
        );

        assert_eq!(
            ValidationError::ConfigurationDefect(SchemeConfigError::InvertedInterval {
                low: 58,
                high: 56
            })
            .to_string(),
            "scheme configuration defect: inverted prefix interval: 58 > 56"
        );
    }

    #[test]
    fn test_kind_ignores_payload() {
        assert_eq!(
            ValidationError::OutOfRange { length: 3 }.kind(),
            ValidationError::OutOfRange { length: 25 }.kind()
        );
        assert_ne!(
            ValidationError::UnknownScheme.kind(),
            ErrorKind::OutOfRange
        );
    }

    #[test]
    fn test_structural() {
        assert!(ValidationError::OutOfRange { length: 3 }.is_structural());
        assert!(ValidationError::InvalidCharacters {
            position: 0,
            character: 'x'
        }
        .is_structural());
        assert!(!ValidationError::UnknownScheme.is_structural());
    }

    #[test]
    fn test_defect_has_source() {
        use std::error::Error;

        let err = ValidationError::from(SchemeConfigError::EmptyTable);
        assert_eq!(err.kind(), ErrorKind::ConfigurationDefect);
        assert!(err.source().is_some());
        assert!(ValidationError::UnknownScheme.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationError>();
        assert_send_sync::<SchemeConfigError>();
    }
}
