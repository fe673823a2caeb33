//! The transient card number value.
//!
//! A `CardNumber` is the normalized, structurally valid form of a raw input:
//! spaces removed, ASCII digits only, 12 to 19 digits long. It lives for the
//! duration of one validation call.

use std::fmt;
use zeroize::Zeroize;

use crate::error::ValidationError;
use crate::luhn;

/// Maximum number of digits in a card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Minimum number of digits in a card number.
pub const MIN_CARD_DIGITS: usize = 12;

/// A structurally valid card number.
///
/// Digits are kept in a fixed-size array that is zeroed on drop. `Debug`
/// and `Display` only ever show the masked form.
#[derive(Clone)]
pub struct CardNumber {
    /// Digit values (0-9), not ASCII.
    digits: [u8; MAX_CARD_DIGITS],
    /// Number of digits in use.
    len: u8,
}

impl CardNumber {
    /// Normalizes and checks a raw input.
    ///
    /// Space characters (U+0020) are removed. Any other non-digit yields
    /// `InvalidCharacters`, whatever the length. Then a length outside
    /// `[12, 19]` yields `OutOfRange`.
    ///
    /// # Example
    ///
    /// ```
    /// use card_validator::card::CardNumber;
    ///
    /// let card = CardNumber::parse("4012 8888 8888 1881").unwrap();
    /// assert_eq!(card.len(), 16);
    /// assert!(card.passes_luhn());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let mut digits = [0u8; MAX_CARD_DIGITS];
        let mut count = 0usize;

        for (position, c) in raw.chars().filter(|&c| c != ' ').enumerate() {
            if !c.is_ascii_digit() {
                digits.zeroize();
                return Err(ValidationError::InvalidCharacters {
                    position,
                    character: c,
                });
            }
            // Past the maximum we only keep counting for the error payload.
            if count < MAX_CARD_DIGITS {
                digits[count] = (c as u8) - b'0';
            }
            count += 1;
        }

        if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&count) {
            digits.zeroize();
            return Err(ValidationError::OutOfRange { length: count });
        }

        Ok(Self {
            digits,
            len: count as u8,
        })
    }

    /// Builds a card number from digit values (0-9).
    ///
    /// Applies the same length rule as [`CardNumber::parse`]. A value above 9
    /// is reported as `InvalidCharacters`.
    pub fn from_digits(values: &[u8]) -> Result<Self, ValidationError> {
        if let Some(position) = values.iter().position(|&d| d > 9) {
            return Err(ValidationError::InvalidCharacters {
                position,
                character: char::from_u32(values[position] as u32).unwrap_or('?'),
            });
        }

        let count = values.len();
        if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&count) {
            return Err(ValidationError::OutOfRange { length: count });
        }

        let mut digits = [0u8; MAX_CARD_DIGITS];
        digits[..count].copy_from_slice(values);

        Ok(Self {
            digits,
            len: count as u8,
        })
    }

    /// Number of digits.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Always false: a card number has at least 12 digits.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The digit values (0-9).
    #[inline]
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len as usize]
    }

    /// Runs the Luhn checksum over the digits.
    #[inline]
    pub fn passes_luhn(&self) -> bool {
        luhn::validate(self.digits())
    }

    /// Last four digits, safe for display.
    pub fn last_four(&self) -> String {
        let digits = self.digits();
        digits[digits.len().saturating_sub(4)..]
            .iter()
            .map(|&d| (b'0' + d) as char)
            .collect()
    }

    /// The masked form, e.g. `****-****-****-1881`.
    #[inline]
    pub fn masked(&self) -> String {
        crate::mask::mask_card(self)
    }

    /// The full number as a string.
    ///
    /// Never log the result. Use [`CardNumber::masked`] for display.
    pub fn reveal(&self) -> String {
        self.digits().iter().map(|&d| (b'0' + d) as char).collect()
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardNumber")
            .field("number", &self.masked())
            .field("len", &self.len)
            .finish()
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl Drop for CardNumber {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_strips_spaces() {
        let spaced = CardNumber::parse("4012 8888 8888 1881").unwrap();
        let plain = CardNumber::parse("4012888888881881").unwrap();
        assert_eq!(spaced.digits(), plain.digits());
        assert_eq!(spaced.len(), 16);
    }

    #[test]
    fn test_parse_length_bounds() {
        assert!(CardNumber::parse("123456789012").is_ok());
        assert!(CardNumber::parse("1234567890123456789").is_ok());

        assert_eq!(
            CardNumber::parse("12345678901").unwrap_err(),
            ValidationError::OutOfRange { length: 11 }
        );
        assert_eq!(
            CardNumber::parse("12345678901234567890").unwrap_err(),
            ValidationError::OutOfRange { length: 20 }
        );
        assert_eq!(
            CardNumber::parse("").unwrap_err(),
            ValidationError::OutOfRange { length: 0 }
        );
        assert_eq!(
            CardNumber::parse("     ").unwrap_err(),
            ValidationError::OutOfRange { length: 0 }
        );
    }

    #[test]
    fn test_parse_counts_long_inputs() {
        let long = "1".repeat(40);
        assert_eq!(
            CardNumber::parse(&long).unwrap_err(),
            ValidationError::OutOfRange { length: 40 }
        );
    }

    #[test]
    fn test_parse_rejects_characters_before_length() {
        let err = CardNumber::parse("52h7251624f78133").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidCharacters {
                position: 2,
                character: 'h'
            }
        );

        // Too short and not digits: the character problem wins
        assert_eq!(
            CardNumber::parse("abc").unwrap_err().kind(),
            ErrorKind::InvalidCharacters
        );

        // Tabs and dashes are not stripped
        assert_eq!(
            CardNumber::parse("4012\t8888 8888 1881").unwrap_err().kind(),
            ErrorKind::InvalidCharacters
        );
        assert_eq!(
            CardNumber::parse("4012-8888-8888-1881").unwrap_err().kind(),
            ErrorKind::InvalidCharacters
        );
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        // Arabic-Indic digits are numeric but not ASCII
        assert_eq!(
            CardNumber::parse("٤٠١٢٨٨٨٨٨٨٨٨١٨٨١").unwrap_err().kind(),
            ErrorKind::InvalidCharacters
        );
    }

    #[test]
    fn test_from_digits() {
        let card = CardNumber::from_digits(&[3, 7, 8, 2, 8, 2, 2, 4, 6, 3, 1, 0, 0, 0, 5]).unwrap();
        assert_eq!(card.reveal(), "378282246310005");

        assert_eq!(
            CardNumber::from_digits(&[1; 11]).unwrap_err(),
            ValidationError::OutOfRange { length: 11 }
        );
        assert_eq!(
            CardNumber::from_digits(&[1, 2, 10, 4]).unwrap_err().kind(),
            ErrorKind::InvalidCharacters
        );
    }

    #[test]
    fn test_luhn() {
        assert!(CardNumber::parse("5237251624778133").unwrap().passes_luhn());
        assert!(!CardNumber::parse("5237251624778132").unwrap().passes_luhn());
    }

    #[test]
    fn test_last_four() {
        let card = CardNumber::parse("4012888888881881").unwrap();
        assert_eq!(card.last_four(), "1881");
    }

    #[test]
    fn test_debug_and_display_are_masked() {
        let card = CardNumber::parse("4012888888881881").unwrap();

        let debug = format!("{:?}", card);
        assert!(!debug.contains("4012888888881881"));
        assert!(debug.contains("1881"));

        let display = card.to_string();
        assert!(!display.contains("4012888888881881"));
        assert!(display.contains("****"));
    }

    #[test]
    fn test_card_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardNumber>();
    }
}
