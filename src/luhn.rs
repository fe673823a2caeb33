//! Luhn checksum.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) catches
//! single-digit transcription errors and most adjacent transpositions.
//! All functions here work on digit values (0-9), not ASCII bytes.

/// Doubled digit, reduced by 9 when the doubled value exceeds 9.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a digit sequence using the Luhn algorithm.
///
/// Digits are walked from the rightmost (check digit, not doubled) to the
/// leftmost, doubling every second one. The number is valid when the sum of
/// the transformed digits is a multiple of 10.
///
/// An empty slice is never valid.
///
/// # Example
///
/// ```
/// use card_validator::luhn::validate;
///
/// let digits = [5, 2, 3, 7, 2, 5, 1, 6, 2, 4, 7, 7, 8, 1, 3, 3];
/// assert!(validate(&digits));
///
/// let flipped = [5, 2, 3, 7, 2, 5, 1, 6, 2, 4, 7, 7, 8, 1, 3, 2];
/// assert!(!validate(&flipped));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) for a digit sequence.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    let mut sum: u32 = 0;
    let mut doubled = false;

    for &digit in digits.iter().rev() {
        sum += if doubled {
            DOUBLE_TABLE[digit as usize] as u32
        } else {
            digit as u32
        };
        doubled = !doubled;
    }

    sum
}

/// Computes the check digit to append to `digits` so the result is valid.
///
/// # Example
///
/// ```
/// use card_validator::luhn::generate_check_digit;
///
/// let partial = [4, 0, 1, 2, 8, 8, 8, 8, 8, 8, 8, 8, 1, 8, 8];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every digit moves one place left once the check digit is appended,
    // so the rightmost one here is the first to be doubled.
    let mut sum: u32 = 0;
    let mut doubled = true;

    for &digit in digits.iter().rev() {
        sum += if doubled {
            DOUBLE_TABLE[digit as usize] as u32
        } else {
            digit as u32
        };
        doubled = !doubled;
    }

    ((10 - (sum % 10)) % 10) as u8
}
