//! Masking for display and logging.
//!
//! Only the last four digits of a card number are ever shown. Everything
//! the crate prints or logs about a card goes through this module.

use crate::card::CardNumber;

/// Masks a card number showing only the last 4 digits.
///
/// Masked positions are grouped by four: `****-****-****-1881`.
///
/// # Example
///
/// ```
/// use card_validator::{card::CardNumber, mask};
///
/// let card = CardNumber::parse("4012888888881881").unwrap();
/// assert_eq!(mask::mask_card(&card), "****-****-****-1881");
///
/// let amex = CardNumber::parse("378282246310005").unwrap();
/// assert_eq!(mask::mask_card(&amex), "****-****-***0005");
/// ```
pub fn mask_card(card: &CardNumber) -> String {
    group_masked(card.len().saturating_sub(4), &card.last_four())
}

/// Masks an arbitrary raw input for diagnostics.
///
/// Spaces are dropped and every remaining character but the last four is
/// replaced by `*`. Inputs of four characters or fewer are fully masked, so
/// short fragments are never echoed back.
///
/// # Example
///
/// ```
/// use card_validator::mask::mask_input;
///
/// assert_eq!(mask_input("4012 8888 8888 1881"), "************1881");
/// assert_eq!(mask_input("4012X88888881881"), "************1881");
/// assert_eq!(mask_input("123"), "***");
/// ```
pub fn mask_input(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().filter(|&c| c != ' ').collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible = chars.len() - 4;
    let mut result = String::with_capacity(chars.len());
    for (i, c) in chars.into_iter().enumerate() {
        result.push(if i < visible { '*' } else { c });
    }
    result
}

fn group_masked(masked_count: usize, tail: &str) -> String {
    let mut result = String::with_capacity(masked_count + masked_count / 4 + tail.len());

    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count > 0 && masked_count % 4 == 0 {
        result.push('-');
    }

    result.push_str(tail);
    result
}
