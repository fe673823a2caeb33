//! Property-based tests using proptest.
//!
//! Invariants that must hold for every input, not just the fixtures.

use card_validator::{
    classify_scheme, generate::generate_with_prefix_deterministic, is_valid, luhn, mask,
    validate_number, ErrorKind, ValidationError,
};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit string of a given length.
fn digit_string(len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generates a random digit string of a length within range.
fn digit_string_range(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    range.prop_flat_map(digit_string)
}

/// Inserts runs of spaces between the characters of `card`.
fn with_spaces(card: String) -> impl Strategy<Value = String> {
    let len = card.len();
    proptest::collection::vec(prop_oneof![Just(""), Just(" "), Just("  ")], len + 1).prop_map(
        move |gaps| {
            let mut result = String::new();
            for (i, c) in card.chars().enumerate() {
                result.push_str(gaps[i]);
                result.push(c);
            }
            result.push_str(gaps[len]);
            result
        },
    )
}

/// A printable ASCII character that is neither a digit nor a space.
fn non_digit() -> impl Strategy<Value = char> {
    prop::char::range('!', '~').prop_filter("must not be a digit", |c| !c.is_ascii_digit())
}

// =============================================================================
// LENGTH AND CHARACTER PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn digit_strings_in_range_always_validate(card in digit_string_range(12..=19)) {
        prop_assert!(validate_number(&card).is_ok());
    }

    #[test]
    fn digit_strings_out_of_range_are_rejected(
        card in prop_oneof![digit_string_range(0..=11), digit_string_range(20..=40)]
    ) {
        prop_assert_eq!(
            validate_number(&card),
            Err(ValidationError::OutOfRange { length: card.len() })
        );
        prop_assert_eq!(
            classify_scheme(&card),
            Err(ValidationError::OutOfRange { length: card.len() })
        );
    }

    #[test]
    fn any_non_digit_is_rejected_regardless_of_length(
        prefix in digit_string_range(0..=25),
        bad in non_digit(),
        suffix in digit_string_range(0..=25)
    ) {
        let input = format!("{}{}{}", prefix, bad, suffix);

        let err = validate_number(&input).unwrap_err();
        prop_assert_eq!(
            err,
            ValidationError::InvalidCharacters { position: prefix.len(), character: bad }
        );
        prop_assert_eq!(
            classify_scheme(&input).unwrap_err().kind(),
            ErrorKind::InvalidCharacters
        );
    }
}

// =============================================================================
// CLASSIFICATION PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn classification_is_idempotent(input in ".{0,24}") {
        prop_assert_eq!(classify_scheme(&input), classify_scheme(&input));
    }

    #[test]
    fn structural_errors_come_before_unknown_scheme(input in ".{0,24}") {
        if let Err(err) = validate_number(&input) {
            prop_assert_eq!(classify_scheme(&input), Err(err));
        }
    }

    #[test]
    fn spaces_are_ignored(spaced in digit_string_range(10..=21).prop_flat_map(with_spaces)) {
        let compact: String = spaced.chars().filter(|&c| c != ' ').collect();
        prop_assert_eq!(validate_number(&spaced), validate_number(&compact));
        prop_assert_eq!(classify_scheme(&spaced), classify_scheme(&compact));
    }
}

// =============================================================================
// LUHN PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn generated_numbers_pass_luhn(
        prefix in digit_string_range(1..=6),
        length in 12usize..=19
    ) {
        let number = generate_with_prefix_deterministic(&prefix, length);
        prop_assert_eq!(number.len(), length);
        prop_assert!(is_valid(&number));
    }

    #[test]
    fn single_digit_change_breaks_luhn(
        card in digit_string_range(11..=18),
        position in any::<prop::sample::Index>(),
        delta in 1u8..=9
    ) {
        let mut digits: Vec<u8> = card.bytes().map(|b| b - b'0').collect();
        digits.push(luhn::generate_check_digit(&digits));
        prop_assert!(luhn::validate(&digits));

        let i = position.index(digits.len());
        digits[i] = (digits[i] + delta) % 10;
        prop_assert!(!luhn::validate(&digits));
    }

    #[test]
    fn masked_input_shows_at_most_last_four(card in digit_string_range(0..=24)) {
        let masked = mask::mask_input(&card);
        prop_assert_eq!(masked.chars().count(), card.len());
        let visible = masked.chars().filter(|&c| c != '*').count();
        prop_assert!(visible <= 4);
        if card.len() > 4 {
            prop_assert!(masked.ends_with(&card[card.len() - 4..]));
        }
    }
}
