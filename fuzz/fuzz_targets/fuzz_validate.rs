//! Fuzz target for the validator façade.
//!
//! Both operations must never panic and must agree on structural errors.

#![no_main]

use card_validator::{classify_scheme, mask, validate_number, CardNumber};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let validated = validate_number(data);
    let classified = classify_scheme(data);

    if let Err(err) = &validated {
        assert_eq!(classified.as_ref().err(), Some(err), "structural errors must match");
    }
    if validated.is_ok() {
        assert!(
            classified.as_ref().map_or_else(|e| !e.is_structural(), |_| true),
            "well-formed input reported a structural error"
        );
    }

    if let Ok(card) = CardNumber::parse(data) {
        assert!(!card.to_string().contains(&card.reveal()));
    }
    let _ = mask::mask_input(data);
});
