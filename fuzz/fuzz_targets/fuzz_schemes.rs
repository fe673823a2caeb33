//! Fuzz target for JSON scheme tables.
//!
//! Any table the loader accepts must classify without configuration defects.

#![no_main]

use card_validator::scheme::JsonSchemeLoader;
use card_validator::{CardNumber, ErrorKind};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(table) = JsonSchemeLoader::parse(data) else {
        return;
    };

    for length in 12..=19 {
        for first in 0..10u8 {
            let mut digits = vec![first; length];
            digits[length - 1] = 9 - first;
            let Ok(card) = CardNumber::from_digits(&digits) else {
                continue;
            };
            if let Err(err) = card_validator::classify::classify(&card, &table) {
                assert_ne!(err.kind(), ErrorKind::ConfigurationDefect);
            }
        }
    }
});
