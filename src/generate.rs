//! Test card number generation.
//!
//! Generated numbers pass the Luhn check and classify to the scheme they
//! were generated for (as long as no earlier scheme in the table overlaps).
//! They are not connected to real accounts.
//!
//! # Example
//!
//! ```
//! use card_validator::generate::generate_for_scheme_deterministic;
//! use card_validator::{classify_scheme, is_valid, scheme::SchemeTable};
//!
//! let table = SchemeTable::canonical();
//! let jcb = table.get("JCB").unwrap();
//!
//! let number = generate_for_scheme_deterministic(jcb);
//! assert_eq!(number, "3528000000000007");
//! assert!(is_valid(&number));
//! assert_eq!(classify_scheme(&number).unwrap(), "JCB");
//! ```

use crate::luhn;
use crate::scheme::SchemeDefinition;

#[cfg(feature = "generate")]
use rand::Rng;

/// Lowest prefix of the scheme's first range and its shortest length.
fn template(scheme: &SchemeDefinition) -> (Vec<u8>, usize) {
    let prefix = scheme
        .prefix_ranges()
        .first()
        .map(|range| range.lowest_prefix())
        .unwrap_or_default();
    let length = scheme.allowed_lengths().first().copied().unwrap_or(0);
    (prefix, length)
}

fn complete(mut digits: Vec<u8>, length: usize) -> String {
    digits.truncate(length.saturating_sub(1));
    while digits.len() + 1 < length {
        digits.push(0);
    }
    digits.push(luhn::generate_check_digit(&digits));
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}

/// Generates a number for the scheme deterministically.
///
/// Uses the lowest prefix of the first range, the shortest allowed length,
/// zeros in the middle and a valid check digit.
pub fn generate_for_scheme_deterministic(scheme: &SchemeDefinition) -> String {
    let (prefix, length) = template(scheme);
    complete(prefix, length)
}

/// Generates a number with the given prefix and length deterministically.
///
/// Non-digit characters of `prefix` are ignored. A prefix at least as long
/// as `length` is cut to leave room for the check digit.
///
/// # Example
///
/// ```
/// use card_validator::generate::generate_with_prefix_deterministic;
///
/// let number = generate_with_prefix_deterministic("4012", 16);
/// assert_eq!(number.len(), 16);
/// assert!(number.starts_with("4012"));
/// assert!(card_validator::is_valid(&number));
/// ```
pub fn generate_with_prefix_deterministic(prefix: &str, length: usize) -> String {
    complete(prefix_digits(prefix), length)
}

fn prefix_digits(prefix: &str) -> Vec<u8> {
    prefix
        .chars()
        .filter_map(|c| c.to_digit(10).map(|d| d as u8))
        .collect()
}

/// Generates a random number for the scheme.
///
/// The prefix is the lowest one of a randomly chosen range and the length
/// is a randomly chosen allowed length.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_for_scheme(scheme: &SchemeDefinition) -> String {
    let mut rng = rand::thread_rng();
    let ranges = scheme.prefix_ranges();
    let lengths = scheme.allowed_lengths();
    if ranges.is_empty() || lengths.is_empty() {
        return String::new();
    }

    let prefix = ranges[rng.gen_range(0..ranges.len())].lowest_prefix();
    let length = lengths[rng.gen_range(0..lengths.len())];
    fill_random(prefix, length, &mut rng)
}

/// Generates a random number with the given prefix and length.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_with_prefix(prefix: &str, length: usize) -> String {
    let mut rng = rand::thread_rng();
    generate_with_rng(prefix, length, &mut rng)
}

/// Generates a number using a provided RNG, for reproducible runs with a
/// seeded generator.
///
/// Requires the `generate` feature.
#[cfg(feature = "generate")]
pub fn generate_with_rng<R: Rng>(prefix: &str, length: usize, rng: &mut R) -> String {
    fill_random(prefix_digits(prefix), length, rng)
}

#[cfg(feature = "generate")]
fn fill_random<R: Rng>(mut digits: Vec<u8>, length: usize, rng: &mut R) -> String {
    digits.truncate(length.saturating_sub(1));
    while digits.len() + 1 < length {
        digits.push(rng.gen_range(0..10));
    }
    complete(digits, length)
}
