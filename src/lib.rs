//! # card_validator
//!
//! Payment card number validation and scheme classification.
//!
//! ## Features
//!
//! - Luhn checksum validation of 12 to 19 digit card numbers
//! - Scheme classification against an ordered prefix/length table
//! - Custom scheme tables, optionally loaded from JSON
//! - Batch validation of comma-separated lists
//! - Card number masking for display and logs
//! - An interactive shell and a command-line tool
//!
//! ## Quick Start
//!
//! ```rust
//! use card_validator::{classify_scheme, validate_number, ValidationError};
//!
//! // Spaces are ignored
//! assert_eq!(validate_number("5237 2516 2477 8133"), Ok(true));
//! assert_eq!(validate_number("5237251624778132"), Ok(false));
//!
//! assert_eq!(classify_scheme("378282246310005").unwrap(), "American Express");
//! assert_eq!(classify_scheme("9999888877776666"), Err(ValidationError::UnknownScheme));
//! ```
//!
//! ## Validators
//!
//! Collaborators depend on the [`Validator`] trait. [`CardValidator`] is
//! built over an explicit, shared [`SchemeTable`]:
//!
//! ```rust
//! use std::sync::Arc;
//! use card_validator::{CardValidator, SchemeDefinition, SchemeTable, Validator};
//!
//! let store = SchemeDefinition::from_text("Store Card", &["9999"], [16]).unwrap();
//! let table = SchemeTable::new(vec![store]).unwrap();
//! let validator = CardValidator::new(Arc::new(table));
//!
//! assert_eq!(validator.classify_scheme("9999 8888 7777 6666").unwrap(), "Store Card");
//! ```
//!
//! ## Error Kinds
//!
//! ```rust
//! use card_validator::{validate_number, ErrorKind};
//!
//! let err = validate_number("4012-8888-8888-1881").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidCharacters);
//! assert_eq!(err.to_string(), "card number must contain only digits (found '-' at position 4)");
//! ```
//!
//! ## Batch Processing
//!
//! ```rust
//! use card_validator::{BatchValidator, CardValidator};
//!
//! let validator = CardValidator::default();
//! let reports = BatchValidator::new(&validator).validate_list("4012888888881881,123");
//!
//! assert_eq!(
//!     reports[0].to_string(),
//!     "Card ************1881 validation is: true and card scheme is Visa"
//! );
//! assert!(!reports[1].is_valid());
//! ```
//!
//! ## Supported Schemes
//!
//! Checked in this order; the first match wins.
//!
//! | Scheme | Prefix | Length |
//! |--------|--------|--------|
//! | American Express | 34, 37 | 15 |
//! | JCB | 3528-3589 | 16-19 |
//! | Maestro | 50, 56-58, 6 | 12-19 |
//! | Visa | 4 | 13, 16, 19 |
//! | MasterCard | 2221-2720, 51-55 | 16 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `schemes-json` | Load scheme tables from JSON |
//! | `parallel` | Rayon-based batch validation |
//! | `generate` | Random test card generation |
//! | `cli` | Interactive shell and `cardvalidator` binary |
//!
//! ## Security
//!
//! - Card digits live in fixed-size arrays, zeroized on drop
//! - `Debug` and `Display` of [`CardNumber`] show masked numbers only
//! - Log events carry masked numbers only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod card;
pub mod classify;
pub mod error;
pub mod generate;
pub mod luhn;
pub mod mask;
pub mod scheme;
#[cfg(feature = "cli")]
pub mod shell;
pub mod stub;
pub mod validate;

// Re-export main types at crate root
pub use batch::BatchValidator;
pub use card::{CardNumber, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use error::{ErrorKind, SchemeConfigError, ValidationError};
pub use scheme::{PrefixRange, SchemeDefinition, SchemeTable};
pub use validate::{classify_scheme, is_valid, validate_number, CardValidator, Validator};
