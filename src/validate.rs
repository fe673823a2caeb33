//! The validator façade.
//!
//! [`Validator`] is the capability callers depend on: a Luhn/format check
//! and a scheme lookup over a raw input string. [`CardValidator`] is the
//! production implementation; `crate::stub::StubValidator` is the test
//! double.
//!
//! Both operations normalize the input the same way (spaces removed), and
//! structural errors always come before classification, so a malformed
//! number never reports `UnknownScheme`.

use std::sync::Arc;

use crate::card::CardNumber;
use crate::classify::classify;
use crate::error::ValidationError;
use crate::scheme::SchemeTable;

/// Card number validation and scheme classification.
///
/// Implementations must be pure with respect to their input and safe to
/// share between threads.
pub trait Validator: Send + Sync {
    /// Checks the structure of `raw` and returns its Luhn result.
    ///
    /// `Ok(false)` means the number is well-formed but the checksum fails.
    fn validate_number(&self, raw: &str) -> Result<bool, ValidationError>;

    /// Checks the structure of `raw` and returns the name of its scheme.
    fn classify_scheme(&self, raw: &str) -> Result<String, ValidationError>;
}

impl<V: Validator + ?Sized> Validator for &V {
    fn validate_number(&self, raw: &str) -> Result<bool, ValidationError> {
        (**self).validate_number(raw)
    }

    fn classify_scheme(&self, raw: &str) -> Result<String, ValidationError> {
        (**self).classify_scheme(raw)
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate_number(&self, raw: &str) -> Result<bool, ValidationError> {
        (**self).validate_number(raw)
    }

    fn classify_scheme(&self, raw: &str) -> Result<String, ValidationError> {
        (**self).classify_scheme(raw)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate_number(&self, raw: &str) -> Result<bool, ValidationError> {
        (**self).validate_number(raw)
    }

    fn classify_scheme(&self, raw: &str) -> Result<String, ValidationError> {
        (**self).classify_scheme(raw)
    }
}

/// The production validator, backed by an immutable scheme table.
///
/// # Example
///
/// ```
/// use card_validator::{CardValidator, Validator};
///
/// let validator = CardValidator::default();
/// assert_eq!(validator.validate_number("5237 2516 2477 8133"), Ok(true));
/// assert_eq!(validator.classify_scheme("378282246310005").unwrap(), "American Express");
/// ```
#[derive(Debug, Clone)]
pub struct CardValidator {
    table: Arc<SchemeTable>,
}

impl CardValidator {
    /// Creates a validator over the given table.
    #[inline]
    pub fn new(table: Arc<SchemeTable>) -> Self {
        Self { table }
    }

    /// The scheme table this validator classifies against.
    #[inline]
    pub fn table(&self) -> &SchemeTable {
        &self.table
    }
}

impl Default for CardValidator {
    /// A validator over the shared canonical table.
    fn default() -> Self {
        Self::new(SchemeTable::shared())
    }
}

impl Validator for CardValidator {
    fn validate_number(&self, raw: &str) -> Result<bool, ValidationError> {
        let card = CardNumber::parse(raw)?;
        let valid = card.passes_luhn();
        tracing::debug!(card = %card, valid, "checked card number");
        Ok(valid)
    }

    fn classify_scheme(&self, raw: &str) -> Result<String, ValidationError> {
        let card = CardNumber::parse(raw)?;
        let scheme = classify(&card, &self.table)?;
        tracing::debug!(card = %card, scheme = scheme.name(), "classified card number");
        Ok(scheme.name().to_string())
    }
}

/// Validates a card number against the shared canonical table.
///
/// # Example
///
/// ```
/// use card_validator::validate_number;
///
/// assert_eq!(validate_number("5237251624778133"), Ok(true));
/// assert_eq!(validate_number("5237251624778132"), Ok(false));
/// assert!(validate_number("12345678901").is_err());
/// ```
#[inline]
pub fn validate_number(raw: &str) -> Result<bool, ValidationError> {
    CardValidator::default().validate_number(raw)
}

/// Classifies a card number against the shared canonical table.
///
/// # Example
///
/// ```
/// use card_validator::{classify_scheme, ValidationError};
///
/// assert_eq!(classify_scheme("4012 8888 8888 1881").unwrap(), "Visa");
/// assert_eq!(classify_scheme("9999888877776666"), Err(ValidationError::UnknownScheme));
/// ```
#[inline]
pub fn classify_scheme(raw: &str) -> Result<String, ValidationError> {
    CardValidator::default().classify_scheme(raw)
}

/// Returns true if `raw` is well-formed and passes the Luhn check.
///
/// # Example
///
/// ```
/// use card_validator::is_valid;
///
/// assert!(is_valid("4012 8888 8888 1881"));
/// assert!(!is_valid("4012 8888 8888 1882"));
/// assert!(!is_valid("not a card"));
/// ```
#[inline]
pub fn is_valid(raw: &str) -> bool {
    matches!(validate_number(raw), Ok(true))
}
