//! Scheme classification.
//!
//! Walks a [`SchemeTable`] in order and returns the first scheme whose
//! length set and prefix ranges accept the card number.

use crate::card::CardNumber;
use crate::error::ValidationError;
use crate::scheme::{SchemeDefinition, SchemeTable};

/// Classifies a structurally valid card number.
///
/// # Errors
///
/// * `UnknownScheme` if no scheme in the table matches.
/// * `ConfigurationDefect` if a scheme's range cannot be applied to the
///   card (only possible with an unchecked table).
///
/// # Example
///
/// ```
/// use card_validator::{card::CardNumber, classify::classify, scheme::SchemeTable};
///
/// let table = SchemeTable::canonical();
/// let card = CardNumber::parse("3530111333300000").unwrap();
/// assert_eq!(classify(&card, &table).unwrap().name(), "JCB");
/// ```
pub fn classify<'t>(
    card: &CardNumber,
    table: &'t SchemeTable,
) -> Result<&'t SchemeDefinition, ValidationError> {
    for scheme in table {
        if scheme.matches(card.digits())? {
            tracing::trace!(card = %card, scheme = scheme.name(), "scheme matched");
            return Ok(scheme);
        }
    }

    tracing::trace!(card = %card, "no scheme matched");
    Err(ValidationError::UnknownScheme)
}

/// Classifies a raw input, re-running the structural checks first.
///
/// Use this when calling the classifier without the validator façade.
pub fn classify_str<'t>(
    raw: &str,
    table: &'t SchemeTable,
) -> Result<&'t SchemeDefinition, ValidationError> {
    let card = CardNumber::parse(raw)?;
    classify(&card, table)
}
