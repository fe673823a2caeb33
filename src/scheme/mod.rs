//! Scheme definitions and the ordered scheme table.
//!
//! A scheme (card network) is identified by its prefix ranges and its
//! allowed card lengths. The table is ordered and the classifier takes the
//! first match, so table order decides between overlapping schemes.
//!
//! # Canonical table
//!
//! | # | Scheme | Prefix ranges | Lengths |
//! |---|--------|---------------|---------|
//! | 1 | American Express | 34, 37 | 15 |
//! | 2 | JCB | 3528-3589 | 16-19 |
//! | 3 | Maestro | 50, 56-58, 6 | 12-19 |
//! | 4 | Visa | 4 | 13, 16, 19 |
//! | 5 | MasterCard | 2221-2720, 51-55 | 16 |
//!
//! # Example
//!
//! ```
//! use card_validator::scheme::{SchemeDefinition, SchemeTable};
//!
//! let private_label = SchemeDefinition::from_text("Store Card", &["9912"], [16]).unwrap();
//! let table = SchemeTable::new(vec![private_label]).unwrap();
//! assert_eq!(table.len(), 1);
//!
//! // The built-in table is built once and shared
//! let shared = SchemeTable::shared();
//! assert_eq!(shared.schemes()[0].name(), "American Express");
//! ```

mod range;

#[cfg(feature = "schemes-json")]
mod json;

pub use range::PrefixRange;

#[cfg(feature = "schemes-json")]
pub use json::JsonSchemeLoader;

use std::collections::HashSet;
use std::sync::{Arc, OnceLock};

use crate::card::{MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use crate::error::SchemeConfigError;

/// Name of the American Express scheme.
pub const AMERICAN_EXPRESS: &str = "American Express";
/// Name of the JCB scheme.
pub const JCB: &str = "JCB";
/// Name of the Maestro scheme.
pub const MAESTRO: &str = "Maestro";
/// Name of the Visa scheme.
pub const VISA: &str = "Visa";
/// Name of the MasterCard scheme.
pub const MASTERCARD: &str = "MasterCard";

/// One card network: a name, ordered prefix ranges, allowed lengths.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeDefinition {
    name: String,
    prefix_ranges: Vec<PrefixRange>,
    /// Sorted, no duplicates.
    allowed_lengths: Vec<usize>,
}

impl SchemeDefinition {
    /// Builds and checks a scheme definition.
    ///
    /// Rejects an empty name, an empty range list, an empty length set,
    /// lengths outside `[12, 19]`, and any range wider than the shortest
    /// allowed length.
    pub fn new<I>(
        name: impl Into<String>,
        prefix_ranges: Vec<PrefixRange>,
        allowed_lengths: I,
    ) -> Result<Self, SchemeConfigError>
    where
        I: IntoIterator<Item = usize>,
    {
        let scheme = Self::new_unchecked(name, prefix_ranges, allowed_lengths);
        scheme.check()?;
        Ok(scheme)
    }

    /// Builds a scheme definition from textual prefix ranges.
    ///
    /// Each range is parsed with [`PrefixRange::parse`].
    pub fn from_text<S, I>(
        name: impl Into<String>,
        prefix_ranges: &[S],
        allowed_lengths: I,
    ) -> Result<Self, SchemeConfigError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = usize>,
    {
        let ranges = prefix_ranges
            .iter()
            .map(|r| PrefixRange::parse(r.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, ranges, allowed_lengths)
    }

    pub(crate) fn new_unchecked<I>(
        name: impl Into<String>,
        prefix_ranges: Vec<PrefixRange>,
        allowed_lengths: I,
    ) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut lengths: Vec<usize> = allowed_lengths.into_iter().collect();
        lengths.sort_unstable();
        lengths.dedup();

        Self {
            name: name.into(),
            prefix_ranges,
            allowed_lengths: lengths,
        }
    }

    /// Runs every configuration check on this definition.
    pub fn check(&self) -> Result<(), SchemeConfigError> {
        if self.name.trim().is_empty() {
            return Err(SchemeConfigError::EmptyName);
        }

        let min_length = match self.allowed_lengths.first() {
            Some(&len) => len,
            None => {
                return Err(SchemeConfigError::NoAllowedLengths {
                    scheme: self.name.clone(),
                })
            }
        };

        if let Some(&length) = self
            .allowed_lengths
            .iter()
            .find(|&&len| !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&len))
        {
            return Err(SchemeConfigError::LengthOutOfBounds {
                scheme: self.name.clone(),
                length,
            });
        }

        if self.prefix_ranges.is_empty() {
            return Err(SchemeConfigError::NoPrefixRanges {
                scheme: self.name.clone(),
            });
        }

        for range in &self.prefix_ranges {
            range.check()?;
            if range.width() > min_length {
                return Err(SchemeConfigError::RangeWiderThanCard {
                    scheme: self.name.clone(),
                    width: range.width(),
                    min_length,
                });
            }
        }

        Ok(())
    }

    /// The scheme name, e.g. `"Visa"`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix ranges in match order.
    #[inline]
    pub fn prefix_ranges(&self) -> &[PrefixRange] {
        &self.prefix_ranges
    }

    /// Allowed card lengths, ascending.
    #[inline]
    pub fn allowed_lengths(&self) -> &[usize] {
        &self.allowed_lengths
    }

    /// Returns true if `length` is an allowed card length for this scheme.
    #[inline]
    pub fn allows_length(&self, length: usize) -> bool {
        self.allowed_lengths.binary_search(&length).is_ok()
    }

    /// Tests a card number (digit values 0-9) against this scheme.
    ///
    /// The length gate comes first; then ranges are tried in order. An
    /// interval wider than the card is a configuration defect.
    pub fn matches(&self, digits: &[u8]) -> Result<bool, SchemeConfigError> {
        if !self.allows_length(digits.len()) {
            return Ok(false);
        }

        for range in &self.prefix_ranges {
            match range.matches(digits) {
                Some(true) => return Ok(true),
                Some(false) => {}
                None => {
                    return Err(SchemeConfigError::RangeWiderThanCard {
                        scheme: self.name.clone(),
                        width: range.width(),
                        min_length: digits.len(),
                    })
                }
            }
        }

        Ok(false)
    }
}

/// The ordered list of schemes the classifier walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeTable {
    schemes: Vec<SchemeDefinition>,
}

static SHARED_TABLE: OnceLock<Arc<SchemeTable>> = OnceLock::new();

impl SchemeTable {
    /// Builds a table from checked definitions, keeping their order.
    ///
    /// Rejects an empty table and repeated scheme names. Overlapping ranges
    /// are allowed: the earlier scheme wins.
    pub fn new(schemes: Vec<SchemeDefinition>) -> Result<Self, SchemeConfigError> {
        let table = Self { schemes };
        table.check()?;
        Ok(table)
    }

    pub(crate) fn from_unchecked(schemes: Vec<SchemeDefinition>) -> Self {
        Self { schemes }
    }

    /// Builds the canonical table.
    ///
    /// Prefer [`SchemeTable::shared`] unless a separate value is needed.
    pub fn canonical() -> Self {
        let table = Self::from_unchecked(vec![
            SchemeDefinition::new_unchecked(
                AMERICAN_EXPRESS,
                vec![PrefixRange::exact(&[3, 4]), PrefixRange::exact(&[3, 7])],
                [15],
            ),
            SchemeDefinition::new_unchecked(
                JCB,
                vec![PrefixRange::between(3528, 3589, 4)],
                16..=19,
            ),
            SchemeDefinition::new_unchecked(
                MAESTRO,
                vec![
                    PrefixRange::exact(&[5, 0]),
                    PrefixRange::between(56, 58, 2),
                    PrefixRange::exact(&[6]),
                ],
                12..=19,
            ),
            SchemeDefinition::new_unchecked(VISA, vec![PrefixRange::exact(&[4])], [13, 16, 19]),
            SchemeDefinition::new_unchecked(
                MASTERCARD,
                vec![
                    PrefixRange::between(2221, 2720, 4),
                    PrefixRange::between(51, 55, 2),
                ],
                [16],
            ),
        ]);
        tracing::debug!(schemes = table.len(), "built canonical scheme table");
        table
    }

    /// The process-wide canonical table.
    ///
    /// Built on first use; concurrent first callers wait for the single
    /// build and all callers share the same value.
    pub fn shared() -> Arc<SchemeTable> {
        Arc::clone(SHARED_TABLE.get_or_init(|| Arc::new(Self::canonical())))
    }

    /// Runs every configuration check on the table and its schemes.
    pub fn check(&self) -> Result<(), SchemeConfigError> {
        if self.schemes.is_empty() {
            return Err(SchemeConfigError::EmptyTable);
        }

        let mut seen = HashSet::with_capacity(self.schemes.len());
        for scheme in &self.schemes {
            scheme.check()?;
            if !seen.insert(scheme.name()) {
                return Err(SchemeConfigError::DuplicateScheme {
                    scheme: scheme.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Schemes in match order.
    #[inline]
    pub fn schemes(&self) -> &[SchemeDefinition] {
        &self.schemes
    }

    /// Iterates schemes in match order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, SchemeDefinition> {
        self.schemes.iter()
    }

    /// Looks a scheme up by name.
    pub fn get(&self, name: &str) -> Option<&SchemeDefinition> {
        self.schemes.iter().find(|s| s.name() == name)
    }

    /// Number of schemes.
    #[inline]
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// Returns true if the table has no schemes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

impl<'a> IntoIterator for &'a SchemeTable {
    type Item = &'a SchemeDefinition;
    type IntoIter = std::slice::Iter<'a, SchemeDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.schemes.iter()
    }
}
