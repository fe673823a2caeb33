//! JSON scheme table loader.
//!
//! # Feature
//!
//! Requires the `schemes-json` feature.
//!
//! # Format
//!
//! An array of schemes, in match order:
//!
//! ```json
//! [
//!   { "name": "American Express", "prefixes": ["34", "37"], "lengths": [15] },
//!   { "name": "JCB", "prefixes": ["3528-3589"], "lengths": [16, 17, 18, 19] }
//! ]
//! ```
//!
//! `prefix_ranges` and `allowed_lengths` are accepted as aliases.

use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::Path;

use super::{SchemeDefinition, SchemeTable};
use crate::error::SchemeConfigError;

/// Loads a [`SchemeTable`] from JSON.
///
/// Every entry goes through the checked constructors, so a loaded table
/// is as well-formed as the canonical one.
pub struct JsonSchemeLoader;

impl JsonSchemeLoader {
    /// Loads a scheme table from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use card_validator::scheme::JsonSchemeLoader;
    ///
    /// let table = JsonSchemeLoader::from_file("schemes.json")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SchemeTable, SchemeConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading scheme table");
        Self::parse(&content)
    }

    /// Loads a scheme table from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<SchemeTable, SchemeConfigError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse(&content)
    }

    /// Loads a scheme table from a JSON string.
    ///
    /// # Example
    ///
    /// ```
    /// use card_validator::scheme::JsonSchemeLoader;
    ///
    /// let table = JsonSchemeLoader::parse(
    ///     r#"[{"name": "Visa", "prefixes": ["4"], "lengths": [13, 16, 19]}]"#,
    /// ).unwrap();
    /// assert_eq!(table.schemes()[0].name(), "Visa");
    /// ```
    pub fn parse(json: &str) -> Result<SchemeTable, SchemeConfigError> {
        let entries: Vec<JsonSchemeEntry> = serde_json::from_str(json)
            .map_err(|e| SchemeConfigError::Parse(format!("JSON parse error: {}", e)))?;

        let schemes = entries
            .into_iter()
            .map(JsonSchemeEntry::into_definition)
            .collect::<Result<Vec<_>, _>>()?;

        let table = SchemeTable::new(schemes)?;
        tracing::debug!(schemes = table.len(), "loaded scheme table from JSON");
        Ok(table)
    }
}

/// Internal structure for deserializing one scheme.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonSchemeEntry {
    name: String,

    #[serde(alias = "prefix_ranges")]
    prefixes: Vec<String>,

    #[serde(alias = "allowed_lengths")]
    lengths: Vec<usize>,
}

impl JsonSchemeEntry {
    fn into_definition(self) -> Result<SchemeDefinition, SchemeConfigError> {
        SchemeDefinition::from_text(self.name, self.prefixes.as_slice(), self.lengths)
    }
}
