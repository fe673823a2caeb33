//! A scripted [`Validator`] for testing collaborators.
//!
//! `StubValidator` answers from per-input scripts and counts calls, so the
//! shell and batch code can be exercised without depending on real card
//! numbers.
//!
//! ```
//! use card_validator::{stub::StubValidator, Validator, ValidationError};
//!
//! let stub = StubValidator::new()
//!     .on_validate("valid", Ok(true))
//!     .on_classify("valid", Ok("Visa"))
//!     .on_classify("invalid", Err(ValidationError::UnknownScheme));
//!
//! assert_eq!(stub.validate_number("valid"), Ok(true));
//! assert_eq!(stub.classify_scheme("invalid"), Err(ValidationError::UnknownScheme));
//! assert_eq!(stub.classify_calls("valid"), 0);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::error::ValidationError;
use crate::validate::Validator;

/// A validator that replays scripted answers.
///
/// Inputs without a script get the fallback, `UnknownScheme` by default.
#[derive(Debug)]
pub struct StubValidator {
    validate_script: HashMap<String, Result<bool, ValidationError>>,
    classify_script: HashMap<String, Result<String, ValidationError>>,
    fallback: ValidationError,
    calls: Mutex<HashMap<(Operation, String), usize>>,
    total: AtomicUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Operation {
    Validate,
    Classify,
}

impl Default for StubValidator {
    fn default() -> Self {
        Self {
            validate_script: HashMap::new(),
            classify_script: HashMap::new(),
            fallback: ValidationError::UnknownScheme,
            calls: Mutex::new(HashMap::new()),
            total: AtomicUsize::new(0),
        }
    }
}

impl StubValidator {
    /// Creates a stub with no scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the answer of `validate_number(input)`.
    pub fn on_validate(
        mut self,
        input: impl Into<String>,
        result: Result<bool, ValidationError>,
    ) -> Self {
        self.validate_script.insert(input.into(), result);
        self
    }

    /// Scripts the answer of `classify_scheme(input)`.
    pub fn on_classify(
        mut self,
        input: impl Into<String>,
        result: Result<&str, ValidationError>,
    ) -> Self {
        self.classify_script
            .insert(input.into(), result.map(str::to_string));
        self
    }

    /// Sets the error returned for unscripted inputs.
    pub fn with_fallback(mut self, error: ValidationError) -> Self {
        self.fallback = error;
        self
    }

    /// Number of `validate_number` calls made with `input`.
    pub fn validate_calls(&self, input: &str) -> usize {
        self.count(Operation::Validate, input)
    }

    /// Number of `classify_scheme` calls made with `input`.
    pub fn classify_calls(&self, input: &str) -> usize {
        self.count(Operation::Classify, input)
    }

    /// Number of calls of either operation.
    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    fn count(&self, op: Operation, input: &str) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.get(&(op, input.to_string())).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn record(&self, op: Operation, input: &str) {
        self.total.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry((op, input.to_string())).or_insert(0) += 1;
        }
    }
}

impl Validator for StubValidator {
    fn validate_number(&self, raw: &str) -> Result<bool, ValidationError> {
        self.record(Operation::Validate, raw);
        self.validate_script
            .get(raw)
            .cloned()
            .unwrap_or_else(|| Err(self.fallback.clone()))
    }

    fn classify_scheme(&self, raw: &str) -> Result<String, ValidationError> {
        self.record(Operation::Classify, raw);
        self.classify_script
            .get(raw)
            .cloned()
            .unwrap_or_else(|| Err(self.fallback.clone()))
    }
}
