//! Batch validation of comma-separated card lists.
//!
//! Every entry is checked on its own: both façade operations run once per
//! entry and a failing entry never stops the rest. Reports come back in
//! input order, with optional parallel processing using rayon.

use std::fmt;

use crate::error::ValidationError;
use crate::mask::mask_input;
use crate::validate::Validator;

/// Splits a comma-separated card list.
///
/// Entries are kept verbatim, empty ones included, so each position in the
/// list gets its own report.
///
/// # Example
///
/// ```
/// use card_validator::batch::split_card_list;
///
/// assert_eq!(
///     split_card_list("4012888888881881, 378282246310005"),
///     vec!["4012888888881881", " 378282246310005"]
/// );
/// ```
pub fn split_card_list(list: &str) -> Vec<&str> {
    list.split(',').collect()
}

/// The result for one entry of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardReport {
    /// Position of the entry in the batch.
    pub index: usize,
    /// The entry, masked for display.
    pub masked: String,
    /// What happened to the entry.
    pub outcome: Outcome,
}

/// Outcome of checking one batch entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Both operations succeeded.
    Checked {
        /// Luhn result.
        valid: bool,
        /// Scheme name.
        scheme: String,
    },
    /// `validate_number` failed; classification was not attempted.
    ValidationFailed(ValidationError),
    /// `validate_number` succeeded but `classify_scheme` failed.
    SchemeFailed(ValidationError),
}

impl CardReport {
    /// Runs both operations for one entry.
    pub fn check<V: Validator + ?Sized>(validator: &V, index: usize, card: &str) -> Self {
        let outcome = match validator.validate_number(card) {
            Err(err) => Outcome::ValidationFailed(err),
            Ok(valid) => match validator.classify_scheme(card) {
                Ok(scheme) => Outcome::Checked { valid, scheme },
                Err(err) => Outcome::SchemeFailed(err),
            },
        };

        Self {
            index,
            masked: mask_input(card),
            outcome,
        }
    }

    /// Returns true if the entry was well-formed, passed Luhn and matched a
    /// scheme.
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, Outcome::Checked { valid: true, .. })
    }
}

impl fmt::Display for CardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Checked { valid, scheme } => write!(
                f,
                "Card {} validation is: {} and card scheme is {}",
                self.masked, valid, scheme
            ),
            Outcome::ValidationFailed(err) => {
                write!(f, "Validation failed for card {}: {}", self.masked, err)
            }
            Outcome::SchemeFailed(err) => write!(
                f,
                "Card scheme detection failed for card {}: {}",
                self.masked, err
            ),
        }
    }
}

/// Batch validator over any [`Validator`].
///
/// # Example
///
/// ```
/// use card_validator::{BatchValidator, CardValidator};
///
/// let validator = CardValidator::default();
/// let batch = BatchValidator::new(&validator);
/// let reports = batch.validate_list("4012888888881881,9999888877776666,12");
///
/// assert_eq!(reports.len(), 3);
/// assert!(reports[0].is_valid());
/// assert_eq!(
///     reports[1].to_string(),
///     "Card scheme detection failed for card ************6666: unknown card scheme"
/// );
/// ```
pub struct BatchValidator<'a> {
    validator: &'a dyn Validator,
}

impl<'a> BatchValidator<'a> {
    /// Creates a batch validator.
    #[inline]
    pub fn new(validator: &'a dyn Validator) -> Self {
        Self { validator }
    }

    /// Checks every entry, returning reports in input order.
    pub fn validate_all<S: AsRef<str>>(&self, cards: &[S]) -> Vec<CardReport> {
        cards
            .iter()
            .enumerate()
            .map(|(i, c)| CardReport::check(self.validator, i, c.as_ref()))
            .collect()
    }

    /// Splits a comma-separated list and checks every entry.
    pub fn validate_list(&self, list: &str) -> Vec<CardReport> {
        self.validate_all(&split_card_list(list))
    }

    /// Checks every entry in parallel using rayon.
    ///
    /// Reports are still returned in input order.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn validate_parallel<S: AsRef<str> + Sync>(&self, cards: &[S]) -> Vec<CardReport> {
        use rayon::prelude::*;
        cards
            .par_iter()
            .enumerate()
            .map(|(i, c)| CardReport::check(self.validator, i, c.as_ref()))
            .collect()
    }
}

/// Counts of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Entries that passed Luhn and matched a scheme.
    pub valid: usize,
    /// Entries that matched a scheme but failed Luhn.
    pub invalid: usize,
    /// Entries rejected before the checksum (length or characters).
    pub rejected: usize,
    /// Well-formed entries whose scheme could not be determined.
    pub unknown_scheme: usize,
}

/// Summarizes a set of reports.
///
/// # Example
///
/// ```
/// use card_validator::batch::{summarize, BatchValidator};
/// use card_validator::CardValidator;
///
/// let validator = CardValidator::default();
/// let reports = BatchValidator::new(&validator)
///     .validate_list("5237251624778133,5237251624778132,abc,9999888877776666");
/// let summary = summarize(&reports);
///
/// assert_eq!(summary.valid, 1);
/// assert_eq!(summary.invalid, 1);
/// assert_eq!(summary.rejected, 1);
/// assert_eq!(summary.unknown_scheme, 1);
/// ```
pub fn summarize(reports: &[CardReport]) -> BatchSummary {
    reports
        .iter()
        .fold(BatchSummary::default(), |mut acc, report| {
            match &report.outcome {
                Outcome::Checked { valid: true, .. } => acc.valid += 1,
                Outcome::Checked { valid: false, .. } => acc.invalid += 1,
                Outcome::ValidationFailed(_) => acc.rejected += 1,
                Outcome::SchemeFailed(_) => acc.unknown_scheme += 1,
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::StubValidator;
    use crate::validate::CardValidator;

    const VALID_VISA: &str = "4012888888881881";
    const VALID_AMEX: &str = "378282246310005";
    const BAD_LUHN: &str = "5237251624778132";
    const UNKNOWN: &str = "9999888877776666";

    #[test]
    fn test_split_keeps_empty_entries() {
        assert_eq!(split_card_list(""), vec![""]);
        assert_eq!(split_card_list("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_validate_all_in_order() {
        let validator = CardValidator::default();
        let batch = BatchValidator::new(&validator);
        let reports = batch.validate_all(&[VALID_VISA, "bad", BAD_LUHN, VALID_AMEX, UNKNOWN]);

        assert_eq!(reports.len(), 5);
        assert!(reports.iter().enumerate().all(|(i, r)| r.index == i));

        assert_eq!(
            reports[0].outcome,
            Outcome::Checked {
                valid: true,
                scheme: "Visa".to_string()
            }
        );
        assert!(matches!(
            reports[1].outcome,
            Outcome::ValidationFailed(ValidationError::InvalidCharacters { .. })
        ));
        assert_eq!(
            reports[2].outcome,
            Outcome::Checked {
                valid: false,
                scheme: "MasterCard".to_string()
            }
        );
        assert!(reports[3].is_valid());
        assert_eq!(
            reports[4].outcome,
            Outcome::SchemeFailed(ValidationError::UnknownScheme)
        );
    }

    #[test]
    fn test_report_lines() {
        let validator = CardValidator::default();
        let reports = BatchValidator::new(&validator).validate_list("4012 8888 8888 1881,12345");

        assert_eq!(
            reports[0].to_string(),
            "Card ************1881 validation is: true and card scheme is Visa"
        );
        assert_eq!(
            reports[1].to_string(),
            "Validation failed for card *2345: card number out of range: got 5 characters"
        );
    }

    #[test]
    fn test_reports_never_show_full_number() {
        let validator = CardValidator::default();
        let reports = BatchValidator::new(&validator).validate_all(&[VALID_VISA]);
        assert!(!reports[0].to_string().contains(VALID_VISA));
    }

    #[test]
    fn test_classification_skipped_after_structural_error() {
        let stub = StubValidator::new()
            .on_validate("bad", Err(ValidationError::OutOfRange { length: 3 }))
            .on_validate("good", Ok(true))
            .on_classify("good", Ok("Visa"));

        let reports = BatchValidator::new(&stub).validate_all(&["bad", "good"]);

        assert_eq!(stub.validate_calls("bad"), 1);
        assert_eq!(stub.classify_calls("bad"), 0);
        assert_eq!(stub.validate_calls("good"), 1);
        assert_eq!(stub.classify_calls("good"), 1);
        assert!(reports[1].is_valid());
    }

    #[test]
    fn test_empty_batch() {
        let validator = CardValidator::default();
        let cards: Vec<&str> = vec![];
        assert!(BatchValidator::new(&validator).validate_all(&cards).is_empty());
    }

    #[test]
    fn test_summary() {
        let validator = CardValidator::default();
        let reports =
            BatchValidator::new(&validator).validate_all(&[VALID_VISA, VALID_AMEX, BAD_LUHN, "x", UNKNOWN]);
        assert_eq!(
            summarize(&reports),
            BatchSummary {
                valid: 2,
                invalid: 1,
                rejected: 1,
                unknown_scheme: 1
            }
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let validator = CardValidator::default();
        let batch = BatchValidator::new(&validator);
        let cards: Vec<String> = (0..1000)
            .map(|i| match i % 4 {
                0 => VALID_VISA.to_string(),
                1 => BAD_LUHN.to_string(),
                2 => UNKNOWN.to_string(),
                _ => format!("{}", i),
            })
            .collect();

        assert_eq!(batch.validate_parallel(&cards), batch.validate_all(&cards));
    }
}
