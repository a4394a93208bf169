//! Validation of raw maze dimensions against declared bounds.
//!
//! Raw values go through an explicit parse step ([`parse_dimension`]) before
//! the range check, so malformed input is classified as
//! [`DimensionErrorKind::NotANumber`](maze_model::DimensionErrorKind) rather
//! than silently coerced.

pub mod parse;
pub mod submission;

use maze_model::{Dimension, DimensionBounds, DimensionError, DimensionInput, ValidationResult};
use tracing::trace;

pub use parse::{ParsedNumber, parse_dimension};
pub use submission::{SubmissionReport, validate_submission};

/// Validate one raw dimension value.
///
/// Fractional input is truncated toward zero before the range check.
pub fn validate(field: Dimension, raw: &str, bounds: DimensionBounds) -> ValidationResult {
    let outcome = match parse_dimension(raw) {
        ParsedNumber::NotANumber => Err(DimensionError::not_a_number(field, raw)),
        ParsedNumber::Parsed(value) if !bounds.contains(value) => {
            Err(DimensionError::out_of_range(field, raw, bounds))
        }
        ParsedNumber::Parsed(value) => u32::try_from(value)
            .map_err(|_| DimensionError::out_of_range(field, raw, bounds)),
    };
    trace!(%field, raw, ok = outcome.is_ok(), "validated dimension");
    outcome
}

pub fn validate_input(input: &DimensionInput<'_>, bounds: DimensionBounds) -> ValidationResult {
    validate(input.field, input.raw, bounds)
}
