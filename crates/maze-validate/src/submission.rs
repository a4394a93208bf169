//! Validation of a full width/height submission.

use maze_model::{BoundsProfile, Dimension, DimensionError, MazeRequest, ValidationResult};

/// Per-field results of one submission. Both fields are always validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub width: ValidationResult,
    pub height: ValidationResult,
}

impl SubmissionReport {
    /// Field results in validation order.
    pub fn results(&self) -> [(Dimension, &ValidationResult); 2] {
        [
            (Dimension::Width, &self.width),
            (Dimension::Height, &self.height),
        ]
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_ok() && self.height.is_ok()
    }

    /// The validated request, or every field error in validation order.
    pub fn into_request(self) -> Result<MazeRequest, Vec<DimensionError>> {
        match (self.width, self.height) {
            (Ok(width), Ok(height)) => Ok(MazeRequest::new(width, height)),
            (width, height) => Err([width.err(), height.err()].into_iter().flatten().collect()),
        }
    }
}

/// Validate width then height against `profile` without short-circuiting.
pub fn validate_submission(width: &str, height: &str, profile: &BoundsProfile) -> SubmissionReport {
    SubmissionReport {
        width: crate::validate(Dimension::Width, width, profile.width),
        height: crate::validate(Dimension::Height, height, profile.height),
    }
}
