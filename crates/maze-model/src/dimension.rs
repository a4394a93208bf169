//! Maze dimensions and the outcome of validating one.

use std::fmt;

use serde::Serialize;

use crate::bounds::DimensionBounds;

/// Which of the two requested dimensions a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    /// Validation order: width first, then height.
    pub const ALL: [Dimension; 2] = [Dimension::Width, Dimension::Height];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw, user-supplied value for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionInput<'a> {
    pub field: Dimension,
    pub raw: &'a str,
}

impl<'a> DimensionInput<'a> {
    pub const fn new(field: Dimension, raw: &'a str) -> Self {
        Self { field, raw }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionErrorKind {
    NotANumber,
    OutOfRange { bounds: DimensionBounds },
}

/// A dimension that failed validation. The display text is the message shown
/// next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionError {
    pub field: Dimension,
    pub raw: String,
    pub kind: DimensionErrorKind,
}

impl DimensionError {
    pub fn not_a_number(field: Dimension, raw: impl Into<String>) -> Self {
        Self {
            field,
            raw: raw.into(),
            kind: DimensionErrorKind::NotANumber,
        }
    }

    pub fn out_of_range(field: Dimension, raw: impl Into<String>, bounds: DimensionBounds) -> Self {
        Self {
            field,
            raw: raw.into(),
            kind: DimensionErrorKind::OutOfRange { bounds },
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self.kind {
            DimensionErrorKind::NotANumber => format!("The {} must be a number", self.field),
            DimensionErrorKind::OutOfRange { bounds } => format!(
                "Please make sure the {} is between {} and {}",
                self.field,
                bounds.min(),
                bounds.max()
            ),
        }
    }
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for DimensionError {}

/// `Ok` carries the normalized value.
pub type ValidationResult = std::result::Result<u32, DimensionError>;
