//! Inclusive bounds that a requested maze dimension must fall within.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::dimension::Dimension;
use crate::error::{ModelError, Result};

/// Inclusive `[min, max]` range for one dimension.
///
/// Both ends are positive and `min <= max`; the constructor enforces this so
/// a value of this type is always usable by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DimensionBounds {
    min: u32,
    max: u32,
}

impl DimensionBounds {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min == 0 {
            return Err(ModelError::NonPositiveBound { min, max });
        }
        if min > max {
            return Err(ModelError::InvertedBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Built-in bounds known to be valid at compile time.
    const fn fixed(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Returns true when `value` lies inside the inclusive range.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min) && value <= i64::from(self.max)
    }

    #[must_use]
    pub fn values(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }
}

impl fmt::Display for DimensionBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// A named pair of width/height bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundsProfile {
    pub name: String,
    pub width: DimensionBounds,
    pub height: DimensionBounds,
}

impl BoundsProfile {
    pub fn new(name: impl Into<String>, width: DimensionBounds, height: DimensionBounds) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// The 3..=52 by 3..=33 profile.
    #[must_use]
    pub fn classic() -> Self {
        Self::new(
            "classic",
            DimensionBounds::fixed(3, 52),
            DimensionBounds::fixed(3, 33),
        )
    }

    /// The 3..=120 by 3..=33 profile.
    #[must_use]
    pub fn wide() -> Self {
        Self::new(
            "wide",
            DimensionBounds::fixed(3, 120),
            DimensionBounds::fixed(3, 33),
        )
    }

    #[must_use]
    pub fn bounds(&self, field: Dimension) -> DimensionBounds {
        match field {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }
}
