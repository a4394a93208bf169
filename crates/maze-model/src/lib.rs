//! Data model shared by the maze request crates.

pub mod bounds;
pub mod dimension;
pub mod error;
pub mod request;
pub mod tier;

pub use bounds::{BoundsProfile, DimensionBounds};
pub use dimension::{Dimension, DimensionError, DimensionErrorKind, DimensionInput, ValidationResult};
pub use error::{ModelError, Result};
pub use request::MazeRequest;
pub use tier::DisplayTier;
