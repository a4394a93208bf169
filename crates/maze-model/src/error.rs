use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("bounds must be positive (got min {min}, max {max})")]
    NonPositiveBound { min: u32, max: u32 },
    #[error("minimum {min} exceeds maximum {max}")]
    InvertedBounds { min: u32, max: u32 },
}

pub type Result<T> = std::result::Result<T, ModelError>;
