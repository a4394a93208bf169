//! Request state owned by the controller.

use maze_generator::GeneratorError;
use maze_model::{DimensionError, DisplayTier, MazeRequest};

/// Current state of the controller.
///
/// `Success` and `Failed` are terminal for a submission; only a new
/// submission moves the controller on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Validating,
    Loading {
        request: MazeRequest,
    },
    Success {
        request: MazeRequest,
        maze: String,
        tier: Option<DisplayTier>,
    },
    Failed(Failure),
}

impl RequestState {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Loading { .. } => "loading",
            Self::Success { .. } => "success",
            Self::Failed(_) => "failed",
        }
    }

    /// True while a submission is being processed.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::Loading { .. })
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Why a submission ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// One or both dimensions were rejected; the generator was not called.
    Validation(Vec<DimensionError>),
    /// The generator call failed.
    Generator {
        request: MazeRequest,
        error: GeneratorError,
        tier: Option<DisplayTier>,
    },
}

impl Failure {
    /// Text written to the output area.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Validation(errors) => {
                let mut message = String::from("The maze could not be built:");
                for error in errors {
                    message.push_str("\n- ");
                    message.push_str(&error.message());
                }
                message
            }
            Self::Generator { error, .. } => error.user_message(),
        }
    }
}
