//! Maze request orchestration.
//!
//! [`MazeController`] takes raw width/height text, validates both fields
//! against a bounds profile, calls the external generator once, and drives a
//! [`Presenter`] through each transition. The display tier for the output is
//! chosen from the submitted dimensions whatever the generator's outcome.

pub mod controller;
pub mod presenter;
pub mod state;

pub use controller::{MazeController, SubmitError};
pub use presenter::Presenter;
pub use state::{Failure, RequestState};
