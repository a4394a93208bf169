//! CLI library components for the maze builder.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod presenter;
pub mod summary;
