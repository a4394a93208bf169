//! Presentation tiers for the maze output area.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Font size and text-area geometry used to display a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayTier {
    pub font_size: u32,
    pub rows: u32,
    pub cols: u32,
}

impl DisplayTier {
    pub const fn new(font_size: u32, rows: u32, cols: u32) -> Self {
        Self {
            font_size,
            rows,
            cols,
        }
    }
}

impl fmt::Display for DisplayTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}pt, {} rows x {} cols",
            self.font_size, self.rows, self.cols
        )
    }
}
