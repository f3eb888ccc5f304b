use serde::Serialize;

/// Logical board dimensions in tiles.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when both sides are large enough to hold a head, the
    /// initial fruit and at least one free tile.
    #[must_use]
    pub fn is_playable(self) -> bool {
        self.width >= MIN_GRID_SIDE && self.height >= MIN_GRID_SIDE
    }
}

/// Smallest accepted board side.
pub const MIN_GRID_SIDE: u16 = 3;

/// Default board width (a 600 px window split into 40 px tiles).
pub const DEFAULT_GRID_WIDTH: u16 = 15;

/// Default board height.
pub const DEFAULT_GRID_HEIGHT: u16 = 15;

/// Tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Input poll timeout for the interactive loop.
pub const INPUT_POLL_INTERVAL_MS: u64 = 16;

/// Extra cells to the right of the play area occupied by the HUD margin.
pub const PLAY_AREA_MARGIN_X: u16 = 1;
