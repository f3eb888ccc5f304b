use thiserror::Error;

/// Errors reported when a simulation cannot be constructed.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum SimulationError {
    /// Board is too small to hold the head, the first fruit and a free tile.
    #[error("invalid board size {width}x{height}: both sides must be at least {min}")]
    InvalidConfiguration { width: u16, height: u16, min: u16 },
}
