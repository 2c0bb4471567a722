use thiserror::Error;

use crate::Coord;

/// Options that cannot produce a playable game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size {size} is too small, the starting snake needs at least {min}")]
    BoardTooSmall { size: Coord, min: Coord },

    #[error("{food} food does not fit a {size}x{size} board, at most {max} can be placed")]
    TooMuchFood { food: usize, size: Coord, max: usize },

    #[error("at least one food is required")]
    NoFood,

    #[error("tick interval must be at least 1 ms")]
    ZeroSpeed,
}
