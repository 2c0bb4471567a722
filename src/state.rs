use log::info;
use rand::Rng;

use crate::controls::{InputProfile, ARROW_KEYS};
use crate::error::ConfigError;
use crate::snake::{Direction, Position, Snake};
use crate::spawn::empty_positions;
use crate::Coord;

/// Segments behind the head of a fresh snake.
pub const INITIAL_BODY_LEN: usize = 4;
/// Smallest board the fresh snake fits on without leaving it.
pub const MIN_BOARD_SIZE: Coord = 11;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOptions {
    pub board_size: Coord,
    /// Tick interval in milliseconds.
    pub speed_ms: u64,
    pub food_amount: usize,
    pub input_controls: &'static InputProfile,
    pub wrap_around: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        GameOptions {
            board_size: 25,
            speed_ms: 165,
            food_amount: 4,
            input_controls: &ARROW_KEYS,
            wrap_around: false,
        }
    }
}

impl GameOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(ConfigError::BoardTooSmall { size: self.board_size, min: MIN_BOARD_SIZE });
        }
        if self.speed_ms == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.food_amount == 0 {
            return Err(ConfigError::NoFood);
        }

        let cells = (self.board_size as usize).pow(2);
        let max = cells - (INITIAL_BODY_LEN + 1) - 1;
        if self.food_amount > max {
            return Err(ConfigError::TooMuchFood { food: self.food_amount, size: self.board_size, max });
        }

        Ok(())
    }
}

/// One immutable snapshot of a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub options: GameOptions,
    pub board_size: Coord,
    pub speed_ms: u64,
    /// Set by the first accepted direction or pause.
    pub started: bool,
    pub paused: bool,
    /// Terminal. Nothing changes a game once it is over.
    pub over: bool,
    pub foods: Vec<Position>,
    pub food_amount: usize,
    pub snake: Snake,
}

impl GameState {
    /// Builds a paused, unstarted game with the snake left of center heading
    /// right and `food_amount` food on free cells.
    pub fn new<R: Rng + ?Sized>(options: GameOptions, rng: &mut R) -> Result<GameState, ConfigError> {
        options.validate()?;

        let center = (options.board_size + 1) / 2;
        let head = Position::new(center - 2, center - 1);
        let snake = Snake::new(head, INITIAL_BODY_LEN, Direction::Right, options.input_controls);
        let foods = empty_positions(rng, options.board_size, snake.cells(), options.food_amount);

        info!(
            "new game: board {0}x{0}, {1} ms ticks, {2} food, wrap {3}, controls {4}",
            options.board_size, options.speed_ms, options.food_amount, options.wrap_around, options.input_controls.id
        );

        Ok(GameState {
            board_size: options.board_size,
            speed_ms: options.speed_ms,
            started: false,
            paused: true,
            over: false,
            foods,
            food_amount: options.food_amount,
            snake,
            options,
        })
    }

    pub fn wrap_around(&self) -> bool {
        self.options.wrap_around
    }

    /// Snake length beyond the starting five cells.
    pub fn score(&self) -> usize {
        self.snake.len() - (INITIAL_BODY_LEN + 1)
    }

    /// The game ended with the snake alive: every cell is snake.
    pub fn is_won(&self) -> bool {
        self.over && self.snake.alive
    }
}
