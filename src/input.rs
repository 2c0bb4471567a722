//! Player commands and the rules for accepting them.

use log::{debug, info};

use crate::snake::Direction;
use crate::state::GameState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Pause,
}

impl Command {
    /// Parses a logical command name: `left`, `up`, `right`, `down` or `pause`.
    pub fn parse(name: &str) -> Option<Command> {
        match name {
            "pause" => Some(Command::Pause),
            _ => Direction::from_name(name).map(Command::Turn),
        }
    }
}

pub fn apply(state: &GameState, command: Command) -> GameState {
    match command {
        Command::Turn(dir) => change_direction(state, dir),
        Command::Pause => toggle_pause(state),
    }
}

/// Like [`apply`] for a raw command name. Unknown names leave the game as is.
pub fn apply_named(state: &GameState, name: &str) -> GameState {
    match Command::parse(name) {
        Some(command) => apply(state, command),
        None => {
            debug!("ignoring unknown command {:?}", name);
            state.clone()
        }
    }
}

/// Steers the snake, starting the game on the first accepted turn.
///
/// The current heading is read from where the head sits relative to the
/// first body segment, not from the stored velocity: a turn already queued
/// for the next tick must not let a second turn reverse the snake into
/// itself. Rejected turns leave the game unchanged:
/// - reversals (the heading would change by more than one on an axis),
/// - repeating the current heading once the game has started,
/// - any turn while a started game is paused,
/// - anything once the game is over.
pub fn change_direction(state: &GameState, dir: Direction) -> GameState {
    if state.over {
        return state.clone();
    }

    let velocity = dir.velocity();
    let heading = state.snake.heading(state.wrap_around());

    let dx = (heading.x - velocity.x).abs();
    let dy = (heading.y - velocity.y).abs();

    if dx > 1 || dy > 1 {
        debug!("rejecting {} against heading {:?}", dir.name(), heading);
        return state.clone();
    }
    if dx == 0 && dy == 0 && state.started {
        return state.clone();
    }
    if state.paused && state.started {
        debug!("rejecting {} while paused", dir.name());
        return state.clone();
    }

    let mut next = state.clone();
    next.snake.velocity = velocity;
    next.paused = false;
    next.started = true;
    next
}

/// Flips pause. Pausing also counts as starting the game. A finished game
/// stays as it is.
pub fn toggle_pause(state: &GameState) -> GameState {
    if state.over {
        return state.clone();
    }

    let mut next = state.clone();
    next.paused = !state.paused;
    next.started = true;
    info!("{}", if next.paused { "paused" } else { "resumed" });
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use crate::snake::Position;
    use crate::state::GameOptions;
    use crate::step::step;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fresh() -> (GameState, StdRng) {
        let mut rng = StdRng::seed_from_u64(17);
        let game = GameState::new(GameOptions::default(), &mut rng).unwrap();
        (game, rng)
    }

    #[test]
    fn first_turn_starts_the_game() {
        let (game, _) = fresh();
        let next = change_direction(&game, Up);
        assert!(next.started);
        assert!(!next.paused);
        assert_eq!(next.snake.velocity, Up.velocity());
    }

    #[test]
    fn current_heading_starts_an_unstarted_game() {
        let (game, _) = fresh();
        let next = change_direction(&game, Right);
        assert!(next.started && !next.paused);
    }

    #[test]
    fn repeating_heading_after_start_is_ignored() {
        let (game, _) = fresh();
        let started = change_direction(&game, Right);
        assert_eq!(change_direction(&started, Right), started);
    }

    #[test]
    fn reversal_is_rejected() {
        let (game, _) = fresh();
        assert_eq!(change_direction(&game, Left), game);
    }

    #[test]
    fn queued_turn_cannot_be_followed_by_reversal() {
        // Still heading right with Up queued: Down is a legal turn, Left is not.
        let (game, _) = fresh();
        let up = change_direction(&game, Up);
        let down = change_direction(&up, Down);
        assert_eq!(down.snake.velocity, Down.velocity());

        let left = change_direction(&up, Left);
        assert_eq!(left, up);
    }

    #[test]
    fn turns_while_paused_after_start_are_ignored() {
        let (game, _) = fresh();
        let paused = toggle_pause(&change_direction(&game, Up));
        assert!(paused.paused && paused.started);
        assert_eq!(change_direction(&paused, Down), paused);
        assert_eq!(change_direction(&paused, Right), paused);
    }

    #[test]
    fn pause_before_start_marks_started() {
        let (game, _) = fresh();
        let toggled = toggle_pause(&game);
        assert!(!toggled.paused);
        assert!(toggled.started);

        let again = toggle_pause(&toggled);
        assert!(again.paused && again.started);
    }

    #[test]
    fn turn_applies_on_next_tick() {
        let (mut game, mut rng) = fresh();
        game.foods = vec![Position::new(0, 0)];
        let next = step(&change_direction(&game, Down), &mut rng);
        assert_eq!(next.snake.head, Position::new(11, 13));
    }

    #[test]
    fn named_commands() {
        let (game, _) = fresh();
        assert_eq!(apply_named(&game, "diagonal"), game);
        assert_eq!(apply_named(&game, "up").snake.velocity, Up.velocity());
        assert!(apply_named(&game, "pause").started);
        assert_eq!(Command::parse("down"), Some(Command::Turn(Down)));
    }

    #[test]
    fn finished_game_ignores_input() {
        let (mut game, _) = fresh();
        game.over = true;
        game.snake.alive = false;
        assert_eq!(change_direction(&game, Up), game);
        assert_eq!(toggle_pause(&game), game);
    }

    #[test]
    fn turning_right_after_wrapping_left_edge() {
        let mut rng = StdRng::seed_from_u64(4);
        let options = GameOptions { board_size: 11, wrap_around: true, food_amount: 1, ..GameOptions::default() };
        let mut game = GameState::new(options, &mut rng).unwrap();
        game.started = true;
        game.paused = false;
        game.snake.velocity = Left.velocity();
        game.snake.head = Position::new(10, 5);
        game.snake.body = vec![Position::new(0, 5), Position::new(1, 5)];

        assert_eq!(change_direction(&game, Right), game);
        assert_eq!(change_direction(&game, Up).snake.velocity, Up.velocity());
    }
}
