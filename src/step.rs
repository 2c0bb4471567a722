//! One tick of the simulation.

use log::{debug, info};
use rand::Rng;

use crate::snake::Position;
use crate::spawn::empty_positions;
use crate::state::GameState;

enum MoveResult {
    Moved { new_head: Position, new_body: Vec<Position> },
    Ate { new_head: Position, new_body: Vec<Position>, food: usize },
    Crashed,
}

/// Advances `state` by one tick and returns the next snapshot.
///
/// Paused, dead and finished games come back unchanged. A crash freezes the
/// snake where it was and ends the game. Eating grows the snake by one and
/// puts one new food on a free cell; if no free cell is left after the last
/// food is eaten the game is over and won.
pub fn step<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> GameState {
    if state.paused || state.over || !state.snake.alive {
        return state.clone();
    }

    match plan_move(state) {
        MoveResult::Crashed => {
            info!("snake crashed at length {}", state.snake.len());
            let mut next = state.clone();
            next.over = true;
            next.snake.alive = false;
            next
        }
        MoveResult::Moved { new_head, new_body } => {
            let mut next = state.clone();
            next.snake.head = new_head;
            next.snake.body = new_body;
            next
        }
        MoveResult::Ate { new_head, new_body, food } => {
            let mut next = state.clone();
            next.snake.head = new_head;
            next.snake.body = new_body;
            next.foods.remove(food);

            let occupied: Vec<Position> = next.snake.cells().chain(next.foods.iter()).copied().collect();
            let respawned = empty_positions(rng, next.board_size, &occupied, 1);
            debug!("ate food at {:?}, respawned {:?}", new_head, respawned);
            next.foods.extend(respawned);

            if next.foods.is_empty() {
                info!("board filled at length {}", next.snake.len());
                next.over = true;
            }
            next
        }
    }
}

fn plan_move(state: &GameState) -> MoveResult {
    let snake = &state.snake;
    let mut new_head = snake.head + snake.velocity;

    if state.wrap_around() {
        new_head = new_head.wrapped(state.board_size);
    } else if !new_head.in_bounds(state.board_size) {
        return MoveResult::Crashed;
    }

    let shifted = snake.body.len().saturating_sub(1);
    let mut new_body = Vec::with_capacity(snake.body.len() + 1);
    new_body.push(snake.head);
    new_body.extend_from_slice(&snake.body[..shifted]);

    // A head landing on its own body dies even when food sits there too.
    if new_body.contains(&new_head) {
        return MoveResult::Crashed;
    }

    match state.foods.iter().position(|f| *f == new_head) {
        Some(food) => {
            new_body.extend_from_slice(&snake.body[shifted..]);
            MoveResult::Ate { new_head, new_body, food }
        }
        None => MoveResult::Moved { new_head, new_body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{change_direction, toggle_pause};
    use crate::snake::Direction::*;
    use crate::state::GameOptions;
    use crate::Coord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn running(options: GameOptions) -> (GameState, StdRng) {
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = GameState::new(options, &mut rng).unwrap();
        game.paused = false;
        game.started = true;
        (game, rng)
    }

    fn board(board_size: Coord, wrap_around: bool) -> GameOptions {
        GameOptions { board_size, wrap_around, food_amount: 1, ..GameOptions::default() }
    }

    #[test]
    fn paused_game_does_not_move() {
        let mut rng = StdRng::seed_from_u64(5);
        let game = GameState::new(GameOptions::default(), &mut rng).unwrap();
        assert_eq!(step(&game, &mut rng), game);
    }

    #[test]
    fn plain_move_shifts_body() {
        let (mut game, mut rng) = running(board(15, false));
        game.foods = vec![Position::new(0, 0)];
        let next = step(&game, &mut rng);

        assert_eq!(next.snake.head, Position::new(7, 7));
        assert_eq!(next.snake.body[0], game.snake.head);
        assert_eq!(next.snake.body.len(), game.snake.body.len());
        assert_eq!(&next.snake.body[1..], &game.snake.body[..3]);
        assert_eq!(next.foods, game.foods);
    }

    #[test]
    fn eating_grows_and_respawns() {
        let (mut game, mut rng) = running(board(15, false));
        game.foods = vec![Position::new(7, 7)];
        let next = step(&game, &mut rng);

        assert_eq!(next.snake.head, Position::new(7, 7));
        assert_eq!(next.snake.len(), game.snake.len() + 1);
        assert_eq!(next.snake.body[1..], game.snake.body[..]);
        assert_eq!(next.foods.len(), 1);
        assert!(!next.snake.occupies(&next.foods[0]));
        assert_eq!(next.score(), 1);
    }

    #[test]
    fn wall_kills_without_wrap() {
        let (mut game, mut rng) = running(board(15, false));
        game.snake.head = Position::new(14, 3);
        game.snake.body = vec![Position::new(13, 3), Position::new(12, 3)];
        let next = step(&game, &mut rng);

        assert!(next.over);
        assert!(!next.snake.alive);
        assert_eq!(next.snake.head, game.snake.head);
        assert_eq!(next.snake.body, game.snake.body);
        assert!(!next.is_won());
    }

    #[test]
    fn wrap_reenters_opposite_edge() {
        let (mut game, mut rng) = running(board(15, true));
        game.foods = vec![Position::new(0, 0)];
        game.snake.head = Position::new(14, 3);
        game.snake.body = vec![Position::new(13, 3), Position::new(12, 3)];
        let next = step(&game, &mut rng);
        assert_eq!(next.snake.head, Position::new(0, 3));
        assert!(!next.over);

        game.snake.velocity = Up.velocity();
        game.snake.head = Position::new(4, 0);
        game.snake.body = vec![Position::new(4, 1)];
        let next = step(&game, &mut rng);
        assert_eq!(next.snake.head, Position::new(4, 14));
    }

    #[test]
    fn self_collision_beats_food() {
        let (mut game, mut rng) = running(board(15, false));
        // Head at (5,5) turning down into a curled body.
        game.snake.head = Position::new(5, 5);
        game.snake.body = vec![
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
            Position::new(4, 6),
        ];
        game.snake.velocity = Down.velocity();
        game.foods = vec![Position::new(5, 6)];
        let next = step(&game, &mut rng);

        assert!(next.over);
        assert!(!next.snake.alive);
        assert_eq!(next.foods, game.foods);
        assert_eq!(next.snake.head, game.snake.head);
    }

    #[test]
    fn moving_into_vacated_tail_is_safe() {
        let (mut game, mut rng) = running(board(15, false));
        game.foods = vec![Position::new(0, 0)];
        game.snake.head = Position::new(5, 5);
        game.snake.body = vec![Position::new(6, 5), Position::new(6, 6), Position::new(5, 6)];
        game.snake.velocity = Down.velocity();
        let next = step(&game, &mut rng);
        assert!(!next.over);
        assert_eq!(next.snake.head, Position::new(5, 6));
    }

    #[test]
    fn self_collision_across_wrapped_edge() {
        let (mut game, mut rng) = running(board(11, true));
        game.foods = vec![Position::new(5, 5)];
        game.snake.head = Position::new(10, 2);
        game.snake.body = vec![
            Position::new(9, 2),
            Position::new(9, 3),
            Position::new(10, 3),
            Position::new(0, 3),
            Position::new(0, 2),
            Position::new(1, 2),
        ];
        let next = step(&game, &mut rng);
        assert!(next.over);
        assert!(!next.snake.alive);
    }

    #[test]
    fn over_is_absorbing() {
        let (mut game, mut rng) = running(board(15, false));
        game.snake.head = Position::new(14, 3);
        game.snake.body = vec![Position::new(13, 3)];
        let dead = step(&game, &mut rng);
        assert!(dead.over);

        let mut again = dead.clone();
        for _ in 0..5 {
            again = step(&again, &mut rng);
        }
        assert_eq!(again, dead);

        let toggled = toggle_pause(&toggle_pause(&dead));
        assert_eq!(step(&toggled, &mut rng), toggled);
    }

    #[test]
    fn wrap_cycles_back_to_start() {
        let (mut game, mut rng) = running(board(13, true));
        game.foods = vec![Position::new(0, 0)];
        let start = game.snake.head;
        for _ in 0..13 {
            game = step(&game, &mut rng);
            assert!(!game.over);
        }
        assert_eq!(game.snake.head, start);
    }

    #[test]
    fn eating_last_free_cell_wins() {
        let (mut game, mut rng) = running(board(11, false));
        // Fill every cell but (10,10) with snake, head beside it.
        let mut body: Vec<Position> = Vec::new();
        for y in (0..11).rev() {
            let xs: Vec<Coord> = if y % 2 == 0 { (0..11).rev().collect() } else { (0..11).collect() };
            for x in xs {
                body.push(Position::new(x, y));
            }
        }
        body.retain(|p| *p != Position::new(10, 10) && *p != Position::new(9, 10));
        game.snake.head = Position::new(9, 10);
        game.snake.body = body;
        game.snake.velocity = Right.velocity();
        game.foods = vec![Position::new(10, 10)];

        let next = step(&game, &mut rng);
        assert!(next.over);
        assert!(next.snake.alive);
        assert!(next.is_won());
        assert!(next.foods.is_empty());
        assert_eq!(next.snake.len(), 121);
    }

    #[test]
    fn invariants_hold_over_a_long_run() {
        let mut rng = StdRng::seed_from_u64(99);
        let options = GameOptions { board_size: 12, food_amount: 6, wrap_around: true, ..GameOptions::default() };
        let mut game = GameState::new(options, &mut rng).unwrap();
        let turns = [Down, Left, Up, Right];

        for tick in 0..400 {
            if tick % 5 == 0 {
                game = change_direction(&game, turns[(tick / 5) % 4]);
            }
            let next = step(&game, &mut rng);
            if next.over {
                break;
            }

            let cells: HashSet<_> = next.snake.cells().collect();
            assert_eq!(cells.len(), next.snake.len());
            assert!(next.foods.iter().all(|f| !next.snake.occupies(f)));
            assert_eq!(next.foods.len(), 6);
            game = next;
        }
    }
}
