//! Cell classification for renderers.

use crate::snake::Position;
use crate::state::GameState;
use crate::Coord;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Food,
    Body { alive: bool },
    Head { alive: bool },
}

impl Cell {
    pub fn is_snake(self) -> bool {
        matches!(self, Cell::Body { .. } | Cell::Head { .. })
    }
}

/// Classifies one cell. Body segments cover food, food covers the head.
pub fn cell_at(state: &GameState, pos: Position) -> Cell {
    let snake = &state.snake;
    if snake.body.contains(&pos) {
        Cell::Body { alive: snake.alive }
    } else if state.foods.contains(&pos) {
        Cell::Food
    } else if snake.head == pos {
        Cell::Head { alive: snake.alive }
    } else {
        Cell::Empty
    }
}

/// Row-major `board_size x board_size` grid, `grid[y][x]`.
pub fn grid(state: &GameState) -> Vec<Vec<Cell>> {
    let n = state.board_size.max(0) as usize;
    let mut rows = vec![vec![Cell::Empty; n]; n];
    let mut paint = |pos: &Position, cell: Cell| {
        if pos.in_bounds(state.board_size) {
            rows[pos.y as usize][pos.x as usize] = cell;
        }
    };

    paint(&state.snake.head, Cell::Head { alive: state.snake.alive });
    for food in &state.foods {
        paint(food, Cell::Food);
    }
    for limb in &state.snake.body {
        paint(limb, Cell::Body { alive: state.snake.alive });
    }

    rows
}

/// Every cell whose classification differs between two snapshots.
pub fn changed_cells(before: &GameState, after: &GameState) -> Vec<(Position, Cell)> {
    let size: Coord = after.board_size;
    let old = grid(before);
    let new = grid(after);

    let mut changed = Vec::new();
    for y in 0..size {
        for x in 0..size {
            let (ux, uy) = (x as usize, y as usize);
            let prev = old.get(uy).and_then(|row| row.get(ux)).copied();
            if prev != Some(new[uy][ux]) {
                changed.push((Position::new(x, y), new[uy][ux]));
            }
        }
    }
    changed
}
