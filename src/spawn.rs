//! Placement of new food on free cells.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::snake::Position;
use crate::Coord;

/// Produces up to `count` distinct in-bounds positions that avoid `occupied`
/// and each other.
///
/// Fewer than `count` come back only when the board runs out of free cells.
/// While the board is mostly empty a uniform draw is retried until it lands
/// on a free cell; once free cells are scarce they are listed and sampled
/// directly so the call always finishes in O(cells).
pub fn empty_positions<'a, R, I>(rng: &mut R, board_size: Coord, occupied: I, count: usize) -> Vec<Position>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Position>,
{
    let mut taken: HashSet<Position> = occupied
        .into_iter()
        .filter(|p| p.in_bounds(board_size))
        .copied()
        .collect();

    let cells = (board_size.max(0) as usize).pow(2);
    let free = cells - taken.len();
    let count = count.min(free);

    if free - count < cells / 2 {
        return sample_free(rng, board_size, &taken, count);
    }

    let mut positions = Vec::with_capacity(count);
    while positions.len() < count {
        let pos = Position::new(rng.gen_range(0..board_size), rng.gen_range(0..board_size));
        if taken.insert(pos) {
            positions.push(pos);
        }
    }

    positions
}

fn sample_free<R: Rng + ?Sized>(rng: &mut R, board_size: Coord, taken: &HashSet<Position>, count: usize) -> Vec<Position> {
    let free: Vec<Position> = (0..board_size)
        .flat_map(|y| (0..board_size).map(move |x| Position::new(x, y)))
        .filter(|p| !taken.contains(p))
        .collect();

    free.choose_multiple(rng, count).copied().collect()
}
