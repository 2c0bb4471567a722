use std::ops::{Add, Sub};

use crate::controls::InputProfile;
use crate::Coord;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Position { x, y }
    }

    pub fn in_bounds(&self, board_size: Coord) -> bool {
        (0..board_size).contains(&self.x) && (0..board_size).contains(&self.y)
    }

    /// Folds each axis back onto the board, one edge crossing at a time.
    pub fn wrapped(self, board_size: Coord) -> Self {
        Position { x: wrap_axis(self.x, board_size), y: wrap_axis(self.y, board_size) }
    }
}

fn wrap_axis(v: Coord, board_size: Coord) -> Coord {
    if v < 0 {
        board_size - 1
    } else if v >= board_size {
        0
    } else {
        v
    }
}

impl Add<Velocity> for Position {
    type Output = Position;

    fn add(self, v: Velocity) -> Position {
        Position { x: self.x + v.x, y: self.y + v.y }
    }
}

impl Sub for Position {
    type Output = Velocity;

    fn sub(self, other: Position) -> Velocity {
        Velocity { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Per-tick displacement of the head. A heading is a unit vector on one axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Velocity {
    pub x: Coord,
    pub y: Coord,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Left, Up, Right, Down];

    pub fn velocity(self) -> Velocity {
        let (x, y) = match self {
            Left => (-1, 0),
            Up => (0, -1),
            Right => (1, 0),
            Down => (0, 1),
        };
        Velocity { x, y }
    }

    pub fn from_velocity(v: Velocity) -> Option<Direction> {
        Direction::ALL.iter().copied().find(|d| d.velocity() == v)
    }

    pub fn name(self) -> &'static str {
        match self {
            Left => "left",
            Up => "up",
            Right => "right",
            Down => "down",
        }
    }

    pub fn from_name(name: &str) -> Option<Direction> {
        Direction::ALL.iter().copied().find(|d| d.name() == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    pub head: Position,
    /// Segments behind the head, nearest first.
    pub body: Vec<Position>,
    pub velocity: Velocity,
    pub input_controls: &'static InputProfile,
    pub alive: bool,
}

impl Snake {
    /// A straight snake whose body trails away from `direction`.
    pub fn new(head: Position, body_len: usize, direction: Direction, input_controls: &'static InputProfile) -> Self {
        let velocity = direction.velocity();
        let body = (1..=body_len as Coord)
            .map(|i| Position::new(head.x - velocity.x * i, head.y - velocity.y * i))
            .collect();

        Snake { head, body, velocity, input_controls, alive: true }
    }

    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Head followed by the body, nearest segment first.
    pub fn cells(&self) -> impl Iterator<Item = &Position> + '_ {
        std::iter::once(&self.head).chain(self.body.iter())
    }

    pub fn occupies(&self, pos: &Position) -> bool {
        self.cells().any(|p| p == pos)
    }

    /// The heading the snake actually moved with on the last tick, read from
    /// the head and the first body segment rather than from `velocity`.
    /// On a wrapping board a segment pair split across an edge still reads
    /// as a unit step.
    pub fn heading(&self, wrapping: bool) -> Velocity {
        let first = match self.body.first() {
            Some(first) => *first,
            None => return self.velocity,
        };

        let delta = self.head - first;
        if wrapping {
            Velocity { x: unwrap_delta(delta.x), y: unwrap_delta(delta.y) }
        } else {
            delta
        }
    }

    pub fn head_char(&self) -> char {
        match Direction::from_velocity(self.velocity) {
            Some(Up) => '^',
            Some(Down) => 'v',
            Some(Left) => '<',
            Some(Right) | None => '>',
        }
    }
}

fn unwrap_delta(d: Coord) -> Coord {
    if d.abs() > 1 {
        -d.signum()
    } else {
        d
    }
}
