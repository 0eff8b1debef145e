use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::board::{Board, Tile};
use crate::state::CrateSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    pub fn neighbor(self, direction: Direction) -> Cell {
        let (d_row, d_col) = direction.delta();
        Cell {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    // Fixed expansion order, which keeps successor generation deterministic.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Direction> {
        match symbol {
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Solved(Solution),
    NoSolution,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub moves: String,
}

impl Solution {
    pub fn verify(&self, board: &Board, pusher: Cell, crates: &CrateSet) -> bool {
        let mut pusher = pusher;
        let mut crates = crates.clone();

        for symbol in self.moves.chars() {
            let Some(direction) = Direction::from_symbol(symbol) else {
                error!("unknown move symbol {symbol:?}");
                return false;
            };
            match step(board, pusher, &crates, direction) {
                Some((next_pusher, next_crates)) => {
                    pusher = next_pusher;
                    crates = next_crates;
                }
                None => {
                    error!("illegal move {symbol:?} at pusher {pusher:?}");
                    return false;
                }
            }
        }

        if crates.len() != board.goals().len()
            || !crates.iter().all(|c| board.tile(c) == Tile::Goal)
        {
            error!("replay ended with crates off goal: {crates:?}");
            return false;
        }

        true
    }

    pub fn log_solution(&self) {
        debug!("solution ({} moves): {}", self.moves.len(), self.moves);
    }
}

// Applies one pusher move, either a walk or a push. Returns the next
// configuration, or None when the move is illegal.
pub fn step(
    board: &Board,
    pusher: Cell,
    crates: &CrateSet,
    direction: Direction,
) -> Option<(Cell, CrateSet)> {
    let next_pusher = pusher.neighbor(direction);
    if board.tile(next_pusher) == Tile::Wall {
        return None;
    }

    if crates.contains(next_pusher) {
        let next_crate = next_pusher.neighbor(direction);
        if board.tile(next_crate) == Tile::Wall || crates.contains(next_crate) {
            return None;
        }
        Some((next_pusher, crates.with_moved(next_pusher, next_crate)))
    } else {
        Some((next_pusher, crates.clone()))
    }
}
