use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::Cell;

// Fixed seed so state hashes are reproducible across runs.
const ZOBRIST_SEED: u64 = 12345;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    Pusher = 0,
    Crate = 1,
}

#[derive(Debug, Clone)]
pub struct ZobristTable {
    width: usize,
    // Flattened [row][col][piece] table of random 64-bit values.
    table: Vec<u64>,
}

impl ZobristTable {
    pub fn new(height: usize, width: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let table = (0..height * width * 2).map(|_| rng.gen()).collect();
        ZobristTable { width, table }
    }

    pub fn toggle(&self, hash: u64, cell: Cell, piece: Piece) -> u64 {
        let index = (cell.row as usize * self.width + cell.col as usize) * 2 + piece as usize;
        hash ^ self.table[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_involution() {
        let table = ZobristTable::new(4, 5);
        let cell = Cell::new(2, 3);
        let hash = table.toggle(0, cell, Piece::Crate);
        assert_ne!(hash, 0);
        assert_eq!(table.toggle(hash, cell, Piece::Crate), 0);
    }

    #[test]
    fn test_pieces_hash_independently() {
        let table = ZobristTable::new(4, 5);
        let cell = Cell::new(1, 1);
        assert_ne!(
            table.toggle(0, cell, Piece::Pusher),
            table.toggle(0, cell, Piece::Crate)
        );
    }

    #[test]
    fn test_reproducible_across_instances() {
        let first = ZobristTable::new(6, 7);
        let second = ZobristTable::new(6, 7);
        for row in 0..6 {
            for col in 0..7 {
                let cell = Cell::new(row, col);
                assert_eq!(
                    first.toggle(0, cell, Piece::Pusher),
                    second.toggle(0, cell, Piece::Pusher)
                );
                assert_eq!(
                    first.toggle(0, cell, Piece::Crate),
                    second.toggle(0, cell, Piece::Crate)
                );
            }
        }
    }

    #[test]
    fn test_move_composes_from_two_toggles() {
        let table = ZobristTable::new(3, 3);
        let from = Cell::new(1, 1);
        let to = Cell::new(1, 2);
        let start = table.toggle(0, from, Piece::Crate);
        let moved = table.toggle(table.toggle(start, from, Piece::Crate), to, Piece::Crate);
        assert_eq!(moved, table.toggle(0, to, Piece::Crate));
    }
}
