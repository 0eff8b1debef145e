use smallvec::SmallVec;
use std::cmp::Ordering;
use std::rc::Rc;

use crate::common::Cell;
use crate::zobrist::{Piece, ZobristTable};

// Sorted compact crate container. Keeping the cells ordered makes equality
// and hashing canonical regardless of push order, and membership a binary
// search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CrateSet {
    cells: SmallVec<[Cell; 16]>,
}

impl CrateSet {
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.binary_search(&cell).is_ok()
    }

    pub fn with_moved(&self, from: Cell, to: Cell) -> CrateSet {
        let mut cells = self.cells.clone();
        if let Ok(index) = cells.binary_search(&from) {
            cells.remove(index);
        }
        let insert_at = cells.binary_search(&to).unwrap_err();
        cells.insert(insert_at, to);
        CrateSet { cells }
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl FromIterator<Cell> for CrateSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut cells: SmallVec<[Cell; 16]> = iter.into_iter().collect();
        cells.sort_unstable();
        CrateSet { cells }
    }
}

#[derive(Debug, Clone)]
pub struct State {
    pub pusher: Cell,
    pub crates: Rc<CrateSet>,
    pub path: String,
    pub hash: u64,
    pub heuristic: u32,
}

impl Eq for State {}
impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .heuristic
            .cmp(&self.heuristic) // Inverted for min-heap behavior.
            .then_with(|| other.path.len().cmp(&self.path.len()))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Full recomputation of the incremental hash, used for the initial state.
pub fn compute_hash(pusher: Cell, crates: &CrateSet, zobrist: &ZobristTable) -> u64 {
    let mut hash = zobrist.toggle(0, pusher, Piece::Pusher);
    for crate_cell in crates.iter() {
        hash = zobrist.toggle(hash, crate_cell, Piece::Crate);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_crate_set_is_canonical() {
        let forward = CrateSet::from_iter([Cell::new(1, 1), Cell::new(2, 2)]);
        let backward = CrateSet::from_iter([Cell::new(2, 2), Cell::new(1, 1)]);
        assert_eq!(forward, backward);
        assert_eq!(forward.as_slice(), &[Cell::new(1, 1), Cell::new(2, 2)]);
    }

    #[test]
    fn test_contains_and_with_moved() {
        let crates = CrateSet::from_iter([Cell::new(1, 1), Cell::new(1, 3)]);
        assert!(crates.contains(Cell::new(1, 3)));
        assert!(!crates.contains(Cell::new(1, 2)));

        let moved = crates.with_moved(Cell::new(1, 3), Cell::new(0, 0));
        assert!(moved.contains(Cell::new(0, 0)));
        assert!(!moved.contains(Cell::new(1, 3)));
        assert_eq!(moved.as_slice(), &[Cell::new(0, 0), Cell::new(1, 1)]);
        // The source set is untouched.
        assert!(crates.contains(Cell::new(1, 3)));
    }

    #[test]
    fn test_heap_pops_minimum_heuristic_first() {
        let crates = Rc::new(CrateSet::default());
        let state = |heuristic: u32, path: &str| State {
            pusher: Cell::new(0, 0),
            crates: Rc::clone(&crates),
            path: path.to_string(),
            hash: 0,
            heuristic,
        };

        let mut heap = BinaryHeap::new();
        heap.push(state(7, ""));
        heap.push(state(2, "uu"));
        heap.push(state(2, "u"));
        heap.push(state(5, ""));

        // Equal heuristics fall back to the shorter path.
        let first = heap.pop().unwrap();
        assert_eq!((first.heuristic, first.path.as_str()), (2, "u"));
        assert_eq!(heap.pop().unwrap().path, "uu");
        assert_eq!(heap.pop().unwrap().heuristic, 5);
        assert_eq!(heap.pop().unwrap().heuristic, 7);
    }

    #[test]
    fn test_compute_hash_is_order_independent() {
        let zobrist = ZobristTable::new(4, 4);
        let crates = CrateSet::from_iter([Cell::new(1, 2), Cell::new(2, 1)]);
        let reordered = CrateSet::from_iter([Cell::new(2, 1), Cell::new(1, 2)]);
        assert_eq!(
            compute_hash(Cell::new(1, 1), &crates, &zobrist),
            compute_hash(Cell::new(1, 1), &reordered, &zobrist)
        );
    }
}
