use anyhow::{bail, Result};
use rustc_hash::FxHashSet;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, trace};

use super::Solver;
use crate::board::{Board, Tile, CRATE, FLOOR, GOAL, PUSHER, WALL};
use crate::common::{Cell, Direction, SearchResult, Solution};
use crate::deadlock;
use crate::heuristic;
use crate::stat::Stats;
use crate::state::{compute_hash, CrateSet, State};
use crate::zobrist::{Piece, ZobristTable};

const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(15);

pub struct BestFirstSolver {
    board: Board,
    zobrist: ZobristTable,
    initial: State,
    time_limit: Duration,
    stats: Stats,
}

impl BestFirstSolver {
    pub fn new(
        width: usize,
        height: usize,
        map_data: &[Vec<char>],
        items_data: &[Vec<char>],
    ) -> Result<Self> {
        validate_input(width, height, map_data, items_data)?;

        let board = Board::new(width, height, map_data);
        let zobrist = ZobristTable::new(height, width);

        let mut pusher = Cell::new(0, 0);
        let mut crates = Vec::new();
        for (row, cells) in items_data.iter().enumerate() {
            for (col, &ch) in cells.iter().enumerate() {
                let cell = Cell::new(row as i32, col as i32);
                match ch {
                    PUSHER => pusher = cell,
                    CRATE => crates.push(cell),
                    _ => {}
                }
            }
        }
        let crates: CrateSet = crates.into_iter().collect();

        let stats = Stats {
            heuristic_evals: 1,
            ..Stats::default()
        };
        let initial = State {
            pusher,
            hash: compute_hash(pusher, &crates, &zobrist),
            heuristic: heuristic::estimate(crates.as_slice(), board.goals()),
            crates: Rc::new(crates),
            path: String::new(),
        };
        debug!(
            "initial state: pusher {:?}, {} crates, heuristic {}",
            initial.pusher,
            initial.crates.len(),
            initial.heuristic
        );

        Ok(BestFirstSolver {
            board,
            zobrist,
            initial,
            time_limit: DEFAULT_TIME_LIMIT,
            stats,
        })
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn verify(&self, solution: &Solution) -> bool {
        solution.verify(&self.board, self.initial.pusher, &self.initial.crates)
    }

    fn is_goal(&self, state: &State) -> bool {
        state.crates.len() == self.board.goals().len()
            && state.crates.iter().all(|c| self.board.tile(c) == Tile::Goal)
    }

    // Candidate successor in one direction: a walk, a push, or no move.
    fn try_move(&mut self, state: &State, direction: Direction) -> Option<State> {
        let next_pusher = state.pusher.neighbor(direction);
        if self.board.tile(next_pusher) == Tile::Wall {
            return None;
        }

        let mut path = state.path.clone();
        path.push(direction.symbol());

        let mut hash = state.hash;
        hash = self.zobrist.toggle(hash, state.pusher, Piece::Pusher);
        hash = self.zobrist.toggle(hash, next_pusher, Piece::Pusher);

        if state.crates.contains(next_pusher) {
            let next_crate = next_pusher.neighbor(direction);
            if self.board.tile(next_crate) == Tile::Wall || state.crates.contains(next_crate) {
                return None;
            }
            hash = self.zobrist.toggle(hash, next_pusher, Piece::Crate);
            hash = self.zobrist.toggle(hash, next_crate, Piece::Crate);

            let crates = state.crates.with_moved(next_pusher, next_crate);
            self.stats.heuristic_evals += 1;
            Some(State {
                pusher: next_pusher,
                heuristic: heuristic::estimate(crates.as_slice(), self.board.goals()),
                crates: Rc::new(crates),
                path,
                hash,
            })
        } else {
            // A walk leaves the crates untouched, so the parent's set and
            // its cached estimate carry over as-is.
            Some(State {
                pusher: next_pusher,
                crates: Rc::clone(&state.crates),
                path,
                hash,
                heuristic: state.heuristic,
            })
        }
    }
}

impl Solver for BestFirstSolver {
    #[instrument(skip_all, name = "best_first_search", level = "debug")]
    fn solve(&mut self) -> SearchResult {
        let solve_start_time = Instant::now();
        let deadline = solve_start_time + self.time_limit;

        let mut open = BinaryHeap::new();
        let mut closed: FxHashSet<u64> = FxHashSet::default();
        open.push(self.initial.clone());

        let result = loop {
            let Some(current) = open.pop() else {
                break SearchResult::NoSolution;
            };

            if Instant::now() >= deadline {
                break SearchResult::TimedOut;
            }

            if self.is_goal(&current) {
                let solution = Solution {
                    moves: current.path,
                };
                solution.log_solution();
                break SearchResult::Solved(solution);
            }

            // Deferred deduplication: the same hash may sit in the frontier
            // several times, so the closed check at pop is the gate.
            if !closed.insert(current.hash) {
                continue;
            }
            self.stats.expanded_nodes += 1;
            trace!(
                "expand pusher {:?} heuristic {} path length {}",
                current.pusher,
                current.heuristic,
                current.path.len()
            );

            for direction in Direction::ALL {
                let Some(next) = self.try_move(&current, direction) else {
                    continue;
                };
                if closed.contains(&next.hash) {
                    self.stats.duplicate_hits += 1;
                    continue;
                }
                if deadlock::is_deadlock(&next.crates, &self.board) {
                    self.stats.deadlock_prunes += 1;
                    continue;
                }
                self.stats.generated_nodes += 1;
                open.push(next);
            }
        };

        self.stats.time_us = solve_start_time.elapsed().as_micros();
        self.stats.print();
        result
    }
}

fn validate_input(
    width: usize,
    height: usize,
    map_data: &[Vec<char>],
    items_data: &[Vec<char>],
) -> Result<()> {
    if width == 0 || height == 0 {
        bail!("board must be non-empty, got {width}x{height}");
    }
    validate_grid_shape(width, height, map_data, "map")?;
    validate_grid_shape(width, height, items_data, "items")?;

    let mut pusher_count = 0;
    for row in 0..height {
        for col in 0..width {
            let map_ch = map_data[row][col];
            if !matches!(map_ch, WALL | GOAL | FLOOR) {
                bail!("unexpected map character {map_ch:?} at ({row}, {col})");
            }

            let item_ch = items_data[row][col];
            match item_ch {
                PUSHER => {
                    pusher_count += 1;
                    if map_ch == WALL {
                        bail!("pusher on a wall at ({row}, {col})");
                    }
                }
                CRATE => {
                    if map_ch == WALL {
                        bail!("crate on a wall at ({row}, {col})");
                    }
                }
                FLOOR => {}
                _ => bail!("unexpected items character {item_ch:?} at ({row}, {col})"),
            }

            let on_border = row == 0 || row == height - 1 || col == 0 || col == width - 1;
            if on_border && map_ch != WALL {
                bail!("border cell ({row}, {col}) is not a wall");
            }
        }
    }

    if pusher_count != 1 {
        bail!("expected exactly one pusher, found {pusher_count}");
    }
    Ok(())
}

fn validate_grid_shape(
    width: usize,
    height: usize,
    grid: &[Vec<char>],
    name: &str,
) -> Result<()> {
    if grid.len() != height {
        bail!("{name} grid has {} rows, expected {height}", grid.len());
    }
    for (row, cells) in grid.iter().enumerate() {
        if cells.len() != width {
            bail!(
                "{name} grid row {row} has {} cells, expected {width}",
                cells.len()
            );
        }
    }
    Ok(())
}
