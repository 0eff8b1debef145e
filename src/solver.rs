mod bestfirst;

pub use bestfirst::BestFirstSolver;

use crate::common::SearchResult;

pub trait Solver {
    fn solve(&mut self) -> SearchResult;
}
