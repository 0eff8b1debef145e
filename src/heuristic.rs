use crate::common::Cell;

// Greedy minimum-distance crate/goal pairing. Each round matches the
// globally closest unassigned pair and removes both pools' entries, so the
// estimate is non-negative and zero exactly when every crate sits on a
// goal. The greedy assignment can overestimate the optimal matching, which
// keeps the engine best-first rather than A*.
pub fn estimate(crates: &[Cell], goals: &[Cell]) -> u32 {
    let mut total = 0;
    let mut crates: Vec<Cell> = crates.to_vec();
    let mut goals: Vec<Cell> = goals.to_vec();

    while !crates.is_empty() && !goals.is_empty() {
        let mut best = (0, 0, u32::MAX);
        for (crate_index, &crate_cell) in crates.iter().enumerate() {
            for (goal_index, &goal_cell) in goals.iter().enumerate() {
                let distance = crate_cell.manhattan(goal_cell);
                if distance < best.2 {
                    best = (crate_index, goal_index, distance);
                }
            }
        }
        total += best.2;
        crates.swap_remove(best.0);
        goals.swap_remove(best.1);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_when_all_crates_on_goals() {
        let cells = [Cell::new(1, 1), Cell::new(2, 3)];
        assert_eq!(estimate(&cells, &cells), 0);
    }

    #[test]
    fn test_single_pair_distance() {
        assert_eq!(estimate(&[Cell::new(1, 1)], &[Cell::new(3, 4)]), 5);
    }

    #[test]
    fn test_pairs_are_consumed() {
        // Both crates cannot claim the same goal: the closer pair matches
        // first, the second crate takes the remaining goal.
        let crates = [Cell::new(0, 0), Cell::new(0, 3)];
        let goals = [Cell::new(0, 1), Cell::new(0, 10)];
        assert_eq!(estimate(&crates, &goals), 1 + 7);
    }

    #[test]
    fn test_extra_crates_contribute_nothing() {
        let crates = [Cell::new(0, 0), Cell::new(5, 5)];
        let goals = [Cell::new(0, 2)];
        assert_eq!(estimate(&crates, &goals), 2);
    }

    #[test]
    fn test_empty_crate_pool() {
        assert_eq!(estimate(&[], &[Cell::new(1, 1)]), 0);
    }
}
