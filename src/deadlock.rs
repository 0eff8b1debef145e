use crate::board::{Board, Tile};
use crate::common::{Cell, Direction};
use crate::state::CrateSet;

// Compound unsolvability predicate applied to every candidate successor.
// The per-crate checks short-circuit; the room capacity check runs last.
pub fn is_deadlock(crates: &CrateSet, board: &Board) -> bool {
    for crate_cell in crates.iter() {
        if board.is_dead(crate_cell)
            || is_simple_corner(crate_cell, board)
            || is_frozen_against_wall(crate_cell, crates, board)
            || is_2x2_block(crate_cell, crates, board)
        {
            return true;
        }
    }
    is_room_overfull(crates, board)
}

// A non-goal crate with a wall on one vertical and one horizontal side can
// never be pushed again.
fn is_simple_corner(crate_cell: Cell, board: &Board) -> bool {
    if board.tile(crate_cell) == Tile::Goal {
        return false;
    }
    let wall = |direction| board.tile(crate_cell.neighbor(direction)) == Tile::Wall;
    (wall(Direction::Up) || wall(Direction::Down))
        && (wall(Direction::Left) || wall(Direction::Right))
}

// A non-goal crate pinned to a wall is stuck once both moves parallel to
// the wall are blocked by walls or other crates.
fn is_frozen_against_wall(crate_cell: Cell, crates: &CrateSet, board: &Board) -> bool {
    if board.tile(crate_cell) == Tile::Goal {
        return false;
    }
    let wall = |direction: Direction| board.tile(crate_cell.neighbor(direction)) == Tile::Wall;
    let blocked = |direction: Direction| {
        wall(direction) || crates.contains(crate_cell.neighbor(direction))
    };

    if (wall(Direction::Up) || wall(Direction::Down))
        && blocked(Direction::Left)
        && blocked(Direction::Right)
    {
        return true;
    }
    (wall(Direction::Left) || wall(Direction::Right))
        && blocked(Direction::Up)
        && blocked(Direction::Down)
}

// Four crates forming a 2x2 block are mutually immobile. Checking from the
// top-left member is enough: the search reaches the other orientations when
// it visits their top-left corner.
fn is_2x2_block(crate_cell: Cell, crates: &CrateSet, board: &Board) -> bool {
    let right = crate_cell.neighbor(Direction::Right);
    let down = crate_cell.neighbor(Direction::Down);
    let diagonal = down.neighbor(Direction::Right);

    if !crates.contains(right) || !crates.contains(down) || !crates.contains(diagonal) {
        return false;
    }
    [crate_cell, right, down, diagonal]
        .iter()
        .any(|&cell| board.tile(cell) != Tile::Goal)
}

// Global counting argument: crates cannot cross walls, so a room holding
// more crates than goals can never be cleared.
fn is_room_overfull(crates: &CrateSet, board: &Board) -> bool {
    if board.room_count() == 0 {
        return false;
    }
    let mut crate_counts = vec![0usize; board.room_count()];
    for crate_cell in crates.iter() {
        let room = board.room_id(crate_cell);
        if room >= 0 {
            crate_counts[room as usize] += 1;
        }
    }
    crate_counts
        .iter()
        .enumerate()
        .any(|(room, &count)| count > board.goal_count_for_room(room))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::board_from_rows;

    #[test]
    fn test_static_dead_square() {
        // The lower row cannot reach the pocketed goal.
        let board = board_from_rows(&["#####", "# . #", "#   #", "#####"]);
        let crates = CrateSet::from_iter([Cell::new(2, 2)]);
        assert!(is_deadlock(&crates, &board));
    }

    #[test]
    fn test_simple_corner() {
        let board = board_from_rows(&["#####", "#  .#", "#   #", "#####"]);
        assert!(is_simple_corner(Cell::new(1, 1), &board));
        assert!(is_simple_corner(Cell::new(2, 3), &board));
        // Mid-edge cells and goal corners are not corners.
        assert!(!is_simple_corner(Cell::new(1, 2), &board));
        assert!(!is_simple_corner(Cell::new(2, 2), &board));
        assert!(!is_simple_corner(Cell::new(1, 3), &board));
    }

    #[test]
    fn test_frozen_against_wall() {
        // Three crates against the top wall; the goal keeps the row live.
        let board = board_from_rows(&["########", "#     .#", "#      #", "########"]);
        let crates = CrateSet::from_iter([Cell::new(1, 2), Cell::new(1, 3), Cell::new(1, 4)]);
        assert!(is_frozen_against_wall(Cell::new(1, 3), &crates, &board));
        assert!(is_deadlock(&crates, &board));

        // A lone crate against the wall can still slide sideways.
        let lone = CrateSet::from_iter([Cell::new(1, 3)]);
        assert!(!is_frozen_against_wall(Cell::new(1, 3), &lone, &board));
        assert!(!is_deadlock(&lone, &board));
    }

    #[test]
    fn test_frozen_against_side_wall() {
        let board = board_from_rows(&["#####", "#.  #", "#   #", "#.  #", "#####"]);
        let crates = CrateSet::from_iter([Cell::new(1, 1), Cell::new(2, 1), Cell::new(3, 1)]);
        // Left wall, crates above and below.
        assert!(is_frozen_against_wall(Cell::new(2, 1), &crates, &board));
    }

    #[test]
    fn test_2x2_block() {
        let board = board_from_rows(&[
            "#######", "#     #", "# ..  #", "# .. .#", "#     #", "#######",
        ]);
        // All four members on goals: stable, not a deadlock.
        let on_goals = CrateSet::from_iter([
            Cell::new(2, 2),
            Cell::new(2, 3),
            Cell::new(3, 2),
            Cell::new(3, 3),
        ]);
        assert!(!is_2x2_block(Cell::new(2, 2), &on_goals, &board));
        assert!(!is_deadlock(&on_goals, &board));

        // Shift the block right by one: (2,4) and (3,4) are plain floor.
        let off_goals = CrateSet::from_iter([
            Cell::new(2, 3),
            Cell::new(2, 4),
            Cell::new(3, 3),
            Cell::new(3, 4),
        ]);
        assert!(is_2x2_block(Cell::new(2, 3), &off_goals, &board));
        assert!(is_deadlock(&off_goals, &board));

        // Three crates are not a block.
        let three = CrateSet::from_iter([Cell::new(2, 2), Cell::new(2, 3), Cell::new(3, 2)]);
        assert!(!is_2x2_block(Cell::new(2, 2), &three, &board));
    }

    #[test]
    fn test_room_overfull() {
        // Two walled-off rooms with one goal each.
        let board = board_from_rows(&["###########", "#    #    #", "#  . #  . #", "#    #    #", "###########"]);
        let balanced = CrateSet::from_iter([Cell::new(2, 2), Cell::new(2, 8)]);
        assert!(!is_room_overfull(&balanced, &board));

        let crowded = CrateSet::from_iter([Cell::new(2, 2), Cell::new(2, 3)]);
        assert!(is_room_overfull(&crowded, &board));
        assert!(is_deadlock(&crowded, &board));
    }
}
