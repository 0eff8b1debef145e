use std::collections::VecDeque;
use tracing::debug;

use crate::common::{Cell, Direction};

pub const WALL: char = '#';
pub const GOAL: char = '.';
pub const FLOOR: char = ' ';
pub const PUSHER: char = '@';
pub const CRATE: char = '$';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Goal,
}

#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    goals: Vec<Cell>,
    dead: Vec<bool>,
    room_ids: Vec<i32>,
    goals_per_room: Vec<usize>,
}

impl Board {
    pub fn new(width: usize, height: usize, map_data: &[Vec<char>]) -> Self {
        let mut tiles = Vec::with_capacity(width * height);
        for row in map_data.iter().take(height) {
            for &ch in row.iter().take(width) {
                tiles.push(match ch {
                    WALL => Tile::Wall,
                    GOAL => Tile::Goal,
                    _ => Tile::Floor,
                });
            }
        }

        let mut board = Board {
            width,
            height,
            tiles,
            goals: Vec::new(),
            dead: vec![false; width * height],
            room_ids: vec![-1; width * height],
            goals_per_room: Vec::new(),
        };
        board.find_goals();
        board.compute_dead_squares();
        board.compute_rooms();
        debug!(
            "board {}x{}: {} goals, {} rooms",
            width,
            height,
            board.goals.len(),
            board.goals_per_room.len()
        );
        board
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && (cell.row as usize) < self.height
            && cell.col >= 0
            && (cell.col as usize) < self.width
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row as usize * self.width + cell.col as usize
    }

    // Out-of-range cells read as walls, so neighbor probes stay total.
    pub fn tile(&self, cell: Cell) -> Tile {
        if !self.in_bounds(cell) {
            return Tile::Wall;
        }
        self.tiles[self.index(cell)]
    }

    pub fn goals(&self) -> &[Cell] {
        &self.goals
    }

    pub fn is_dead(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.dead[self.index(cell)]
    }

    pub fn room_id(&self, cell: Cell) -> i32 {
        if !self.in_bounds(cell) {
            return -1;
        }
        self.room_ids[self.index(cell)]
    }

    pub fn room_count(&self) -> usize {
        self.goals_per_room.len()
    }

    pub fn goal_count_for_room(&self, room: usize) -> usize {
        self.goals_per_room[room]
    }

    fn find_goals(&mut self) {
        for row in 0..self.height as i32 {
            for col in 0..self.width as i32 {
                let cell = Cell::new(row, col);
                if self.tile(cell) == Tile::Goal {
                    self.goals.push(cell);
                }
            }
        }
    }

    // Reverse-pull reachability from every goal. A crate on `origin` is
    // pulled onto `target` by a pusher standing one cell beyond `origin`
    // in the pull direction. Cells no pull sequence reaches are dead.
    fn compute_dead_squares(&mut self) {
        let mut live = vec![false; self.width * self.height];
        let mut queue: VecDeque<Cell> = VecDeque::new();

        for &goal in &self.goals {
            live[self.index(goal)] = true;
            queue.push_back(goal);
        }

        while let Some(target) = queue.pop_front() {
            for direction in Direction::ALL {
                let origin = target.neighbor(direction.opposite());
                let pusher = origin.neighbor(direction.opposite());

                if self.tile(origin) == Tile::Wall || self.tile(pusher) == Tile::Wall {
                    continue;
                }
                if live[self.index(origin)] {
                    continue;
                }
                live[self.index(origin)] = true;
                queue.push_back(origin);
            }
        }

        for row in 0..self.height as i32 {
            for col in 0..self.width as i32 {
                let cell = Cell::new(row, col);
                let index = self.index(cell);
                if self.tile(cell) != Tile::Wall && !live[index] {
                    self.dead[index] = true;
                }
            }
        }
    }

    // Labels 4-connected non-wall components in row-major scan order and
    // records the goal count per component.
    fn compute_rooms(&mut self) {
        let mut next_room = 0;
        for row in 0..self.height as i32 {
            for col in 0..self.width as i32 {
                let cell = Cell::new(row, col);
                if self.tile(cell) != Tile::Wall && self.room_id(cell) == -1 {
                    let goal_count = self.flood_fill(cell, next_room);
                    self.goals_per_room.push(goal_count);
                    next_room += 1;
                }
            }
        }
    }

    fn flood_fill(&mut self, start: Cell, room: i32) -> usize {
        let mut goal_count = 0;
        let mut queue = VecDeque::new();
        let start_index = self.index(start);
        self.room_ids[start_index] = room;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if self.tile(current) == Tile::Goal {
                goal_count += 1;
            }
            for direction in Direction::ALL {
                let neighbor = current.neighbor(direction);
                if self.tile(neighbor) != Tile::Wall && self.room_id(neighbor) == -1 {
                    let index = self.index(neighbor);
                    self.room_ids[index] = room;
                    queue.push_back(neighbor);
                }
            }
        }
        goal_count
    }
}
