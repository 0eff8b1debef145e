use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::board::{CRATE, FLOOR, GOAL, PUSHER, WALL};

// Combined symbols used by level files for pieces standing on goals.
const CRATE_ON_GOAL: char = '*';
const PUSHER_ON_GOAL: char = '+';

#[derive(Debug, Clone)]
pub struct Level {
    pub width: usize,
    pub height: usize,
    pub map_data: Vec<Vec<char>>,
    pub items_data: Vec<Vec<char>>,
}

impl Level {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Level> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read level file {}", path.display()))?;
        Level::from_text(&text)
    }

    // Splits the combined level text into the static map grid and the
    // dynamic items grid the solver consumes. Short rows are padded with
    // floor to keep both grids rectangular.
    pub fn from_text(text: &str) -> Result<Level> {
        let rows: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        if rows.is_empty() {
            bail!("level text contains no rows");
        }

        let height = rows.len();
        let width = rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);

        let mut map_data = vec![vec![FLOOR; width]; height];
        let mut items_data = vec![vec![FLOOR; width]; height];
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let (map_ch, item_ch) = match ch {
                    WALL => (WALL, FLOOR),
                    GOAL => (GOAL, FLOOR),
                    FLOOR => (FLOOR, FLOOR),
                    PUSHER => (FLOOR, PUSHER),
                    CRATE => (FLOOR, CRATE),
                    CRATE_ON_GOAL => (GOAL, CRATE),
                    PUSHER_ON_GOAL => (GOAL, PUSHER),
                    _ => bail!("unexpected character {ch:?} at row {row}, column {col}"),
                };
                map_data[row][col] = map_ch;
                items_data[row][col] = item_ch;
            }
        }

        debug!("loaded level {width}x{height}");
        Ok(Level {
            width,
            height,
            map_data,
            items_data,
        })
    }
}
