use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{bail, Context};

use crate::common::{Action, Cell};

#[derive(Debug, Clone)]
pub struct Tile {
    passable: bool,
}

impl Tile {
    pub fn is_passable(&self) -> bool {
        self.passable
    }
}

/// Rectangular obstacle grid. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Map {
    pub height: usize,
    pub width: usize,
    pub grid: Vec<Vec<Tile>>,
}

impl Map {
    /// Loads a MovingAI-style map file: a `type` line, `height N`, `width N`,
    /// a `map` marker, then `height` rows of characters where `.` is passable.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open map file {path}"))?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let mut header = || -> anyhow::Result<String> {
            lines
                .next()
                .ok_or_else(|| anyhow::anyhow!("truncated map header in {path}"))?
                .context("failed to read map header line")
        };

        let _type = header()?;
        let height: usize = header()?
            .split_whitespace()
            .last()
            .context("missing height value")?
            .parse()
            .context("invalid height value")?;
        let width: usize = header()?
            .split_whitespace()
            .last()
            .context("missing width value")?
            .parse()
            .context("invalid width value")?;
        let _map = header()?;

        let mut rows = Vec::with_capacity(height);
        for line in lines.take(height) {
            rows.push(line?);
        }
        if rows.len() != height {
            bail!("map file {path} has {} rows, expected {height}", rows.len());
        }

        Self::from_rows(&rows, width)
    }

    /// Builds a map from ASCII rows (`.` passable, anything else a wall).
    /// Width is taken from the first row; ragged rows are rejected.
    pub fn from_ascii(ascii: &str) -> anyhow::Result<Self> {
        let rows: Vec<String> = ascii
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if rows.is_empty() {
            bail!("empty map");
        }
        let width = rows[0].chars().count();
        Self::from_rows(&rows, width)
    }

    fn from_rows(rows: &[String], width: usize) -> anyhow::Result<Self> {
        let mut grid = Vec::with_capacity(rows.len());
        for (x, row) in rows.iter().enumerate() {
            let tiles: Vec<Tile> = row.chars().map(|ch| Tile { passable: ch == '.' }).collect();
            if tiles.len() != width {
                bail!(
                    "ragged map: row {x} has {} cells, expected {width}",
                    tiles.len()
                );
            }
            grid.push(tiles);
        }
        Ok(Map {
            height: grid.len(),
            width,
            grid,
        })
    }

    /// Whether `cell` is inside the grid and not a wall. Out-of-grid cells
    /// are impassable, so callers never index out of range.
    pub fn is_passable(&self, cell: Cell) -> bool {
        cell.0 < self.height && cell.1 < self.width && self.grid[cell.0][cell.1].is_passable()
    }

    /// Passable 4-neighbors of `cell`, bound-checked.
    pub fn get_neighbors(&self, cell: Cell) -> Vec<Cell> {
        Action::ALL
            .iter()
            .filter_map(|action| action.apply(cell, self.height, self.width))
            .filter(|&neighbor| self.is_passable(neighbor))
            .collect()
    }

    /// All passable cells in row-major order.
    pub fn free_cells(&self) -> Vec<Cell> {
        (0..self.height)
            .flat_map(|x| (0..self.width).map(move |y| (x, y)))
            .filter(|&cell| self.is_passable(cell))
            .collect()
    }
}
