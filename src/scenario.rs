use std::fs::File;
use std::io::BufReader;

use anyhow::{bail, Context};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::Cell;
use crate::map::Map;
use crate::problem::default_corners;

/// One problem instance as loaded from a YAML file: the map, an optional
/// start cell, and optional explicit landmarks. Missing landmarks default to
/// the four grid corners; a missing start is drawn from the free cells.
#[derive(Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub map: String,
    pub start: Option<[usize; 2]>,
    pub corners: Option<Vec<[usize; 2]>>,
}

impl Scenario {
    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open scenario file {path}"))?;
        let reader = BufReader::new(file);
        serde_yaml::from_reader(reader).with_context(|| format!("malformed scenario file {path}"))
    }

    /// Landmarks of this scenario, defaulting to the grid corners just
    /// inside the outer wall ring. Fails when the map is too small to have
    /// default corners.
    pub fn corner_cells(&self, map: &Map) -> anyhow::Result<Vec<Cell>> {
        match &self.corners {
            Some(corners) => Ok(corners.iter().map(|&[x, y]| (x, y)).collect()),
            None => default_corners(map),
        }
    }

    /// The configured start cell, or a random free non-landmark cell.
    pub fn start_cell<R: Rng + ?Sized>(&self, map: &Map, rng: &mut R) -> anyhow::Result<Cell> {
        if let Some([x, y]) = self.start {
            if !map.is_passable((x, y)) {
                bail!("scenario start cell ({x}, {y}) is a wall");
            }
            return Ok((x, y));
        }

        let corners = self.corner_cells(map)?;
        let candidates: Vec<Cell> = map
            .free_cells()
            .into_iter()
            .filter(|cell| !corners.contains(cell))
            .collect();
        let start = *candidates
            .choose(rng)
            .context("map has no free non-landmark cell to start from")?;
        info!("picked random start cell {start:?}");
        Ok(start)
    }
}
