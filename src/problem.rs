use std::cell::Cell as Counter;

use anyhow::bail;

use crate::common::{Action, Cell, State, VisitedSet, INVALID_PATH_COST};
use crate::graph::Graph;
use crate::map::Map;

/// Interface the search engine depends on. One concrete type per problem
/// kind; the engine never introspects beyond these four operations.
pub trait SearchProblem {
    fn get_start_state(&self) -> State;
    fn is_goal_state(&self, state: &State) -> bool;
    fn get_successors(&self, state: &State) -> Vec<(State, Action, usize)>;
    fn get_cost_of_actions(&self, actions: &[Action]) -> usize;
}

/// Multi-goal shortest-path problem: visit every landmark ("corner") at
/// least once, moving in the four cardinal directions over free cells.
#[derive(Debug)]
pub struct CornersProblem {
    map: Map,
    start: Cell,
    corners: Vec<Cell>,
    grid_graph: Graph,
    corner_graph: Graph,
    expanded: Counter<usize>,
}

impl CornersProblem {
    /// Builds the problem with explicit landmarks. Construction validates
    /// that every landmark is a free cell and that all landmarks and the
    /// start are mutually reachable; an unreachable pair is fatal here, not
    /// a condition the search discovers later.
    pub fn new(map: &Map, start: Cell, corners: Vec<Cell>) -> anyhow::Result<Self> {
        if corners.is_empty() || corners.len() > 8 {
            bail!("landmark count must be between 1 and 8, got {}", corners.len());
        }
        if !map.is_passable(start) {
            bail!("start cell {start:?} is a wall");
        }
        for &corner in &corners {
            if !map.is_passable(corner) {
                bail!("landmark {corner:?} is a wall");
            }
        }

        let grid_graph = Graph::from_map(map);
        let mut key_nodes = vec![start];
        key_nodes.extend_from_slice(&corners);
        let corner_graph = grid_graph.corner_subgraph(&key_nodes)?;

        Ok(CornersProblem {
            map: map.clone(),
            start,
            corners,
            grid_graph,
            corner_graph,
            expanded: Counter::new(0),
        })
    }

    /// Canonical instance: landmarks at the four grid corners just inside
    /// the outer wall ring. The map must be at least 3x3 for those corners
    /// to exist.
    pub fn with_default_corners(map: &Map, start: Cell) -> anyhow::Result<Self> {
        let corners = default_corners(map)?;
        Self::new(map, start, corners)
    }

    pub fn corners(&self) -> &[Cell] {
        &self.corners
    }

    /// Full grid graph: the domain for position-to-landmark distances.
    pub fn grid_graph(&self) -> &Graph {
        &self.grid_graph
    }

    /// Reduced graph spanning the start, the landmarks, and the shortest
    /// paths between them: the domain for spanning-tree computation.
    pub fn corner_graph(&self) -> &Graph {
        &self.corner_graph
    }

    /// States expanded so far. Diagnostics only; never feeds tie-breaking.
    pub fn expanded(&self) -> usize {
        self.expanded.get()
    }
}

/// The four grid corners just inside the outer wall ring. Fails instead of
/// underflowing on maps too small to have an interior.
pub fn default_corners(map: &Map) -> anyhow::Result<Vec<Cell>> {
    if map.height < 3 || map.width < 3 {
        bail!(
            "map {}x{} is too small for default corners",
            map.height,
            map.width
        );
    }
    let bottom = map.height - 2;
    let right = map.width - 2;
    // A 3-row or 3-column map collapses corner pairs onto each other; a
    // duplicated landmark would claim one bit and leave the other unvisitable.
    let mut corners: Vec<Cell> = Vec::new();
    for corner in [(1, 1), (1, right), (bottom, 1), (bottom, right)] {
        if !corners.contains(&corner) {
            corners.push(corner);
        }
    }
    Ok(corners)
}

impl SearchProblem for CornersProblem {
    fn get_start_state(&self) -> State {
        State {
            position: self.start,
            visited: VisitedSet::new(self.corners.len()),
        }
    }

    fn is_goal_state(&self, state: &State) -> bool {
        state.visited.all_visited()
    }

    fn get_successors(&self, state: &State) -> Vec<(State, Action, usize)> {
        self.expanded.set(self.expanded.get() + 1);

        let mut successors = Vec::with_capacity(4);
        for action in Action::ALL {
            let Some(next) = action.apply(state.position, self.map.height, self.map.width) else {
                continue;
            };
            if !self.map.is_passable(next) {
                continue;
            }

            // Landing on an unvisited landmark flips its bit; revisiting one
            // is a legal no-op transition.
            let visited = match self.corners.iter().position(|&corner| corner == next) {
                Some(index) => state.visited.with_visited(index),
                None => state.visited,
            };
            successors.push((
                State {
                    position: next,
                    visited,
                },
                action,
                1,
            ));
        }
        successors
    }

    fn get_cost_of_actions(&self, actions: &[Action]) -> usize {
        let mut position = self.start;
        for action in actions {
            let Some(next) = action.apply(position, self.map.height, self.map.width) else {
                return INVALID_PATH_COST;
            };
            if !self.map.is_passable(next) {
                return INVALID_PATH_COST;
            }
            position = next;
        }
        actions.len()
    }
}
