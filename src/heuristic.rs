use crate::cache::PathCache;
use crate::common::{Cell, State};
use crate::problem::CornersProblem;

/// Admissible lower bound on remaining tour cost: distance to the nearest
/// unvisited landmark plus the minimum-spanning-tree cost connecting the
/// unvisited landmarks. Any tour must first reach some landmark and then
/// traverse a spanning structure over the rest, so the sum never
/// overestimates.
pub struct MstHeuristic {
    cache: PathCache,
}

impl MstHeuristic {
    /// Eagerly precomputes all landmark-pair distances on the corner
    /// subgraph (where they equal full-grid distances). Construction fails
    /// if any pair is unreachable.
    pub fn new(problem: &CornersProblem) -> anyhow::Result<Self> {
        let cache = PathCache::all_pairs(problem.corner_graph(), problem.corners())?;
        Ok(MstHeuristic { cache })
    }

    pub fn estimate(&mut self, state: &State, problem: &CornersProblem) -> usize {
        let unvisited: Vec<Cell> = problem
            .corners()
            .iter()
            .enumerate()
            .filter(|&(index, _)| !state.visited.is_visited(index))
            .map(|(_, &corner)| corner)
            .collect();

        // Admissibility at the goal requires exactly zero.
        if unvisited.is_empty() {
            return 0;
        }

        // Position-to-landmark distances run on the full grid graph, where a
        // live search state is always reachable. The sentinel covers the
        // defensive no-path case without crashing the search.
        let nearest = unvisited
            .iter()
            .map(|&corner| {
                self.cache
                    .distance(problem.grid_graph(), state.position, corner)
            })
            .min()
            .unwrap_or(0);

        let mst_cost = if unvisited.len() > 1 {
            self.mst_cost(&unvisited, problem)
        } else {
            0
        };

        nearest.saturating_add(mst_cost)
    }

    /// Prim's algorithm over the unvisited landmarks, edge weights taken
    /// from the pairwise shortest-path distances. A cache miss for some pair
    /// is extended on demand against the corner subgraph before use; running
    /// the tree computation on an incomplete weight matrix would be a design
    /// error.
    fn mst_cost(&mut self, landmarks: &[Cell], problem: &CornersProblem) -> usize {
        let mut in_tree = vec![false; landmarks.len()];
        let mut best = vec![usize::MAX; landmarks.len()];
        in_tree[0] = true;
        for (i, &landmark) in landmarks.iter().enumerate().skip(1) {
            best[i] = self
                .cache
                .distance(problem.corner_graph(), landmarks[0], landmark);
        }

        let mut total: usize = 0;
        for _ in 1..landmarks.len() {
            let next = (0..landmarks.len())
                .filter(|&i| !in_tree[i])
                .min_by_key(|&i| best[i])
                .unwrap();
            total = total.saturating_add(best[next]);
            in_tree[next] = true;

            for (i, &landmark) in landmarks.iter().enumerate() {
                if !in_tree[i] {
                    let weight = self
                        .cache
                        .distance(problem.corner_graph(), landmarks[next], landmark);
                    best[i] = best[i].min(weight);
                }
            }
        }
        total
    }
}

/// Trivial admissible baseline; turns the engine into uniform-cost search.
pub fn null_heuristic(_state: &State, _problem: &CornersProblem) -> usize {
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Map;
    use crate::problem::SearchProblem;

    fn open_5x5_problem() -> CornersProblem {
        let map = Map::from_ascii(
            "#####
             #...#
             #...#
             #...#
             #####",
        )
        .unwrap();
        CornersProblem::with_default_corners(&map, (2, 2)).unwrap()
    }

    #[test]
    fn test_start_state_estimate_is_nearest_plus_mst() {
        let problem = open_5x5_problem();
        let mut heuristic = MstHeuristic::new(&problem).unwrap();
        let start = problem.get_start_state();

        // Nearest corner from (2,2) is 2 away; the MST over the four corners
        // uses three side edges of length 2. Optimal tour cost is 8, so the
        // bound is tight here.
        assert_eq!(heuristic.estimate(&start, &problem), 8);
    }

    #[test]
    fn test_goal_state_estimate_is_zero() {
        let problem = open_5x5_problem();
        let mut heuristic = MstHeuristic::new(&problem).unwrap();
        let start = problem.get_start_state();
        let goal = State {
            position: (1, 1),
            visited: (0..4).fold(start.visited, |v, i| v.with_visited(i)),
        };
        assert_eq!(heuristic.estimate(&goal, &problem), 0);
    }

    #[test]
    fn test_three_remaining_landmarks_accumulate_mst_edges() {
        let problem = open_5x5_problem();
        let mut heuristic = MstHeuristic::new(&problem).unwrap();
        let start = problem.get_start_state();

        // Corner (1,1) visited, standing on it. Nearest of the other three
        // is 2 away and their spanning tree uses two side edges of length 2.
        let state = State {
            position: (1, 1),
            visited: start.visited.with_visited(0),
        };
        assert_eq!(heuristic.estimate(&state, &problem), 6);
    }

    #[test]
    fn test_single_remaining_landmark_reduces_to_distance() {
        let problem = open_5x5_problem();
        let mut heuristic = MstHeuristic::new(&problem).unwrap();
        let start = problem.get_start_state();

        // Leave only corner (3,3) unvisited: the MST term must vanish.
        let visited = (0..3).fold(start.visited, |v, i| v.with_visited(i));
        let state = State {
            position: (1, 1),
            visited,
        };
        assert_eq!(heuristic.estimate(&state, &problem), 4);
    }

    #[test]
    fn test_estimate_respects_walls() {
        // A wall forces a detour longer than the Manhattan distance.
        let map = Map::from_ascii(
            "#######
             #.....#
             #####.#
             #.....#
             #######",
        )
        .unwrap();
        let problem = CornersProblem::new(&map, (3, 1), vec![(1, 1)]).unwrap();
        let mut heuristic = MstHeuristic::new(&problem).unwrap();
        let start = problem.get_start_state();

        // Manhattan says 2; the only path goes around the wall in 10.
        assert_eq!(heuristic.estimate(&start, &problem), 10);
    }
}
