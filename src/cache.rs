use std::collections::HashMap;

use anyhow::Context;

use crate::common::Cell;
use crate::graph::Graph;

/// Shortest-path distances keyed by cell pair, stored under both orderings.
/// Built eagerly for every landmark pair, then lazily extended with
/// (position, landmark) pairs during heuristic evaluation. Entries are never
/// evicted; the cache lives as long as one problem instance.
#[derive(Debug, Clone)]
pub struct PathCache {
    distances: HashMap<(Cell, Cell), usize>,
    landmarks: Vec<Cell>,
}

impl PathCache {
    /// Computes the distance between every unordered pair of distinct
    /// landmarks on `graph`. An unreachable pair makes the whole multi-goal
    /// problem unsolvable, so it aborts construction instead of storing a
    /// sentinel.
    pub fn all_pairs(graph: &Graph, landmarks: &[Cell]) -> anyhow::Result<Self> {
        let mut cache = PathCache {
            distances: HashMap::new(),
            landmarks: landmarks.to_vec(),
        };
        for (i, &a) in landmarks.iter().enumerate() {
            for &b in &landmarks[i + 1..] {
                let dist = graph
                    .distance(a, b)
                    .with_context(|| format!("no path between landmarks {a:?} and {b:?}"))?;
                cache.insert(a, b, dist);
            }
        }
        Ok(cache)
    }

    fn insert(&mut self, a: Cell, b: Cell, dist: usize) {
        self.distances.insert((a, b), dist);
        self.distances.insert((b, a), dist);
    }

    /// Cached distance, or a fresh Dijkstra run on `graph` memoized under
    /// both orderings. No path returns `usize::MAX`: this happens only while
    /// ranking live search states, where a defensive fallback beats a crash.
    pub fn distance(&mut self, graph: &Graph, from: Cell, to: Cell) -> usize {
        if let Some(&dist) = self.distances.get(&(from, to)) {
            return dist;
        }
        match graph.distance(from, to) {
            Some(dist) => {
                self.insert(from, to, dist);
                dist
            }
            None => usize::MAX,
        }
    }

    /// Distance between two cells of the landmark set. Landmark pairs are all
    /// precomputed, so a miss here means the caller broke the fixed
    /// landmark-set invariant.
    pub fn pair_distance(&self, a: Cell, b: Cell) -> usize {
        assert!(
            self.landmarks.contains(&a) && self.landmarks.contains(&b),
            "cache queried for non-landmark pair {a:?}, {b:?}"
        );
        self.distances[&(a, b)]
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Map;

    const CORNERS: [Cell; 4] = [(1, 1), (1, 3), (3, 1), (3, 3)];

    fn open_graph() -> Graph {
        let map = Map::from_ascii(
            "#####
             #...#
             #...#
             #...#
             #####",
        )
        .unwrap();
        Graph::from_map(&map)
    }

    #[test]
    fn test_all_pairs_symmetric() {
        let graph = open_graph();
        let cache = PathCache::all_pairs(&graph, &CORNERS).unwrap();

        // 6 unordered pairs, each stored both ways.
        assert_eq!(cache.len(), 12);
        for (i, &a) in CORNERS.iter().enumerate() {
            for &b in &CORNERS[i + 1..] {
                assert_eq!(cache.pair_distance(a, b), cache.pair_distance(b, a));
            }
        }
        assert_eq!(cache.pair_distance((1, 1), (1, 3)), 2);
        assert_eq!(cache.pair_distance((1, 1), (3, 3)), 4);
    }

    #[test]
    fn test_all_pairs_fails_on_disconnected_landmarks() {
        let map = Map::from_ascii(
            "#####
             #.#.#
             #.#.#
             #####",
        )
        .unwrap();
        let graph = Graph::from_map(&map);
        let err = PathCache::all_pairs(&graph, &[(1, 1), (1, 3)]).unwrap_err();
        assert!(err.to_string().contains("no path"));
    }

    #[test]
    fn test_all_pairs_fails_on_fully_walled_grid() {
        let map = Map::from_ascii("###\n###\n###").unwrap();
        let graph = Graph::from_map(&map);
        assert!(PathCache::all_pairs(&graph, &[(0, 0), (2, 2)]).is_err());
    }

    #[test]
    fn test_lazy_extension_memoizes_both_ways() {
        let graph = open_graph();
        let mut cache = PathCache::all_pairs(&graph, &CORNERS).unwrap();
        let before = cache.len();

        assert_eq!(cache.distance(&graph, (2, 2), (1, 1)), 2);
        assert_eq!(cache.len(), before + 2);
        // Second lookup in either direction hits the cache.
        assert_eq!(cache.distance(&graph, (1, 1), (2, 2)), 2);
        assert_eq!(cache.len(), before + 2);
    }

    #[test]
    fn test_lazy_extension_returns_sentinel_without_caching() {
        let map = Map::from_ascii(
            "#####
             #.#.#
             #.#.#
             #####",
        )
        .unwrap();
        let graph = Graph::from_map(&map);
        let mut cache = PathCache::all_pairs(&graph, &[(1, 1)]).unwrap();

        assert_eq!(cache.distance(&graph, (1, 3), (1, 1)), usize::MAX);
        assert!(cache.is_empty());
    }
}
