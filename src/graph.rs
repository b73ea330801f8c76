use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use anyhow::bail;

use crate::common::Cell;
use crate::map::Map;

/// Undirected weighted graph over grid cells, stored as an adjacency map.
/// Every edge endpoint is registered as a node.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: HashMap<Cell, Vec<(Cell, usize)>>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Builds the grid graph: a node per free cell, a unit-weight edge per
    /// 4-adjacent free pair. Pure function of the map; a fully walled map
    /// yields a graph with zero edges.
    pub fn from_map(map: &Map) -> Self {
        let mut graph = Graph::new();
        for cell in map.free_cells() {
            graph.add_node(cell);
            for neighbor in map.get_neighbors(cell) {
                graph.add_edge(cell, neighbor, 1);
            }
        }
        graph
    }

    pub fn add_node(&mut self, cell: Cell) {
        self.adjacency.entry(cell).or_default();
    }

    /// Inserts an undirected edge, registering both endpoints. Re-inserting
    /// an existing edge is a no-op.
    pub fn add_edge(&mut self, a: Cell, b: Cell, weight: usize) {
        self.add_node(a);
        self.add_node(b);
        let forward = self.adjacency.get_mut(&a).unwrap();
        if !forward.iter().any(|&(cell, _)| cell == b) {
            forward.push((b, weight));
        }
        let backward = self.adjacency.get_mut(&b).unwrap();
        if !backward.iter().any(|&(cell, _)| cell == a) {
            backward.push((a, weight));
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.adjacency.contains_key(&cell)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn neighbors(&self, cell: Cell) -> &[(Cell, usize)] {
        self.adjacency
            .get(&cell)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Dijkstra shortest path from `source` to `target`. Returns the total
    /// distance and the node sequence (inclusive of both endpoints), or
    /// `None` when no path exists.
    pub fn shortest_path(&self, source: Cell, target: Cell) -> Option<(usize, Vec<Cell>)> {
        if !self.contains(source) || !self.contains(target) {
            return None;
        }

        let mut dist: HashMap<Cell, usize> = HashMap::new();
        let mut trace: HashMap<Cell, Cell> = HashMap::new();
        let mut heap = BinaryHeap::new();

        dist.insert(source, 0);
        heap.push((Reverse(0), source));

        while let Some((Reverse(cost), cell)) = heap.pop() {
            if cost > *dist.get(&cell).unwrap_or(&usize::MAX) {
                continue;
            }
            if cell == target {
                return Some((cost, construct_path(&trace, target)));
            }

            for &(neighbor, weight) in self.neighbors(cell) {
                let next_cost = cost + weight;
                if next_cost < *dist.get(&neighbor).unwrap_or(&usize::MAX) {
                    dist.insert(neighbor, next_cost);
                    trace.insert(neighbor, cell);
                    heap.push((Reverse(next_cost), neighbor));
                }
            }
        }

        None
    }

    /// Shortest-path distance only.
    pub fn distance(&self, source: Cell, target: Cell) -> Option<usize> {
        self.shortest_path(source, target).map(|(cost, _)| cost)
    }

    /// Unions one shortest path per pair of key nodes (start + landmarks)
    /// into a reduced graph, carrying the unit edge weights. The result is
    /// small enough for exact spanning-tree computation while preserving
    /// landmark-pair distances. Fails naming the first unreachable pair.
    pub fn corner_subgraph(&self, key_nodes: &[Cell]) -> anyhow::Result<Graph> {
        let mut subgraph = Graph::new();
        for (i, &a) in key_nodes.iter().enumerate() {
            subgraph.add_node(a);
            for &b in &key_nodes[i + 1..] {
                let Some((_, path)) = self.shortest_path(a, b) else {
                    bail!("no path between landmarks {a:?} and {b:?}");
                };
                for window in path.windows(2) {
                    subgraph.add_edge(window[0], window[1], 1);
                }
            }
        }
        Ok(subgraph)
    }
}

fn construct_path(trace: &HashMap<Cell, Cell>, mut current: Cell) -> Vec<Cell> {
    let mut path = vec![current];
    while let Some(&previous) = trace.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}
