pub mod union_find;

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};
use crate::persist::node_or_unset;
use union_find::DisjointSet;

/// A grid cell. `id` always equals the node's index in [`Graph::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub row: usize,
    pub col: usize,
}

/// Undirected edge between two adjacent nodes. `open == false` is a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub open: bool,
}

impl Edge {
    /// Returns the endpoint opposite to `node`, if `node` is an endpoint of this edge.
    pub fn other(&self, node: usize) -> Option<usize> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }

    fn joins(&self, a: usize, b: usize) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Rectangular grid graph. Node and edge membership is fixed at construction,
/// only the `open` flag of edges and the entrance/exit markers change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    rows: usize,
    cols: usize,
    #[serde(with = "node_or_unset")]
    entrance_node: Option<usize>,
    #[serde(with = "node_or_unset")]
    exit_node: Option<usize>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// Builds a `rows` x `cols` grid with nodes numbered row-major and one closed edge
/// per right and down adjacency.
///
/// Dimensions are not validated here, callers clamp them first.
pub fn build_grid_graph(rows: usize, cols: usize) -> Graph {
    let nodes = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .enumerate()
        .map(|(id, (row, col))| Node { id, row, col })
        .collect::<Vec<_>>();

    let edges = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .flat_map(|(row, col)| {
            let id = row * cols + col;
            [
                (col + 1 < cols).then(|| Edge {
                    from: id,
                    to: id + 1,
                    open: false,
                }),
                (row + 1 < rows).then(|| Edge {
                    from: id,
                    to: id + cols,
                    open: false,
                }),
            ]
        })
        .flatten()
        .collect::<Vec<_>>();

    Graph {
        rows,
        cols,
        entrance_node: None,
        exit_node: None,
        nodes,
        edges,
    }
}

/// Returns the index of the edge joining `a` and `b`, or `None` if they are not adjacent.
pub fn edge_index_between(graph: &Graph, a: usize, b: usize) -> Option<usize> {
    // Grids built by `build_grid_graph` have a closed-form edge index; anything else
    // (e.g. a hand-edited save file) falls back to a scan.
    if let Some(idx) = graph.canonical_edge_index(a, b) {
        if graph.edges.get(idx).is_some_and(|e| e.joins(a, b)) {
            return Some(idx);
        }
    }
    graph.edges.iter().position(|e| e.joins(a, b))
}

impl Graph {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn entrance_node(&self) -> Option<usize> {
        self.entrance_node
    }

    pub fn exit_node(&self) -> Option<usize> {
        self.exit_node
    }

    pub(crate) fn set_openings(&mut self, entrance: Option<usize>, exit: Option<usize>) {
        self.entrance_node = entrance;
        self.exit_node = exit;
    }

    /// Marks the edge at `index` as passable.
    pub(crate) fn open_edge(&mut self, index: usize) {
        self.edges[index].open = true;
    }

    /// Node id at the given grid position, if it lies inside the grid.
    pub fn node_id(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// A node is on the boundary when its row or column is at the minimum or maximum.
    pub fn is_boundary(&self, id: usize) -> bool {
        self.node(id).is_some_and(|n| {
            n.row == 0 || n.col == 0 || n.row + 1 == self.rows || n.col + 1 == self.cols
        })
    }

    pub fn open_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.open).count()
    }

    pub fn is_open_between(&self, a: usize, b: usize) -> bool {
        edge_index_between(self, a, b).is_some_and(|idx| self.edges[idx].open)
    }

    /// Checks that the open edges connect every node without forming a cycle.
    pub fn is_spanning_tree(&self) -> bool {
        if self.nodes.is_empty() {
            return true;
        }
        if self.open_edge_count() != self.nodes.len() - 1 {
            return false;
        }
        let mut ds = DisjointSet::new(self.nodes.len());
        self.edges
            .iter()
            .filter(|e| e.open)
            .all(|e| ds.unite(e.from, e.to))
    }

    /// Checks the structural invariants of a grid graph.
    /// Used on graphs that did not come from [`build_grid_graph`].
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| -> Result<()> { Err(MazeError::InvalidGraph(reason)) };

        let Some(expected_nodes) = self.rows.checked_mul(self.cols) else {
            return invalid(format!("a {}x{} grid is too large", self.rows, self.cols));
        };
        if self.nodes.len() != expected_nodes {
            return invalid(format!(
                "expected {} nodes for a {}x{} grid, found {}",
                expected_nodes,
                self.rows,
                self.cols,
                self.nodes.len()
            ));
        }
        if let Some(node) = self
            .nodes
            .iter()
            .enumerate()
            .find(|&(idx, n)| {
                let position = n.row.checked_mul(self.cols).and_then(|p| p.checked_add(n.col));
                n.id != idx || position != Some(idx) || n.col >= self.cols
            })
            .map(|(_, n)| n)
        {
            return invalid(format!(
                "node {} at ({}, {}) is out of row-major order",
                node.id, node.row, node.col
            ));
        }

        // rows * (cols - 1) + (rows - 1) * cols
        let expected_edges = if expected_nodes == 0 {
            Some(0)
        } else {
            expected_nodes
                .checked_mul(2)
                .map(|twice| twice - self.rows - self.cols)
        };
        let Some(expected_edges) = expected_edges else {
            return invalid(format!("a {}x{} grid is too large", self.rows, self.cols));
        };
        if self.edges.len() != expected_edges {
            return invalid(format!(
                "expected {} edges, found {}",
                expected_edges,
                self.edges.len()
            ));
        }
        let mut seen = vec![false; self.edges.len()];
        for edge in &self.edges {
            let (Some(a), Some(b)) = (self.node(edge.from), self.node(edge.to)) else {
                return invalid(format!(
                    "edge {} -> {} references a missing node",
                    edge.from, edge.to
                ));
            };
            if a.row.abs_diff(b.row) + a.col.abs_diff(b.col) != 1 {
                return invalid(format!(
                    "edge {} -> {} joins non-adjacent nodes",
                    edge.from, edge.to
                ));
            }
            let slot = self
                .canonical_edge_index(edge.from, edge.to)
                .and_then(|idx| seen.get_mut(idx));
            match slot {
                Some(flag) if !*flag => *flag = true,
                _ => {
                    return invalid(format!(
                        "edge {} -> {} is listed more than once",
                        edge.from, edge.to
                    ));
                }
            }
        }

        for (label, marker) in [("entrance", self.entrance_node), ("exit", self.exit_node)] {
            if let Some(id) = marker {
                if id >= self.nodes.len() {
                    return invalid(format!("{} node {} is out of range", label, id));
                }
            }
        }
        Ok(())
    }

    fn canonical_edge_index(&self, a: usize, b: usize) -> Option<usize> {
        let (a, b) = (a.min(b), a.max(b));
        let na = self.node(a)?;
        let nb = self.node(b)?;
        // Every row but the last owns (cols - 1) right edges and cols down edges,
        // interleaved per node: right then down.
        let row_base = na.row * (2 * self.cols - 1);
        let is_last_row = na.row + 1 == self.rows;
        let offset = if is_last_row { na.col } else { 2 * na.col };

        if nb.row == na.row && nb.col == na.col + 1 {
            Some(row_base + offset)
        } else if nb.col == na.col && nb.row == na.row + 1 {
            // The last column has no right edge, so its down edge sits one slot earlier
            let right_edges = usize::from(na.col + 1 < self.cols);
            Some(row_base + 2 * na.col + right_edges)
        } else {
            None
        }
    }
}

/// Per-node list of `(neighbor, edge_index)` pairs, built once per generation call.
pub struct Adjacency {
    lists: Vec<Vec<(usize, usize)>>,
}

impl Adjacency {
    pub fn build(graph: &Graph) -> Self {
        let mut lists = vec![Vec::with_capacity(4); graph.node_count()];
        graph.edges().iter().enumerate().for_each(|(idx, edge)| {
            lists[edge.from].push((edge.to, idx));
            lists[edge.to].push((edge.from, idx));
        });
        Adjacency { lists }
    }

    pub fn neighbors(&self, node: usize) -> &[(usize, usize)] {
        &self.lists[node]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_counts() {
        for (rows, cols) in [(2, 2), (2, 7), (5, 5), (9, 4), (30, 31)] {
            let graph = build_grid_graph(rows, cols);
            assert_eq!(graph.node_count(), rows * cols);
            assert_eq!(graph.edges().len(), rows * (cols - 1) + (rows - 1) * cols);
            assert!(graph.edges().iter().all(|e| !e.open));
            assert_eq!(graph.entrance_node(), None);
            assert_eq!(graph.exit_node(), None);
        }
    }

    #[test]
    fn test_row_major_layout() {
        let graph = build_grid_graph(3, 4);
        for (idx, node) in graph.nodes().iter().enumerate() {
            assert_eq!(node.id, idx);
            assert_eq!(idx, node.row * 4 + node.col);
        }
        assert_eq!(graph.node_id(2, 3), Some(11));
        assert_eq!(graph.node_id(3, 0), None);
        assert_eq!(graph.node_id(0, 4), None);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_edge_index_between() {
        let graph = build_grid_graph(4, 5);
        for (idx, edge) in graph.edges().iter().enumerate() {
            assert_eq!(edge_index_between(&graph, edge.from, edge.to), Some(idx));
            assert_eq!(edge_index_between(&graph, edge.to, edge.from), Some(idx));
        }
        // Diagonal, distant and out-of-range pairs
        assert_eq!(edge_index_between(&graph, 0, 6), None);
        assert_eq!(edge_index_between(&graph, 0, 2), None);
        assert_eq!(edge_index_between(&graph, 4, 5), None);
        assert_eq!(edge_index_between(&graph, 0, 100), None);
    }

    #[test]
    fn test_boundary() {
        let graph = build_grid_graph(4, 4);
        let interior = [5, 6, 9, 10];
        (0..16).for_each(|id| assert_eq!(graph.is_boundary(id), !interior.contains(&id)));
        assert!(!graph.is_boundary(16));
    }

    #[test]
    fn test_adjacency() {
        let graph = build_grid_graph(3, 3);
        let adjacency = Adjacency::build(&graph);
        assert_eq!(adjacency.neighbors(4).len(), 4);
        assert_eq!(adjacency.neighbors(0).len(), 2);
        assert_eq!(adjacency.neighbors(1).len(), 3);
        for &(neighbor, edge) in adjacency.neighbors(4) {
            assert_eq!(graph.edges()[edge].other(4), Some(neighbor));
        }
    }

    #[test]
    fn test_spanning_tree_check() {
        let mut graph = build_grid_graph(2, 2);
        assert!(!graph.is_spanning_tree());
        // 0-1, 0-2, 1-3 form a tree
        for (a, b) in [(0, 1), (0, 2), (1, 3)] {
            let idx = edge_index_between(&graph, a, b).unwrap();
            graph.open_edge(idx);
        }
        assert!(graph.is_spanning_tree());
        assert!(graph.is_open_between(3, 1));
        assert!(!graph.is_open_between(2, 3));

        // Opening the last edge closes a cycle
        let idx = edge_index_between(&graph, 2, 3).unwrap();
        graph.open_edge(idx);
        assert!(!graph.is_spanning_tree());
    }

    #[test]
    fn test_validate_rejects_broken_layout() {
        let mut graph = build_grid_graph(3, 3);
        graph.edges.pop();
        assert!(matches!(graph.validate(), Err(MazeError::InvalidGraph(_))));

        let mut graph = build_grid_graph(3, 3);
        graph.edges[0] = Edge {
            from: 0,
            to: 4,
            open: false,
        };
        assert!(graph.validate().is_err());

        let mut graph = build_grid_graph(3, 3);
        graph.set_openings(Some(2), Some(9));
        assert!(graph.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_edges() {
        // 0-1 twice, 2-3 missing: counts and adjacency still look right
        let mut graph = build_grid_graph(2, 2);
        graph.edges[3] = Edge {
            from: 1,
            to: 0,
            open: false,
        };
        assert!(matches!(graph.validate(), Err(MazeError::InvalidGraph(_))));
    }

    #[test]
    fn test_validate_huge_dimensions() {
        let mut graph = build_grid_graph(2, 2);
        graph.rows = 1usize << 32;
        graph.cols = 1usize << 32;
        assert!(matches!(graph.validate(), Err(MazeError::InvalidGraph(_))));

        let mut graph = build_grid_graph(2, 2);
        graph.rows = usize::MAX;
        graph.cols = 1;
        assert!(matches!(graph.validate(), Err(MazeError::InvalidGraph(_))));

        let mut graph = build_grid_graph(2, 2);
        graph.nodes[3].row = usize::MAX;
        assert!(graph.validate().is_err());
    }
}
