use std::collections::VecDeque;

use crate::generators::pick_start;
use crate::graph::{Adjacency, Graph};
use crate::random::RandomSource;

/// Randomized breadth-first search.
///
/// Unlike [`randomized_dfs`](super::randomized_dfs), every unvisited neighbor of the
/// dequeued cell is claimed at once, so the maze branches short and bushy around the start.
pub fn randomized_bfs<R: RandomSource>(
    mut graph: Graph,
    start: Option<usize>,
    rng: &mut R,
) -> Graph {
    if graph.is_empty() {
        return graph;
    }

    let adjacency = Adjacency::build(&graph);
    let start = pick_start(start, graph.node_count(), rng);

    let mut visited = vec![false; graph.node_count()];
    visited[start] = true;

    let mut queue = VecDeque::from([start]);

    while let Some(cell) = queue.pop_front() {
        let mut neighbors = adjacency.neighbors(cell).to_vec();
        rng.shuffle(&mut neighbors);

        for (neighbor, edge) in neighbors {
            if visited[neighbor] {
                continue;
            }
            graph.open_edge(edge);
            visited[neighbor] = true;
            queue.push_back(neighbor);
        }
    }

    tracing::debug!(
        "[bfs] carved {} passages from node {}",
        graph.open_edge_count(),
        start
    );
    graph
}
