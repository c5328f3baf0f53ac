use crate::generators::pick_start;
use crate::graph::{Adjacency, Graph};
use crate::random::RandomSource;

/// Randomized depth-first search. Each step advances into a single unvisited
/// neighbor, which yields long winding corridors.
pub fn randomized_dfs<R: RandomSource>(
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

    // The top of the stack is always the cell currently being carved from
    let mut stack = vec![start];

    while let Some(&cell) = stack.last() {
        let mut neighbors = adjacency.neighbors(cell).to_vec();
        rng.shuffle(&mut neighbors);

        match neighbors.into_iter().find(|&(n, _)| !visited[n]) {
            Some((neighbor, edge)) => {
                graph.open_edge(edge);
                visited[neighbor] = true;
                // Keep the cell below the neighbor so we can look at its other neighbors later
                stack.push(neighbor);
            }
            None => {
                stack.pop();
            }
        }
    }

    tracing::debug!(
        "[dfs] carved {} passages from node {}",
        graph.open_edge_count(),
        start
    );
    graph
}
