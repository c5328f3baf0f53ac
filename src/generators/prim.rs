use crate::generators::pick_start;
use crate::graph::{Adjacency, Graph};
use crate::random::RandomSource;

/// Randomized Prim's algorithm over a frontier of `(neighbor, edge)` pairs leading out
/// of the tree built so far. Entries whose neighbor joined the tree in the meantime are
/// skipped when drawn.
pub fn randomized_prim<R: RandomSource>(
    mut graph: Graph,
    start: Option<usize>,
    rng: &mut R,
) -> Graph {
    if graph.is_empty() {
        return graph;
    }

    let adjacency = Adjacency::build(&graph);
    let start = pick_start(start, graph.node_count(), rng);

    let mut in_tree = vec![false; graph.node_count()];
    in_tree[start] = true;

    let mut frontier = adjacency.neighbors(start).to_vec();

    while !frontier.is_empty() {
        // Drawing a uniform index is equivalent to shuffling the frontier and popping
        let idx = rng.rand_int(frontier.len()) - 1;
        let (cell, edge) = frontier.swap_remove(idx);
        if in_tree[cell] {
            continue;
        }

        graph.open_edge(edge);
        in_tree[cell] = true;

        frontier.extend(
            adjacency
                .neighbors(cell)
                .iter()
                .filter(|&&(n, _)| !in_tree[n]),
        );
    }

    tracing::debug!(
        "[prim] carved {} passages from node {}",
        graph.open_edge_count(),
        start
    );
    graph
}
