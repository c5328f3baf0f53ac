use crate::graph::Graph;
use crate::graph::union_find::DisjointSet;
use crate::random::RandomSource;

/// Randomized Kruskal's algorithm: walk every edge in shuffled order and open it
/// whenever its endpoints are still in different components.
///
/// `_start` is accepted so all generators share a signature, but it has no effect:
/// connectivity here is driven by the edge order, not by a traversal.
pub fn randomized_kruskal<R: RandomSource>(
    mut graph: Graph,
    _start: Option<usize>,
    rng: &mut R,
) -> Graph {
    if graph.is_empty() {
        return graph;
    }

    let mut order = (0..graph.edges().len()).collect::<Vec<_>>();
    rng.shuffle(&mut order);

    let mut components = DisjointSet::new(graph.node_count());
    for idx in order {
        let edge = graph.edges()[idx];
        // Open only edges that join two separate components
        if components.unite(edge.from, edge.to) {
            graph.open_edge(idx);
        }
    }

    tracing::debug!(
        "[kruskal] carved {} passages (start {:?} ignored)",
        graph.open_edge_count(),
        _start
    );
    graph
}
