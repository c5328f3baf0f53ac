use crate::generators::pick_start;
use crate::graph::{Adjacency, Graph};
use crate::random::RandomSource;

/// Wilson's algorithm: produces a uniformly random spanning tree.
///
/// 1. Mark the root (the start node, or a random one) as part of the tree.
/// 2. From every node not yet in the tree, perform a loop-erased random walk until
///    it hits the tree.
/// 3. Open every edge along the walk and add its nodes to the tree.
pub fn randomized_wilson<R: RandomSource>(
    mut graph: Graph,
    start: Option<usize>,
    rng: &mut R,
) -> Graph {
    if graph.is_empty() {
        return graph;
    }

    let adjacency = Adjacency::build(&graph);
    let root = pick_start(start, graph.node_count(), rng);

    let mut walker = Walker::new(&adjacency, graph.node_count(), root);
    for node in 0..graph.node_count() {
        if walker.in_tree(node) {
            continue;
        }
        let walk = walker.walk(node, rng);
        walker.commit(&mut graph, &walk);
    }

    tracing::debug!(
        "[wilson] carved {} passages rooted at node {}",
        graph.open_edge_count(),
        root
    );
    graph
}

/// A loop-free walk: `edges[i]` joins `nodes[i]` and `nodes[i + 1]`, and only the
/// last node is in the tree.
#[derive(Debug)]
struct Walk {
    nodes: Vec<usize>,
    edges: Vec<usize>,
}

struct Walker<'a> {
    adjacency: &'a Adjacency,
    in_tree: Vec<bool>,
    /// Position of each node in the walk being built, if it is on it
    position: Vec<Option<usize>>,
}

impl<'a> Walker<'a> {
    fn new(adjacency: &'a Adjacency, node_count: usize, root: usize) -> Self {
        let mut in_tree = vec![false; node_count];
        in_tree[root] = true;
        Walker {
            adjacency,
            in_tree,
            position: vec![None; node_count],
        }
    }

    fn in_tree(&self, node: usize) -> bool {
        self.in_tree[node]
    }

    /// Random walk from `from` until a tree node is reached, erasing every loop as
    /// soon as it closes. Does not touch the tree.
    fn walk<R: RandomSource>(&mut self, from: usize, rng: &mut R) -> Walk {
        let mut nodes = vec![from];
        let mut edges = Vec::new();
        self.position[from] = Some(0);

        let mut current = from;
        while !self.in_tree[current] {
            let mut neighbors = self.adjacency.neighbors(current).to_vec();
            rng.shuffle(&mut neighbors);
            let Some(&(next, edge)) = neighbors.first() else {
                // Isolated node, nothing to walk to
                break;
            };
            current = next;

            match self.position[current] {
                Some(loop_start) => {
                    // Erase the loop: cut the walk back to the first visit of `current`
                    nodes[loop_start + 1..]
                        .iter()
                        .for_each(|&n| self.position[n] = None);
                    nodes.truncate(loop_start + 1);
                    edges.truncate(loop_start);
                }
                None => {
                    self.position[current] = Some(nodes.len());
                    nodes.push(current);
                    edges.push(edge);
                }
            }
        }

        nodes.iter().for_each(|&n| self.position[n] = None);
        Walk { nodes, edges }
    }

    /// Opens every edge of `walk` and adds its nodes to the tree.
    fn commit(&mut self, graph: &mut Graph, walk: &Walk) {
        walk.edges.iter().for_each(|&edge| graph.open_edge(edge));
        walk.nodes.iter().for_each(|&n| self.in_tree[n] = true);
    }
}
