use crate::graph::Graph;
use crate::random::RandomSource;

/// Entrance and exit chosen by [`carve_openings`]. `None` when that side was not carved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Openings {
    pub entrance: Option<usize>,
    pub exit: Option<usize>,
}

/// Picks entrance and exit nodes on the grid boundary and records them on the graph.
///
/// A preferred node is used only if it lies on the boundary (and, for the exit, differs
/// from the entrance); otherwise the choice silently falls back to a random one. A random
/// entrance never lands on a usable preferred exit. The exit
/// defaults to a random node on the side opposite the entrance. Edges are never touched,
/// so nothing guarantees the openings sit on an open passage beyond the spanning tree
/// reaching every node.
pub fn carve_openings<R: RandomSource>(
    graph: &mut Graph,
    carve_entrance: bool,
    carve_exit: bool,
    preferred_entrance: Option<usize>,
    preferred_exit: Option<usize>,
    rng: &mut R,
) -> Openings {
    let mut openings = Openings::default();
    if graph.is_empty() {
        return openings;
    }

    if carve_entrance {
        openings.entrance = Some(match preferred_entrance {
            Some(node) if graph.is_boundary(node) => node,
            _ => {
                // A usable preferred exit keeps its cell
                let reserved = preferred_exit.filter(|&e| carve_exit && graph.is_boundary(e));
                let mut entrance = random_boundary(graph, rng);
                while Some(entrance) == reserved && graph.node_count() > 1 {
                    entrance = random_boundary(graph, rng);
                }
                entrance
            }
        });
    }

    // An entrance carved earlier still counts when only the exit is being carved
    let entrance = openings.entrance.or(graph.entrance_node());

    if carve_exit {
        let exit = match preferred_exit {
            Some(node) if graph.is_boundary(node) && Some(node) != entrance => node,
            _ => {
                let mut exit = opposite_boundary(graph, entrance, rng);
                while Some(exit) == entrance && graph.node_count() > 1 {
                    exit = random_boundary(graph, rng);
                }
                exit
            }
        };
        openings.exit = Some(exit);
    }

    let entrance = if carve_entrance {
        openings.entrance
    } else {
        graph.entrance_node()
    };
    let exit = if carve_exit {
        openings.exit
    } else {
        graph.exit_node()
    };
    graph.set_openings(entrance, exit);

    tracing::debug!(
        "[openings] entrance {:?}, exit {:?}",
        openings.entrance,
        openings.exit
    );
    openings
}

/// Draws random cells until one lands on the boundary.
fn random_boundary<R: RandomSource>(graph: &Graph, rng: &mut R) -> usize {
    let (rows, cols) = (graph.rows(), graph.cols());
    loop {
        let row = rng.rand_int(rows) - 1;
        let col = rng.rand_int(cols) - 1;
        if row == 0 || col == 0 || row + 1 == rows || col + 1 == cols {
            return row * cols + col;
        }
    }
}

/// A random node on the side facing the entrance's side. Top and bottom rows take
/// precedence over the left and right columns for corner entrances.
fn opposite_boundary<R: RandomSource>(
    graph: &Graph,
    entrance: Option<usize>,
    rng: &mut R,
) -> usize {
    let (rows, cols) = (graph.rows(), graph.cols());
    let Some(node) = entrance.filter(|&e| graph.is_boundary(e)).and_then(|e| graph.node(e)) else {
        return random_boundary(graph, rng);
    };

    if node.row == 0 {
        (rows - 1) * cols + rng.rand_int(cols) - 1
    } else if node.row + 1 == rows {
        rng.rand_int(cols) - 1
    } else if node.col == 0 {
        (rng.rand_int(rows) - 1) * cols + cols - 1
    } else {
        (rng.rand_int(rows) - 1) * cols
    }
}
