mod bfs;
mod dfs;
mod kruskal;
mod prim;
mod wilson;

pub use bfs::randomized_bfs;
pub use dfs::randomized_dfs;
pub use kruskal::randomized_kruskal;
pub use prim::randomized_prim;
pub use wilson::randomized_wilson;

use serde::{Deserialize, Serialize};

use crate::error::MazeError;
use crate::graph::Graph;
use crate::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Dfs,
    Bfs,
    Prim,
    Kruskal,
    Wilson,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Dfs,
        Algorithm::Bfs,
        Algorithm::Prim,
        Algorithm::Kruskal,
        Algorithm::Wilson,
    ];
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::Dfs => write!(f, "Randomized Depth-First Search (DFS)"),
            Algorithm::Bfs => write!(f, "Randomized Breadth-First Search (BFS)"),
            Algorithm::Prim => write!(f, "Prim's Algorithm"),
            Algorithm::Kruskal => write!(f, "Kruskal's Algorithm"),
            Algorithm::Wilson => write!(f, "Wilson's Algorithm"),
        }
    }
}

impl std::str::FromStr for Algorithm {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dfs" => Ok(Algorithm::Dfs),
            "bfs" => Ok(Algorithm::Bfs),
            "prim" => Ok(Algorithm::Prim),
            "kruskal" => Ok(Algorithm::Kruskal),
            "wilson" => Ok(Algorithm::Wilson),
            other => Err(MazeError::InvalidInput(format!(
                "unknown generation algorithm '{}'",
                other
            ))),
        }
    }
}

/// Returns `start` when it names an existing node, otherwise a uniformly random node.
/// `count` must be non-zero.
pub(crate) fn pick_start<R: RandomSource>(
    start: Option<usize>,
    count: usize,
    rng: &mut R,
) -> usize {
    match start {
        Some(s) if s < count => s,
        _ => rng.rand_int(count) - 1,
    }
}

/// Carves a spanning tree into a freshly built (all edges closed) graph.
pub fn generate<R: RandomSource>(
    graph: Graph,
    algorithm: Algorithm,
    start: Option<usize>,
    rng: &mut R,
) -> Graph {
    match algorithm {
        Algorithm::Dfs => randomized_dfs(graph, start, rng),
        Algorithm::Bfs => randomized_bfs(graph, start, rng),
        Algorithm::Prim => randomized_prim(graph, start, rng),
        Algorithm::Kruskal => randomized_kruskal(graph, start, rng),
        Algorithm::Wilson => randomized_wilson(graph, start, rng),
    }
}
