//! Spanning-tree maze generation over rectangular grid graphs.
//!
//! The pipeline is: [`graph::build_grid_graph`] builds a closed grid, one of the
//! [`generators`] opens a spanning tree, [`openings::carve_openings`] picks an entrance
//! and exit on the boundary, and [`game::MazeGame`] lets a player walk it.

pub mod config;
pub mod error;
pub mod game;
pub mod generators;
pub mod graph;
pub mod logging;
pub mod openings;
pub mod persist;
pub mod random;
pub mod render;

pub use error::{MazeError, Result};
