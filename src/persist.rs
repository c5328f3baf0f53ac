//! Save and restore generated mazes.
//!
//! A [`SavedMaze`] is serialized to JSON with [`serde`]. The graph keeps the layout
//! `{ rows, cols, entranceNode, exitNode, nodes: [{id, row, col}], edges: [{from, to, open}] }`
//! with `-1` standing for an entrance or exit that was never carved.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};
use crate::game::MazeGame;
use crate::generators::Algorithm;
use crate::graph::Graph;

/// Serialize and deserialize an optional node id as a plain integer, `-1` meaning unset.
pub mod node_or_unset {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(node: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match node {
            Some(id) => serializer.serialize_u64(*id as u64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match i64::deserialize(deserializer)? {
            -1 => Ok(None),
            id if id >= 0 => Ok(Some(id as usize)),
            id => Err(Error::custom(format!("invalid node id {}", id))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMaze {
    pub name: String,
    pub algorithm: Algorithm,
    pub graph: Graph,
    #[serde(with = "node_or_unset", default)]
    pub player_node: Option<usize>,
}

impl SavedMaze {
    /// Snapshot the maze currently loaded in `game`.
    pub fn from_game(name: impl Into<String>, algorithm: Algorithm, game: &MazeGame) -> Self {
        SavedMaze {
            name: name.into(),
            algorithm,
            graph: game.graph().clone(),
            player_node: game.player_node(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let saved: SavedMaze = serde_json::from_str(json)?;
        saved.validate()?;
        Ok(saved)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        tracing::info!("[persist] saved maze '{}' to {}", self.name, path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let saved: SavedMaze = serde_json::from_reader(reader)?;
        saved.validate()?;
        tracing::info!("[persist] loaded maze '{}' from {}", saved.name, path.display());
        Ok(saved)
    }

    /// Restore the saved maze into a fresh game. Requires carved openings.
    pub fn into_game(self) -> Result<MazeGame> {
        let (Some(entrance), Some(exit)) = (self.graph.entrance_node(), self.graph.exit_node())
        else {
            return Err(MazeError::InvalidGraph(format!(
                "maze '{}' has no entrance or exit",
                self.name
            )));
        };
        let mut game = MazeGame::new();
        game.load(self.graph, entrance, exit, self.player_node);
        Ok(game)
    }

    fn validate(&self) -> Result<()> {
        self.graph.validate()?;
        match self.player_node {
            Some(node) if node >= self.graph.node_count() => Err(MazeError::InvalidGraph(
                format!("player node {} is out of range", node),
            )),
            _ => Ok(()),
        }
    }
}
