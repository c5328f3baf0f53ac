mod game_state;

pub use game_state::{Direction, GameStatus, MazeGame, Position};
