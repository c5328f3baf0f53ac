use crate::{
    error::{MazeError, Result},
    generators::{Algorithm, generate},
    graph::{Graph, build_grid_graph},
    openings::carve_openings,
    random::RandomSource,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Maps `w`/`a`/`s`/`d` and `k`/`h`/`j`/`l` to directions.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' | 'k' => Some(Direction::Up),
            's' | 'j' => Some(Direction::Down),
            'a' | 'h' => Some(Direction::Left),
            'd' | 'l' => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameStatus {
    Unsolved,
    Solved,
}

/// Zero-based grid position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

#[derive(Debug, Default)]
pub struct MazeGame {
    /// The maze being played
    graph: Graph,
    entrance: Option<usize>,
    /// Goal node
    exit: Option<usize>,
    /// Tracks where the player currently is
    player: Option<usize>,
    /// Set once the player has made a move, not when the maze is solved
    tested: bool,
}

impl MazeGame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set up a new maze:
    /// * `width` and `height` are clamped to at least 2.
    /// * `start` is both the generation start and the preferred entrance; if it is
    ///   missing, outside the grid, or not on the boundary, a random entrance is used.
    /// * With `custom_exit`, `exit` must be a boundary cell distinct from a boundary
    ///   `start`, otherwise an error is returned and the current game is left untouched.
    ///   A randomly chosen entrance always avoids the custom exit.
    ///   Without it, `exit` is ignored and the exit is chosen opposite the entrance.
    #[allow(clippy::too_many_arguments)]
    pub fn generate<R: RandomSource>(
        &mut self,
        algorithm: Algorithm,
        width: usize,
        height: usize,
        start: Option<Position>,
        exit: Option<Position>,
        custom_exit: bool,
        rng: &mut R,
    ) -> Result<()> {
        let (rows, cols) = (height.max(2), width.max(2));
        let graph = build_grid_graph(rows, cols);

        let start_node = start.and_then(|p| graph.node_id(p.row, p.col));
        let exit_node = if custom_exit {
            let Some(pos) = exit else {
                return Err(MazeError::InvalidInput(
                    "a custom exit was requested without a position".to_string(),
                ));
            };
            let node = graph
                .node_id(pos.row, pos.col)
                .ok_or(MazeError::ExitOutOfRange {
                    row: pos.row,
                    col: pos.col,
                    rows,
                    cols,
                })?;
            // A boundary start becomes the entrance, so it cannot double as the exit
            let fixed_entrance = start_node.filter(|&s| graph.is_boundary(s));
            if !graph.is_boundary(node) || fixed_entrance == Some(node) {
                return Err(MazeError::InvalidExit { node });
            }
            Some(node)
        } else {
            None
        };

        let mut graph = generate(graph, algorithm, start_node, rng);
        let openings = carve_openings(&mut graph, true, true, start_node, exit_node, rng);

        tracing::info!(
            "[game] generated {}x{} maze with {}, entrance {:?}, exit {:?}",
            cols,
            rows,
            algorithm,
            openings.entrance,
            openings.exit
        );

        self.graph = graph;
        self.entrance = openings.entrance;
        self.exit = openings.exit;
        self.player = openings.entrance;
        self.tested = false;
        Ok(())
    }

    /// Restores a previously generated maze and positions as given.
    /// The player starts at the entrance when `player` is `None`.
    pub fn load(&mut self, graph: Graph, entrance: usize, exit: usize, player: Option<usize>) {
        self.graph = graph;
        self.entrance = Some(entrance);
        self.exit = Some(exit);
        self.player = Some(player.unwrap_or(entrance));
        self.tested = false;
    }

    /// Attempt to move the player one cell in the specified direction.
    /// Returns `false` and leaves the state unchanged when the move leaves the grid or
    /// runs into a wall.
    pub fn move_player(&mut self, direction: Direction) -> bool {
        let Some(current) = self.player else {
            return false;
        };
        let Some(node) = self.graph.node(current) else {
            return false;
        };

        let (row, col) = (node.row, node.col);
        let target = match direction {
            Direction::Up => row.checked_sub(1).map(|r| (r, col)),
            Direction::Down => Some((row + 1, col)),
            Direction::Left => col.checked_sub(1).map(|c| (row, c)),
            Direction::Right => Some((row, col + 1)),
        };
        let Some(next) = target.and_then(|(r, c)| self.graph.node_id(r, c)) else {
            return false;
        };

        // Only an open edge can be crossed
        if !self.graph.is_open_between(current, next) {
            return false;
        }

        tracing::debug!("[game] moved {:?} to node {}", direction, next);
        self.player = Some(next);
        self.tested = true;

        if self.is_solved() {
            tracing::info!("[game] exit reached at node {}", next);
        }
        true
    }

    pub fn status(&self) -> GameStatus {
        if self.is_solved() {
            GameStatus::Solved
        } else {
            GameStatus::Unsolved
        }
    }

    /// Check if the exit has been reached.
    pub fn is_solved(&self) -> bool {
        self.player.is_some() && self.player == self.exit
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn tested(&self) -> bool {
        self.tested
    }

    pub fn has_maze(&self) -> bool {
        !self.graph.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.graph.rows()
    }

    pub fn cols(&self) -> usize {
        self.graph.cols()
    }

    pub fn entrance_node(&self) -> Option<usize> {
        self.entrance
    }

    pub fn exit_node(&self) -> Option<usize> {
        self.exit
    }

    pub fn player_node(&self) -> Option<usize> {
        self.player
    }

    pub fn entrance_cell(&self) -> Option<Position> {
        self.cell_of(self.entrance)
    }

    pub fn exit_cell(&self) -> Option<Position> {
        self.cell_of(self.exit)
    }

    pub fn player_cell(&self) -> Option<Position> {
        self.cell_of(self.player)
    }

    fn cell_of(&self, node: Option<usize>) -> Option<Position> {
        node.and_then(|id| self.graph.node(id))
            .map(|n| Position::new(n.row, n.col))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::generators::randomized_dfs;
    use crate::graph::Adjacency;
    use crate::random::RngSource;

    const DIRECTIONS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Nodes along the open passages from `from` to `to`, both included.
    fn open_path(graph: &Graph, from: usize, to: usize) -> Vec<usize> {
        let adjacency = Adjacency::build(graph);
        let mut parent = vec![None; graph.node_count()];
        let mut seen = vec![false; graph.node_count()];
        seen[from] = true;
        let mut queue = VecDeque::from([from]);
        while let Some(node) = queue.pop_front() {
            for &(next, edge) in adjacency.neighbors(node) {
                if graph.edges()[edge].open && !seen[next] {
                    seen[next] = true;
                    parent[next] = Some(node);
                    queue.push_back(next);
                }
            }
        }
        let mut path = vec![to];
        while let Some(prev) = parent[*path.last().unwrap()] {
            path.push(prev);
        }
        path.reverse();
        path
    }

    fn direction_between(graph: &Graph, a: usize, b: usize) -> Direction {
        let (na, nb) = (graph.node(a).unwrap(), graph.node(b).unwrap());
        match (nb.row as isize - na.row as isize, nb.col as isize - na.col as isize) {
            (-1, 0) => Direction::Up,
            (1, 0) => Direction::Down,
            (0, -1) => Direction::Left,
            (0, 1) => Direction::Right,
            other => panic!("nodes {} and {} are not adjacent: {:?}", a, b, other),
        }
    }

    fn target_of(graph: &Graph, node: usize, direction: Direction) -> Option<usize> {
        let n = graph.node(node)?;
        let (row, col) = match direction {
            Direction::Up => (n.row.checked_sub(1)?, n.col),
            Direction::Down => (n.row + 1, n.col),
            Direction::Left => (n.row, n.col.checked_sub(1)?),
            Direction::Right => (n.row, n.col + 1),
        };
        graph.node_id(row, col)
    }

    #[test]
    fn test_end_to_end_dfs_walkthrough() {
        let mut rng = RngSource::seeded(2024);
        let graph = build_grid_graph(5, 5);
        assert_eq!(graph.node_count(), 25);
        assert_eq!(graph.edges().len(), 40);

        let mut graph = randomized_dfs(graph, Some(0), &mut rng);
        assert_eq!(graph.open_edge_count(), 24);
        assert!(graph.is_spanning_tree());

        let openings = carve_openings(&mut graph, true, true, None, None, &mut rng);
        let (entrance, exit) = (openings.entrance.unwrap(), openings.exit.unwrap());
        assert!(graph.is_boundary(entrance));
        assert!(graph.is_boundary(exit));
        assert_ne!(entrance, exit);

        let path = open_path(&graph, entrance, exit);
        assert_eq!(path.first(), Some(&entrance));
        assert_eq!(path.last(), Some(&exit));

        let mut game = MazeGame::new();
        game.load(graph.clone(), entrance, exit, None);
        assert_eq!(game.player_node(), Some(entrance));
        assert_eq!(game.status(), GameStatus::Unsolved);

        for pair in path.windows(2) {
            let (here, next) = (pair[0], pair[1]);
            // Every blocked direction fails without changing anything
            for direction in DIRECTIONS {
                let open = target_of(&graph, here, direction)
                    .is_some_and(|t| graph.is_open_between(here, t));
                if !open {
                    let tested = game.tested();
                    assert!(!game.move_player(direction));
                    assert_eq!(game.player_node(), Some(here));
                    assert_eq!(game.tested(), tested);
                }
            }
            assert!(game.move_player(direction_between(&graph, here, next)));
            assert_eq!(game.player_node(), Some(next));
            assert!(game.tested());
        }

        assert_eq!(game.player_node(), game.exit_node());
        assert!(game.is_solved());
        assert_eq!(game.status(), GameStatus::Solved);
    }

    #[test]
    fn test_generate_sets_up_game() {
        for algorithm in Algorithm::ALL {
            let mut rng = RngSource::seeded(10);
            let mut game = MazeGame::new();
            assert!(!game.has_maze());
            game.generate(algorithm, 7, 4, None, None, false, &mut rng)
                .unwrap();
            assert!(game.has_maze());
            assert_eq!((game.rows(), game.cols()), (4, 7));
            assert!(game.graph().is_spanning_tree());
            assert_eq!(game.player_node(), game.entrance_node());
            assert_eq!(game.graph().entrance_node(), game.entrance_node());
            assert_eq!(game.graph().exit_node(), game.exit_node());
            assert!(!game.tested());
            assert_eq!(game.status(), GameStatus::Unsolved);
        }
    }

    #[test]
    fn test_generate_clamps_dimensions() {
        let mut game = MazeGame::new();
        game.generate(Algorithm::Prim, 0, 1, None, None, false, &mut RngSource::seeded(1))
            .unwrap();
        assert_eq!((game.rows(), game.cols()), (2, 2));
    }

    #[test]
    fn test_generate_with_start_and_custom_exit() {
        let mut game = MazeGame::new();
        game.generate(
            Algorithm::Wilson,
            6,
            5,
            Some(Position::new(0, 2)),
            Some(Position::new(4, 5)),
            true,
            &mut RngSource::seeded(6),
        )
        .unwrap();
        assert_eq!(game.entrance_cell(), Some(Position::new(0, 2)));
        assert_eq!(game.exit_cell(), Some(Position::new(4, 5)));
        assert_eq!(game.player_cell(), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_invalid_custom_exit_is_rejected() {
        let mut rng = RngSource::seeded(4);
        let mut game = MazeGame::new();
        game.generate(Algorithm::Dfs, 5, 5, None, None, false, &mut rng)
            .unwrap();
        let before = game.graph().clone();
        let (entrance, exit) = (game.entrance_node(), game.exit_node());

        // Interior cell
        let err = game
            .generate(Algorithm::Bfs, 5, 5, None, Some(Position::new(2, 2)), true, &mut rng)
            .unwrap_err();
        assert!(matches!(err, MazeError::InvalidExit { node: 12 }));

        // Outside the grid
        let err = game
            .generate(Algorithm::Bfs, 5, 5, None, Some(Position::new(9, 0)), true, &mut rng)
            .unwrap_err();
        assert!(matches!(err, MazeError::ExitOutOfRange { row: 9, .. }));

        // Same cell as the entrance
        let err = game
            .generate(
                Algorithm::Kruskal,
                5,
                5,
                Some(Position::new(0, 0)),
                Some(Position::new(0, 0)),
                true,
                &mut rng,
            )
            .unwrap_err();
        assert!(matches!(err, MazeError::InvalidExit { node: 0 }));

        // Missing position
        let err = game
            .generate(Algorithm::Prim, 5, 5, None, None, true, &mut rng)
            .unwrap_err();
        assert!(matches!(err, MazeError::InvalidInput(_)));

        // The previous maze is still in place
        assert_eq!(game.graph(), &before);
        assert_eq!((game.entrance_node(), game.exit_node()), (entrance, exit));
    }

    #[test]
    fn test_custom_exit_with_random_entrance() {
        for seed in 0..200 {
            let mut rng = RngSource::seeded(seed);
            let mut game = MazeGame::new();
            game.generate(Algorithm::Dfs, 2, 2, None, Some(Position::new(0, 0)), true, &mut rng)
                .unwrap();
            assert_eq!(game.exit_node(), Some(0));
            assert_ne!(game.entrance_node(), Some(0));
        }

        // An interior start seeds generation only, so it never conflicts with the exit
        for seed in 0..50 {
            let mut rng = RngSource::seeded(seed);
            let mut game = MazeGame::new();
            game.generate(
                Algorithm::Wilson,
                3,
                3,
                Some(Position::new(1, 1)),
                Some(Position::new(2, 1)),
                true,
                &mut rng,
            )
            .unwrap();
            assert_eq!(game.exit_cell(), Some(Position::new(2, 1)));
            assert!(game.graph().is_boundary(game.entrance_node().unwrap()));
        }
    }

    #[test]
    fn test_exit_ignored_without_custom_flag() {
        let mut game = MazeGame::new();
        game.generate(
            Algorithm::Dfs,
            5,
            5,
            None,
            Some(Position::new(2, 2)),
            false,
            &mut RngSource::seeded(8),
        )
        .unwrap();
        assert!(game.graph().is_boundary(game.exit_node().unwrap()));
    }

    #[test]
    fn test_moves_out_of_bounds_fail() {
        let mut graph = build_grid_graph(2, 2);
        graph = randomized_dfs(graph, Some(0), &mut RngSource::seeded(0));
        let mut game = MazeGame::new();
        game.load(graph, 0, 3, None);
        assert!(!game.move_player(Direction::Up));
        assert!(!game.move_player(Direction::Left));
        assert_eq!(game.player_node(), Some(0));
        assert!(!game.tested());
    }

    #[test]
    fn test_no_maze_no_moves() {
        let mut game = MazeGame::new();
        assert!(!game.move_player(Direction::Down));
        assert!(!game.is_solved());
        assert_eq!(game.player_cell(), None);
    }

    #[test]
    fn test_load_restores_player() {
        let graph = randomized_dfs(build_grid_graph(3, 3), None, &mut RngSource::seeded(3));
        let mut game = MazeGame::new();
        game.load(graph, 0, 8, Some(8));
        assert_eq!(game.status(), GameStatus::Solved);
        assert!(!game.tested());
    }

    #[test]
    fn test_direction_keys() {
        assert_eq!(Direction::from_key('w'), Some(Direction::Up));
        assert_eq!(Direction::from_key('J'), Some(Direction::Down));
        assert_eq!(Direction::from_key('a'), Some(Direction::Left));
        assert_eq!(Direction::from_key('l'), Some(Direction::Right));
        assert_eq!(Direction::from_key('x'), None);
    }
}
