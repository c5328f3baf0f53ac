use std::fmt;
use std::io::Write;

use crossterm::{
    queue,
    style::{self, Color, StyledContent, Stylize},
};

use crate::graph::Graph;

/// One character cell of the text rendering of a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    Passage,
    Entrance,
    Exit,
    Player,
}

impl Glyph {
    /// The width of each glyph when rendered, in character widths.
    pub const CELL_WIDTH: usize = 2;

    pub fn symbol(&self) -> &'static str {
        match self {
            Glyph::Wall => "██",
            Glyph::Passage => "  ",
            Glyph::Entrance => "S ",
            Glyph::Exit => "E ",
            Glyph::Player => "@ ",
        }
    }

    pub fn styled(&self) -> StyledContent<&'static str> {
        let symbol = self.symbol();
        match self {
            Glyph::Wall => symbol.with(Color::DarkGrey),
            Glyph::Passage => symbol.with(Color::Reset),
            Glyph::Entrance => symbol.with(Color::Green).bold(),
            Glyph::Exit => symbol.with(Color::Red).bold(),
            Glyph::Player => symbol.with(Color::Yellow).bold(),
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = self.styled();

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Glyph::CELL_WIDTH,
                "Each glyph must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Lays the maze out on a `(2 * rows + 1) x (2 * cols + 1)` glyph grid: node `(r, c)`
/// sits at `(2r + 1, 2c + 1)` and the slot between two nodes is a passage when their
/// edge is open.
pub fn layout(graph: &Graph, player: Option<usize>) -> Vec<Vec<Glyph>> {
    let (height, width) = (graph.rows() * 2 + 1, graph.cols() * 2 + 1);
    let mut glyphs = vec![vec![Glyph::Wall; width]; height];

    for node in graph.nodes() {
        glyphs[node.row * 2 + 1][node.col * 2 + 1] = Glyph::Passage;
    }
    for edge in graph.edges().iter().filter(|e| e.open) {
        let (Some(a), Some(b)) = (graph.node(edge.from), graph.node(edge.to)) else {
            continue;
        };
        glyphs[a.row + b.row + 1][a.col + b.col + 1] = Glyph::Passage;
    }

    let markers = [
        (graph.entrance_node(), Glyph::Entrance),
        (graph.exit_node(), Glyph::Exit),
        (player, Glyph::Player),
    ];
    for (node, glyph) in markers {
        if let Some(n) = node.and_then(|id| graph.node(id)) {
            glyphs[n.row * 2 + 1][n.col * 2 + 1] = glyph;
        }
    }
    glyphs
}

/// Unstyled rendering, one line per glyph row.
pub fn to_plain_string(graph: &Graph, player: Option<usize>) -> String {
    layout(graph, player)
        .iter()
        .map(|row| row.iter().map(Glyph::symbol).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the styled maze to `out`.
pub fn write_maze<W: Write>(
    out: &mut W,
    graph: &Graph,
    player: Option<usize>,
) -> std::io::Result<()> {
    for row in layout(graph, player) {
        for glyph in row {
            queue!(out, style::Print(glyph))?;
        }
        queue!(out, style::Print("\r\n"))?;
    }
    out.flush()
}
