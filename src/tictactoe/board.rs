//! Board state representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Character used when rendering boards for humans
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Character used in dataset records (blank for empty)
    pub fn to_record_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' => Some(Cell::X),
            'O' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game. X is the maximizing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(alias = "x")]
    X,
    #[serde(alias = "o")]
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Player> {
        match c {
            'X' => Some(Player::X),
            'O' => Some(Player::O),
            _ => None,
        }
    }

    /// Whether this side maximizes the search score
    pub fn is_maximizing(self) -> bool {
        self == Player::X
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Player {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" | "first" | "player1" | "p1" => Ok(Player::X),
            "o" | "second" | "player2" | "p2" => Ok(Player::O),
            _ => Err(Error::InvalidPlayerToken {
                token: s.to_string(),
            }),
        }
    }
}

/// Side length of the square board, fixed for the lifetime of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct GridSize(usize);

impl GridSize {
    pub const MIN: usize = 3;
    pub const MAX: usize = 255;

    /// Classic 3x3 tic-tac-toe
    pub const CLASSIC: GridSize = GridSize(3);

    pub fn new(size: usize) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(GridSize(size))
        } else {
            Err(Error::InvalidGridSize {
                size,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Number of cells on the board (N*N)
    pub fn cell_count(self) -> usize {
        self.0 * self.0
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::CLASSIC
    }
}

impl TryFrom<usize> for GridSize {
    type Error = Error;

    fn try_from(size: usize) -> Result<Self> {
        GridSize::new(size)
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> usize {
        size.0
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.0)
    }
}

/// A (row, column) coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Row-major index of this position
    pub fn index(self, size: GridSize) -> usize {
        self.row * size.get() + self.col
    }

    pub fn from_index(index: usize, size: GridSize) -> Self {
        Position {
            row: index / size.get(),
            col: index % size.get(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An NxN grid of cells stored in row-major order.
///
/// The search engine mutates one board in place (place, recurse, undo), so
/// the cell buffer is allocated once per game and never resized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    size: GridSize,
    cells: Vec<Cell>,
}

/// Unchecked serialized form, validated through [`Board::from_cells`]
#[derive(Deserialize)]
struct BoardRepr {
    size: GridSize,
    cells: Vec<Cell>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = Error;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        Board::from_cells(repr.size, repr.cells)
    }
}

impl Board {
    /// Create an empty board
    pub fn new(size: GridSize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size.cell_count()],
        }
    }

    /// Build a board from row-major cells.
    ///
    /// # Errors
    ///
    /// Returns error if the number of cells is not N*N.
    pub fn from_cells(size: GridSize, cells: Vec<Cell>) -> Result<Self> {
        if cells.len() != size.cell_count() {
            return Err(Error::CellCountMismatch {
                size: size.get(),
                expected: size.cell_count(),
                got: cells.len(),
            });
        }
        Ok(Board { size, cells })
    }

    /// Parse a board from its cell characters ('X', 'O', ' ' or '.').
    ///
    /// Newlines are ignored so the `Display` output parses back.
    pub fn from_string(size: GridSize, s: &str) -> Result<Self> {
        let cells = s
            .chars()
            .filter(|&c| c != '\n' && c != '\r')
            .enumerate()
            .map(|(position, c)| {
                Cell::from_char(c).ok_or_else(|| {
                    Error::malformed(
                        format!("cell {position}"),
                        format!("invalid cell character {c:?}"),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_cells(size, cells)
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at a row-major index
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Cell at (row, col)
    pub fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size.get() + col]
    }

    pub fn get(&self, pos: Position) -> Result<Cell> {
        self.check_bounds(pos)?;
        Ok(self.cells[pos.index(self.size)])
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_ok_and(|cell| cell == Cell::Empty)
    }

    /// Put `player`'s mark on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns error if the position is off the board or already occupied.
    pub fn place(&mut self, pos: Position, player: Player) -> Result<()> {
        self.check_bounds(pos)?;
        let index = pos.index(self.size);
        if self.cells[index] != Cell::Empty {
            return Err(Error::CellOccupied {
                row: pos.row,
                col: pos.col,
            });
        }
        self.cells[index] = player.to_cell();
        Ok(())
    }

    /// Unchecked write used by the search's place/undo cycle
    pub(crate) fn set_cell(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = Cell::Empty;
    }

    /// True iff at least one cell is empty
    pub fn has_moves_left(&self) -> bool {
        self.cells.contains(&Cell::Empty)
    }

    /// Empty cells in row-major order
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(move |(index, _)| Position::from_index(index, size))
    }

    /// Count the number of occupied cells on the board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Cells as a record string (blank for empty, no separators)
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_record_char()).collect()
    }

    fn check_bounds(&self, pos: Position) -> Result<()> {
        let n = self.size.get();
        if pos.row >= n || pos.col >= n {
            return Err(Error::PositionOutOfBounds {
                row: pos.row,
                col: pos.col,
                size: n,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.size.get()).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}
