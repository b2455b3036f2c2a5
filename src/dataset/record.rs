//! A single game record: starting side plus board

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::MoveSelector,
    tictactoe::{Board, Cell, GameReport, GridSize, Player, play_out},
};

/// Initial position of one game in a batch
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRecord {
    pub first_player: Player,
    pub board: Board,
}

impl GameRecord {
    pub fn new(first_player: Player, board: Board) -> Self {
        Self {
            first_player,
            board,
        }
    }

    /// Parse one ascii record.
    ///
    /// Only the line terminator is stripped: trailing blanks are empty
    /// cells and count towards the N*N cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] if the starting side is not `X`
    /// or `O`, the line does not hold exactly N*N cells, or a cell
    /// character is not `X`, `O`, a blank or `.`.
    pub fn parse_line(line: &str, size: GridSize) -> Result<Self> {
        Self::parse_at(line, size, "record")
    }

    pub(crate) fn parse_at(line: &str, size: GridSize, location: &str) -> Result<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let mut chars = line.chars();
        let Some(side) = chars.next() else {
            return Err(Error::malformed(location, "empty record"));
        };
        let first_player = Player::from_char(side).ok_or_else(|| {
            Error::malformed(location, format!("invalid starting side {side:?}"))
        })?;

        let cells = chars
            .enumerate()
            .map(|(index, c)| {
                Cell::from_char(c).ok_or_else(|| {
                    Error::malformed(
                        location,
                        format!("invalid cell character {c:?} at cell {index}"),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if cells.len() != size.cell_count() {
            return Err(Error::malformed(
                location,
                format!(
                    "expected {} cells for a {size} board, got {}",
                    size.cell_count(),
                    cells.len()
                ),
            ));
        }

        Ok(Self {
            first_player,
            board: Board::from_cells(size, cells)?,
        })
    }

    /// Ascii encoding without the line terminator
    pub fn to_line(&self) -> String {
        let mut line = String::with_capacity(1 + self.board.cells().len());
        line.push(self.first_player.to_char());
        line.push_str(&self.board.encode());
        line
    }

    /// Play the record out with `selector` choosing every move
    pub fn play_out<S: MoveSelector>(&self, selector: &mut S) -> GameReport {
        play_out(self.board.clone(), self.first_player, selector)
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}
