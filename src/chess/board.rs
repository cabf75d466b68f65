//! Square-centric [`Board`] representation: an 8×8 grid where each cell is
//! either empty or holds a [`Piece`]. The board is the only place that knows
//! where the pieces are, everything else (rules, check detection, the turn
//! controller) looks pieces up on demand.

use std::fmt::{self, Write};

use anyhow::{bail, Context};

use crate::chess::core::{Piece, PieceKind, Player, Square, BOARD_SIZE, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;

/// Symbol of an empty square in snapshots and rendered boards.
pub const EMPTY_SQUARE: char = ' ';

/// Piece placement on the board.
///
/// Serialized in two ways:
///
/// - Snapshot: 64 characters in row-major order (rank index 0..8, then file
///   index 0..8), each a piece symbol or a space. This is the payload of the
///   `B` command.
/// - Rendered: 8 lines of 8 characters, top row first.
///
/// ```
/// use referee::chess::board::Board;
///
/// let board = Board::starting();
/// assert_eq!(
///     board.to_string(),
///     "rnbqkbnr\npppppppp\n        \n        \n        \n        \nPPPPPPPP\nRNBQKBNR\n"
/// );
/// assert_eq!(Board::from_snapshot(&board.snapshot()).unwrap(), board);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; WIDTH]; WIDTH],
}

impl Board {
    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [[None; WIDTH]; WIDTH],
        }
    }

    /// Creates the starting position of the standard chess variant.
    #[must_use]
    pub fn starting() -> Self {
        const STARTING: &str = concat!(
            "rnbqkbnr",
            "pppppppp",
            "        ",
            "        ",
            "        ",
            "        ",
            "PPPPPPPP",
            "RNBQKBNR",
        );
        let mut board = Self::empty();
        for (square, symbol) in Square::iter().zip(STARTING.chars()) {
            board.set(square, Piece::try_from(symbol).ok());
        }
        board
    }

    /// Parses the 64-character snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] if the snapshot does not contain exactly
    /// [`BOARD_SIZE`] characters or if any of them is neither a piece symbol
    /// nor [`EMPTY_SQUARE`].
    pub fn from_snapshot(snapshot: &str) -> anyhow::Result<Self> {
        let size = snapshot.chars().count();
        if size != BOARD_SIZE as usize {
            bail!("board snapshot should contain {BOARD_SIZE} squares, got {size}");
        }
        let mut board = Self::empty();
        for (square, symbol) in Square::iter().zip(snapshot.chars()) {
            let piece = match symbol {
                EMPTY_SQUARE => None,
                _ => Some(
                    Piece::try_from(symbol)
                        .with_context(|| format!("unexpected symbol on {square}"))?,
                ),
            };
            board.set(square, piece);
        }
        Ok(board)
    }

    /// Dumps the board as the 64-character snapshot accepted by
    /// [`Board::from_snapshot`].
    #[must_use]
    pub fn snapshot(&self) -> String {
        Square::iter().map(|square| symbol(self.at(square))).collect()
    }

    /// Returns the piece on the given square, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank() as usize][square.file() as usize]
    }

    /// Returns true if the square holds no piece.
    #[must_use]
    pub const fn is_empty(&self, square: Square) -> bool {
        self.at(square).is_none()
    }

    /// Places a piece on the square (or clears it when `piece` is [`None`]).
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.rank() as usize][square.file() as usize] = piece;
    }

    /// Moves whatever is on `from` to `to` and clears `from`. Returns the
    /// piece that was on `to` before the move.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let captured = self.at(to);
        self.set(to, self.at(from));
        self.set(from, None);
        captured
    }

    /// Iterates over occupied squares in snapshot order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.at(square).map(|piece| (square, piece)))
    }

    /// Squares holding a king of the given player. A well-formed position has
    /// exactly one, but arbitrary snapshots may have none or several.
    pub fn king_squares(&self, player: Player) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |(_, piece)| *piece == Piece::new(player, PieceKind::King))
            .map(|(square, _)| square)
    }

    /// Renders the board as 8 newline-terminated rows of 8 characters.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl TryFrom<&str> for Board {
    type Error = anyhow::Error;

    fn try_from(snapshot: &str) -> anyhow::Result<Self> {
        Self::from_snapshot(snapshot)
    }
}

fn symbol(piece: Option<Piece>) -> char {
    piece.map_or(EMPTY_SQUARE, Piece::symbol)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares {
            for piece in row {
                f.write_char(symbol(*piece))?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
