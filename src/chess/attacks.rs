//! Check detection. There are no pre-calculated attack tables: every query
//! scans the whole board and asks each opposing piece's movement rule whether
//! it could land on the target square.

use std::fmt;

use log::trace;

use crate::chess::board::Board;
use crate::chess::core::{Player, Square};
use crate::chess::rules::is_pseudo_legal;

/// Returns the first square holding a piece of `attacker` whose movement rule
/// accepts `target` as a destination.
#[must_use]
pub fn find_attacker(target: Square, attacker: Player, board: &Board) -> Option<Square> {
    board
        .pieces()
        .filter(|(_, piece)| piece.owner == attacker)
        .find(|(square, piece)| is_pseudo_legal(*piece, *square, target, board))
        .map(|(square, _)| square)
}

/// Returns true if any piece of `attacker` can move to `target`.
#[must_use]
pub fn is_attacked(target: Square, attacker: Player, board: &Board) -> bool {
    find_attacker(target, attacker, board).is_some()
}

/// Returns true if the king of `king_color` standing on `king_square` is
/// attacked by any opposing piece.
///
/// ```
/// use referee::chess::attacks::in_check;
/// use referee::chess::board::Board;
/// use referee::chess::core::{Player, Square};
///
/// let board = Board::starting();
/// assert!(!in_check(Player::White, Square::try_from("e1").unwrap(), &board));
/// ```
#[must_use]
pub fn in_check(king_color: Player, king_square: Square, board: &Board) -> bool {
    match find_attacker(king_square, king_color.opponent(), board) {
        Some(attacker) => {
            trace!("{king_color} king on {king_square} is attacked from {attacker}");
            true
        },
        None => false,
    }
}

/// Check status of both players.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Checks {
    #[allow(missing_docs)]
    pub white: bool,
    #[allow(missing_docs)]
    pub black: bool,
}

impl Checks {
    /// Scans the board for every king of both players. A player without a
    /// king on the board is never in check.
    #[must_use]
    pub fn scan(board: &Board) -> Self {
        let player_in_check = |player: Player| {
            board
                .king_squares(player)
                .any(|king| in_check(player, king, board))
        };
        Self {
            white: player_in_check(Player::White),
            black: player_in_check(Player::Black),
        }
    }

    /// Returns true if either king is attacked.
    #[must_use]
    pub const fn any(self) -> bool {
        self.white || self.black
    }
}

impl fmt::Display for Checks {
    /// Protocol representation: "yes" if either king is attacked, "no"
    /// otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.any() { "yes" } else { "no" })
    }
}
