//! Movement rules for each [`PieceKind`]. A rule answers a single question:
//! can a piece of the given owner standing on `from` move to `to` on this
//! board? The answer only takes the movement pattern and the board occupancy
//! into account ("pseudo-legal"), it does not care whether the move leaves the
//! mover's own king attacked.
//!
//! Rules are plain functions looked up by piece kind through [`rule`], they
//! never mutate the board.

use crate::chess::board::Board;
use crate::chess::core::{Piece, PieceKind, Player, Rank, Square};

/// Signature shared by all movement rules: owner, source, destination, board.
pub type Rule = fn(Player, Square, Square, &Board) -> bool;

/// Looks up the movement rule of the piece kind.
#[must_use]
pub const fn rule(kind: PieceKind) -> Rule {
    match kind {
        PieceKind::King => king,
        PieceKind::Queen => queen,
        PieceKind::Rook => rook,
        PieceKind::Bishop => bishop,
        PieceKind::Knight => knight,
        PieceKind::Pawn => pawn,
    }
}

/// Checks whether `piece` standing on `from` can move to `to`.
///
/// ```
/// use referee::chess::board::Board;
/// use referee::chess::core::{Piece, Square};
/// use referee::chess::rules::is_pseudo_legal;
///
/// let board = Board::starting();
/// let knight = Piece::try_from('N').unwrap();
/// let g1 = Square::try_from("g1").unwrap();
/// assert!(is_pseudo_legal(knight, g1, Square::try_from("f3").unwrap(), &board));
/// assert!(!is_pseudo_legal(knight, g1, Square::try_from("g3").unwrap(), &board));
/// ```
#[must_use]
pub fn is_pseudo_legal(piece: Piece, from: Square, to: Square, board: &Board) -> bool {
    rule(piece.kind)(piece.owner, from, to, board)
}

/// The destination is either empty or occupied by the opponent.
fn can_land(owner: Player, to: Square, board: &Board) -> bool {
    board.at(to).map_or(true, |target| target.owner != owner)
}

/// All squares strictly between `from` and `to` are empty. Only meaningful for
/// squares on the same rank, file or diagonal.
fn is_path_clear(from: Square, to: Square, board: &Board) -> bool {
    let (rank_delta, file_delta) = from.delta(to);
    let distance = rank_delta.abs().max(file_delta.abs());
    (1..distance).all(|step| {
        from.offset(rank_delta.signum() * step, file_delta.signum() * step)
            .is_some_and(|square| board.is_empty(square))
    })
}

fn king(owner: Player, from: Square, to: Square, board: &Board) -> bool {
    let (rank_delta, file_delta) = from.delta(to);
    rank_delta.abs().max(file_delta.abs()) == 1 && can_land(owner, to, board)
}

fn rook(owner: Player, from: Square, to: Square, board: &Board) -> bool {
    let (rank_delta, file_delta) = from.delta(to);
    (rank_delta == 0) != (file_delta == 0)
        && is_path_clear(from, to, board)
        && can_land(owner, to, board)
}

fn bishop(owner: Player, from: Square, to: Square, board: &Board) -> bool {
    let (rank_delta, file_delta) = from.delta(to);
    rank_delta != 0
        && rank_delta.abs() == file_delta.abs()
        && is_path_clear(from, to, board)
        && can_land(owner, to, board)
}

fn queen(owner: Player, from: Square, to: Square, board: &Board) -> bool {
    rook(owner, from, to, board) || bishop(owner, from, to, board)
}

// Knights jump: neither the path nor the destination occupant matter here.
// Landing on an own piece is rejected later by the capture checks.
fn knight(_: Player, from: Square, to: Square, _: &Board) -> bool {
    let (rank_delta, file_delta) = from.delta(to);
    matches!((rank_delta.abs(), file_delta.abs()), (1, 2) | (2, 1))
}

fn pawn(owner: Player, from: Square, to: Square, board: &Board) -> bool {
    let forward = owner.push_direction();
    let (rank_delta, file_delta) = from.delta(to);
    if rank_delta == forward && file_delta.abs() == 1 {
        // Diagonal steps are captures only: no en passant.
        return board.at(to).is_some_and(|target| target.owner != owner);
    }
    if file_delta != 0 {
        return false;
    }
    if rank_delta == forward {
        return board.is_empty(to);
    }
    rank_delta == 2 * forward
        && from.rank() == Rank::pawns_starting(owner)
        && from
            .offset(forward, 0)
            .is_some_and(|skipped| board.is_empty(skipped))
        && board.is_empty(to)
}
