//! Reasons a command is turned down. Every rejection is reported on the
//! output as `invalid`, optionally followed by a numeric diagnostic code, and
//! the session carries on with the next command.

use std::{error, fmt};

use crate::chess::core::{Piece, Player, Square};

/// Why a command was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The command could not be decoded (bad coordinates, unknown piece
    /// symbols, trailing garbage).
    MalformedCommand(String),
    /// The `B` payload is not a valid 64-square snapshot.
    MalformedSnapshot(String),
    /// The declared piece does not belong to the side to move or is not the
    /// one standing on the source square.
    NoSuchPiece {
        #[allow(missing_docs)]
        declared: Piece,
        #[allow(missing_docs)]
        square: Square,
        #[allow(missing_docs)]
        found: Option<Piece>,
        #[allow(missing_docs)]
        side_to_move: Player,
    },
    /// The piece can not move that way.
    IllegalMove {
        #[allow(missing_docs)]
        piece: Piece,
        #[allow(missing_docs)]
        from: Square,
        #[allow(missing_docs)]
        to: Square,
    },
    /// The capture marker does not match what was on the destination.
    CaptureMismatch(CaptureMismatch),
    /// The promotion suffix can not be honored.
    InvalidPromotion(InvalidPromotion),
}

/// Disagreements between the capture marker and the destination square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureMismatch {
    /// No `x` marker but the destination is occupied.
    Undeclared,
    /// `x` marker but the destination was empty.
    NothingToCapture,
    /// `x` marker but the destination held a piece of the mover.
    OwnPiece,
}

/// Problems with the `=<piece>` suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidPromotion {
    /// The destination is not the last rank of the side to move.
    WrongRank,
    /// Only a queen, rook, bishop or knight of the mover's color is allowed.
    DisallowedPiece,
    /// Only pawns promote.
    NotAPawn,
}

impl Rejection {
    /// Diagnostic code appended to `invalid` on the protocol output. Only a
    /// few situations are distinguished, everything else is plain `invalid`.
    #[must_use]
    pub const fn code(&self) -> Option<u8> {
        match self {
            Self::IllegalMove { .. } => Some(1),
            Self::CaptureMismatch(CaptureMismatch::OwnPiece) => Some(2),
            Self::CaptureMismatch(CaptureMismatch::Undeclared) => Some(5),
            Self::CaptureMismatch(CaptureMismatch::NothingToCapture) => Some(7),
            Self::MalformedCommand(_)
            | Self::MalformedSnapshot(_)
            | Self::NoSuchPiece { .. }
            | Self::InvalidPromotion(_) => None,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedCommand(reason) => write!(f, "malformed command: {reason}"),
            Self::MalformedSnapshot(reason) => write!(f, "malformed board snapshot: {reason}"),
            Self::NoSuchPiece {
                declared,
                square,
                found,
                side_to_move,
            } => {
                write!(f, "{side_to_move} to move, can not move '{declared}' from {square}: ")?;
                match found {
                    Some(found) => write!(f, "square holds '{found}'"),
                    None => write!(f, "square is empty"),
                }
            },
            Self::IllegalMove { piece, from, to } => {
                write!(f, "'{piece}' can not move from {from} to {to}")
            },
            Self::CaptureMismatch(CaptureMismatch::Undeclared) => {
                f.write_str("destination is occupied but no capture was declared")
            },
            Self::CaptureMismatch(CaptureMismatch::NothingToCapture) => {
                f.write_str("capture declared but destination was empty")
            },
            Self::CaptureMismatch(CaptureMismatch::OwnPiece) => {
                f.write_str("capture declared on a piece of the same color")
            },
            Self::InvalidPromotion(InvalidPromotion::WrongRank) => {
                f.write_str("promotion is only possible on the last rank")
            },
            Self::InvalidPromotion(InvalidPromotion::DisallowedPiece) => {
                f.write_str("promotion piece should be a queen, rook, bishop or knight of the mover's color")
            },
            Self::InvalidPromotion(InvalidPromotion::NotAPawn) => {
                f.write_str("only pawns can be promoted")
            },
        }
    }
}

impl error::Error for Rejection {}

impl From<CaptureMismatch> for Rejection {
    fn from(mismatch: CaptureMismatch) -> Self {
        Self::CaptureMismatch(mismatch)
    }
}

impl From<InvalidPromotion> for Rejection {
    fn from(promotion: InvalidPromotion) -> Self {
        Self::InvalidPromotion(promotion)
    }
}
