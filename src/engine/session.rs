//! The turn controller: owns the board, the side to move and the history of
//! previous positions, and turns commands into responses.
//!
//! A move goes through the following steps:
//!
//! 1. Resolve the moving piece from the board.
//! 2. Validate the promotion suffix (if any), the movement rule and the
//!    capture marker.
//! 3. Record the current position in history and apply the move.
//! 4. Verify the declared capture against what was actually taken. This
//!    happens after the board was changed, so a failure here leaves the move
//!    on the board.
//! 5. Scan both kings for check.
//!
//! The side to move is then switched according to [`TurnPolicy`].

use log::{debug, warn};

use crate::chess::attacks::Checks;
use crate::chess::board::Board;
use crate::chess::core::{Piece, PieceKind, Player, Promotion, Rank};
use crate::chess::rules::is_pseudo_legal;
use crate::engine::config::{Config, TurnPolicy};
use crate::engine::protocol::{Command, MoveRequest, Response};
use crate::engine::rejection::{CaptureMismatch, InvalidPromotion, Rejection};

/// Position before a move was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    #[allow(missing_docs)]
    pub board: Board,
    #[allow(missing_docs)]
    pub side_to_move: Player,
}

/// Result of an accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Applied {
    /// The move as requested.
    pub request: MoveRequest,
    /// Piece removed from the destination square.
    pub captured: Option<Piece>,
    /// Piece placed on the destination instead of the pawn.
    pub promoted: Option<Piece>,
    /// Check status after the move.
    pub checks: Checks,
}

/// Checks the declared capture against the piece that was actually removed
/// from the destination square.
///
/// # Errors
///
/// Returns [`CaptureMismatch::NothingToCapture`] when the destination was
/// empty and [`CaptureMismatch::OwnPiece`] when it held a piece of the mover.
pub fn verify_capture(mover: Piece, captured: Option<Piece>) -> Result<(), CaptureMismatch> {
    match captured {
        None => Err(CaptureMismatch::NothingToCapture),
        Some(captured) if !captured.is_opponent_of(mover) => Err(CaptureMismatch::OwnPiece),
        Some(_) => Ok(()),
    }
}

/// Game state threaded through every command.
///
/// ```
/// use referee::engine::protocol::MoveRequest;
/// use referee::engine::Session;
///
/// let mut session = Session::new();
/// let applied = session.play(&MoveRequest::try_from("Pe2e4").unwrap()).unwrap();
/// assert!(!applied.checks.any());
/// assert_eq!(session.history().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    board: Board,
    side_to_move: Player,
    history: Vec<Snapshot>,
    config: Config,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts from the standard starting position with White to move.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            board: Board::starting(),
            side_to_move: Player::White,
            history: Vec::new(),
            config,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Positions recorded before each applied move, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[allow(missing_docs)]
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Replaces the board. The side to move and the history are kept.
    pub fn set_board(&mut self, board: Board) -> Checks {
        self.board = board;
        Checks::scan(&self.board)
    }

    /// Restores the position recorded before the last applied move. Returns
    /// false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.board = snapshot.board;
                self.side_to_move = snapshot.side_to_move;
                true
            },
            None => false,
        }
    }

    /// Validates and applies a move, then passes the turn according to
    /// [`Config::turn_policy`].
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] describing the first failed validation step.
    /// A failed capture verification still leaves the move on the board.
    pub fn play(&mut self, request: &MoveRequest) -> Result<Applied, Rejection> {
        let result = self.apply(request);
        if result.is_ok() || self.config.turn_policy == TurnPolicy::Always {
            self.side_to_move = self.side_to_move.opponent();
        }
        result
    }

    fn resolve(&self, request: &MoveRequest) -> Result<Piece, Rejection> {
        let found = self.board.at(request.from);
        if request.piece.owner != self.side_to_move || found != Some(request.piece) {
            return Err(Rejection::NoSuchPiece {
                declared: request.piece,
                square: request.from,
                found,
                side_to_move: self.side_to_move,
            });
        }
        Ok(request.piece)
    }

    fn validate_promotion(
        &self,
        mover: Piece,
        request: &MoveRequest,
        promotion: Piece,
    ) -> Result<(), InvalidPromotion> {
        if request.to.rank() != Rank::promotion(self.side_to_move) {
            return Err(InvalidPromotion::WrongRank);
        }
        if promotion.owner != mover.owner || Promotion::try_from(promotion.kind).is_err() {
            return Err(InvalidPromotion::DisallowedPiece);
        }
        if mover.kind != PieceKind::Pawn {
            return Err(InvalidPromotion::NotAPawn);
        }
        Ok(())
    }

    fn apply(&mut self, request: &MoveRequest) -> Result<Applied, Rejection> {
        let mover = self.resolve(request)?;
        if let Some(promotion) = request.promotion {
            self.validate_promotion(mover, request, promotion)?;
        }
        if !is_pseudo_legal(mover, request.from, request.to, &self.board) {
            return Err(Rejection::IllegalMove {
                piece: mover,
                from: request.from,
                to: request.to,
            });
        }
        if !request.capture && !self.board.is_empty(request.to) {
            return Err(CaptureMismatch::Undeclared.into());
        }

        self.history.push(Snapshot {
            board: self.board.clone(),
            side_to_move: self.side_to_move,
        });
        let captured = self.board.relocate(request.from, request.to);
        if request.capture {
            verify_capture(mover, captured)?;
        }
        if let Some(promotion) = request.promotion {
            self.board.set(request.to, Some(promotion));
        }

        Ok(Applied {
            request: *request,
            captured,
            promoted: request.promotion,
            checks: Checks::scan(&self.board),
        })
    }

    fn reject(&self, rejection: Rejection) -> Response {
        debug!("rejected: {rejection}");
        let code = if self.config.diagnostic_codes {
            rejection.code()
        } else {
            None
        };
        Response::Invalid { rejection, code }
    }

    /// Consumes one line of input and produces the response to print, if
    /// any.
    ///
    /// ```
    /// use referee::engine::Session;
    ///
    /// let mut session = Session::new();
    /// let respond = |session: &mut Session, line: &str| {
    ///     session.execute(line).map(|response| response.to_string())
    /// };
    /// assert_eq!(respond(&mut session, "MNg1f3"), Some("no".to_string()));
    /// assert_eq!(respond(&mut session, "MNb8c6"), Some("invalid".to_string()));
    /// assert_eq!(respond(&mut session, ""), None);
    /// ```
    pub fn execute(&mut self, line: &str) -> Option<Response> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(rejection) => {
                // Unparseable moves still consume a turn unless told otherwise.
                if matches!(rejection, Rejection::MalformedCommand(_))
                    && self.config.turn_policy == TurnPolicy::Always
                {
                    self.side_to_move = self.side_to_move.opponent();
                }
                return Some(self.reject(rejection));
            },
        };
        debug!("{:?} to move, executing {command:?}", self.side_to_move);
        match command {
            Command::Empty => None,
            Command::SetBoard(board) => Some(Response::Checks(self.set_board(board))),
            Command::Move(request) => Some(match self.play(&request) {
                Ok(applied) => {
                    debug!("applied {applied:?}");
                    Response::Checks(applied.checks)
                },
                Err(rejection) => self.reject(rejection),
            }),
            Command::Print => Some(Response::Board(self.board.clone())),
            Command::SetOption { name, value } => match self.config.set(&name, &value) {
                Ok(()) => None,
                Err(e) => {
                    warn!("setoption failed: {e:#}");
                    Some(Response::Info(format!("{e:#}")))
                },
            },
            Command::Unknown(line) => {
                warn!("ignoring unknown command: {line:?}");
                None
            },
        }
    }
}
