//! Line-oriented command protocol.
//!
//! | Command | Meaning |
//! | ------- | ------- |
//! | `B<64 squares>` | Replace the board, report check |
//! | `M<piece><square>[x]<square>[=<piece>]` | Make a move, report check |
//! | `print` | Dump the board |
//! | `setoption name <Name> value <Value>` | Change a session option |
//!
//! Responses are `yes`/`no` (is either king attacked), `invalid` with an
//! optional diagnostic code, the board dump or an `info string` line.

use std::fmt;
use std::str::Chars;

use anyhow::{bail, Context};
use itertools::Itertools;

use crate::chess::attacks::Checks;
use crate::chess::board::Board;
use crate::chess::core::{File, Piece, Rank, Square};
use crate::engine::rejection::Rejection;

/// A decoded move command.
///
/// ```
/// use referee::engine::protocol::MoveRequest;
///
/// let request = MoveRequest::try_from("Pe7xd8=Q").unwrap();
/// assert!(request.capture);
/// assert_eq!(request.from.to_string(), "e7");
/// assert_eq!(request.to.to_string(), "d8");
/// assert_eq!(request.promotion.map(|piece| piece.symbol()), Some('Q'));
/// assert_eq!(request.to_string(), "Pe7xd8=Q");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    /// Declared moving piece.
    pub piece: Piece,
    #[allow(missing_docs)]
    pub from: Square,
    #[allow(missing_docs)]
    pub to: Square,
    /// The `x` marker was present.
    pub capture: bool,
    /// Requested promotion piece from the `=<piece>` suffix. It is not
    /// validated here: the turn controller decides whether it is allowed.
    pub promotion: Option<Piece>,
}

fn next_square(chars: &mut Chars<'_>) -> anyhow::Result<Square> {
    let (file, rank) = match (chars.next(), chars.next()) {
        (Some(file), Some(rank)) => (file, rank),
        _ => bail!("expected a square"),
    };
    Ok(Square::new(File::try_from(file)?, Rank::try_from(rank)?))
}

impl TryFrom<&str> for MoveRequest {
    type Error = anyhow::Error;

    /// Parses the move without the leading `M`.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        let mut chars = input.chars();
        let piece = Piece::try_from(chars.next().context("expected a piece symbol")?)?;
        let from = next_square(&mut chars).context("source square")?;
        let (capture, rest) = match chars.as_str().strip_prefix('x') {
            Some(rest) => (true, rest),
            None => (false, chars.as_str()),
        };
        let mut chars = rest.chars();
        let to = next_square(&mut chars).context("destination square")?;
        let promotion = match chars.as_str() {
            "" => None,
            suffix => {
                let Some(symbol) = suffix
                    .strip_prefix('=')
                    .and_then(|symbol| symbol.chars().exactly_one().ok())
                else {
                    bail!("unexpected trailing input '{suffix}'");
                };
                Some(Piece::try_from(symbol).context("promotion piece")?)
            },
        };
        Ok(Self {
            piece,
            from,
            to,
            capture,
            promotion,
        })
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.piece, self.from)?;
        if self.capture {
            f.write_str("x")?;
        }
        write!(f, "{}", self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "={promotion}")?;
        }
        Ok(())
    }
}

/// A single line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,
    /// `B` command.
    SetBoard(Board),
    /// `M` command.
    Move(MoveRequest),
    /// `print` command.
    Print,
    /// `setoption name <Name> value <Value>` command.
    SetOption {
        #[allow(missing_docs)]
        name: String,
        #[allow(missing_docs)]
        value: String,
    },
    /// Anything else: ignored.
    Unknown(String),
}

fn parse_setoption(parts: &[&str], line: &str) -> Command {
    if parts.len() > 3 && parts[1] == "name" {
        if let Some(value_index) = parts.iter().position(|&part| part == "value") {
            if value_index > 2 && value_index + 1 < parts.len() {
                return Command::SetOption {
                    name: parts[2..value_index].join(" "),
                    value: parts[value_index + 1..].join(" "),
                };
            }
        }
    }
    Command::Unknown(line.to_string())
}

impl Command {
    /// Decodes one line of input. Line terminators and leading whitespace are
    /// dropped, trailing spaces are kept because they are empty squares of a
    /// board snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Rejection::MalformedSnapshot`] or
    /// [`Rejection::MalformedCommand`] when a `B` or `M` command can not be
    /// decoded.
    pub fn parse(input: &str) -> Result<Self, Rejection> {
        let line = input.trim_end_matches(['\n', '\r']).trim_start();
        if line.trim_end().is_empty() {
            return Ok(Self::Empty);
        }
        if let Some(snapshot) = line.strip_prefix('B') {
            return Board::from_snapshot(snapshot)
                .map(Self::SetBoard)
                .map_err(|e| Rejection::MalformedSnapshot(format!("{e:#}")));
        }
        if let Some(request) = line.strip_prefix('M') {
            return MoveRequest::try_from(request.trim_end())
                .map(Self::Move)
                .map_err(|e| Rejection::MalformedCommand(format!("{e:#}")));
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[..] {
            ["print"] => Ok(Self::Print),
            ["setoption", ..] => Ok(parse_setoption(&parts, line)),
            _ => Ok(Self::Unknown(line.to_string())),
        }
    }
}

/// Output produced by a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// "yes" or "no".
    Checks(Checks),
    /// "invalid" with an optional diagnostic code.
    Invalid {
        #[allow(missing_docs)]
        rejection: Rejection,
        #[allow(missing_docs)]
        code: Option<u8>,
    },
    /// Board dump.
    Board(Board),
    /// Free-form information for the user: "info string ...".
    Info(String),
}

impl fmt::Display for Response {
    /// Writes the response without the final newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checks(checks) => write!(f, "{checks}"),
            Self::Invalid { code, .. } => {
                f.write_str("invalid")?;
                match code {
                    Some(code) => write!(f, "{code}"),
                    None => Ok(()),
                }
            },
            Self::Board(board) => f.write_str(&board.render().lines().join("\n")),
            Self::Info(message) => write!(f, "info string {message}"),
        }
    }
}
