//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};

use anyhow::bail;
use itertools::{iproduct, Itertools};

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Board squares are addressed by a [`File`] and a [`Rank`]. The internal
/// indices follow the order in which the board is printed: rank index 0 is the
/// top row (Black's home rank, "8" in algebraic notation) and rank index 7 is
/// the bottom row (White's home rank, "1").
///
/// ```
/// use referee::chess::core::{File, Rank, Square};
///
/// let square = Square::try_from("e2").unwrap();
/// assert_eq!(square.file(), File::E);
/// assert_eq!(square.rank(), Rank::Two);
/// assert_eq!(square.rank().index(), 6);
/// assert_eq!(square.to_string(), "e2");
/// ```
///
/// A square can only hold in-bounds coordinates: stepping off the board with
/// [`Square::offset`] yields [`None`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self { file, rank }
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        self.file
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// Shifts the square by given number of rank and file indices. Positive
    /// rank delta moves towards White's home rank.
    #[must_use]
    pub fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Self> {
        let rank = self.rank.index().checked_add(rank_delta)?;
        let file = self.file.index().checked_add(file_delta)?;
        let rank = Rank::try_from(u8::try_from(rank).ok()?).ok()?;
        let file = File::try_from(u8::try_from(file).ok()?).ok()?;
        Some(Self::new(file, rank))
    }

    /// Signed (rank, file) index difference between `self` and `target`.
    #[must_use]
    pub const fn delta(self, target: Self) -> (i8, i8) {
        (
            target.rank.index() - self.rank.index(),
            target.file.index() - self.file.index(),
        )
    }

    /// All squares in row-major order: rank index 0..8, then file index 0..8.
    /// This is the order of board snapshots.
    pub fn iter() -> impl Iterator<Item = Self> {
        iproduct!(Rank::ALL, File::ALL).map(|(rank, file)| Self::new(file, rank))
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            ),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// Files in index order.
    pub const ALL: [Self; BOARD_WIDTH as usize] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    /// Zero-based column index: `letter - 'a'`.
    #[must_use]
    pub const fn index(self) -> i8 {
        self as i8
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Self::try_from(file as u8 - b'a'),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match Self::ALL.get(usize::from(column)) {
            Some(file) => Ok(*file),
            None => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a digit. The internal index is inverted relative to the
/// digit: `index = 8 - digit`, so that index 0 is the first printed row.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    Eight = 0,
    Seven = 1,
    Six = 2,
    Five = 3,
    Four = 4,
    Three = 5,
    Two = 6,
    One = 7,
}

impl Rank {
    /// Ranks in index order (top to bottom as printed).
    pub const ALL: [Self; BOARD_WIDTH as usize] = [
        Self::Eight,
        Self::Seven,
        Self::Six,
        Self::Five,
        Self::Four,
        Self::Three,
        Self::Two,
        Self::One,
    ];

    /// Zero-based row index.
    #[must_use]
    pub const fn index(self) -> i8 {
        self as i8
    }

    /// The rank pawns of given player start on and can double-step from.
    #[must_use]
    pub const fn pawns_starting(player: Player) -> Self {
        match player {
            Player::White => Self::Two,
            Player::Black => Self::Seven,
        }
    }

    /// The rank where pawns of given player promote.
    #[must_use]
    pub const fn promotion(player: Player) -> Self {
        match player {
            Player::White => Self::Eight,
            Player::Black => Self::One,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Self::try_from(BOARD_WIDTH - (rank as u8 - b'0')),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match Self::ALL.get(usize::from(row)) {
            Some(rank) => Ok(*rank),
            None => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", BOARD_WIDTH - *self as u8)
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank index delta of a pawn step: White pawns move towards rank index 0.
    #[must_use]
    pub const fn push_direction(self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match &self {
            Self::White => "white",
            Self::Black => "black",
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    #[allow(missing_docs)]
    pub const ALL: [Self; 6] = [
        Self::King,
        Self::Queen,
        Self::Rook,
        Self::Bishop,
        Self::Knight,
        Self::Pawn,
    ];
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

impl PieceKind {
    /// Lowercase symbol of the piece kind.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

/// Represents a specific piece owned by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }

    /// Single-character symbol: uppercase for White, lowercase for Black.
    #[must_use]
    pub const fn symbol(self) -> char {
        let symbol = self.kind.symbol();
        match self.owner {
            Player::White => symbol.to_ascii_uppercase(),
            Player::Black => symbol,
        }
    }

    /// Returns true if the pieces belong to different players.
    #[must_use]
    pub fn is_opponent_of(self, other: Self) -> bool {
        self.owner != other.owner
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        // White player: uppercase symbols, black player: lowercase symbols.
        let owner = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        Ok(Self { owner, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

/// A pawn can be promoted to a queen, rook, bishop or a knight.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl TryFrom<PieceKind> for Promotion {
    type Error = anyhow::Error;

    fn try_from(kind: PieceKind) -> anyhow::Result<Self> {
        match kind {
            PieceKind::Queen => Ok(Self::Queen),
            PieceKind::Rook => Ok(Self::Rook),
            PieceKind::Bishop => Ok(Self::Bishop),
            PieceKind::Knight => Ok(Self::Knight),
            _ => bail!("pawn can only be promoted to a queen, rook, bishop or knight, got {kind:?}"),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rank() {
        assert_eq!(
            ('0'..='9')
                .filter_map(|ch| Rank::try_from(ch).ok())
                .collect::<Vec<Rank>>(),
            vec![
                Rank::One,
                Rank::Two,
                Rank::Three,
                Rank::Four,
                Rank::Five,
                Rank::Six,
                Rank::Seven,
                Rank::Eight,
            ]
        );
        assert_eq!(
            (0..=BOARD_WIDTH)
                .filter_map(|idx| Rank::try_from(idx).ok())
                .collect::<Vec<Rank>>(),
            Rank::ALL.to_vec()
        );
        assert_eq!(Rank::try_from('8').unwrap().index(), 0);
        assert_eq!(Rank::try_from('1').unwrap().index(), 7);
        assert_eq!(Rank::Three.to_string(), "3");
    }

    #[test]
    #[should_panic(expected = "rank should be within '1'..='8', got '9'")]
    fn rank_from_incorrect_char() {
        let _ = Rank::try_from('9').unwrap();
    }

    #[test]
    #[should_panic(expected = "rank should be within '1'..='8', got '0'")]
    fn rank_from_incorrect_char_zero() {
        let _ = Rank::try_from('0').unwrap();
    }

    #[test]
    #[should_panic(expected = "rank should be within 0..BOARD_WIDTH, got 8")]
    fn rank_from_incorrect_index() {
        let _ = Rank::try_from(BOARD_WIDTH).unwrap();
    }

    #[test]
    fn file() {
        assert_eq!(
            ('a'..='i')
                .filter_map(|ch| File::try_from(ch).ok())
                .collect::<Vec<File>>(),
            File::ALL.to_vec()
        );
        assert_eq!(
            (0..=BOARD_WIDTH)
                .filter_map(|idx| File::try_from(idx).ok())
                .collect::<Vec<File>>(),
            File::ALL.to_vec()
        );
    }

    #[test]
    #[should_panic(expected = "file should be within 'a'..='h', got 'i'")]
    fn file_from_incorrect_char() {
        let _ = File::try_from('i').unwrap();
    }

    #[test]
    #[should_panic(expected = "file should be within 0..BOARD_WIDTH, got 8")]
    fn file_from_incorrect_index() {
        let _ = File::try_from(BOARD_WIDTH).unwrap();
    }

    #[test]
    fn square() {
        let squares: Vec<_> = ["a8", "h1", "e4", "i1", "a9", "e", "e44"]
            .iter()
            .filter_map(|square| Square::try_from(*square).ok())
            .collect();
        assert_eq!(
            squares,
            vec![
                Square::new(File::A, Rank::Eight),
                Square::new(File::H, Rank::One),
                Square::new(File::E, Rank::Four),
            ]
        );
        assert_eq!(Square::new(File::G, Rank::One).to_string(), "g1");
    }

    #[test]
    #[should_panic(expected = "square should be two-char, got e44 with 3 chars")]
    fn square_from_long_input() {
        let _ = Square::try_from("e44").unwrap();
    }

    #[test]
    fn square_order() {
        let squares: Vec<_> = Square::iter().collect();
        assert_eq!(squares.len(), BOARD_SIZE as usize);
        assert_eq!(squares[0].to_string(), "a8");
        assert_eq!(squares[7].to_string(), "h8");
        assert_eq!(squares[8].to_string(), "a7");
        assert_eq!(squares[63].to_string(), "h1");
    }

    #[test]
    fn offset() {
        let square = Square::try_from("e4").unwrap();
        assert_eq!(square.offset(-1, 0), Square::try_from("e5").ok());
        assert_eq!(square.offset(2, 1), Square::try_from("f2").ok());
        assert_eq!(square.offset(0, -4), Square::try_from("a4").ok());
        assert_eq!(square.offset(0, -5), None);
        assert_eq!(square.offset(4, 0), None);
        assert_eq!(square.offset(-4, 3), Square::try_from("h8").ok());
        assert_eq!(square.offset(-5, 0), None);
        let corner = Square::try_from("a8").unwrap();
        assert_eq!(corner.offset(-1, -1), None);
        assert_eq!(corner.offset(1, 1), Square::try_from("b7").ok());
    }

    #[test]
    fn delta() {
        let from = Square::try_from("g1").unwrap();
        let to = Square::try_from("f3").unwrap();
        assert_eq!(from.delta(to), (-2, -1));
        assert_eq!(to.delta(from), (2, 1));
    }

    #[test]
    fn pieces() {
        for symbol in "KQRBNPkqrbnp".chars() {
            let piece = Piece::try_from(symbol).unwrap();
            assert_eq!(piece.symbol(), symbol);
            assert_eq!(piece.to_string(), symbol.to_string());
        }
        assert_eq!(
            Piece::try_from('N').unwrap(),
            Piece::new(Player::White, PieceKind::Knight)
        );
        assert_eq!(
            Piece::try_from('q').unwrap(),
            Piece::new(Player::Black, PieceKind::Queen)
        );
        assert!(Piece::try_from('x').is_err());
        assert!(Piece::try_from(' ').is_err());
    }

    #[test]
    fn promotion() {
        assert_eq!(
            Promotion::try_from(PieceKind::Knight).unwrap(),
            Promotion::Knight
        );
        assert_eq!(PieceKind::from(Promotion::Queen), PieceKind::Queen);
        assert!(Promotion::try_from(PieceKind::King).is_err());
        assert!(Promotion::try_from(PieceKind::Pawn).is_err());
    }

    #[test]
    fn player() {
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Rank::pawns_starting(Player::White).index(), 6);
        assert_eq!(Rank::pawns_starting(Player::Black).index(), 1);
        assert_eq!(Rank::promotion(Player::White).index(), 0);
        assert_eq!(Rank::promotion(Player::Black).index(), 7);
    }
}
