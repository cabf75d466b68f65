use itertools::Itertools;
use pretty_assertions::assert_eq;
use referee::chess::attacks::{find_attacker, is_attacked, Checks};
use referee::chess::board::Board;
use referee::chess::core::{File, Piece, Player, Rank, Square};
use referee::chess::rules::is_pseudo_legal;

fn square(square: &str) -> Square {
    Square::try_from(square).unwrap()
}

fn piece(symbol: char) -> Piece {
    Piece::try_from(symbol).unwrap()
}

fn board_with(pieces: &[(char, &str)]) -> Board {
    let mut board = Board::empty();
    for &(symbol, at) in pieces {
        board.set(square(at), Some(piece(symbol)));
    }
    board
}

/// All destinations accepted by the piece's rule, sorted.
fn destinations(symbol: char, from: &str, board: &Board) -> Vec<String> {
    Square::iter()
        .filter(|&to| is_pseudo_legal(piece(symbol), square(from), to, board))
        .map(|to| to.to_string())
        .sorted()
        .collect()
}

#[test]
fn staying_in_place_is_never_legal() {
    for symbol in "KQRBNPkqrbnp".chars() {
        let board = board_with(&[(symbol, "d4")]);
        assert!(
            !is_pseudo_legal(piece(symbol), square("d4"), square("d4"), &board),
            "{symbol}"
        );
    }
}

#[test]
fn rook_on_open_board() {
    let board = board_with(&[('R', "d4")]);
    let expected = File::ALL
        .iter()
        .map(|&file| Square::new(file, Rank::Four))
        .chain(Rank::ALL.iter().map(|&rank| Square::new(File::D, rank)))
        .filter(|&to| to != square("d4"))
        .map(|to| to.to_string())
        .sorted()
        .collect_vec();
    assert_eq!(destinations('R', "d4", &board), expected);
}

#[test]
fn sliders_stop_at_first_piece() {
    let board = board_with(&[('Q', "a1"), ('p', "a4"), ('P', "d4"), ('n', "d1")]);
    assert_eq!(
        destinations('Q', "a1", &board),
        vec!["a2", "a3", "a4", "b1", "b2", "c1", "c3", "d1"]
    );
    let board = board_with(&[('b', "h8"), ('P', "e5"), ('r', "h6")]);
    assert_eq!(destinations('b', "h8", &board), vec!["e5", "f6", "g7"]);
    // Seven squares along the rank, one up to the own bishop, five down.
    assert_eq!(destinations('r', "h6", &board).len(), 13);
}

#[test]
fn knight_jumps_over_everything() {
    let starting = Board::starting();
    assert_eq!(destinations('N', "b1", &starting), vec!["a3", "c3", "d2"]);
    assert_eq!(destinations('n', "g8", &starting), vec!["e7", "f6", "h6"]);
    assert_eq!(
        destinations('N', "e4", &Board::empty()),
        vec!["c3", "c5", "d2", "d6", "f2", "f6", "g3", "g5"]
    );
}

#[test]
fn king_steps() {
    let board = board_with(&[('k', "h8"), ('p', "g7"), ('R', "h7")]);
    assert_eq!(destinations('k', "h8", &board), vec!["g8", "h7"]);
}

#[test]
fn pawn_pushes_and_captures() {
    let starting = Board::starting();
    assert_eq!(destinations('P', "e2", &starting), vec!["e3", "e4"]);
    assert_eq!(destinations('p', "c7", &starting), vec!["c5", "c6"]);

    let board = board_with(&[('P', "d2"), ('n', "d3"), ('b', "e3"), ('N', "c3")]);
    // Blocked push, own piece on one diagonal, opponent on the other.
    assert_eq!(destinations('P', "d2", &board), vec!["e3"]);

    let board = board_with(&[('p', "g7"), ('P', "g5")]);
    // Double step over an empty square only.
    assert_eq!(destinations('p', "g7", &board), vec!["g6"]);
    // Pawns never move backwards or sideways.
    let board = board_with(&[('P', "e4"), ('p', "e3"), ('p', "d4"), ('p', "d3")]);
    assert_eq!(destinations('P', "e4", &board), vec!["e5"]);
}

#[test]
fn check_is_symmetric() {
    // A lone rook at any distance along the rank gives check, for both
    // colors alike, unless something stands in between.
    for (attacker, king, victim) in [('R', 'k', Player::Black), ('r', 'K', Player::White)] {
        for file in File::ALL.into_iter().skip(1) {
            let rook_square = Square::new(file, Rank::One);
            let board = board_with(&[(king, "a1"), (attacker, rook_square.to_string().as_str())]);
            assert_eq!(
                find_attacker(square("a1"), victim.opponent(), &board),
                Some(rook_square)
            );
            let checks = Checks::scan(&board);
            assert_eq!(checks.white, victim == Player::White);
            assert_eq!(checks.black, victim == Player::Black);

            if file.index() > 1 {
                let mut blocked = board.clone();
                blocked.set(square("b1"), Some(piece('N')));
                assert_eq!(Checks::scan(&blocked), Checks::default(), "{file}");
            }
        }
    }
}

#[test]
fn diagonal_check_is_symmetric() {
    // Same for bishops and queens along the long diagonal.
    for (attacker, king, victim) in [
        ('B', 'k', Player::Black),
        ('b', 'K', Player::White),
        ('Q', 'k', Player::Black),
        ('q', 'K', Player::White),
    ] {
        for distance in 1..8 {
            let slider_square = square("a1").offset(-distance, distance).unwrap();
            let board = board_with(&[(king, "a1"), (attacker, slider_square.to_string().as_str())]);
            assert_eq!(
                find_attacker(square("a1"), victim.opponent(), &board),
                Some(slider_square),
                "{attacker} on {slider_square}"
            );
            let checks = Checks::scan(&board);
            assert_eq!(checks.white, victim == Player::White);
            assert_eq!(checks.black, victim == Player::Black);

            if distance > 1 {
                let mut blocked = board.clone();
                blocked.set(square("b2"), Some(piece('N')));
                assert_eq!(
                    Checks::scan(&blocked),
                    Checks::default(),
                    "{attacker} on {slider_square}"
                );
            }
        }
    }
}

#[test]
fn pawn_reaches_empty_squares_only_by_pushing() {
    let board = board_with(&[('p', "e5")]);
    assert!(is_attacked(square("e4"), Player::Black, &board));
    assert!(!is_attacked(square("d4"), Player::Black, &board));
    assert!(!is_attacked(square("f4"), Player::Black, &board));
    assert!(!is_attacked(square("e6"), Player::Black, &board));
    assert!(!is_attacked(square("e4"), Player::White, &board));
}
