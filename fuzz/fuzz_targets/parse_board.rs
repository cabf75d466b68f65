#![no_main]
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use referee::chess::board::Board;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(board) = Board::from_snapshot(s) {
            assert_eq!(board.snapshot(), s);
        }
    }
});
