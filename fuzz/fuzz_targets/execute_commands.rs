#![no_main]
use libfuzzer_sys::fuzz_target;
use referee::engine::Session;

// Arbitrary input never brings the session down and every response is a
// single printable line (or the board dump).
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut session = Session::new();
        for line in s.lines() {
            if let Some(response) = session.execute(line) {
                assert!(!response.to_string().is_empty());
            }
        }
    }
});
