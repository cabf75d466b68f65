//! Retrieves information about the version of the referee from Git and the
//! build environment. The generated `shadow.rs` is included by `src/lib.rs`
//! and read at runtime for the startup log line and `--version` output.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
