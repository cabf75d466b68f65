//! Chess move legality referee. Reads board snapshots and moves one command
//! per line, validates every move against the movement rules of the piece and
//! reports whether either king is in check afterwards.
//!
//! The crate is split into two parts:
//!
//! - [`chess`] holds the board, the movement rules and check detection;
//! - [`engine`] holds the command protocol, the turn controller and the I/O
//!   loop.

pub mod chess;
pub mod engine;

pub use engine::Engine;
use log::info;
use shadow_rs::shadow;

shadow!(build);

/// Returns the full version that can be used to identify how the binary was
/// built in the first place.
#[must_use]
pub fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Logs the version and build information on startup.
pub fn log_engine_info() {
    info!("{} {}", build::PROJECT_NAME, engine_version());
    info!("Release build: {}", !shadow_rs::is_debug());
    if !shadow_rs::git_clean() {
        info!("Built with uncommitted changes");
    }
}
