//! The engine reads commands line by line, feeds them to the [`Session`] and
//! writes the responses back.
//!
//! [`Engine::run`] is the "main loop" which communicates with the environment
//! until the input stream is exhausted.

use std::io::{BufRead, Write};

use anyhow::Context;
use log::info;

pub mod config;
pub mod protocol;
pub mod rejection;
pub mod session;

pub use config::{Config, TurnPolicy};
pub use rejection::Rejection;
pub use session::Session;

/// Connects the [`Session`] to the I/O streams.
///
/// ```
/// use referee::Engine;
///
/// let input = "MPe2e4\nMpe7e5\nMQd1h5\nprint\n".as_bytes();
/// let mut output = Vec::new();
/// let mut engine = Engine::new(input, &mut output);
/// engine.run().unwrap();
/// drop(engine);
/// let output = String::from_utf8(output).unwrap();
/// assert!(output.starts_with("no\nno\nno\nrnbqkbnr\n"));
/// ```
pub struct Engine<R: BufRead, W: Write> {
    input: R,
    output: W,
    session: Session,
}

impl<R: BufRead, W: Write> Engine<R, W> {
    /// Creates an engine with a fresh session: starting position, White to
    /// move and default options.
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self::with_session(input, output, Session::new())
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn with_session(input: R, output: W, session: Session) -> Self {
        Self {
            input,
            output,
            session,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Executes commands from the input stream until EOF, writing one line per
    /// response (eight lines for the board dump).
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] if reading the input or writing the output
    /// fails. Rejected commands and lines that are not valid UTF-8 are not
    /// errors: they are reported on the output (or ignored) and processing
    /// continues.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut commands = 0_usize;
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            // EOF reached.
            if self
                .input
                .read_until(b'\n', &mut buffer)
                .context("reading from input")?
                == 0
            {
                break;
            }
            commands += 1;
            // Invalid UTF-8 turns into replacement characters: such a line is
            // rejected or ignored like any other bad command.
            let line = String::from_utf8_lossy(&buffer);
            if let Some(response) = self.session.execute(&line) {
                writeln!(self.output, "{response}").context("writing response")?;
            }
        }
        self.output.flush().context("flushing output")?;
        info!(
            "processed {commands} commands, {} moves applied",
            self.session.history().len()
        );
        Ok(())
    }
}
