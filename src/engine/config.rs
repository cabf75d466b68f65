//! Session options. They can be set programmatically or over the protocol with
//! `setoption name <Name> value <Value>`.

use anyhow::{bail, Context};

/// When the side to move changes after a move command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurnPolicy {
    /// Every move command consumes a turn, including rejected ones.
    #[default]
    Always,
    /// Only accepted moves pass the turn to the opponent.
    OnSuccess,
}

impl TryFrom<&str> for TurnPolicy {
    type Error = anyhow::Error;

    fn try_from(policy: &str) -> anyhow::Result<Self> {
        match policy {
            "always" => Ok(Self::Always),
            "on-success" => Ok(Self::OnSuccess),
            _ => bail!("turn policy should be 'always' or 'on-success', got '{policy}'"),
        }
    }
}

/// Tunable behavior of a [`crate::engine::Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    #[allow(missing_docs)]
    pub turn_policy: TurnPolicy,
    /// Append the numeric diagnostic code to `invalid` responses.
    pub diagnostic_codes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            turn_policy: TurnPolicy::Always,
            diagnostic_codes: true,
        }
    }
}

impl Config {
    /// Sets the option by its protocol name.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] for unknown options or values that can not
    /// be parsed.
    pub fn set(&mut self, name: &str, value: &str) -> anyhow::Result<()> {
        match name {
            "TurnPolicy" => self.turn_policy = TurnPolicy::try_from(value)?,
            "DiagnosticCodes" => {
                self.diagnostic_codes = value
                    .parse()
                    .with_context(|| format!("DiagnosticCodes should be a boolean, got '{value}'"))?;
            },
            _ => bail!("unknown option '{name}'"),
        }
        Ok(())
    }
}
