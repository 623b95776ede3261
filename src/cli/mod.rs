//! Terminal front end for the engine: a small interactive shell plus a
//! line-oriented script mode for automation and tests.

pub mod commands;
pub mod output;
pub mod shell;

pub use shell::run_cli;

use thiserror::Error;

/// Fatal shell errors that abort the session.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Store error: {0}")]
    Store(#[from] crate::errors::StoreError),
}

/// Recoverable per-command errors; reported and the loop continues.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<crate::errors::StoreError> for CommandError {
    fn from(err: crate::errors::StoreError) -> Self {
        Self::new(err.to_string())
    }
}

/// Whether the command loop keeps going after a command.
pub enum LoopControl {
    Continue,
    Exit,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}
