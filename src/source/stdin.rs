//! Stdin-based record source for piped input.

use crate::model::error::InputError;
use std::fmt;
use std::io::{IsTerminal, Read};

/// Name reported for records read from stdin.
pub const STDIN_NAME: &str = "<stdin>";

/// Piped stdin, read to EOF on the first load.
pub struct StdinSource {
    reader: Box<dyn Read + Send>,
    consumed: bool,
}

impl fmt::Debug for StdinSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdinSource")
            .field("consumed", &self.consumed)
            .finish_non_exhaustive()
    }
}

impl StdinSource {
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is an interactive terminal, so
    /// the host does not block waiting for typed input.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(stdin))
    }

    /// Wrap any reader, bypassing the terminal check.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            consumed: false,
        }
    }

    /// Read everything up to EOF. Later calls return an empty string.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for read failures, including invalid UTF-8.
    pub fn read_all(&mut self) -> Result<String, InputError> {
        let mut text = String::new();
        if !self.consumed {
            self.reader.read_to_string(&mut text)?;
            self.consumed = true;
        }
        Ok(text)
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}
