//! Player input - simple line-based input only
//!
//! The game is strictly turn-based, so one blocking line read covers every
//! prompt (username, moves, pickup choices). The trait seam exists so
//! tests can feed scripted sessions without a terminal.

use log::debug;
use std::fmt;
use std::io::{self, BufRead};

/// Why a line read failed.
#[derive(Debug)]
pub enum InputError {
    /// Stdin closed or a scripted session ran out of lines. Without this
    /// the loop would spin forever re-prompting on empty reads when input
    /// is piped in.
    Eof,
    Io(io::Error),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Eof => write!(f, "end of input"),
            InputError::Io(e) => write!(f, "failed to read input: {e}"),
        }
    }
}

impl std::error::Error for InputError {}

impl From<io::Error> for InputError {
    fn from(e: io::Error) -> Self {
        InputError::Io(e)
    }
}

/// Source of player-typed lines.
pub trait PlayerInput {
    /// Read one line, trailing newline stripped.
    fn read_line(&mut self) -> Result<String, InputError>;
}

/// Interactive input from stdin.
pub struct TerminalInput {
    buffer: String,
}

impl TerminalInput {
    pub fn new() -> Self {
        TerminalInput {
            buffer: String::new(),
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerInput for TerminalInput {
    fn read_line(&mut self) -> Result<String, InputError> {
        self.buffer.clear();
        let bytes_read = io::stdin().lock().read_line(&mut self.buffer)?;

        // read_line returns Ok(0) with an empty buffer at EOF (pipe
        // exhausted or stdin closed). Surface it as an error so the game
        // loop can shut down instead of looping on empty input.
        if bytes_read == 0 {
            debug!("input: EOF detected (stdin closed)");
            return Err(InputError::Eof);
        }

        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }

        debug!("input received: '{}'", self.buffer);
        Ok(self.buffer.clone())
    }
}

/// Canned input for tests: hands out the given lines in order, then EOF.
pub struct ScriptedInput {
    lines: std::vec::IntoIter<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            lines: lines
                .into_iter()
                .map(Into::into)
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl PlayerInput for ScriptedInput {
    fn read_line(&mut self) -> Result<String, InputError> {
        match self.lines.next() {
            Some(line) => {
                debug!("scripted input: '{}'", line);
                Ok(line)
            }
            None => Err(InputError::Eof),
        }
    }
}
