//! Line-oriented prompting over any reader/writer pair

use crate::core::error::InputError;
use std::io::{self, BufRead, Write};

/// Asks questions on `output` and reads answers from `input`
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line
    ///
    /// # Errors
    /// Returns an error if the output cannot be written
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Print text as-is
    ///
    /// # Errors
    /// Returns an error if the output cannot be written
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())
    }

    /// Show `prompt` and read one line; `None` at end of input
    ///
    /// # Errors
    /// Returns an error if reading or writing fails
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask until `parse` accepts the answer; `None` at end of input
    ///
    /// # Errors
    /// Returns an error if reading or writing fails
    pub fn ask_until<T, F>(&mut self, prompt: &str, parse: F) -> io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, InputError>,
    {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(self.output, "     > {err}\n")?,
            }
        }
    }

    /// Consume the prompter, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}
