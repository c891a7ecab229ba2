//! Line-oriented prompting over any reader/writer pair.

use std::io::{BufRead, Write};
use std::str::FromStr;

use bikeshare_core::error::Result;
use tracing::debug;

/// A prompt/answer channel. Production code wraps stdin/stdout; tests use
/// an in-memory cursor and buffer.
pub struct Console<R, W> {
    input: R,
    output: W,
    closed: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            closed: false,
        }
    }

    /// Writer for report output.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// `true` once the input has reached end of file.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Print `question` and read one answer line, without its line ending.
    ///
    /// Returns `None` at end of input.
    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        if self.closed {
            return Ok(None);
        }
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("Console input closed");
            self.closed = true;
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Re-ask `question` until the answer parses as `T`, printing
    /// `rejection` after every invalid answer.
    ///
    /// Returns `None` at end of input.
    pub fn ask_until<T: FromStr>(&mut self, question: &str, rejection: &str) -> Result<Option<T>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match answer.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    debug!("Rejected answer {:?}", answer);
                    self.say(rejection)?;
                }
            }
        }
    }

    /// Ask a yes/no question, re-asking on anything else.
    ///
    /// Returns `None` at end of input.
    pub fn confirm(&mut self, question: &str) -> Result<Option<bool>> {
        self.ask_until::<YesNo>(question, "Please answer yes or no.")
            .map(|answer| answer.map(|YesNo(yes)| yes))
    }
}

/// A strict, case-insensitive "yes" / "no" answer.
struct YesNo(bool);

impl FromStr for YesNo {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" => Ok(YesNo(true)),
            "no" => Ok(YesNo(false)),
            _ => Err(()),
        }
    }
}

/// `true` only for an affirmative "yes" (case-insensitive).
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
