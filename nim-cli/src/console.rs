//! Terminal I/O around the engine
//!
//! Generic over reader and writer so sessions can be driven from tests.

use std::io::{BufRead, Write};

use nim_core::{InputError, MoveInput, MovePrompt};

pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write one line of game text
    pub fn say(&mut self, text: impl AsRef<str>) -> Result<(), InputError> {
        writeln!(self.writer, "{}", text.as_ref())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Next trimmed line, `Closed` at end of input
    pub fn read_line(&mut self) -> Result<String, InputError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::Closed);
        }
        Ok(line.trim().to_string())
    }

    pub fn ask(&mut self, question: &str) -> Result<String, InputError> {
        self.say(question)?;
        self.read_line()
    }

    /// Only "yes" (any case) counts as yes
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool, InputError> {
        Ok(self.ask(question)?.eq_ignore_ascii_case("yes"))
    }

    /// Keep asking until the answer parses as an integer
    pub fn ask_number(&mut self, question: &str) -> Result<u32, InputError> {
        loop {
            let answer = self.ask(question)?;
            match parse_number(&answer) {
                Ok(n) => return Ok(n),
                Err(e) if e.is_recoverable() => {
                    tracing::debug!("rejected input: {}", e);
                    self.say("Please enter a whole number.")?;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: BufRead, W: Write> MoveInput for Console<R, W> {
    fn request_move(&mut self, prompt: &MovePrompt) -> Result<u32, InputError> {
        self.ask_number(&format!(
            "Enter the number of pieces to remove (1 to {}): ",
            prompt.max_move
        ))
    }
}

/// Any integer is accepted. Negative values become 0 and values past
/// `u32::MAX` saturate, both of which the rules reject as moves.
fn parse_number(text: &str) -> Result<u32, InputError> {
    let n = text
        .parse::<i64>()
        .map_err(|_| InputError::Parse(text.to_string()))?;
    Ok(u32::try_from(n.max(0)).unwrap_or(u32::MAX))
}
