//! The colored message channel and the interactive prompt.
//!
//! Every user-facing line goes through [`Terminal::emit`], which wraps the text
//! in a foreground color and always resets afterwards. Diagnostics go through
//! `log` instead and never appear here.

use std::io::{self, BufRead, Write};

/// Foreground colors understood by the message channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Errors.
    Red,
    /// Warnings and skipped work.
    Yellow,
    /// Success.
    Green,
    /// No color; also the reset sequence.
    #[default]
    Nc,
}

impl Color {
    /// The ANSI escape sequence selecting this color.
    pub const fn code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[0;31m",
            Color::Yellow => "\x1b[1;33m",
            Color::Green => "\x1b[0;32m",
            Color::Nc => "\x1b[0m",
        }
    }
}

/// Wraps `message` in `color`, followed by the reset sequence.
pub fn paint(message: &str, color: Color) -> String {
    format!("{}{}{}", color.code(), message, Color::Nc.code())
}

/// Prints a single colored line to standard output.
pub fn print_colored(message: &str, color: Color) -> io::Result<()> {
    Console::stdout().emit(message, color)
}

/// A place to emit styled lines and read answers from.
pub trait Terminal {
    /// Writes `message` as one line wrapped in `color`.
    fn emit(&mut self, message: &str, color: Color) -> io::Result<()>;

    /// Shows `question` without a trailing newline and reads one line of input.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>>;

    fn error(&mut self, message: &str) -> io::Result<()> {
        self.emit(message, Color::Red)
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        self.emit(message, Color::Yellow)
    }

    fn success(&mut self, message: &str) -> io::Result<()> {
        self.emit(message, Color::Green)
    }

    fn plain(&mut self, message: &str) -> io::Result<()> {
        self.emit(message, Color::Nc)
    }
}

/// A [`Terminal`] over any line reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    /// A console bound to the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl Console<io::Empty, io::Stdout> {
    /// An output-only console; it never takes the stdin lock and its prompts
    /// see end of input.
    pub fn stdout() -> Self {
        Self::new(io::empty(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Everything written so far.
    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> Terminal for Console<R, W> {
    fn emit(&mut self, message: &str, color: Color) -> io::Result<()> {
        writeln!(self.output, "{}", paint(message, color))
    }

    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        Ok(Some(answer.trim().to_string()))
    }
}

/// A console reading canned answers and recording output in memory.
#[cfg(test)]
pub(crate) fn scripted(answers: &str) -> Console<io::Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(io::Cursor::new(answers.as_bytes().to_vec()), Vec::new())
}

#[cfg(test)]
pub(crate) fn transcript(console: &Console<io::Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8_lossy(console.output()).into_owned()
}
