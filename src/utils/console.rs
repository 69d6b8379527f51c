// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Diagnostic console
//!
//! Everything the wizard says goes to stderr so that stdout stays clean for
//! scripting. Input is read one line at a time from stdin.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Write-only diagnostic channel plus a single line-read operation
pub trait Console {
    /// Write text followed by a newline
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Write text without a trailing newline (prompts)
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Read one line of operator input without the line terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Console bound to the process terminal: stderr for output, stdin for input.
///
/// No signal handler is installed. Ctrl-C ends the process, while closing
/// stdin (Ctrl-D) reads as end of input.
pub struct TermConsole {
    term: ::console::Term,
}

impl TermConsole {
    pub fn new() -> Self {
        Self {
            term: ::console::Term::stderr(),
        }
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.term.write_line(line)
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.term.write_str(text)?;
        self.term.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Ok(None);
        }

        let trimmed = input.trim_end_matches(['\n', '\r']);
        Ok(Some(trimmed.to_string()))
    }
}

/// Console that replays queued answers and records the transcript.
///
/// Running out of answers behaves like end of input.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    transcript: String,
    reads: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: String::new(),
            reads: 0,
        }
    }

    /// Everything written so far
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Number of lines read, including the final end-of-input read
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Console for ScriptedConsole {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.transcript.push_str(line);
        self.transcript.push('\n');
        Ok(())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.transcript.push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.reads += 1;
        let answer = self.answers.pop_front();
        if let Some(ref line) = answer {
            // Echo like a terminal would
            self.transcript.push_str(line);
            self.transcript.push('\n');
        }
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_console_replays_in_order() {
        let mut console = ScriptedConsole::new(["first", "second"]);

        assert_eq!(console.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("second"));
        assert_eq!(console.read_line().unwrap(), None);
        assert_eq!(console.reads(), 3);
    }

    #[test]
    fn test_scripted_console_records_transcript() {
        let mut console = ScriptedConsole::new(["yes"]);
        console.write("Continue? ").unwrap();
        console.read_line().unwrap();
        console.write_line("done").unwrap();

        assert_eq!(console.transcript(), "Continue? yes\ndone\n");
    }
}
