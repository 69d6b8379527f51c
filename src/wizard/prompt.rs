// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Prompt engine
//!
//! Asks one question at a time on the diagnostic console and keeps asking
//! until the response is acceptable. Rejections never leave the loop: an
//! empty required answer or a validator [`Verdict::Retry`] prints the
//! reason and asks the same question again.

use colored::Colorize;

use super::answers::{Answers, QuestionKey};
use crate::errors::{PipewrightError, PipewrightResult};
use crate::utils::colors;
use crate::utils::Console;

/// Response that omits a skippable answer
pub const SKIP_VALUE: &str = "n";

const RESPONSE_REQUIRED: &str = "Response required. Please try again.";
const ANSWER_YES_NO: &str = "Please enter Y or N.";

/// Outcome of validating an entered value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Value is fine
    Accept,
    /// Value is kept, but the operator is told something may be wrong
    Warn(String),
    /// Value is rejected; ask the same question again
    Retry(String),
}

/// Validation hook called with every non-omitted answer
pub type Validator<'a> = &'a dyn Fn(QuestionKey, &str) -> Verdict;

/// How a prompt renders, and how it treats empty and sentinel responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Must be non-empty
    Required,
    /// `n` omits the answer
    Skippable,
    /// Yes/no question
    Confirmation,
}

/// A processed response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text answer, `None` when omitted
    Text(Option<String>),
    /// Yes/no answer
    Confirmed(bool),
}

impl PromptKind {
    pub fn for_key(key: QuestionKey) -> Self {
        if key.is_required() {
            Self::Required
        } else {
            Self::Skippable
        }
    }

    /// Prompt line shown before reading input
    pub fn render(self, question: &str, default: Option<&str>) -> String {
        match self {
            Self::Required => match default {
                Some(d) => format!("{} [{}]: ", question, colors::default_value(d)),
                None => format!("{}: ", question),
            },
            Self::Skippable => {
                let omit = format!("{} to omit", SKIP_VALUE).italic();
                match default {
                    Some(d) => format!("{} [{}, {}]: ", question, colors::default_value(d), omit),
                    None => format!("{} [{}]: ", question, omit),
                }
            }
            Self::Confirmation => {
                let choices = match default {
                    Some("n") => format!("y/{}", colors::default_value("N")),
                    _ => format!("{}/n", colors::default_value("Y")),
                };
                format!("{} [{}] ", question, choices)
            }
        }
    }

    /// Apply defaults, the empty check and the skip sentinel.
    ///
    /// An empty response takes the default when there is one.
    pub fn process(self, response: &str, default: Option<&str>) -> Result<Reply, &'static str> {
        let response = response.trim();
        let value = match (response.is_empty(), default) {
            (true, Some(d)) => d,
            _ => response,
        };

        match self {
            Self::Required | Self::Skippable if value.is_empty() => Err(RESPONSE_REQUIRED),
            Self::Required => Ok(Reply::Text(Some(value.to_string()))),
            // A default is never treated as the sentinel
            Self::Skippable if value == SKIP_VALUE && !response.is_empty() => Ok(Reply::Text(None)),
            Self::Skippable => Ok(Reply::Text(Some(value.to_string()))),
            Self::Confirmation => match value.to_lowercase().as_str() {
                "y" | "yes" => Ok(Reply::Confirmed(true)),
                "n" | "no" => Ok(Reply::Confirmed(false)),
                _ => Err(ANSWER_YES_NO),
            },
        }
    }
}

/// Drives prompts on a console
pub struct Prompter<'c> {
    console: &'c mut dyn Console,
}

impl<'c> Prompter<'c> {
    pub fn new(console: &'c mut dyn Console) -> Self {
        Self { console }
    }

    /// Access the underlying console for non-prompt output
    pub fn console(&mut self) -> &mut dyn Console {
        &mut *self.console
    }

    /// Read one response; end of input or an interrupt ends the session
    fn read_response(&mut self) -> PipewrightResult<String> {
        match self.console.read_line() {
            Ok(Some(line)) => Ok(line),
            Ok(None) => {
                self.console.write_line("")?;
                Err(PipewrightError::Interrupted)
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                self.console.write_line("")?;
                Err(PipewrightError::Interrupted)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Ask until a response of `kind` is acceptable
    fn ask_kind(
        &mut self,
        kind: PromptKind,
        question: &str,
        default: Option<&str>,
    ) -> PipewrightResult<Reply> {
        loop {
            self.console.write(&kind.render(question, default))?;
            let response = self.read_response()?;

            match kind.process(&response, default) {
                Ok(reply) => return Ok(reply),
                Err(reason) => self.console.write_line(&colors::error(reason).to_string())?,
            }
        }
    }

    /// Ask a single question.
    ///
    /// Returns `None` when a skippable question was omitted.
    pub fn ask(
        &mut self,
        key: QuestionKey,
        default: Option<&str>,
        validator: Option<Validator<'_>>,
    ) -> PipewrightResult<Option<String>> {
        let kind = PromptKind::for_key(key);
        let question = key.label();

        loop {
            let value = match self.ask_kind(kind, &question, default)? {
                Reply::Text(value) => value,
                Reply::Confirmed(yes) => Some(if yes { "y" } else { "n" }.to_string()),
            };

            let Some(value) = value else {
                return Ok(None);
            };
            let Some(validator) = validator else {
                return Ok(Some(value));
            };

            match validator(key, &value) {
                Verdict::Accept => {}
                Verdict::Warn(message) => {
                    self.console.write_line(&colors::warning(&message).to_string())?;
                }
                Verdict::Retry(reason) => {
                    tracing::debug!("Retrying '{}': {}", key, reason);
                    self.console.write_line(&colors::error(&reason).to_string())?;
                    continue;
                }
            }

            return Ok(Some(value));
        }
    }

    /// Ask every key in order; omitted answers are left out of the result
    pub fn ask_all(
        &mut self,
        keys: &[QuestionKey],
        defaults: &Answers,
        validator: Option<Validator<'_>>,
    ) -> PipewrightResult<Answers> {
        let mut answers = Answers::new();
        for &key in keys {
            if let Some(value) = self.ask(key, defaults.get(key), validator)? {
                answers.insert(key, value);
            }
        }
        Ok(answers.pruned())
    }

    /// Ask a yes/no question
    pub fn confirm(&mut self, question: &str, default: bool) -> PipewrightResult<bool> {
        let default = if default { "y" } else { "n" };
        match self.ask_kind(PromptKind::Confirmation, question, Some(default))? {
            Reply::Confirmed(yes) => Ok(yes),
            Reply::Text(_) => Ok(default == "y"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ScriptedConsole;

    #[test]
    fn test_required_rejects_empty() {
        let mut console = ScriptedConsole::new(["", "   ", "python train.py"]);
        let value = Prompter::new(&mut console)
            .ask(QuestionKey::Cmd, None, None)
            .unwrap();

        assert_eq!(value.as_deref(), Some("python train.py"));
        assert_eq!(console.transcript().matches(RESPONSE_REQUIRED).count(), 2);
    }

    #[test]
    fn test_required_ignores_validator_on_empty() {
        let calls = std::cell::Cell::new(0);
        let validator = |_: QuestionKey, _: &str| {
            calls.set(calls.get() + 1);
            Verdict::Accept
        };

        let mut console = ScriptedConsole::new(["", "make"]);
        Prompter::new(&mut console)
            .ask(QuestionKey::Cmd, None, Some(&validator))
            .unwrap();

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_skip_sentinel_omits_answer() {
        let mut console = ScriptedConsole::new(["n"]);
        let value = Prompter::new(&mut console)
            .ask(QuestionKey::Models, Some("models"), None)
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_empty_takes_default() {
        let mut console = ScriptedConsole::new([""]);
        let value = Prompter::new(&mut console)
            .ask(QuestionKey::Data, Some("data"), None)
            .unwrap();
        assert_eq!(value.as_deref(), Some("data"));
    }

    #[test]
    fn test_skippable_without_default_requires_response() {
        let mut console = ScriptedConsole::new(["", "plots"]);
        let value = Prompter::new(&mut console)
            .ask(QuestionKey::Plots, None, None)
            .unwrap();
        assert_eq!(value.as_deref(), Some("plots"));
        assert!(console.transcript().contains(RESPONSE_REQUIRED));
    }

    #[test]
    fn test_validator_retry_reasks_same_key() {
        let validator = |_: QuestionKey, value: &str| {
            if value == "bad.yaml" {
                Verdict::Retry(format!("'{}' does not exist.", value))
            } else {
                Verdict::Accept
            }
        };

        let mut console = ScriptedConsole::new(["bad.yaml", "good.yaml"]);
        let value = Prompter::new(&mut console)
            .ask(QuestionKey::Params, Some("params.yaml"), Some(&validator))
            .unwrap();

        assert_eq!(value.as_deref(), Some("good.yaml"));
        assert_eq!(console.reads(), 2);
        assert!(console.transcript().contains("'bad.yaml' does not exist."));
    }

    #[test]
    fn test_validator_not_called_for_omitted() {
        let validator = |_: QuestionKey, _: &str| Verdict::Retry("never".into());

        let mut console = ScriptedConsole::new(["n"]);
        let value = Prompter::new(&mut console)
            .ask(QuestionKey::Params, None, Some(&validator))
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_warning_accepts_value() {
        let validator = |_: QuestionKey, _: &str| Verdict::Warn("may fail".into());

        let mut console = ScriptedConsole::new(["src"]);
        let value = Prompter::new(&mut console)
            .ask(QuestionKey::Code, None, Some(&validator))
            .unwrap();
        assert_eq!(value.as_deref(), Some("src"));
        assert!(console.transcript().contains("may fail"));
    }

    #[test]
    fn test_end_of_input_interrupts() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let err = Prompter::new(&mut console)
            .ask(QuestionKey::Cmd, None, None)
            .unwrap_err();

        assert!(matches!(err, PipewrightError::Interrupted));
        assert!(console.transcript().ends_with('\n'));
    }

    #[test]
    fn test_console_interrupt_ends_session() {
        struct InterruptedConsole(String);

        impl Console for InterruptedConsole {
            fn write_line(&mut self, line: &str) -> std::io::Result<()> {
                self.0.push_str(line);
                self.0.push('\n');
                Ok(())
            }

            fn write(&mut self, text: &str) -> std::io::Result<()> {
                self.0.push_str(text);
                Ok(())
            }

            fn read_line(&mut self) -> std::io::Result<Option<String>> {
                Err(std::io::ErrorKind::Interrupted.into())
            }
        }

        let mut console = InterruptedConsole(String::new());
        let err = Prompter::new(&mut console)
            .ask(QuestionKey::Cmd, None, None)
            .unwrap_err();

        assert!(matches!(err, PipewrightError::Interrupted));
        assert!(console.0.ends_with('\n'));
    }

    #[test]
    fn test_ask_all_prunes_omitted() {
        let defaults = Answers::builtin_defaults();
        let mut console = ScriptedConsole::new(["", "n", "models"]);
        let answers = Prompter::new(&mut console)
            .ask_all(
                &[QuestionKey::Code, QuestionKey::Data, QuestionKey::Models],
                &defaults,
                None,
            )
            .unwrap();

        assert_eq!(answers.get(QuestionKey::Code), Some("src"));
        assert!(!answers.contains(QuestionKey::Data));
        assert_eq!(answers.len(), 2);
    }

    #[test]
    fn test_confirmation() {
        let mut console = ScriptedConsole::new(["", "maybe", "NO"]);
        let mut prompter = Prompter::new(&mut console);
        assert!(prompter.confirm("Continue?", true).unwrap());
        assert!(!prompter.confirm("Continue?", true).unwrap());
        assert!(console.transcript().contains(ANSWER_YES_NO));
    }

    #[test]
    fn test_render_shows_default_and_skip_hint() {
        let rendered = PromptKind::Skippable.render("Path to a data file", Some("data"));
        assert!(rendered.contains("data"));
        assert!(rendered.contains("n to omit"));

        let rendered = PromptKind::Required.render("Command to execute", None);
        assert!(rendered.ends_with(": "));
    }
}
