// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Interactive session
//!
//! Sequences the command prompt, the workspace preview and the two
//! question groups.

use std::path::Path;

use super::answers::{primary_questions, secondary_questions, Answers, QuestionKey};
use super::preview::{render_tree, workspace_values};
use super::prompt::{Prompter, Validator};
use crate::errors::PipewrightResult;
use crate::utils::colors;

/// Documentation for the pipeline file format
pub const PIPELINE_FILE_LINK: &str = "https://pipewright.dev/docs/pipeline-file";

/// What the session needs to know about the stage being configured
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions<'a> {
    /// Stage name, shown in the banner
    pub name: &'a str,
    /// Pipeline file, shown in the banner
    pub pipeline: &'a Path,
    /// Live stages ask for `live` instead of `metrics`/`plots`
    pub live: bool,
    /// Show the workspace preview
    pub show_tree: bool,
}

/// Collect the answers that overrides do not already settle.
///
/// Returns an empty store when nothing needs asking. Otherwise the result
/// holds `cmd` and every answered question; omitted questions are absent.
pub fn init_interactive(
    prompter: &mut Prompter<'_>,
    options: SessionOptions<'_>,
    defaults: &Answers,
    overrides: &Answers,
    validator: Option<Validator<'_>>,
) -> PipewrightResult<Answers> {
    let command = overrides.get(QuestionKey::Cmd).filter(|c| !c.is_empty());
    let primary = primary_questions(overrides);
    let secondary = secondary_questions(overrides, options.live);

    let mut answers = Answers::new();
    if command.is_some() && primary.is_empty() && secondary.is_empty() {
        tracing::debug!("All answers supplied, nothing to ask");
        return Ok(answers);
    }

    let console = prompter.console();
    console.write_line(&format!(
        "This command will guide you to set up a {} stage in {}.",
        colors::stage_name(options.name),
        colors::path(&options.pipeline.display().to_string())
    ))?;
    console.write_line(&format!("See {}.", colors::url(PIPELINE_FILE_LINK)))?;
    console.write_line("")?;

    match command {
        Some(cmd) => {
            answers.insert(QuestionKey::Cmd, cmd);
        }
        None => {
            answers.extend_from(&prompter.ask_all(&[QuestionKey::Cmd], defaults, None)?);
            prompter.console().write_line("")?;
        }
    }

    let console = prompter.console();
    console.write_line("Enter the paths for dependencies and outputs of the command.")?;

    if options.show_tree {
        let values = workspace_values(defaults, overrides, options.live);
        if !values.is_empty() {
            console.write_line(&render_tree(&values))?;
        }
    }
    console.write_line("")?;

    answers.extend_from(&prompter.ask_all(&primary, defaults, validator)?);
    answers.extend_from(&prompter.ask_all(&secondary, defaults, validator)?);

    Ok(answers.pruned())
}
