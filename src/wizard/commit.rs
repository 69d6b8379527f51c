// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Stage creation and commit
//!
//! Builds the stage from the merged answers, shows it for review when
//! running interactively, and writes it out only after confirmation.

use std::path::{Path, PathBuf};

use super::answers::{Answers, QuestionKey, StageType};
use super::prompt::Prompter;
use super::session::{init_interactive, SessionOptions};
use super::validate::answer_validator;
use crate::errors::{PipewrightError, PipewrightResult};
use crate::pipeline::{
    load_params, validate_stage_name, PipelineFile, StageBuilder, StageDefinition, StageSpec,
};
use crate::scm::{track_file_changes, ChangeTracker, Scm};
use crate::utils::{colors, suppress_logging, Console};

/// Where a stage is created
pub struct Workspace<'a> {
    /// Directory answers are relative to
    pub root: &'a Path,
    pub pipeline: &'a PipelineFile,
    pub scm: &'a dyn Scm,
}

/// Caller input for [`init`]
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Stage name, defaults to the stage type
    pub name: Option<String>,
    pub stage_type: StageType,
    /// Lowest merge layer, also offered as prompt defaults
    pub defaults: Answers,
    /// Answers that are never asked again
    pub overrides: Answers,
    pub interactive: bool,
    /// Overwrite an existing stage of the same name
    pub force: bool,
}

/// Create a stage from defaults, overrides and (optionally) the wizard,
/// and commit it to the pipeline file.
pub fn init(
    workspace: &Workspace<'_>,
    console: &mut dyn Console,
    options: InitOptions,
) -> PipewrightResult<StageDefinition> {
    let name = options
        .name
        .clone()
        .unwrap_or_else(|| options.stage_type.as_str().to_string());
    validate_stage_name(&name)?;
    StageBuilder::new(workspace.pipeline).check_stage_exists(&name, options.force)?;

    let live = options.stage_type.is_live();
    let mut prompter = Prompter::new(console);

    let context = if options.interactive {
        let validator = answer_validator(workspace.root);
        let session = SessionOptions {
            name: &name,
            pipeline: workspace.pipeline.path(),
            live,
            show_tree: true,
        };
        let entered = init_interactive(
            &mut prompter,
            session,
            &options.defaults,
            &options.overrides,
            Some(&validator),
        )?;
        Answers::merge(&Answers::new(), &options.overrides, &entered)
    } else {
        // Live stages log through `live`, which makes the model a checkpoint
        let defaults = options.defaults.suppressed_for(live, &options.overrides);
        Answers::merge(&defaults, &options.overrides, &Answers::new())
    };

    let stage = build_stage(workspace, &name, &context, options.force)?;
    let params = context.get(QuestionKey::Params).map(PathBuf::from);

    if options.interactive {
        let console = prompter.console();
        console.write_line(&colors::rule().to_string())?;
        console.write_line(stage.to_pipeline_yaml()?.trim_end())?;

        let question = format!(
            "Do you want to add the above contents to {}?",
            workspace.pipeline.path().display()
        );
        if !prompter.confirm(&question, true)? {
            return Err(PipewrightError::Aborted);
        }
    }

    commit_stage(workspace, &stage, params.as_deref())?;
    Ok(stage)
}

/// Assemble the stage from the merged answers. Nothing is written.
fn build_stage(
    workspace: &Workspace<'_>,
    name: &str,
    context: &Answers,
    force: bool,
) -> PipewrightResult<StageDefinition> {
    let cmd = context
        .get(QuestionKey::Cmd)
        .ok_or(PipewrightError::MissingCommand)?;

    let mut params = Vec::new();
    if let Some(path) = context.get(QuestionKey::Params) {
        let mut decl =
            load_params(&workspace.root.join(path)).map_err(|e| e.into_error(Path::new(path)))?;
        decl.path = PathBuf::from(path);
        params.push(decl);
    }

    let compact = |keys: &[QuestionKey]| -> Vec<String> {
        keys.iter()
            .filter_map(|k| context.get(*k))
            .map(str::to_string)
            .collect()
    };

    let models = compact(&[QuestionKey::Models]);
    let live = context.get(QuestionKey::Live).map(str::to_string);
    let (outs, checkpoints) = if live.is_some() {
        (Vec::new(), models)
    } else {
        (models, Vec::new())
    };

    StageBuilder::new(workspace.pipeline).create(StageSpec {
        name: name.to_string(),
        cmd: cmd.to_string(),
        deps: compact(&[QuestionKey::Code, QuestionKey::Data]),
        params,
        metrics_no_cache: compact(&[QuestionKey::Metrics]),
        plots_no_cache: compact(&[QuestionKey::Plots]),
        live,
        outs,
        checkpoints,
        force,
    })
}

/// Write the stage, ignore its outputs and track the parameters file.
///
/// Logging stays off while files are touched and is back on before the
/// touched files are staged, so staging problems are visible. A failure
/// after the pipeline file was written leaves that write in place.
pub fn commit_stage(
    workspace: &Workspace<'_>,
    stage: &StageDefinition,
    params: Option<&Path>,
) -> PipewrightResult<()> {
    let mut tracker = track_file_changes(workspace.scm, true);

    let logging = suppress_logging();
    let written = write_stage(workspace, stage, params, &mut tracker);
    drop(logging);

    written?;
    tracker.finish()
}

fn write_stage(
    workspace: &Workspace<'_>,
    stage: &StageDefinition,
    params: Option<&Path>,
    tracker: &mut ChangeTracker<'_>,
) -> PipewrightResult<()> {
    workspace.pipeline.dump(stage)?;
    tracker.track_file(workspace.pipeline.path());

    for output in stage.ignorable_outputs() {
        tracker.ignore(&output)?;
    }

    if let Some(params) = params {
        tracker.track_file(params);
    }

    Ok(())
}
