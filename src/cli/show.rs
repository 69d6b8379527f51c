// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Show command - print stages as YAML

use miette::Result;
use std::path::Path;

use crate::pipeline::{stages_to_yaml, PipelineFile};

/// Run the show command
pub fn run(name: Option<String>, pipeline: &Path, _verbose: bool) -> Result<()> {
    let pipeline = PipelineFile::new(pipeline);
    if !pipeline.exists() {
        return Err(miette::miette!(
            "Pipeline file '{}' does not exist. Create a stage with 'pipewright init'.",
            pipeline.path().display()
        ));
    }

    let yaml = match name {
        Some(name) => {
            let stage = pipeline.get_stage(&name)?.ok_or_else(|| {
                miette::miette!(
                    "Stage '{}' not found in '{}'",
                    name,
                    pipeline.path().display()
                )
            })?;
            stage.to_pipeline_yaml()?
        }
        None => stages_to_yaml(&pipeline.load()?)?,
    };

    print!("{}", yaml);
    Ok(())
}
