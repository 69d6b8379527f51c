// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Init command - add a stage to the pipeline file

use colored::Colorize;
use miette::Result;
use std::path::Path;

use super::InitArgs;
use crate::config::load_defaults;
use crate::pipeline::PipelineFile;
use crate::scm::detect;
use crate::utils::TermConsole;
use crate::wizard::{init, InitOptions, Workspace};

/// Run the init command
pub fn run(args: InitArgs, pipeline: &Path, verbose: bool) -> Result<()> {
    let root = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;

    let defaults = load_defaults(&root)?;
    let overrides = args.overrides();
    let pipeline = PipelineFile::new(pipeline);
    let scm = detect(&root);

    let workspace = Workspace {
        root: &root,
        pipeline: &pipeline,
        scm: scm.as_ref(),
    };
    let options = InitOptions {
        name: args.name,
        stage_type: args.stage_type,
        defaults,
        overrides,
        interactive: args.interactive,
        force: args.force,
    };

    let mut console = TermConsole::new();
    let stage = init(&workspace, &mut console, options)?;

    eprintln!(
        "{} Created {} stage in {}",
        "✓".green(),
        stage.name.bright_blue(),
        pipeline.path().display().to_string().cyan()
    );
    eprintln!();
    eprintln!("Next steps:");
    eprintln!(
        "  Run {} to review the stage",
        format!("pipewright show {}", stage.name).cyan()
    );
    if scm.name() != "none" {
        eprintln!("  Commit the staged changes with {}", scm.name().cyan());
    }

    if verbose {
        let outputs: Vec<String> = stage
            .outputs()
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        eprintln!("{}", format!("Outputs: {}", outputs.join(", ")).dimmed());
    }

    Ok(())
}
