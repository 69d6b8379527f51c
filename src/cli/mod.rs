// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for pipewright.

pub mod init;
pub mod show;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::wizard::{Answers, QuestionKey, StageType};

/// Pipeline stage wizard
///
/// Add stages to a pipeline file from the command line or interactively.
#[derive(Parser, Debug)]
#[clap(
    name = "pipewright",
    version,
    about = "Add stages to a declarative pipeline file",
    long_about = None,
    after_help = "Examples:\n\
        pipewright init python train.py           Add a stage with default paths\n\
        pipewright init -i                        Set up a stage interactively\n\
        pipewright init --type live -n train ...  Add a live training stage\n\
        pipewright show train                     Print a stage\n\n\
        See 'pipewright <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Pipeline file
    #[clap(long, global = true, default_value = "pipeline.yaml", value_name = "FILE")]
    pub pipeline: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a stage to the pipeline file
    Init(InitArgs),

    /// Print the pipeline file or a single stage
    Show {
        /// Stage to print (default: all stages)
        name: Option<String>,
    },
}

/// Arguments of the init command
#[derive(Args, Debug, Clone, Default)]
pub struct InitArgs {
    /// Command to execute in the stage
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    pub cmd: Vec<String>,

    /// Stage name (defaults to the stage type)
    #[clap(short, long)]
    pub name: Option<String>,

    /// Stage type (default, live)
    #[clap(long = "type", default_value = "default", value_name = "TYPE")]
    pub stage_type: StageType,

    /// Ask for every path not given on the command line
    #[clap(short, long)]
    pub interactive: bool,

    /// Overwrite an existing stage with the same name
    #[clap(short, long)]
    pub force: bool,

    /// Path to a code file/directory
    #[clap(long, value_name = "PATH")]
    pub code: Option<String>,

    /// Path to a data file/directory
    #[clap(long, value_name = "PATH")]
    pub data: Option<String>,

    /// Path to a model file/directory
    #[clap(long, value_name = "PATH")]
    pub models: Option<String>,

    /// Path to a parameters file
    #[clap(long, value_name = "PATH")]
    pub params: Option<String>,

    /// Path to a metrics file
    #[clap(long, value_name = "PATH")]
    pub metrics: Option<String>,

    /// Path to a plots file/directory
    #[clap(long, value_name = "PATH")]
    pub plots: Option<String>,

    /// Path to log live training outputs
    #[clap(long, value_name = "PATH")]
    pub live: Option<String>,
}

impl InitArgs {
    /// Answers given on the command line
    pub fn overrides(&self) -> Answers {
        let mut overrides = Answers::new();

        let cmd = self.cmd.join(" ");
        if !cmd.trim().is_empty() {
            overrides.insert(QuestionKey::Cmd, cmd);
        }

        let paths = [
            (QuestionKey::Code, &self.code),
            (QuestionKey::Data, &self.data),
            (QuestionKey::Models, &self.models),
            (QuestionKey::Params, &self.params),
            (QuestionKey::Metrics, &self.metrics),
            (QuestionKey::Plots, &self.plots),
            (QuestionKey::Live, &self.live),
        ];
        for (key, value) in paths {
            if let Some(value) = value {
                overrides.insert(key, value.as_str());
            }
        }

        overrides
    }
}
