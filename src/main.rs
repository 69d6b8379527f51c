// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! pipewright - pipeline stage wizard
//!
//! Add stages to a declarative pipeline file.

use clap::Parser;
use miette::Result;

use pipewright::cli::{Cli, Commands};
use pipewright::utils::{colors, init_logging};

fn main() -> Result<()> {
    let cli = Cli::parse();

    colors::configure_colors();
    init_logging(cli.verbose);

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Init(args) => pipewright::cli::init::run(args, &cli.pipeline, cli.verbose),
        Commands::Show { name } => pipewright::cli::show::run(name, &cli.pipeline, cli.verbose),
    }
}
