// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! # pipewright - pipeline stage wizard
//!
//! `pipewright` adds stages to a declarative pipeline file, either from
//! command-line answers or through an interactive wizard that previews the
//! workspace, validates each path and asks for confirmation before writing.
//!
//! ## Quick Start
//!
//! ```bash
//! # Add a stage using the default workspace layout
//! pipewright init python train.py
//!
//! # Walk through every path interactively
//! pipewright init -i --name train
//!
//! # Review the result
//! pipewright show train
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod pipeline;
pub mod scm;
pub mod utils;
pub mod wizard;

// Re-export commonly used types
pub use errors::{PipewrightError, PipewrightResult};
pub use pipeline::{PipelineFile, StageDefinition};
pub use wizard::{init, Answers, InitOptions, QuestionKey, StageType, Workspace};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
