// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Stage wizard
//!
//! Collects stage paths from defaults, caller overrides and operator
//! answers, previews the result and commits it to the pipeline file.

mod answers;
mod commit;
mod preview;
mod prompt;
mod session;
mod validate;

pub use answers::{
    primary_questions, secondary_keys, secondary_questions, Answers, QuestionKey, StageType,
};
pub use commit::{commit_stage, init, InitOptions, Workspace};
pub use preview::{render_tree, workspace_values};
pub use prompt::{PromptKind, Prompter, Reply, Validator, Verdict, SKIP_VALUE};
pub use session::{init_interactive, SessionOptions, PIPELINE_FILE_LINK};
pub use validate::{answer_validator, validate_answer};
