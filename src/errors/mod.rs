// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Error types
//!
//! Every failure the wizard can surface to the operator lives here. Prompt
//! retries are not errors: validators hand back a [`crate::wizard::Verdict`]
//! value that never leaves the prompt loop.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipewright operations
pub type PipewrightResult<T> = Result<T, PipewrightError>;

/// Main error type for pipewright
#[derive(Error, Debug, Diagnostic)]
pub enum PipewrightError {
    // ─────────────────────────────────────────────────────────────────────────
    // Stage Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Stage '{name}' already exists in '{}'", pipeline.display())]
    #[diagnostic(
        code(pipewright::duplicate_stage),
        help("Use '--force' to overwrite.")
    )]
    DuplicateStage { name: String, pipeline: PathBuf },

    #[error("Invalid stage name '{name}'")]
    #[diagnostic(
        code(pipewright::invalid_stage_name),
        help("Stage names may contain letters, digits, '_', '.' and '-', and must not start with '.' or '-'")
    )]
    InvalidStageName { name: String },

    #[error("A command is required to create a stage")]
    #[diagnostic(
        code(pipewright::missing_command),
        help("Pass the command after 'init', or run with '--interactive'")
    )]
    MissingCommand,

    // ─────────────────────────────────────────────────────────────────────────
    // Interaction Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Aborting ...")]
    #[diagnostic(code(pipewright::aborted))]
    Aborted,

    #[error("Input interrupted")]
    #[diagnostic(code(pipewright::interrupted))]
    Interrupted,

    // ─────────────────────────────────────────────────────────────────────────
    // Collaborator Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Cannot load parameters file '{}': {reason}", path.display())]
    #[diagnostic(
        code(pipewright::params_file),
        help("Supported parameters formats: .yaml, .yml, .json, .toml")
    )]
    ParamsFile { path: PathBuf, reason: String },

    #[error("Invalid configuration in '{}': {reason}", path.display())]
    #[diagnostic(code(pipewright::config))]
    Config { path: PathBuf, reason: String },

    #[error("Version control operation failed: {message}")]
    #[diagnostic(code(pipewright::scm))]
    Scm {
        message: String,
        #[help]
        help: Option<String>,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to read file '{}': {error}", path.display())]
    #[diagnostic(code(pipewright::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Failed to write file '{}': {error}", path.display())]
    #[diagnostic(code(pipewright::file_write_error))]
    FileWriteError { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(pipewright::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(pipewright::yaml_error))]
    Yaml { message: String },

    #[error("JSON parsing error: {message}")]
    #[diagnostic(code(pipewright::json_error))]
    Json { message: String },

    #[error("TOML parsing error: {message}")]
    #[diagnostic(code(pipewright::toml_error))]
    Toml { message: String },
}

impl From<std::io::Error> for PipewrightError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::Interrupted {
            return Self::Interrupted;
        }
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for PipewrightError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for PipewrightError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<toml::de::Error> for PipewrightError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml { message: e.to_string() }
    }
}

impl PipewrightError {
    /// Whether the operator ended the session (declined or interrupted)
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Aborted | Self::Interrupted)
    }

    /// Create a version control error, attaching a hint for common git failures
    pub fn scm_failed(message: impl Into<String>, stderr: &str) -> Self {
        let help = if stderr.contains("not a git repository") {
            Some("Run 'git init' first, or work outside version control".into())
        } else if stderr.contains("index.lock") {
            Some("Another git process seems to be running in this repository".into())
        } else {
            None
        };

        Self::Scm {
            message: message.into(),
            help,
        }
    }
}
