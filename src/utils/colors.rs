// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Terminal color utilities
//!
//! Provides consistent color schemes for the wizard transcript.

use colored::{ColoredString, Colorize};

/// Style for default answers shown next to a prompt
pub fn default_value(msg: &str) -> ColoredString {
    msg.green()
}

/// Style for retry reasons and errors
pub fn error(msg: &str) -> ColoredString {
    msg.red()
}

/// Style for warning messages
pub fn warning(msg: &str) -> ColoredString {
    msg.yellow()
}

/// Style for the stage being configured
pub fn stage_name(msg: &str) -> ColoredString {
    msg.bright_blue()
}

/// Style for paths in the workspace preview
pub fn path(msg: &str) -> ColoredString {
    msg.green()
}

/// Style for links
pub fn url(msg: &str) -> ColoredString {
    msg.cyan().underline()
}

/// Check if colors should be used on the diagnostic stream
pub fn should_use_colors() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    ::console::Term::stderr().features().colors_supported()
}

/// Apply the color decision globally
pub fn configure_colors() {
    if !should_use_colors() {
        colored::control::set_override(false);
    }
}

/// A horizontal rule as wide as the terminal (capped)
pub fn rule() -> ColoredString {
    let width = ::console::Term::stderr()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(50)
        .min(80);
    "─".repeat(width).green()
}
