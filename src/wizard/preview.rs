// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Workspace preview
//!
//! Before the path questions, show the operator the layout the defaults
//! and overrides describe.

use super::answers::{Answers, QuestionKey};
use crate::utils::colors;

const HEADER: &str = "pipewright assumes the following workspace structure:";

/// Paths to preview, sorted by value.
///
/// `live` is dropped for non-live stages and `metrics`/`plots` for live
/// ones, unless the operator supplied them explicitly. Duplicates stay.
pub fn workspace_values(defaults: &Answers, overrides: &Answers, live: bool) -> Vec<String> {
    let mut workspace = defaults.clone();
    workspace.extend_from(overrides);
    workspace.remove(QuestionKey::Cmd);

    if !live && !overrides.contains(QuestionKey::Live) {
        workspace.remove(QuestionKey::Live);
    }
    if live {
        for key in [QuestionKey::Plots, QuestionKey::Metrics] {
            if !overrides.contains(key) {
                workspace.remove(key);
            }
        }
    }

    let mut values: Vec<String> = workspace.values().map(str::to_string).collect();
    values.sort();
    values
}

/// Render values as a one-level tree
pub fn render_tree(values: &[String]) -> String {
    let mut out = String::from(HEADER);
    for (idx, value) in values.iter().enumerate() {
        let branch = if idx + 1 == values.len() { "└── " } else { "├── " };
        out.push('\n');
        out.push_str(branch);
        out.push_str(&colors::path(value).to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(QuestionKey, &str)]) -> Answers {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_sorted_by_value_not_key() {
        let defaults = answers(&[
            (QuestionKey::Code, "zeta"),
            (QuestionKey::Data, "alpha"),
            (QuestionKey::Models, "mid"),
        ]);

        let values = workspace_values(&defaults, &Answers::new(), false);
        assert_eq!(values, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let defaults = answers(&[(QuestionKey::Code, "src"), (QuestionKey::Data, "src")]);
        let values = workspace_values(&defaults, &Answers::new(), false);
        assert_eq!(values, vec!["src", "src"]);
    }

    #[test]
    fn test_suppression_by_mode() {
        let defaults = Answers::builtin_defaults();

        let standard = workspace_values(&defaults, &Answers::new(), false);
        assert!(!standard.contains(&"logs".to_string()));
        assert!(standard.contains(&"metrics.json".to_string()));

        let live = workspace_values(&defaults, &Answers::new(), true);
        assert!(live.contains(&"logs".to_string()));
        assert!(!live.contains(&"metrics.json".to_string()));
        assert!(!live.contains(&"plots".to_string()));

        let overrides = answers(&[(QuestionKey::Metrics, "scores.json")]);
        let live = workspace_values(&defaults, &overrides, true);
        assert!(live.contains(&"scores.json".to_string()));
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let defaults = answers(&[(QuestionKey::Code, "src")]);
        let overrides = answers(&[(QuestionKey::Code, "lib"), (QuestionKey::Cmd, "make")]);
        // The command is not a path
        assert_eq!(workspace_values(&defaults, &overrides, false), vec!["lib"]);
    }

    #[test]
    fn test_render_tree() {
        let tree = render_tree(&["data".to_string(), "src".to_string()]);
        let lines: Vec<&str> = tree.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("├── "));
        assert!(lines[2].starts_with("└── "));
    }
}
