// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Answer validation used by the wizard prompts

use std::path::Path;

use super::answers::QuestionKey;
use super::prompt::Verdict;
use crate::pipeline::{load_params, ParamsError};

/// Validate an answer relative to the project root.
///
/// - `params` must be a loadable parameters file, otherwise retry.
/// - `code` and `data` may be missing, with a warning.
/// - everything else is accepted.
pub fn validate_answer(root: &Path, key: QuestionKey, value: &str) -> Verdict {
    match key {
        QuestionKey::Params => match load_params(&root.join(value)) {
            Ok(_) => Verdict::Accept,
            Err(e @ (ParamsError::NotFound | ParamsError::IsADirectory)) => Verdict::Retry(format!(
                "'{}' {}. Please retry with an existing parameters file.",
                value, e
            )),
            Err(e) => Verdict::Retry(format!(
                "'{}' {}. Please retry with a valid parameters file.",
                value, e
            )),
        },
        QuestionKey::Code | QuestionKey::Data => {
            if root.join(value).exists() {
                Verdict::Accept
            } else {
                tracing::debug!("'{}' answer '{}' does not exist yet", key, value);
                Verdict::Warn(format!(
                    "'{}' does not exist in the workspace. Running the stage may fail.",
                    value
                ))
            }
        }
        _ => Verdict::Accept,
    }
}

/// Bind [`validate_answer`] to a project root
pub fn answer_validator(root: &Path) -> impl Fn(QuestionKey, &str) -> Verdict + '_ {
    move |key, value| validate_answer(root, key, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_params_reasons_differ() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("conf")).unwrap();

        let missing = validate_answer(dir.path(), QuestionKey::Params, "params.yaml");
        assert_eq!(
            missing,
            Verdict::Retry(
                "'params.yaml' does not exist. Please retry with an existing parameters file."
                    .into()
            )
        );

        let directory = validate_answer(dir.path(), QuestionKey::Params, "conf");
        assert_eq!(
            directory,
            Verdict::Retry("'conf' is a directory. Please retry with an existing parameters file.".into())
        );
    }

    #[test]
    fn test_params_accepts_loadable_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("params.yaml"), "lr: 0.1\n").unwrap();

        assert_eq!(
            validate_answer(dir.path(), QuestionKey::Params, "params.yaml"),
            Verdict::Accept
        );
    }

    #[test]
    fn test_missing_code_only_warns() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();

        assert_eq!(validate_answer(dir.path(), QuestionKey::Code, "src"), Verdict::Accept);
        assert!(matches!(
            validate_answer(dir.path(), QuestionKey::Data, "data"),
            Verdict::Warn(_)
        ));
        assert_eq!(
            validate_answer(dir.path(), QuestionKey::Models, "nowhere"),
            Verdict::Accept
        );
    }
}
