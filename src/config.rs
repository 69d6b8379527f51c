// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Project configuration
//!
//! `.pipewright.yaml` may replace the built-in default answers:
//!
//! ```yaml
//! init:
//!   code: lib
//!   params: config/params.yaml
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::errors::{PipewrightError, PipewrightResult};
use crate::wizard::{Answers, QuestionKey};

/// Project configuration file name
pub const CONFIG_FILE: &str = ".pipewright.yaml";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectConfig {
    #[serde(default)]
    init: BTreeMap<String, String>,
}

/// Default answers for a project: built-ins, replaced key by key by the
/// `init:` section of the project configuration when present.
pub fn load_defaults(root: &Path) -> PipewrightResult<Answers> {
    let mut defaults = Answers::builtin_defaults();

    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(defaults);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| PipewrightError::FileReadError {
        path: path.clone(),
        error: e.to_string(),
    })?;

    let config: ProjectConfig = if content.trim().is_empty() {
        ProjectConfig::default()
    } else {
        serde_yaml::from_str(&content).map_err(|e| PipewrightError::Config {
            path: path.clone(),
            reason: e.to_string(),
        })?
    };

    for (key, value) in config.init {
        let key: QuestionKey = key.parse().map_err(|reason| PipewrightError::Config {
            path: path.clone(),
            reason,
        })?;
        defaults.insert(key, value);
    }

    tracing::debug!("Loaded default answers from {}", path.display());
    Ok(defaults)
}
