// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Parameters file loader
//!
//! A stage declares the parameters it reads as `{file: [keys...]}`. The keys
//! are the top-level names of the parameters file, read with the loader
//! matching its extension.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::errors::PipewrightError;

/// Why a parameters file could not be loaded
#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("does not exist")]
    NotFound,

    #[error("is a directory")]
    IsADirectory,

    #[error("has an unsupported extension '{0}'")]
    UnsupportedFormat(String),

    #[error("could not be parsed: {0}")]
    Parse(String),

    #[error("could not be read: {0}")]
    Read(String),
}

impl ParamsError {
    /// Attach the offending path for reporting
    pub fn into_error(self, path: &Path) -> PipewrightError {
        PipewrightError::ParamsFile {
            path: path.to_path_buf(),
            reason: self.to_string(),
        }
    }
}

/// Supported parameter file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsFormat {
    Yaml,
    Json,
    Toml,
}

impl ParamsFormat {
    /// Pick the loader for a path by its extension
    pub fn from_path(path: &Path) -> Result<Self, ParamsError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(ParamsError::UnsupportedFormat(format!(".{}", ext))),
        }
    }

    /// Top-level key names of a document in this format
    fn top_level_keys(self, content: &str) -> Result<Vec<String>, ParamsError> {
        match self {
            Self::Yaml => {
                let value: serde_yaml::Value =
                    serde_yaml::from_str(content).map_err(|e| ParamsError::Parse(e.to_string()))?;
                Ok(match value {
                    serde_yaml::Value::Mapping(map) => map
                        .keys()
                        .map(|k| match k.as_str() {
                            Some(s) => s.to_string(),
                            None => serde_yaml::to_string(k)
                                .map(|s| s.trim_end().to_string())
                                .unwrap_or_default(),
                        })
                        .collect(),
                    _ => Vec::new(),
                })
            }
            Self::Json => {
                let value: serde_json::Value =
                    serde_json::from_str(content).map_err(|e| ParamsError::Parse(e.to_string()))?;
                Ok(match value {
                    serde_json::Value::Object(map) => map.keys().cloned().collect(),
                    _ => Vec::new(),
                })
            }
            Self::Toml => {
                let table: toml::Table =
                    toml::from_str(content).map_err(|e| ParamsError::Parse(e.to_string()))?;
                Ok(table.keys().cloned().collect())
            }
        }
    }
}

/// A parameters file and the keys a stage reads from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamsDecl {
    pub path: PathBuf,
    pub keys: Vec<String>,
}

/// Load a parameters file and enumerate its top-level keys
pub fn load_params(path: &Path) -> Result<ParamsDecl, ParamsError> {
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(ParamsError::NotFound),
        Err(e) => return Err(ParamsError::Read(e.to_string())),
    };

    if metadata.is_dir() {
        return Err(ParamsError::IsADirectory);
    }

    let format = ParamsFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| ParamsError::Read(e.to_string()))?;
    let keys = format.top_level_keys(&content)?;

    tracing::debug!("Loaded {} parameter keys from {}", keys.len(), path.display());

    Ok(ParamsDecl {
        path: path.to_path_buf(),
        keys,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_keys_keep_document_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("params.yaml");
        std::fs::write(&path, "train:\n  epochs: 10\nlr: 0.1\nseed: 42\n").unwrap();

        let decl = load_params(&path).unwrap();
        assert_eq!(decl.keys, vec!["train", "lr", "seed"]);
    }

    #[test]
    fn test_json_and_toml_keys() {
        let dir = TempDir::new().unwrap();

        let json = dir.path().join("params.json");
        std::fs::write(&json, r#"{"lr": 0.1, "batch": 32}"#).unwrap();
        let mut keys = load_params(&json).unwrap().keys;
        keys.sort();
        assert_eq!(keys, vec!["batch", "lr"]);

        let toml_path = dir.path().join("params.toml");
        std::fs::write(&toml_path, "seed = 1\n[model]\ndepth = 3\n").unwrap();
        let mut keys = load_params(&toml_path).unwrap().keys;
        keys.sort();
        assert_eq!(keys, vec!["model", "seed"]);
    }

    #[test]
    fn test_missing_and_directory_are_distinguished() {
        let dir = TempDir::new().unwrap();

        let missing = load_params(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(missing, ParamsError::NotFound));
        assert_eq!(missing.to_string(), "does not exist");

        let is_dir = load_params(dir.path()).unwrap_err();
        assert!(matches!(is_dir, ParamsError::IsADirectory));
        assert_eq!(is_dir.to_string(), "is a directory");
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("params.ini");
        std::fs::write(&path, "a=1").unwrap();

        let err = load_params(&path).unwrap_err();
        assert!(matches!(err, ParamsError::UnsupportedFormat(ref ext) if ext == ".ini"));
    }

    #[test]
    fn test_scalar_document_has_no_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("params.yaml");
        std::fs::write(&path, "just a string\n").unwrap();

        assert!(load_params(&path).unwrap().keys.is_empty());
    }
}
