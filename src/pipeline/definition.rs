// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Pipeline definition structures
//!
//! Defines the schema of a stage entry in `pipeline.yaml` and the file that
//! holds them.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::params::ParamsDecl;
use crate::errors::{PipewrightError, PipewrightResult};

/// Per-output flags written next to an output path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFlags {
    /// Whether the output is stored in the cache
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<bool>,

    /// Whether the output is a checkpoint that survives re-runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<bool>,
}

/// An output declaration: a bare path or a path with flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputEntry {
    /// Simple path, default flags
    Path(String),

    /// Path mapped to explicit flags
    Flagged(BTreeMap<String, OutputFlags>),
}

impl OutputEntry {
    /// Output that is not cached (metrics, plots)
    pub fn uncached(path: &str) -> Self {
        Self::flagged(
            path,
            OutputFlags {
                cache: Some(false),
                checkpoint: None,
            },
        )
    }

    /// Output marked as a checkpoint
    pub fn checkpoint(path: &str) -> Self {
        Self::flagged(
            path,
            OutputFlags {
                cache: None,
                checkpoint: Some(true),
            },
        )
    }

    fn flagged(path: &str, flags: OutputFlags) -> Self {
        let mut map = BTreeMap::new();
        map.insert(path.to_string(), flags);
        Self::Flagged(map)
    }

    /// Get the output path
    pub fn path(&self) -> &str {
        match self {
            Self::Path(p) => p,
            Self::Flagged(map) => map.keys().next().map(String::as_str).unwrap_or_default(),
        }
    }

    /// Get the output flags (defaults for a bare path)
    pub fn flags(&self) -> OutputFlags {
        match self {
            Self::Path(_) => OutputFlags::default(),
            Self::Flagged(map) => map.values().next().cloned().unwrap_or_default(),
        }
    }
}

/// A single pipeline stage as stored under `stages.<name>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    /// Stage name (the key in the `stages` mapping)
    #[serde(skip)]
    pub name: String,

    /// Command to execute
    pub cmd: String,

    /// Files and directories the command reads
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<String>,

    /// Parameters files and the keys read from each
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<BTreeMap<String, Vec<String>>>,

    /// Generated outputs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outs: Vec<OutputEntry>,

    /// Metrics files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<OutputEntry>,

    /// Plots files or directories
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plots: Vec<OutputEntry>,

    /// Directory receiving live training logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<String>,
}

impl StageDefinition {
    /// Every path this stage generates, in declaration order
    pub fn outputs(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .outs
            .iter()
            .chain(&self.metrics)
            .chain(&self.plots)
            .map(|o| PathBuf::from(o.path()))
            .collect();

        if let Some(ref live) = self.live {
            paths.push(PathBuf::from(live));
        }

        paths
    }

    /// Outputs kept out of version control: cached outs and the live directory
    pub fn ignorable_outputs(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .outs
            .iter()
            .filter(|o| o.flags().cache != Some(false))
            .map(|o| PathBuf::from(o.path()))
            .collect();

        if let Some(ref live) = self.live {
            paths.push(PathBuf::from(live));
        }

        paths
    }

    /// Whether any output is marked as a checkpoint
    pub fn has_checkpoints(&self) -> bool {
        self.outs
            .iter()
            .any(|o| o.flags().checkpoint.unwrap_or(false))
    }

    /// Parameters files declared by this stage
    pub fn params_files(&self) -> Vec<PathBuf> {
        self.params
            .iter()
            .flat_map(|decl| decl.keys().map(PathBuf::from))
            .collect()
    }

    /// Render this stage as it would appear in a pipeline file
    pub fn to_pipeline_yaml(&self) -> PipewrightResult<String> {
        stages_to_yaml(std::slice::from_ref(self))
    }
}

/// Render stages as a pipeline document, in the given order
pub fn stages_to_yaml(stages: &[StageDefinition]) -> PipewrightResult<String> {
    let mut mapping = serde_yaml::Mapping::new();
    for stage in stages {
        mapping.insert(stage.name.clone().into(), serde_yaml::to_value(stage)?);
    }

    let mut doc = serde_yaml::Mapping::new();
    doc.insert("stages".into(), serde_yaml::Value::Mapping(mapping));

    serde_yaml::to_string(&doc).map_err(Into::into)
}

fn stage_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").expect("Invalid stage name pattern")
    })
}

/// Check that a stage name can be used as a key in the pipeline file
pub fn validate_stage_name(name: &str) -> PipewrightResult<()> {
    if stage_name_pattern().is_match(name) {
        Ok(())
    } else {
        Err(PipewrightError::InvalidStageName {
            name: name.to_string(),
        })
    }
}

/// The pipeline file on disk.
///
/// Only the `stages` mapping is interpreted; every other top-level key and
/// the order of existing stages are preserved when a stage is written.
#[derive(Debug, Clone)]
pub struct PipelineFile {
    path: PathBuf,
}

impl PipelineFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the raw document; a missing file is an empty document
    fn load_document(&self) -> PipewrightResult<serde_yaml::Mapping> {
        if !self.exists() {
            return Ok(serde_yaml::Mapping::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            PipewrightError::FileReadError {
                path: self.path.clone(),
                error: e.to_string(),
            }
        })?;

        if content.trim().is_empty() {
            return Ok(serde_yaml::Mapping::new());
        }

        match serde_yaml::from_str(&content)? {
            serde_yaml::Value::Mapping(map) => Ok(map),
            serde_yaml::Value::Null => Ok(serde_yaml::Mapping::new()),
            _ => Err(PipewrightError::Yaml {
                message: format!("'{}' is not a mapping", self.path.display()),
            }),
        }
    }

    fn stages_of(doc: &serde_yaml::Mapping) -> Option<&serde_yaml::Mapping> {
        doc.get("stages").and_then(|s| s.as_mapping())
    }

    /// Names of all stages, in file order
    pub fn stage_names(&self) -> PipewrightResult<Vec<String>> {
        let doc = self.load_document()?;
        Ok(Self::stages_of(&doc)
            .map(|stages| {
                stages
                    .keys()
                    .filter_map(|k| k.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Does a stage with this name exist
    pub fn has_stage(&self, name: &str) -> PipewrightResult<bool> {
        let doc = self.load_document()?;
        Ok(Self::stages_of(&doc)
            .map(|stages| stages.contains_key(name))
            .unwrap_or(false))
    }

    /// All stages, in file order
    pub fn load(&self) -> PipewrightResult<Vec<StageDefinition>> {
        let doc = self.load_document()?;
        let Some(stages) = Self::stages_of(&doc) else {
            return Ok(Vec::new());
        };

        stages
            .iter()
            .filter_map(|(key, value)| key.as_str().map(|name| (name, value)))
            .map(|(name, value)| -> PipewrightResult<StageDefinition> {
                let mut stage: StageDefinition = serde_yaml::from_value(value.clone())?;
                stage.name = name.to_string();
                Ok(stage)
            })
            .collect()
    }

    /// Get a stage by name
    pub fn get_stage(&self, name: &str) -> PipewrightResult<Option<StageDefinition>> {
        let doc = self.load_document()?;
        let Some(value) = Self::stages_of(&doc).and_then(|stages| stages.get(name)) else {
            return Ok(None);
        };

        let mut stage: StageDefinition = serde_yaml::from_value(value.clone())?;
        stage.name = name.to_string();
        Ok(Some(stage))
    }

    /// Write a stage, replacing any stage of the same name in place.
    ///
    /// Lock files are never touched.
    pub fn dump(&self, stage: &StageDefinition) -> PipewrightResult<()> {
        let mut doc = self.load_document()?;

        let stages = doc
            .entry("stages".into())
            .or_insert_with(|| serde_yaml::Value::Mapping(serde_yaml::Mapping::new()));
        if stages.is_null() {
            *stages = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());
        }

        let serde_yaml::Value::Mapping(stages) = stages else {
            return Err(PipewrightError::Yaml {
                message: format!("'stages' in '{}' is not a mapping", self.path.display()),
            });
        };
        stages.insert(stage.name.clone().into(), serde_yaml::to_value(stage)?);

        let yaml = serde_yaml::to_string(&doc)?;
        std::fs::write(&self.path, yaml).map_err(|e| PipewrightError::FileWriteError {
            path: self.path.clone(),
            error: e.to_string(),
        })?;

        tracing::debug!("Wrote stage '{}' to {}", stage.name, self.path.display());
        Ok(())
    }
}

/// Everything the assembler needs to build a stage
#[derive(Debug, Clone, Default)]
pub struct StageSpec {
    pub name: String,
    pub cmd: String,
    pub deps: Vec<String>,
    pub params: Vec<ParamsDecl>,
    pub metrics_no_cache: Vec<String>,
    pub plots_no_cache: Vec<String>,
    pub live: Option<String>,
    pub outs: Vec<String>,
    pub checkpoints: Vec<String>,
    pub force: bool,
}

/// Builds in-memory stage definitions against a pipeline file
pub struct StageBuilder<'a> {
    pipeline: &'a PipelineFile,
}

impl<'a> StageBuilder<'a> {
    pub fn new(pipeline: &'a PipelineFile) -> Self {
        Self { pipeline }
    }

    /// Fail if the stage exists and overwriting was not requested
    pub fn check_stage_exists(&self, name: &str, force: bool) -> PipewrightResult<()> {
        if !force && self.pipeline.has_stage(name)? {
            return Err(PipewrightError::DuplicateStage {
                name: name.to_string(),
                pipeline: self.pipeline.path().to_path_buf(),
            });
        }
        Ok(())
    }

    /// Assemble a stage definition. Nothing is written to disk.
    pub fn create(&self, spec: StageSpec) -> PipewrightResult<StageDefinition> {
        validate_stage_name(&spec.name)?;
        self.check_stage_exists(&spec.name, spec.force)?;

        let params = spec
            .params
            .into_iter()
            .map(|decl| {
                let mut map = BTreeMap::new();
                map.insert(decl.path.to_string_lossy().to_string(), decl.keys);
                map
            })
            .collect();

        let outs = spec
            .outs
            .iter()
            .map(|p| OutputEntry::Path(p.clone()))
            .chain(spec.checkpoints.iter().map(|p| OutputEntry::checkpoint(p)))
            .collect();

        Ok(StageDefinition {
            name: spec.name,
            cmd: spec.cmd,
            deps: spec.deps,
            params,
            outs,
            metrics: spec.metrics_no_cache.iter().map(|p| OutputEntry::uncached(p)).collect(),
            plots: spec.plots_no_cache.iter().map(|p| OutputEntry::uncached(p)).collect(),
            live: spec.live,
        })
    }
}
