// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Version control integration
//!
//! Generated outputs are added to ignore files and the files a commit
//! touches are staged so the new stage lands in the next commit.

mod git;

pub use git::Git;

use std::path::{Path, PathBuf};

use crate::errors::PipewrightResult;

/// Trait for version control backends
pub trait Scm {
    /// Backend name for messages
    fn name(&self) -> &'static str;

    /// Mark a path as ignored.
    ///
    /// Returns the ignore file that was modified, if any.
    fn ignore(&self, path: &Path) -> PipewrightResult<Option<PathBuf>>;

    /// Stage files for the next commit
    fn add(&self, paths: &[PathBuf]) -> PipewrightResult<()>;
}

/// Backend used outside a version-controlled work tree
#[derive(Debug, Default)]
pub struct NoScm;

impl Scm for NoScm {
    fn name(&self) -> &'static str {
        "none"
    }

    fn ignore(&self, _path: &Path) -> PipewrightResult<Option<PathBuf>> {
        Ok(None)
    }

    fn add(&self, _paths: &[PathBuf]) -> PipewrightResult<()> {
        Ok(())
    }
}

/// Pick the backend for a project root
pub fn detect(root: &Path) -> Box<dyn Scm> {
    match Git::discover(root) {
        Some(git) => {
            tracing::debug!("Using git work tree at {}", root.display());
            Box::new(git)
        }
        None => {
            tracing::debug!("{} is not a git work tree", root.display());
            Box::new(NoScm)
        }
    }
}

/// Open a change-tracking scope.
///
/// Files recorded on the returned tracker are staged when it is dropped if
/// `autostage` is set, whatever happened in between.
pub fn track_file_changes(scm: &dyn Scm, autostage: bool) -> ChangeTracker<'_> {
    ChangeTracker {
        scm,
        autostage,
        files: Vec::new(),
    }
}

/// Scope that collects touched files and stages them on release
pub struct ChangeTracker<'a> {
    scm: &'a dyn Scm,
    autostage: bool,
    files: Vec<PathBuf>,
}

impl ChangeTracker<'_> {
    /// Ignore a generated path and remember the ignore file
    pub fn ignore(&mut self, path: &Path) -> PipewrightResult<()> {
        if let Some(ignore_file) = self.scm.ignore(path)? {
            self.track_file(&ignore_file);
        }
        Ok(())
    }

    /// Register a file for tracking
    pub fn track_file(&mut self, path: &Path) {
        if !self.files.iter().any(|f| f == path) {
            self.files.push(path.to_path_buf());
        }
    }

    /// Files recorded so far
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Close the scope and stage the recorded files.
    ///
    /// Unlike a plain drop, a staging failure is returned to the caller.
    pub fn finish(mut self) -> PipewrightResult<()> {
        let files = std::mem::take(&mut self.files);
        self.release(&files)
    }

    fn release(&self, files: &[PathBuf]) -> PipewrightResult<()> {
        if files.is_empty() {
            return Ok(());
        }

        if !self.autostage {
            let paths: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
            tracing::info!(
                "To track the changes with {}, run:\n\n\t{} add {}\n",
                self.scm.name(),
                self.scm.name(),
                paths.join(" ")
            );
            return Ok(());
        }

        self.scm.add(files)
    }
}

impl Drop for ChangeTracker<'_> {
    fn drop(&mut self) {
        let files = std::mem::take(&mut self.files);
        if let Err(e) = self.release(&files) {
            tracing::warn!("Failed to stage {} file(s): {}", files.len(), e);
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Backend that records every call
    #[derive(Debug, Default)]
    pub struct RecordingScm {
        pub ignored: RefCell<Vec<PathBuf>>,
        pub added: RefCell<Vec<PathBuf>>,
        pub fail_add: bool,
    }

    impl Scm for RecordingScm {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn ignore(&self, path: &Path) -> PipewrightResult<Option<PathBuf>> {
            self.ignored.borrow_mut().push(path.to_path_buf());
            let parent = path.parent().unwrap_or_else(|| Path::new(""));
            Ok(Some(parent.join(".gitignore")))
        }

        fn add(&self, paths: &[PathBuf]) -> PipewrightResult<()> {
            if self.fail_add {
                return Err(crate::errors::PipewrightError::scm_failed("add failed", ""));
            }
            self.added.borrow_mut().extend(paths.iter().cloned());
            Ok(())
        }
    }
}
