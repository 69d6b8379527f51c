// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Git backend
//!
//! Shells out to the `git` executable found on PATH.

use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::process::Command;

use super::Scm;
use crate::errors::{PipewrightError, PipewrightResult};

/// Git work tree rooted at the project directory
#[derive(Debug, Clone)]
pub struct Git {
    root: PathBuf,
    git: PathBuf,
}

impl Git {
    pub fn new(root: PathBuf, git: PathBuf) -> Self {
        Self { root, git }
    }

    /// Use git if it is installed and `root` is inside a work tree
    pub fn discover(root: &Path) -> Option<Self> {
        let git = which::which("git").ok()?;
        let output = Command::new(&git)
            .arg("-C")
            .arg(root)
            .args(["rev-parse", "--is-inside-work-tree"])
            .output()
            .ok()?;

        let inside = output.status.success()
            && String::from_utf8_lossy(&output.stdout).trim() == "true";
        inside.then(|| Self::new(root.to_path_buf(), git))
    }

    /// `path` relative to the work tree root with `.` and `..` resolved.
    ///
    /// `None` when the path leaves the root.
    fn relative_to_root(&self, path: &Path) -> Option<PathBuf> {
        let path = if path.is_absolute() {
            path.strip_prefix(&self.root).ok()?
        } else {
            path
        };

        let mut relative = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !relative.pop() {
                        return None;
                    }
                }
                Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(relative)
    }

    /// Ignore file and entry for a path: `<parent>/.gitignore` with `/<name>`
    fn ignore_entry(&self, path: &Path) -> PipewrightResult<Option<(PathBuf, String)>> {
        let relative = self.relative_to_root(path).ok_or_else(|| PipewrightError::Scm {
            message: format!(
                "'{}' is outside the repository at '{}'",
                path.display(),
                self.root.display()
            ),
            help: Some("Outputs must live inside the git work tree to be ignored".into()),
        })?;

        let Some(name) = relative.file_name() else {
            return Ok(None);
        };
        let entry = format!("/{}", name.to_string_lossy());
        let parent = relative.parent().unwrap_or_else(|| Path::new(""));
        Ok(Some((self.root.join(parent).join(".gitignore"), entry)))
    }
}

impl Scm for Git {
    fn name(&self) -> &'static str {
        "git"
    }

    fn ignore(&self, path: &Path) -> PipewrightResult<Option<PathBuf>> {
        let Some((ignore_file, entry)) = self.ignore_entry(path)? else {
            return Ok(None);
        };

        let existing = if ignore_file.exists() {
            std::fs::read_to_string(&ignore_file).map_err(|e| PipewrightError::FileReadError {
                path: ignore_file.clone(),
                error: e.to_string(),
            })?
        } else {
            String::new()
        };

        if existing.lines().any(|line| line.trim() == entry) {
            return Ok(None);
        }

        if let Some(dir) = ignore_file.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let write_err = |e: std::io::Error| PipewrightError::FileWriteError {
            path: ignore_file.clone(),
            error: e.to_string(),
        };
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&ignore_file)
            .map_err(write_err)?;

        let separator = if existing.is_empty() || existing.ends_with('\n') {
            ""
        } else {
            "\n"
        };
        writeln!(file, "{}{}", separator, entry).map_err(write_err)?;

        tracing::debug!("Added '{}' to {}", entry, ignore_file.display());
        Ok(Some(ignore_file))
    }

    fn add(&self, paths: &[PathBuf]) -> PipewrightResult<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let output = Command::new(&self.git)
            .arg("-C")
            .arg(&self.root)
            .arg("add")
            .arg("--")
            .args(paths)
            .output()
            .map_err(|e| PipewrightError::Scm {
                message: format!("failed to run git: {}", e),
                help: Some("Check that git is installed and on PATH".into()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipewrightError::scm_failed(
                format!("git add exited with {}", output.status),
                &stderr,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_at(dir: &TempDir) -> Git {
        Git::new(dir.path().to_path_buf(), PathBuf::from("git"))
    }

    #[test]
    fn test_ignore_writes_parent_gitignore() {
        let dir = TempDir::new().unwrap();
        let git = git_at(&dir);

        let touched = git.ignore(Path::new("models")).unwrap();
        assert_eq!(touched, Some(dir.path().join(".gitignore")));

        let nested = git.ignore(Path::new("eval/plots")).unwrap();
        assert_eq!(nested, Some(dir.path().join("eval").join(".gitignore")));

        let content = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(content, "/models\n");
        let content = std::fs::read_to_string(dir.path().join("eval/.gitignore")).unwrap();
        assert_eq!(content, "/plots\n");
    }

    #[test]
    fn test_ignore_is_idempotent() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "*.log").unwrap();
        let git = git_at(&dir);

        assert!(git.ignore(Path::new("metrics.json")).unwrap().is_some());
        assert!(git.ignore(Path::new("metrics.json")).unwrap().is_none());

        let content = std::fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(content, "*.log\n/metrics.json\n");
    }

    #[test]
    fn test_ignore_resolves_relative_components() {
        let dir = TempDir::new().unwrap();
        let git = git_at(&dir);

        let touched = git.ignore(Path::new("./eval/../models")).unwrap();
        assert_eq!(touched, Some(dir.path().join(".gitignore")));

        // Absolute paths inside the work tree are fine
        let touched = git.ignore(&dir.path().join("eval").join("plots")).unwrap();
        assert_eq!(touched, Some(dir.path().join("eval").join(".gitignore")));
    }

    #[test]
    fn test_ignore_rejects_paths_outside_work_tree() {
        let outer = TempDir::new().unwrap();
        let root = outer.path().join("repo");
        std::fs::create_dir(&root).unwrap();
        let git = Git::new(root, PathBuf::from("git"));

        let err = git.ignore(Path::new("../escaped")).unwrap_err();
        assert!(matches!(err, PipewrightError::Scm { .. }));

        let err = git.ignore(&outer.path().join("abs_out")).unwrap_err();
        assert!(matches!(err, PipewrightError::Scm { .. }));

        assert!(!outer.path().join(".gitignore").exists());
        assert!(!outer.path().join("repo").join(".gitignore").exists());
    }

    #[test]
    fn test_discover_outside_work_tree() {
        let dir = TempDir::new().unwrap();
        // Temp dirs are not work trees, whether or not git is installed
        assert!(Git::discover(dir.path()).is_none());
    }
}
