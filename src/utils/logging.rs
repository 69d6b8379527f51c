// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Logging setup and scoped suppression
//!
//! The subscriber carries a reloadable level filter so that a commit can
//! silence every log line for its duration and restore the previous level
//! afterwards.

use std::sync::OnceLock;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry};

type LevelHandle = reload::Handle<LevelFilter, Registry>;

static LEVEL_HANDLE: OnceLock<LevelHandle> = OnceLock::new();

/// Install the global subscriber (stderr, no targets)
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "pipewright=debug"
    } else {
        "pipewright=info"
    };

    let (level_layer, handle) = reload::Layer::new(LevelFilter::TRACE);

    let installed = tracing_subscriber::registry()
        .with(level_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .is_ok();

    if installed {
        let _ = LEVEL_HANDLE.set(handle);
    }
}

/// Guard that keeps logging disabled until dropped
#[must_use = "logging is restored as soon as the guard is dropped"]
pub struct LoggingSuppressed {
    restore: Option<(LevelHandle, LevelFilter)>,
}

/// Disable all log output until the returned guard is dropped.
///
/// A no-op when no subscriber was installed through [`init_logging`].
pub fn suppress_logging() -> LoggingSuppressed {
    suppress_with(LEVEL_HANDLE.get())
}

fn suppress_with(handle: Option<&LevelHandle>) -> LoggingSuppressed {
    let restore = handle.and_then(|handle| {
        let previous = handle.clone_current()?;
        handle.modify(|level| *level = LevelFilter::OFF).ok()?;
        Some((handle.clone(), previous))
    });

    LoggingSuppressed { restore }
}

impl LoggingSuppressed {
    /// Whether this guard actually changed the global level
    pub fn is_active(&self) -> bool {
        self.restore.is_some()
    }
}

impl Drop for LoggingSuppressed {
    fn drop(&mut self) {
        if let Some((handle, previous)) = self.restore.take() {
            let _ = handle.modify(|level| *level = previous);
        }
    }
}
