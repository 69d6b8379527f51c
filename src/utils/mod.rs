// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Utility modules
//!
//! Terminal styling, the diagnostic console and logging control.

pub mod colors;
pub mod console;
pub mod logging;

pub use self::console::{Console, ScriptedConsole, TermConsole};
pub use logging::{init_logging, suppress_logging, LoggingSuppressed};
