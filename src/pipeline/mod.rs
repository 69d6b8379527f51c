// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipewright contributors

//! Pipeline definitions and types
//!
//! The pipeline file, the stage entries inside it, and the parameters
//! files stages read from.

mod definition;
mod params;

pub use definition::*;
pub use params::{load_params, ParamsDecl, ParamsError, ParamsFormat};
