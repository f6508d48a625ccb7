// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Webwrap core: types, configuration, failure classification, and errors shared
// across all crates.

pub mod config;
pub mod error;
pub mod failure;
pub mod types;

pub use config::ShellConfig;
pub use error::ShellError;
pub use failure::{FailureCategory, FailureNotice, LoadFailure};
pub use types::*;
