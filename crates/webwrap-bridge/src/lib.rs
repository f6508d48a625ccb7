// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Webwrap native platform bridge abstractions.
//!
//! This crate defines the capability traits the shell consumes: the content
//! view it drives, permission prompts, pickers, the audio recorder, the share
//! sheet, reachability, the push provider, and key-value persistence. Real
//! mobile hosts implement them against the platform SDKs; desktop and CI
//! builds get the [`stub::StubBridge`].

pub mod stub;
pub mod traits;

pub use traits::*;
