// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Host services: where files live, how settings and cached values persist.

pub mod data_dir;
pub mod kv_store;
pub mod settings;
