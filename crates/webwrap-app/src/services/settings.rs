// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shell settings persisted as JSON in the data directory.

use std::path::Path;

use tracing::{info, warn};
use webwrap_core::config::ShellConfig;
use webwrap_core::error::Result;

const CONFIG_FILE: &str = "config.json";

/// Load the settings, falling back to defaults when the file is missing,
/// unreadable, or invalid. Defaults are written back on first run.
pub fn load_or_default(data_dir: &Path) -> ShellConfig {
    match load_config(data_dir) {
        Some(config) => match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!(error = %e, "invalid settings, using defaults");
                ShellConfig::default()
            }
        },
        None => {
            let config = ShellConfig::default();
            if !data_dir.join(CONFIG_FILE).exists() {
                match persist_config(data_dir, &config) {
                    Ok(()) => info!("default settings written"),
                    Err(e) => warn!(error = %e, "could not write default settings"),
                }
            }
            config
        }
    }
}

fn load_config(data_dir: &Path) -> Option<ShellConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable settings file");
            None
        }
    }
}

pub fn persist_config(data_dir: &Path, config: &ShellConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
