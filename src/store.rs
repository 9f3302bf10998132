// Copyright (c) 2025 Autovest Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.autovest", "Autovest", "autovest"));

/// Plan store file. Written by the plan-authoring module; read-only here.
pub const PLANS_FILE: &str = "plans.json";
/// Execution history file. Exclusive to this crate.
pub const HISTORY_FILE: &str = "history.json";
/// Trade ledger file. The manual-trade UI writes to it too.
pub const LEDGER_FILE: &str = "ledger.json";

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

pub fn plans_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(PLANS_FILE))
}

pub fn history_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(HISTORY_FILE))
}

pub fn ledger_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(LEDGER_FILE))
}
