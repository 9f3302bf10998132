// Copyright (c) 2025 Autovest Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// Last executed date per plan key. Entries are never removed, even when
/// the plan behind them disappears; lookups are by key, so stale entries
/// are inert.
pub type ExecutionHistory = HashMap<String, NaiveDate>;

/// Persisted once-per-day guard for the execution engine.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history map. A missing file is the normal first-run state;
    /// any read or format error also yields an empty map.
    pub fn load(&self) -> ExecutionHistory {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no execution history yet");
                return ExecutionHistory::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "execution history unreadable, starting empty");
                ExecutionHistory::new()
            }
        }
    }

    /// Overwrite the stored blob with `history`. No merge with what is on
    /// disk; the caller's map is the whole truth.
    pub fn save(&self, history: &ExecutionHistory) -> Result<()> {
        let body =
            serde_json::to_string_pretty(history).context("Serialize execution history")?;
        fs::write(&self.path, body)
            .with_context(|| format!("Write execution history to {}", self.path.display()))
    }
}
