// Copyright (c) 2025 Autovest Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::Transaction;

/// Errors surfaced by the trade ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The ledger file exists but could not be read or parsed. Not the same
    /// thing as an empty ledger; callers must treat it as "no data
    /// available".
    #[error("ledger at {path} is unavailable: {reason}")]
    Unavailable { path: String, reason: String },

    #[error("invalid transaction: {reason}")]
    Invalid { reason: String },

    #[error("failed to write ledger at {path}: {reason}")]
    Write { path: String, reason: String },
}

/// Ordered, append-only trade log in a human-readable JSON file. The
/// manual-trade UI writes through the same `append` path as the execution
/// engine.
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full ordered transaction sequence. A missing file is an
    /// empty ledger (nothing recorded yet); anything else that prevents the
    /// read is `Unavailable`.
    pub fn read_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no ledger yet");
                return Ok(Vec::new());
            }
            Err(err) => return Err(self.unavailable(err)),
        };
        serde_json::from_str(&raw).map_err(|err| self.unavailable(err))
    }

    /// Append one transaction: read the existing sequence, push, rewrite
    /// the whole file. There is no true append, so volume is expected to
    /// stay personal-scale and writers must not overlap. Refuses to append
    /// over an unreadable ledger rather than clobber it.
    pub fn append(&self, transaction: Transaction) -> Result<(), LedgerError> {
        validate(&transaction)?;
        let mut transactions = self.read_all()?;
        transactions.push(transaction);
        let body = serde_json::to_string_pretty(&transactions)
            .map_err(|err| self.write_failed(err))?;
        fs::write(&self.path, body).map_err(|err| self.write_failed(err))
    }

    fn unavailable(&self, err: impl std::fmt::Display) -> LedgerError {
        LedgerError::Unavailable {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        }
    }

    fn write_failed(&self, err: impl std::fmt::Display) -> LedgerError {
        LedgerError::Write {
            path: self.path.display().to_string(),
            reason: err.to_string(),
        }
    }
}

fn validate(transaction: &Transaction) -> Result<(), LedgerError> {
    if transaction.symbol.trim().is_empty() {
        return Err(LedgerError::Invalid {
            reason: "symbol must not be empty".to_string(),
        });
    }
    if transaction.quantity <= 0 {
        return Err(LedgerError::Invalid {
            reason: format!("quantity must be > 0, got {}", transaction.quantity),
        });
    }
    if transaction.price <= Decimal::ZERO {
        return Err(LedgerError::Invalid {
            reason: format!("price must be > 0, got {}", transaction.price),
        });
    }
    Ok(())
}
