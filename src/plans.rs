// Copyright (c) 2025 Autovest Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::{Frequency, RecurringInvestmentPlan};

/// One record as the plan-authoring module writes it.
#[derive(Debug, Deserialize)]
struct PlanRecord {
    name: String,
    amount: Decimal,
    frequency: String,
    #[serde(rename = "startDate")]
    start_date: NaiveDate,
    symbol: String,
}

/// Reads the shared plan store. The file belongs to another module and may
/// not exist yet, so every failure mode degrades to "no plans".
pub struct PlanImporter {
    path: PathBuf,
}

impl PlanImporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Import all valid plans, in file order. An absent, unreadable, or
    /// incompatible file yields an empty list; a record that fails to parse
    /// or validate is skipped without affecting its neighbors.
    pub fn import_plans(&self) -> Vec<RecurringInvestmentPlan> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "plan store not readable, importing nothing");
                return Vec::new();
            }
        };
        let records: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "plan store in unexpected format, importing nothing");
                return Vec::new();
            }
        };
        records
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<PlanRecord>(value) {
                Ok(record) => validate(record),
                Err(err) => {
                    warn!(%err, "unreadable plan record, skipping");
                    None
                }
            })
            .collect()
    }
}

fn validate(record: PlanRecord) -> Option<RecurringInvestmentPlan> {
    let symbol = record.symbol.trim().to_string();
    if symbol.is_empty() {
        warn!(name = %record.name, "plan has no symbol, skipping");
        return None;
    }
    let Some(frequency) = Frequency::parse(&record.frequency) else {
        warn!(symbol = %symbol, token = %record.frequency, "unrecognized plan frequency, skipping");
        return None;
    };
    if record.amount <= Decimal::ZERO {
        warn!(symbol = %symbol, amount = %record.amount, "plan amount is not positive, skipping");
        return None;
    }
    Some(RecurringInvestmentPlan {
        symbol,
        name: record.name.trim().to_string(),
        amount: record.amount,
        frequency,
        start_date: record.start_date,
    })
}
