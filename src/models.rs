// Copyright (c) 2025 Autovest Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Parse the short token used in the shared plan file ("D", "W", "M",
    /// "Y"). Spelled-out words are accepted too; anything else is not a
    /// frequency.
    pub fn parse(token: &str) -> Option<Frequency> {
        match token.trim().to_ascii_uppercase().as_str() {
            "D" | "DAILY" => Some(Frequency::Daily),
            "W" | "WEEKLY" => Some(Frequency::Weekly),
            "M" | "MONTHLY" => Some(Frequency::Monthly),
            "Y" | "YEARLY" => Some(Frequency::Yearly),
            _ => None,
        }
    }
}

/// A recurring investment definition, authored and owned by an external
/// module. Read-only here.
#[derive(Debug, Clone)]
pub struct RecurringInvestmentPlan {
    pub symbol: String,
    pub name: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
}

impl RecurringInvestmentPlan {
    /// Key under which the execution history tracks this plan. Two distinct
    /// plans sharing both symbol and name collide and share one
    /// once-per-day slot.
    pub fn plan_key(&self) -> String {
        format!("{}-{}", self.symbol, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

/// One trade in the ledger. Once written, never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub action: TradeAction,
    pub symbol: String,
    pub quantity: i64,
    pub price: Decimal,
}

/// Net position per symbol, derived from the full ledger on every query and
/// never persisted. Symbols whose folded quantity is not positive appear in
/// neither map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Holdings {
    pub quantities: HashMap<String, i64>,
    pub values: HashMap<String, Decimal>,
}
