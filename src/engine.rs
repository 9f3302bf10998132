// Copyright (c) 2025 Autovest Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::{info, warn};

use crate::history::HistoryStore;
use crate::ledger::Ledger;
use crate::models::{RecurringInvestmentPlan, TradeAction, Transaction};
use crate::plans::PlanImporter;
use crate::quotes::{FALLBACK_PRICE, QuoteProvider};
use crate::schedule::is_due_today;

/// Execute every plan that is due on `today` and has not already run today.
///
/// Runs synchronously on the caller's thread; there is no background timer.
/// The execution history is the once-per-day guard, and a plan is marked as
/// executed even when its priced quantity came out to zero shares. The
/// updated history is saved once at the end of the run; if that save fails
/// the run's plans may execute again next time.
///
/// Returns the number of plans executed this run.
pub fn run_due_investments(
    today: NaiveDate,
    plans: &PlanImporter,
    history_store: &HistoryStore,
    ledger: &Ledger,
    quotes: &dyn QuoteProvider,
) -> usize {
    let plans = plans.import_plans();
    let mut history = history_store.load();
    let mut executed = 0;

    for plan in &plans {
        if !is_due_today(plan, today) {
            continue;
        }
        let key = plan.plan_key();
        if history.get(&key) == Some(&today) {
            continue;
        }
        execute_one(plan, ledger, quotes);
        history.insert(key, today);
        executed += 1;
    }

    if let Err(err) = history_store.save(&history) {
        warn!(%err, "failed to save execution history, plans may re-execute next run");
    }
    info!(executed, date = %today, "recurring investment run complete");
    executed
}

/// Price one plan and record the buy. A failed, timed-out, or non-positive
/// quote falls back to the fixed default price; an amount below one share's
/// price records nothing.
fn execute_one(plan: &RecurringInvestmentPlan, ledger: &Ledger, quotes: &dyn QuoteProvider) {
    let price = match quotes.latest_price(&plan.symbol) {
        Ok(price) if price > Decimal::ZERO => price,
        Ok(price) => {
            warn!(symbol = %plan.symbol, %price, "non-positive quote, using fallback price");
            *FALLBACK_PRICE
        }
        Err(err) => {
            warn!(symbol = %plan.symbol, %err, "quote lookup failed, using fallback price");
            *FALLBACK_PRICE
        }
    };

    // Whole shares only.
    let quantity = (plan.amount / price).floor().to_i64().unwrap_or(0);
    if quantity == 0 {
        info!(symbol = %plan.symbol, amount = %plan.amount, %price, "amount below one share, nothing recorded");
        return;
    }

    let transaction = Transaction {
        action: TradeAction::Buy,
        symbol: plan.symbol.clone(),
        quantity,
        price,
    };
    match ledger.append(transaction) {
        Ok(()) => info!(symbol = %plan.symbol, quantity, %price, "recorded recurring buy"),
        Err(err) => warn!(symbol = %plan.symbol, %err, "failed to record recurring buy"),
    }
}
