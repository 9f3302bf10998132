// Copyright (c) 2025 Autovest Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::anyhow;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fs;
use tempfile::TempDir;

use autovest::engine::run_due_investments;
use autovest::history::HistoryStore;
use autovest::ledger::Ledger;
use autovest::models::TradeAction;
use autovest::plans::PlanImporter;
use autovest::quotes::QuoteProvider;

struct FixedQuotes(Decimal);

impl QuoteProvider for FixedQuotes {
    fn latest_price(&self, _symbol: &str) -> anyhow::Result<Decimal> {
        Ok(self.0)
    }
}

struct FailingQuotes;

impl QuoteProvider for FailingQuotes {
    fn latest_price(&self, symbol: &str) -> anyhow::Result<Decimal> {
        Err(anyhow!("quote service unreachable for {}", symbol))
    }
}

struct Fixture {
    _dir: TempDir,
    plans: PlanImporter,
    history: HistoryStore,
    ledger: Ledger,
}

fn fixture(plan_json: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let plans_path = dir.path().join("plans.json");
    fs::write(&plans_path, plan_json).unwrap();
    Fixture {
        plans: PlanImporter::new(plans_path),
        history: HistoryStore::new(dir.path().join("history.json")),
        ledger: Ledger::new(dir.path().join("ledger.json")),
        _dir: dir,
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const MONTHLY_AAPL: &str = r#"[
    {"name": "retirement", "amount": "500", "frequency": "M", "startDate": "2024-01-15", "symbol": "AAPL"}
]"#;

#[test]
fn due_monthly_plan_buys_whole_shares() {
    let fx = fixture(MONTHLY_AAPL);
    let quotes = FixedQuotes(Decimal::from(100));

    let executed =
        run_due_investments(day(2024, 2, 15), &fx.plans, &fx.history, &fx.ledger, &quotes);

    assert_eq!(executed, 1);
    let txs = fx.ledger.read_all().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].action, TradeAction::Buy);
    assert_eq!(txs[0].symbol, "AAPL");
    assert_eq!(txs[0].quantity, 5);
    assert_eq!(txs[0].price, Decimal::from(100));

    let history = fx.history.load();
    assert_eq!(history["AAPL-retirement"], day(2024, 2, 15));
}

#[test]
fn second_run_same_day_executes_nothing() {
    let fx = fixture(MONTHLY_AAPL);
    let quotes = FixedQuotes(Decimal::from(100));

    let first = run_due_investments(day(2024, 2, 15), &fx.plans, &fx.history, &fx.ledger, &quotes);
    let second =
        run_due_investments(day(2024, 2, 15), &fx.plans, &fx.history, &fx.ledger, &quotes);

    assert_eq!(first, 1);
    assert_eq!(second, 0);
    assert_eq!(fx.ledger.read_all().unwrap().len(), 1);
}

#[test]
fn plan_not_due_is_skipped() {
    let fx = fixture(MONTHLY_AAPL);
    let quotes = FixedQuotes(Decimal::from(100));

    let executed =
        run_due_investments(day(2024, 2, 14), &fx.plans, &fx.history, &fx.ledger, &quotes);

    assert_eq!(executed, 0);
    assert!(fx.ledger.read_all().unwrap().is_empty());
    assert!(fx.history.load().is_empty());
}

#[test]
fn daily_plan_runs_again_next_day() {
    let fx = fixture(
        r#"[{"name": "dca", "amount": "300", "frequency": "D", "startDate": "2024-01-01", "symbol": "VOO"}]"#,
    );
    let quotes = FixedQuotes(Decimal::from(150));

    assert_eq!(
        run_due_investments(day(2024, 1, 2), &fx.plans, &fx.history, &fx.ledger, &quotes),
        1
    );
    assert_eq!(
        run_due_investments(day(2024, 1, 3), &fx.plans, &fx.history, &fx.ledger, &quotes),
        1
    );
    assert_eq!(fx.ledger.read_all().unwrap().len(), 2);
    assert_eq!(fx.history.load()["VOO-dca"], day(2024, 1, 3));
}

#[test]
fn failed_quote_falls_back_to_default_price() {
    let fx = fixture(
        r#"[{"name": "dca", "amount": "250", "frequency": "D", "startDate": "2024-01-01", "symbol": "VOO"}]"#,
    );

    let executed =
        run_due_investments(day(2024, 1, 2), &fx.plans, &fx.history, &fx.ledger, &FailingQuotes);

    assert_eq!(executed, 1);
    let txs = fx.ledger.read_all().unwrap();
    assert_eq!(txs.len(), 1);
    // 250 / fallback 100 = 2 whole shares, not zero and not an error.
    assert_eq!(txs[0].quantity, 2);
    assert_eq!(txs[0].price, *autovest::quotes::FALLBACK_PRICE);
}

#[test]
fn non_positive_quote_falls_back_to_default_price() {
    let fx = fixture(
        r#"[{"name": "dca", "amount": "500", "frequency": "D", "startDate": "2024-01-01", "symbol": "VOO"}]"#,
    );
    let quotes = FixedQuotes(Decimal::ZERO);

    run_due_investments(day(2024, 1, 2), &fx.plans, &fx.history, &fx.ledger, &quotes);

    let txs = fx.ledger.read_all().unwrap();
    assert_eq!(txs[0].quantity, 5);
    assert_eq!(txs[0].price, *autovest::quotes::FALLBACK_PRICE);
}

#[test]
fn zero_share_execution_still_consumes_the_day() {
    let fx = fixture(
        r#"[{"name": "tiny", "amount": "50", "frequency": "D", "startDate": "2024-01-01", "symbol": "VOO"}]"#,
    );

    // 50 buys no whole share at 100: nothing recorded, but the day is spent.
    let executed = run_due_investments(
        day(2024, 1, 2),
        &fx.plans,
        &fx.history,
        &fx.ledger,
        &FixedQuotes(Decimal::from(100)),
    );
    assert_eq!(executed, 1);
    assert!(fx.ledger.read_all().unwrap().is_empty());
    assert_eq!(fx.history.load()["VOO-tiny"], day(2024, 1, 2));

    // A cheaper quote later the same day does not get a second attempt.
    let again = run_due_investments(
        day(2024, 1, 2),
        &fx.plans,
        &fx.history,
        &fx.ledger,
        &FixedQuotes(Decimal::from(10)),
    );
    assert_eq!(again, 0);
    assert!(fx.ledger.read_all().unwrap().is_empty());
}

#[test]
fn plans_execute_in_import_order() {
    let fx = fixture(
        r#"[
            {"name": "a", "amount": "200", "frequency": "D", "startDate": "2024-01-01", "symbol": "AAA"},
            {"name": "b", "amount": "200", "frequency": "D", "startDate": "2024-01-01", "symbol": "BBB"}
        ]"#,
    );
    let quotes = FixedQuotes(Decimal::from(100));

    run_due_investments(day(2024, 1, 2), &fx.plans, &fx.history, &fx.ledger, &quotes);

    let txs = fx.ledger.read_all().unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].symbol, "AAA");
    assert_eq!(txs[1].symbol, "BBB");
}

#[test]
fn colliding_plan_keys_share_one_daily_slot() {
    // Same symbol and name: the second plan lands on the first one's
    // history key and is treated as already run.
    let fx = fixture(
        r#"[
            {"name": "dup", "amount": "500", "frequency": "D", "startDate": "2024-01-01", "symbol": "AAPL"},
            {"name": "dup", "amount": "900", "frequency": "D", "startDate": "2024-01-01", "symbol": "AAPL"}
        ]"#,
    );
    let quotes = FixedQuotes(Decimal::from(100));

    let executed =
        run_due_investments(day(2024, 1, 2), &fx.plans, &fx.history, &fx.ledger, &quotes);

    assert_eq!(executed, 1);
    let txs = fx.ledger.read_all().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].quantity, 5);
}

#[test]
fn corrupt_history_starts_empty_and_executes() {
    let fx = fixture(MONTHLY_AAPL);
    fs::write(fx.history.path(), "garbage").unwrap();
    let quotes = FixedQuotes(Decimal::from(100));

    let executed =
        run_due_investments(day(2024, 2, 15), &fx.plans, &fx.history, &fx.ledger, &quotes);

    assert_eq!(executed, 1);
    assert_eq!(fx.history.load()["AAPL-retirement"], day(2024, 2, 15));
}

#[test]
fn unavailable_ledger_does_not_abort_the_run() {
    let fx = fixture(MONTHLY_AAPL);
    fs::write(fx.ledger.path(), "{broken").unwrap();
    let quotes = FixedQuotes(Decimal::from(100));

    // The append fails and is logged; the plan still counts as executed and
    // the corrupt ledger is left untouched.
    let executed =
        run_due_investments(day(2024, 2, 15), &fx.plans, &fx.history, &fx.ledger, &quotes);

    assert_eq!(executed, 1);
    assert!(fx.ledger.read_all().is_err());
    assert_eq!(fs::read_to_string(fx.ledger.path()).unwrap(), "{broken");
    assert_eq!(fx.history.load()["AAPL-retirement"], day(2024, 2, 15));
}

#[test]
fn missing_plan_store_runs_to_completion() {
    let dir = tempfile::tempdir().unwrap();
    let plans = PlanImporter::new(dir.path().join("plans.json"));
    let history = HistoryStore::new(dir.path().join("history.json"));
    let ledger = Ledger::new(dir.path().join("ledger.json"));

    let executed = run_due_investments(
        day(2024, 1, 2),
        &plans,
        &history,
        &ledger,
        &FixedQuotes(Decimal::from(100)),
    );

    assert_eq!(executed, 0);
    assert!(ledger.read_all().unwrap().is_empty());
}
