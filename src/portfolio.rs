// Copyright (c) 2025 Autovest Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::ledger::{Ledger, LedgerError};
use crate::models::{Holdings, TradeAction, Transaction};

/// Fold an ordered transaction sequence into net holdings.
///
/// No transaction is rejected as impossible: running quantities may go
/// negative mid-fold, and only the final totals are filtered. A symbol
/// whose folded quantity is <= 0 appears in neither result map.
pub fn fold_transactions(transactions: &[Transaction]) -> Holdings {
    let mut quantities: HashMap<String, i64> = HashMap::new();
    let mut values: HashMap<String, Decimal> = HashMap::new();

    for tx in transactions {
        let notional = Decimal::from(tx.quantity) * tx.price;
        let (signed_qty, signed_value) = match tx.action {
            TradeAction::Buy => (tx.quantity, notional),
            TradeAction::Sell => (-tx.quantity, -notional),
        };
        *quantities.entry(tx.symbol.clone()).or_default() += signed_qty;
        *values.entry(tx.symbol.clone()).or_insert(Decimal::ZERO) += signed_value;
    }

    quantities.retain(|_, qty| *qty > 0);
    values.retain(|symbol, _| quantities.contains_key(symbol));

    Holdings { quantities, values }
}

/// Recompute holdings from the ledger's current contents. Derived state
/// only; nothing is cached between calls. An unavailable ledger propagates
/// as-is so viewers can distinguish it from an empty one.
pub fn compute_holdings(ledger: &Ledger) -> Result<Holdings, LedgerError> {
    Ok(fold_transactions(&ledger.read_all()?))
}
