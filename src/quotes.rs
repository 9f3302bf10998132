// Copyright (c) 2025 Autovest Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Deserialize;

const UA: &str = concat!("autovest/", env!("CARGO_PKG_VERSION"));

/// Price substituted when the live lookup fails, times out, or returns a
/// non-positive value. A fixed default, not a live quote.
pub static FALLBACK_PRICE: Lazy<Decimal> = Lazy::new(|| Decimal::from(100));

/// Latest traded price for a single symbol. Implementations must bound
/// their own wait; callers block on this synchronously.
pub trait QuoteProvider {
    fn latest_price(&self, symbol: &str) -> Result<Decimal>;
}

#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct YahooResponse {
    quoteResponse: QuoteResponse,
}
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    result: Vec<YahooQuote>,
}
#[derive(Debug, Deserialize)]
struct YahooQuote {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    symbol: Option<String>,
}

/// Quote lookup against the Yahoo Finance v7 quote endpoint.
pub struct YahooQuotes {
    client: reqwest::blocking::Client,
}

impl YahooQuotes {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent(UA)
            .build()?;
        Ok(Self { client })
    }
}

impl QuoteProvider for YahooQuotes {
    fn latest_price(&self, symbol: &str) -> Result<Decimal> {
        let url = format!(
            "https://query1.finance.yahoo.com/v7/finance/quote?symbols={}",
            symbol
        );
        let resp = self.client.get(url).send()?.error_for_status()?;
        let yr: YahooResponse = resp.json()?;
        let px = yr
            .quoteResponse
            .result
            .into_iter()
            .find(|q| q.symbol.as_deref() == Some(symbol))
            .and_then(|q| q.regular_market_price)
            .ok_or_else(|| anyhow!("No quote for {}", symbol))?;
        Decimal::from_f64_retain(px)
            .ok_or_else(|| anyhow!("Unrepresentable price {} for {}", px, symbol))
    }
}
