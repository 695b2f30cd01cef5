use std::time::Duration;

use chrono::Local;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;

use crate::config::{Config, MoexConfig};
use crate::error::Context;

use super::FetchResult;

/// Best-effort check that a ticker trades on the Moscow Exchange, probing
/// the ISS candle feed for the last day. Every failure mode (transport
/// error, timeout, bad status, malformed payload) reports `false`; callers
/// cannot tell an absent ticker from an unreachable service.
///
/// The call blocks; async callers should run it on a worker thread.
pub fn is_valid_moex_ticker(ticker: &str) -> bool {
    match probe_moex_ticker(ticker, &Config::builtin().moex) {
        Ok(listed) => listed,
        Err(err) => {
            log::debug!("MOEX probe for {} failed: {}", ticker, err);
            false
        }
    }
}

fn probe_moex_ticker(ticker: &str, config: &MoexConfig) -> FetchResult<bool> {
    let end = Local::now().date_naive();
    let start = end - chrono::Duration::days(1);
    let from = start.format("%Y-%m-%d").to_string();
    let till = end.format("%Y-%m-%d").to_string();

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to construct MOEX HTTP client")?;

    let response = client
        .get(candles_url(&config.base_url, ticker))
        .query(&[
            ("from", from.as_str()),
            ("till", till.as_str()),
            ("interval", "24"),
            ("iss.meta", "off"),
        ])
        .send()
        .with_context(|| format!("MOEX candles request failed for {}", ticker))?;

    if response.status() != StatusCode::OK {
        return Ok(false);
    }

    let body: Value = serde_json::from_str(&response.text()?)?;
    Ok(has_candle_rows(&body))
}

fn candles_url(base_url: &str, ticker: &str) -> String {
    format!("{}/{}/candles.json", base_url, ticker.to_uppercase())
}

fn has_candle_rows(body: &Value) -> bool {
    body.get("candles")
        .and_then(|candles| candles.get("data"))
        .and_then(Value::as_array)
        .map(|rows| !rows.is_empty())
        .unwrap_or(false)
}
