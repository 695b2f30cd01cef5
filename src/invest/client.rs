use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::blocking::{Client, Response};
use serde_json::{json, Value};

use crate::config::{Config, InvestConfig};
use crate::error::{AppError, Context, Result};
use crate::invest::types::{
    CandleInterval, FindInstrumentResponse, GetCandlesResponse, HistoryCandle, Instrument,
};
use crate::invest::MarketApi;

const FIND_INSTRUMENT_PATH: &str =
    "tinkoff.public.invest.api.contract.v1.InstrumentsService/FindInstrument";
const GET_CANDLES_PATH: &str =
    "tinkoff.public.invest.api.contract.v1.MarketDataService/GetCandles";

/// Blocking session against the Invest REST API, scoped to one token.
/// Dropping the client releases the underlying connection pool.
pub struct InvestClient {
    http: Client,
    token: String,
    config: InvestConfig,
}

impl InvestClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_config(token, Config::builtin().invest)
    }

    /// Construct against a custom endpoint configuration.
    pub fn with_config(token: &str, config: InvestConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to construct Invest HTTP client")?;

        Ok(Self {
            http,
            token: token.to_string(),
            config,
        })
    }

    fn call(&self, path: &str, body: Value) -> Result<Response> {
        let url = format!("{}/{}", self.config.base_url, path);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header("x-app-name", self.config.app_name.as_str())
            .json(&body)
            .send()
            .with_context(|| format!("Invest request to {} failed", path))?;

        if !response.status().is_success() {
            return Err(AppError::message(format!(
                "Invest request to {} returned status {}",
                path,
                response.status()
            )));
        }

        Ok(response)
    }
}

impl MarketApi for InvestClient {
    fn find_instruments(&self, query: &str) -> Result<Vec<Instrument>> {
        let response = self.call(FIND_INSTRUMENT_PATH, json!({ "query": query }))?;

        let parsed: FindInstrumentResponse = response
            .json()
            .context("Failed to parse FindInstrument response")?;

        Ok(parsed.instruments)
    }

    fn candles(
        &self,
        figi: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        interval: CandleInterval,
    ) -> Result<Vec<HistoryCandle>> {
        let body = json!({
            "figi": figi,
            "from": from.to_rfc3339_opts(SecondsFormat::Secs, true),
            "to": to.to_rfc3339_opts(SecondsFormat::Secs, true),
            "interval": interval,
        });

        let response = self.call(GET_CANDLES_PATH, body)?;

        let parsed: GetCandlesResponse = response
            .json()
            .context("Failed to parse GetCandles response")?;

        Ok(parsed.candles)
    }
}
