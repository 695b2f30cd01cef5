use chrono::{DateTime, Utc};

use crate::error::Result;

pub mod client;
pub mod types;

pub use client::InvestClient;
pub use types::{CandleInterval, HistoryCandle, Instrument, Quotation};

/// The two brokerage operations history fetching depends on: instrument
/// search and candle retrieval.
pub trait MarketApi {
    fn find_instruments(&self, query: &str) -> Result<Vec<Instrument>>;

    fn candles(
        &self,
        figi: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        interval: CandleInterval,
    ) -> Result<Vec<HistoryCandle>>;
}
