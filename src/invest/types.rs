use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Fixed-point decimal as transported by the Invest API: whole `units` plus
/// a fractional `nano` part in billionths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Quotation {
    #[serde(default, deserialize_with = "i64_from_string_or_number")]
    pub units: i64,
    #[serde(default)]
    pub nano: i32,
}

impl Quotation {
    pub fn to_f64(self) -> f64 {
        self.units as f64 + f64::from(self.nano) / 1e9
    }
}

/// A tradable instrument row returned by instrument search.
#[derive(Debug, Clone, Deserialize)]
pub struct Instrument {
    pub figi: String,
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub name: String,
}

/// One candle as returned by the market-data service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryCandle {
    pub time: DateTime<Utc>,
    pub open: Quotation,
    pub high: Quotation,
    pub low: Quotation,
    pub close: Quotation,
    #[serde(default, deserialize_with = "i64_from_string_or_number")]
    pub volume: i64,
    #[serde(default)]
    pub is_complete: bool,
}

/// Candle granularity, serialized with the wire names of the API contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CandleInterval {
    #[serde(rename = "CANDLE_INTERVAL_1_MIN")]
    Min1,
    #[serde(rename = "CANDLE_INTERVAL_5_MIN")]
    Min5,
    #[serde(rename = "CANDLE_INTERVAL_15_MIN")]
    Min15,
    #[serde(rename = "CANDLE_INTERVAL_HOUR")]
    Hour,
    #[serde(rename = "CANDLE_INTERVAL_DAY")]
    Day,
}

#[derive(Debug, Default, Deserialize)]
pub struct FindInstrumentResponse {
    #[serde(default)]
    pub instruments: Vec<Instrument>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GetCandlesResponse {
    #[serde(default)]
    pub candles: Vec<HistoryCandle>,
}

// The protobuf-JSON mapping sends int64 values as strings and omits
// zero-valued fields entirely.
fn i64_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(raw) => raw.parse::<i64>().map_err(serde::de::Error::custom),
    }
}
