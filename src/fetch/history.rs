use chrono::{Duration, NaiveDate, Utc};

use crate::invest::{CandleInterval, InvestClient, MarketApi};

use super::FetchResult;

/// One day of a ticker's price history.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Resolve `ticker` to a FIGI and download daily candles for the trailing
/// `days` calendar days. The first search match is taken as the instrument;
/// a ticker with no matches yields an empty list. Candles are returned in
/// upstream order.
pub fn fetch_history(
    api: &impl MarketApi,
    ticker: &str,
    days: i64,
) -> FetchResult<Vec<CandleRecord>> {
    let instruments = api.find_instruments(ticker)?;

    let Some(instrument) = instruments.first() else {
        log::debug!("No instruments matched query {}", ticker);
        return Ok(Vec::new());
    };

    let end = Utc::now();
    let start = end - Duration::days(days);

    let candles = api.candles(&instrument.figi, start, end, CandleInterval::Day)?;

    let records = candles
        .iter()
        .map(|candle| CandleRecord {
            date: candle.time.date_naive(),
            open: candle.open.to_f64(),
            high: candle.high.to_f64(),
            low: candle.low.to_f64(),
            close: candle.close.to_f64(),
        })
        .collect();

    Ok(records)
}

/// Fetch daily history without stalling the async caller: the whole blocking
/// network sequence runs on a worker thread and the caller suspends until it
/// finishes. Once dispatched it cannot be cancelled. Errors from the
/// brokerage client propagate unmodified.
pub async fn get_ticker_history(
    token: &str,
    ticker: &str,
    days: i64,
) -> FetchResult<Vec<CandleRecord>> {
    let token = token.to_string();
    let ticker = ticker.to_string();

    tokio::task::spawn_blocking(move || {
        let client = InvestClient::new(&token)?;
        fetch_history(&client, &ticker, days)
    })
    .await?
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::error::Result;
    use crate::invest::{HistoryCandle, Instrument, Quotation};

    struct FakeApi {
        instruments: Vec<Instrument>,
        candles: Vec<HistoryCandle>,
        requested: RefCell<Option<(String, DateTime<Utc>, DateTime<Utc>)>>,
    }

    impl FakeApi {
        fn new(instruments: Vec<Instrument>, candles: Vec<HistoryCandle>) -> Self {
            Self {
                instruments,
                candles,
                requested: RefCell::new(None),
            }
        }
    }

    impl MarketApi for FakeApi {
        fn find_instruments(&self, _query: &str) -> Result<Vec<Instrument>> {
            Ok(self.instruments.clone())
        }

        fn candles(
            &self,
            figi: &str,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
            _interval: CandleInterval,
        ) -> Result<Vec<HistoryCandle>> {
            *self.requested.borrow_mut() = Some((figi.to_string(), from, to));
            Ok(self.candles.clone())
        }
    }

    fn instrument(figi: &str) -> Instrument {
        Instrument {
            figi: figi.to_string(),
            ticker: "SBER".to_string(),
            name: "Sberbank".to_string(),
        }
    }

    fn candle(day: u32, units: i64, nano: i32) -> HistoryCandle {
        let quotation = Quotation { units, nano };
        HistoryCandle {
            time: Utc.with_ymd_and_hms(2024, 1, day, 7, 0, 0).unwrap(),
            open: quotation,
            high: quotation,
            low: quotation,
            close: quotation,
            volume: 1_000,
            is_complete: true,
        }
    }

    #[test]
    fn empty_search_yields_empty_history() {
        let api = FakeApi::new(Vec::new(), Vec::new());

        let records = fetch_history(&api, "NOPE", 30).unwrap();

        assert!(records.is_empty());
        assert!(api.requested.borrow().is_none());
    }

    #[test]
    fn maps_candles_to_dated_records() {
        let candles: Vec<HistoryCandle> =
            (1..=7).map(|day| candle(day, 250, 160_000_000)).collect();
        let api = FakeApi::new(vec![instrument("FIGI1")], candles);

        let records = fetch_history(&api, "SBER", 7).unwrap();

        assert_eq!(records.len(), 7);
        assert_eq!(records[0].date.to_string(), "2024-01-01");
        assert_eq!(records[6].date.to_string(), "2024-01-07");
        for record in &records {
            assert!((record.open - 250.16).abs() < 1e-9);
            assert!((record.close - 250.16).abs() < 1e-9);
        }
    }

    #[test]
    fn preserves_upstream_candle_order() {
        // Out-of-order input must come back in the same order.
        let candles = vec![candle(5, 10, 0), candle(2, 11, 0), candle(9, 12, 0)];
        let api = FakeApi::new(vec![instrument("FIGI1")], candles);

        let records = fetch_history(&api, "SBER", 30).unwrap();

        let days: Vec<String> = records.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(days, ["2024-01-05", "2024-01-02", "2024-01-09"]);
    }

    #[test]
    fn requests_first_match_and_trailing_window() {
        let api = FakeApi::new(
            vec![instrument("FIGI1"), instrument("FIGI2")],
            vec![candle(1, 100, 0)],
        );

        fetch_history(&api, "SBER", 7).unwrap();

        let requested = api.requested.borrow();
        let (figi, from, to) = requested.as_ref().unwrap();
        assert_eq!(figi, "FIGI1");
        assert_eq!(*to - *from, Duration::days(7));
    }
}
