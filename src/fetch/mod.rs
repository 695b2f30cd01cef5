use crate::error::Result;

pub mod history;
pub mod validate;

pub use history::{fetch_history, get_ticker_history, CandleRecord};
pub use validate::is_valid_moex_ticker;

pub type FetchResult<T> = Result<T>;
