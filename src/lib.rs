pub mod config;
pub mod error;
pub mod fetch;
pub mod invest;

pub use error::{AppError, Result};
pub use fetch::{get_ticker_history, is_valid_moex_ticker, CandleRecord};
