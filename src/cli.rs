use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tinvest-history")]
#[command(about = "Fetch daily candle history from Tinkoff Invest and check tickers against MOEX")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch daily OHLC history for a ticker
    History {
        /// Exchange ticker symbol (e.g. SBER)
        ticker: String,

        /// Trailing window size in calendar days
        #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(i64).range(1..))]
        days: i64,

        /// Invest API token; defaults to the TINVEST_TOKEN environment variable
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Check whether a ticker is listed on the Moscow Exchange
    Check {
        /// Ticker symbol, any case
        ticker: String,
    },
}
