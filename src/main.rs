mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use tinvest_history::fetch::{get_ticker_history, is_valid_moex_ticker};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::History {
            ticker,
            days,
            token,
        } => {
            let token = match token {
                Some(token) => token,
                None => std::env::var("TINVEST_TOKEN")
                    .context("Invest token missing: pass --token or set TINVEST_TOKEN")?,
            };

            let records = get_ticker_history(&token, &ticker, days).await?;

            if records.is_empty() {
                println!("No daily candles found for {}", ticker);
                return Ok(());
            }

            println!(
                "{:<12} {:>10} {:>10} {:>10} {:>10}",
                "date", "open", "high", "low", "close"
            );
            for record in &records {
                println!(
                    "{:<12} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                    record.date.to_string(),
                    record.open,
                    record.high,
                    record.low,
                    record.close
                );
            }
        }
        Commands::Check { ticker } => {
            // The probe blocks on its HTTP call, so it gets pushed off the
            // runtime thread here.
            let probe_ticker = ticker.clone();
            let listed =
                tokio::task::spawn_blocking(move || is_valid_moex_ticker(&probe_ticker)).await?;

            if listed {
                println!("{} is listed on MOEX", ticker.to_uppercase());
            } else {
                println!("{} not found on MOEX", ticker.to_uppercase());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
