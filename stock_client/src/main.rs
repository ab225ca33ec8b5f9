//! Stock Client — a terminal counterpart of the browser chart. It asks the stock server
//! for its symbol list or for one symbol's price series and prints the result.
//!
//! Usage example (CLI):
//! ```bash
//! stock_client --server http://127.0.0.1:3000 list
//! stock_client --server http://127.0.0.1:3000 series AAPL --as-of 2024-01-10T00:00:00Z
//! ```
//!
//! A series request that fails with a generation error is retried (`--retries`); an
//! unknown symbol is reported immediately together with the list of valid symbols.
#![warn(missing_docs)]
mod args;
mod error;
mod fetcher;
mod result;

use crate::args::{Args, Command};
use crate::fetcher::{StockFetcher, with_retries};
use crate::result::Result;
use clap::Parser;
use log::{error, info};
use std::time::Duration;
use stock_common::{ErrorKind, PricePoint};

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let fetcher = StockFetcher::new(&args.server);

    match args.command {
        Command::List => {
            let symbols = fetcher.symbols().await?;
            info!("{} symbols available", symbols.len());
            for symbol in symbols {
                println!("{}", symbol);
            }
        }
        Command::Series {
            symbol,
            as_of,
            retries,
            retry_delay_ms,
        } => {
            let delay = Duration::from_millis(retry_delay_ms);
            let result = with_retries(retries, delay, || fetcher.series(&symbol, as_of)).await;

            match result {
                Ok(points) => print_series(&symbol, &points),
                Err(e) => {
                    error!("Error fetching stock data for {}: {}", symbol, e);
                    if e.kind() == Some(ErrorKind::UnknownSymbol) {
                        if let Ok(symbols) = fetcher.symbols().await {
                            info!("Known symbols: {}", symbols.join(", "));
                        }
                    }
                    return Err(e);
                }
            }
        }
    }
    Ok(())
}

fn print_series(symbol: &str, points: &[PricePoint]) {
    println!("{:<30} {:>12}", "TIMESTAMP", "VALUE");
    for point in points {
        println!("{:<30} {:>12.2}", point.timestamp.to_rfc3339(), point.value);
    }

    let (min, max) = points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.value), hi.max(p.value))
    });
    if let Some(last) = points.last() {
        info!(
            "{}: {} points, last={:.2} min={:.2} max={:.2}",
            symbol,
            points.len(),
            last.value,
            min,
            max
        );
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
