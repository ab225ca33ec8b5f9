//! Command-line arguments for the stock client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Base URL of the stock server.
    #[arg(long, env = "STOCK_SERVER", default_value = "http://127.0.0.1:3000")]
    pub server: String,

    /// What to fetch.
    #[command(subcommand)]
    pub command: Command,
}

/// Client operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every symbol the server knows.
    List,
    /// Print the price series of one symbol.
    Series {
        /// Symbol to fetch, case-sensitive.
        symbol: String,

        /// Last timestamp of the series (RFC 3339); the server uses "now" when omitted.
        #[arg(long)]
        as_of: Option<DateTime<Utc>>,

        /// How often to repeat a request that failed with a generation error.
        #[arg(long, default_value_t = 3)]
        retries: u32,

        /// Pause between retries in milliseconds.
        #[arg(long, default_value_t = 500)]
        retry_delay_ms: u64,
    },
}
