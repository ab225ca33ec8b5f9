//! Command-line arguments for the stock server.
//!
//! Every option can also be provided through the environment (`STOCK_*`).
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use stock_common::net::DEFAULT_PORT;
use stock_common::{
    FaultPolicy, GeneratorConfig, Interval, Result, SymbolParser, SymbolRegistry,
};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Interface to bind the HTTP listener to.
    #[arg(long, env = "STOCK_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// HTTP port.
    #[arg(long, env = "STOCK_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory with the browser chart (`index.html`, `scripts.js`).
    #[arg(
        long,
        env = "STOCK_STATIC_DIR",
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/static")
    )]
    pub static_dir: PathBuf,

    /// Text file with the symbols to serve.
    /// Symbols may be separated by commas, spaces, or new lines.
    #[arg(long, env = "STOCK_SYMBOLS_FILE")]
    pub symbols_file: Option<PathBuf>,

    /// Number of points per series.
    #[arg(long, env = "STOCK_WINDOW", default_value_t = 30)]
    pub window: usize,

    /// Spacing between points.
    #[arg(long, env = "STOCK_INTERVAL", value_enum, default_value_t = Interval::Day)]
    pub interval: Interval,

    /// Largest absolute price change between two points.
    #[arg(long, env = "STOCK_MAX_STEP", default_value_t = 5.0)]
    pub max_step: f64,

    /// Probability that a series request fails with a generation error.
    #[arg(long, env = "STOCK_FAILURE_RATE", default_value_t = 0.05)]
    pub failure_rate: f64,

    /// Fixed seed for reproducible series.
    #[arg(long, env = "STOCK_SEED")]
    pub seed: Option<u64>,
}

impl Args {
    /// Loads the registry from `--symbols-file`, or falls back to the default symbols.
    pub fn load_registry(&self) -> Result<SymbolRegistry> {
        match &self.symbols_file {
            Some(path) => {
                let file = File::open(path)?;
                SymbolRegistry::parse_from_reader(BufReader::new(file))
            }
            None => Ok(SymbolRegistry::default()),
        }
    }

    /// Builds the generator configuration. Values are validated by the generator.
    pub fn generator_config(&self) -> Result<GeneratorConfig> {
        Ok(GeneratorConfig {
            window: self.window,
            interval: self.interval,
            max_step: self.max_step,
            fault_policy: FaultPolicy::from_rate(self.failure_rate)?,
            seed: self.seed,
        })
    }
}
