//! Deterministic synthetic price series.
//!
//! `SeriesGenerator` turns a known symbol and an as-of date into a fixed-length random
//! walk that ends exactly at the as-of date. Randomness is always call-local: either an
//! `Rng` handed in by the caller, or a `StdRng` seeded per call. With a configured seed
//! the same `(symbol, as_of)` always yields the same series.
//!
//! Generation can also fail on purpose. The [`FaultPolicy`] models an unstable upstream
//! source and produces [`StockError::GenerationFailure`], which callers keep apart from
//! [`StockError::UnknownSymbol`].

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use crate::error::StockError;
use crate::registry::SymbolRegistry;
use crate::result::Result;
use crate::series::{Interval, PricePoint, Series};

/// Upper bound for `GeneratorConfig::window`.
pub const MAX_WINDOW: usize = 10_000;

/// Decides when a generation call deliberately fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaultPolicy {
    /// Never inject a failure.
    Never,
    /// Fail every call for a known symbol.
    Always,
    /// Fail with the given probability per call, `0.0..=1.0`.
    Random {
        /// Probability of failure.
        rate: f64,
    },
}

impl FaultPolicy {
    /// Builds a policy from a failure rate, collapsing the edges to `Never`/`Always`.
    pub fn from_rate(rate: f64) -> Result<Self> {
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(StockError::InvalidConfig(format!(
                "failure rate must be within 0..=1, got {rate}"
            )));
        }
        Ok(if rate == 0.0 {
            FaultPolicy::Never
        } else if rate == 1.0 {
            FaultPolicy::Always
        } else {
            FaultPolicy::Random { rate }
        })
    }

    /// Returns `true` when this call should fail. Only `Random` consumes randomness.
    pub fn trips<R: Rng>(&self, rng: &mut R) -> bool {
        match *self {
            FaultPolicy::Never => false,
            FaultPolicy::Always => true,
            FaultPolicy::Random { rate } => rng.random_bool(rate),
        }
    }

    fn validate(&self) -> Result<()> {
        if let FaultPolicy::Random { rate } = *self {
            Self::from_rate(rate)?;
        }
        Ok(())
    }
}

/// Shape of generated series.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of points per series.
    pub window: usize,
    /// Spacing between points.
    pub interval: Interval,
    /// Largest absolute change between two consecutive values.
    pub max_step: f64,
    /// Failure injection.
    pub fault_policy: FaultPolicy,
    /// Fixed seed; `None` seeds every call from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            window: 30,
            interval: Interval::Day,
            max_step: 5.0,
            fault_policy: FaultPolicy::Random { rate: 0.05 },
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Checks every field, returning the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 || self.window > MAX_WINDOW {
            return Err(StockError::InvalidConfig(format!(
                "window must be within 1..={MAX_WINDOW}, got {}",
                self.window
            )));
        }
        if !self.max_step.is_finite() || self.max_step < 0.0 {
            return Err(StockError::InvalidConfig(format!(
                "max step must be finite and non-negative, got {}",
                self.max_step
            )));
        }
        self.fault_policy.validate()
    }
}

/// Produces price series for symbols of the registry it holds.
#[derive(Debug, Clone)]
pub struct SeriesGenerator {
    registry: Arc<SymbolRegistry>,
    config: GeneratorConfig,
}

impl SeriesGenerator {
    /// Creates a generator after validating `config`.
    pub fn new(registry: Arc<SymbolRegistry>, config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// Registry used to validate symbols.
    pub fn registry(&self) -> &Arc<SymbolRegistry> {
        &self.registry
    }

    /// Active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the series for `symbol` ending at `as_of`, using a call-local RNG.
    ///
    /// With a configured seed the RNG is seeded from the seed and the symbol, so two
    /// calls with identical inputs return identical output.
    pub fn generate(&self, symbol: &str, as_of: DateTime<Utc>) -> Result<Series> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ symbol_hash(symbol)),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        self.generate_with_rng(symbol, as_of, &mut rng)
    }

    /// Generates the series for `symbol` ending at `as_of`, drawing from `rng`.
    ///
    /// - Unknown symbols fail with [`StockError::UnknownSymbol`] before any randomness
    ///   is consumed.
    /// - A tripped fault policy fails with [`StockError::GenerationFailure`].
    /// - A window reaching past the representable date range fails with
    ///   [`StockError::Internal`].
    ///
    /// On success the series has exactly `window` points, the last one at `as_of`.
    pub fn generate_with_rng<R: Rng>(
        &self,
        symbol: &str,
        as_of: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Series> {
        let Some(known) = self.registry.get(symbol) else {
            return Err(StockError::UnknownSymbol(symbol.to_string()));
        };
        if self.config.fault_policy.trips(rng) {
            return Err(StockError::GenerationFailure);
        }

        let step = self.config.interval.step();
        let steps_back = i32::try_from(self.config.window - 1)
            .map_err(|_| StockError::Internal("window too large".to_string()))?;
        let start = step
            .checked_mul(steps_back)
            .and_then(|span| as_of.checked_sub_signed(span))
            .ok_or_else(|| {
                StockError::Internal(format!("series window does not fit before {as_of}"))
            })?;

        let max_step = self.config.max_step;
        let mut value = baseline(symbol);
        let mut timestamp = start;
        let mut points = Vec::with_capacity(self.config.window);

        for i in 0..self.config.window {
            if i > 0 {
                timestamp += step;
                value = (value + rng.random_range(-max_step..=max_step)).max(0.0);
            }
            points.push(PricePoint { timestamp, value });
        }

        Ok(Series::new(known.clone(), points))
    }
}

/// Starting value of the walk, `50.00..=249.99`, stable per symbol.
fn baseline(symbol: &str) -> f64 {
    50.0 + (symbol_hash(symbol) % 20_000) as f64 / 100.0
}

/// FNV-1a, stable across processes.
fn symbol_hash(symbol: &str) -> u64 {
    symbol.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}
