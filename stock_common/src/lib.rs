//!
//! Common types and the series core shared by the stock server and client.
//!
//! This crate aggregates:
//! - `error` — unified error type `StockError` and its `ErrorKind` discriminant.
//! - `result` — handy `Result<T, StockError>` alias.
//! - `registry` — `Symbol` and the immutable `SymbolRegistry`.
//! - `series` — `PricePoint`, `Series` and the `Interval` between points.
//! - `generator` — `SeriesGenerator`, the seeded random-walk with fault injection.
//! - `net` — HTTP routes, default port, and small helpers.
#![warn(missing_docs)]
pub mod error;
pub mod generator;
pub mod net;
pub mod registry;
pub mod result;
pub mod series;

pub use error::{ErrorKind, StockError};
pub use generator::{FaultPolicy, GeneratorConfig, SeriesGenerator};
pub use registry::{Symbol, SymbolParser, SymbolRegistry};
pub use result::Result;
pub use series::{Interval, PricePoint, Series};
