//! Stock symbols and the registry that owns the set of valid ones.
//!
//! The registry is built once at startup and never mutated afterwards, so it can be
//! shared between request handlers behind an `Arc` without locking.
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::io::BufRead;

use crate::error::StockError;
use crate::result::Result;

/// Symbols served when no symbols file is configured.
pub const DEFAULT_SYMBOLS: &[&str] = &["AAPL", "GOOG", "MSFT", "AMZN", "TSLA", "NVDA", "META"];

/// Case-sensitive identifier of a tradable instrument, e.g. `AAPL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Returns the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait providing file parsing for symbol registries.
pub trait SymbolParser: Sized {
    /// Parses symbols from a buffered reader.
    ///
    /// Symbols may be separated by commas, spaces, or new lines. Blank entries are
    /// skipped and lines starting with `#` are treated as comments.
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Self>;
}

/// Immutable, insertion-ordered set of known symbols.
#[derive(Debug, Clone)]
pub struct SymbolRegistry {
    ordered: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolRegistry {
    /// Builds a registry from symbols in the order they should be listed.
    ///
    /// Duplicates keep their first position. Empty symbols and an empty set are
    /// rejected with [`StockError::InvalidConfig`].
    pub fn new<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();

        for symbol in symbols {
            let symbol = symbol.into();
            if symbol.is_empty() {
                return Err(StockError::InvalidConfig(
                    "symbol must not be empty".to_string(),
                ));
            }
            if !index.contains_key(&symbol) {
                index.insert(symbol.clone(), ordered.len());
                ordered.push(Symbol(symbol));
            }
        }

        if ordered.is_empty() {
            return Err(StockError::InvalidConfig(
                "registry needs at least one symbol".to_string(),
            ));
        }
        Ok(Self { ordered, index })
    }

    /// All known symbols in insertion order.
    pub fn list_symbols(&self) -> &[Symbol] {
        &self.ordered
    }

    /// Exact, case-sensitive membership test.
    pub fn is_known(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    /// Looks up the registered `Symbol` for `symbol`.
    pub fn get(&self, symbol: &str) -> Option<&Symbol> {
        self.index.get(symbol).map(|&pos| &self.ordered[pos])
    }

    /// Number of known symbols.
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Always `false` for a successfully constructed registry.
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self {
            ordered: DEFAULT_SYMBOLS.iter().map(|s| Symbol(s.to_string())).collect(),
            index: DEFAULT_SYMBOLS
                .iter()
                .enumerate()
                .map(|(pos, s)| (s.to_string(), pos))
                .collect(),
        }
    }
}

impl SymbolParser for SymbolRegistry {
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut symbols = Vec::new();

        for (line_no, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            for token in trimmed_line.split(|c: char| c == ',' || c.is_whitespace()) {
                if token.is_empty() {
                    continue;
                }
                if !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-') {
                    return Err(StockError::ParseSymbolsFile(format!(
                        "line {}: invalid symbol '{}'",
                        line_no + 1,
                        token
                    )));
                }
                symbols.push(token.to_string());
            }
        }

        if symbols.is_empty() {
            return Err(StockError::ParseSymbolsFile(
                "no symbols found".to_string(),
            ));
        }
        Self::new(symbols)
    }
}
