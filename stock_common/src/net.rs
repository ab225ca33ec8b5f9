//! Shared HTTP constants and helpers used by server and client.

/// Default HTTP port of the stock server.
pub const DEFAULT_PORT: u16 = 3000;
/// Route listing every known symbol.
pub const STOCKS_PATH: &str = "/stocks";
/// Query parameter overriding the as-of date of a series request.
pub const AS_OF_PARAM: &str = "asOf";
/// Body message of a failed symbol listing.
pub const LIST_FAILURE_MESSAGE: &str = "Failed to retrieve stock symbols";
/// Body message of a series request that failed for an internal reason.
pub const SERIES_FAILURE_MESSAGE: &str = "Failed to retrieve stock data";

/// Helper to format a host and port like "host:port".
pub fn addr(host: &str, port: u16) -> String {
    format!("{}:{}", host, port)
}

/// Path of the series resource for `symbol`.
pub fn series_path(symbol: &str) -> String {
    format!("{}/{}", STOCKS_PATH, symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_paths() {
        assert_eq!(addr("0.0.0.0", DEFAULT_PORT), "0.0.0.0:3000");
        assert_eq!(series_path("AAPL"), "/stocks/AAPL");
    }
}
