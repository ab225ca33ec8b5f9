//! HTTP routes of the stock server.
//!
//! - `GET /stocks`, `GET /stocks/` — `{ "stockSymbols": [...] }`.
//! - `GET /stocks/{symbol}[?asOf=<RFC 3339>]` — JSON array of `{ timestamp, value }`.
//! - anything else — static files of the browser chart.
//!
//! Domain failures (`UnknownSymbol`, `GenerationFailure`) answer `404` with their exact
//! message; clients branch on that text. Every other failure answers `500` with a
//! generic message and is only detailed in the server log. That includes requests the
//! path or query extractors reject, which never get axum's plain-text `400`.
use axum::{
    Json, Router,
    extract::{
        Path, Query, Request, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;
use std::sync::Arc;
use std::time::Instant;
use stock_common::net::{LIST_FAILURE_MESSAGE, SERIES_FAILURE_MESSAGE, STOCKS_PATH};
use stock_common::{ErrorKind, Result, SeriesGenerator, StockError, Symbol, SymbolRegistry};
use tower_http::services::ServeDir;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Symbols listed by `GET /stocks`.
    pub registry: Arc<SymbolRegistry>,
    /// Generator answering `GET /stocks/{symbol}`.
    pub generator: Arc<SeriesGenerator>,
}

impl AppState {
    /// State whose listing and generator share the generator's registry.
    pub fn new(generator: SeriesGenerator) -> Self {
        Self {
            registry: Arc::clone(generator.registry()),
            generator: Arc::new(generator),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StockList<'a> {
    stock_symbols: &'a [Symbol],
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Query string of a series request.
#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    /// Inclusive upper bound of the series; defaults to the current time.
    #[serde(rename = "asOf")]
    pub as_of: Option<String>,
}

/// Builds the application router serving the API and the files under `static_dir`.
pub fn router(state: AppState, static_dir: &FsPath) -> Router {
    Router::new()
        .route(STOCKS_PATH, get(list_stocks))
        .route("/stocks/", get(list_stocks))
        .route("/stocks/{symbol}", get(stock_series))
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn list_stocks(State(state): State<AppState>) -> Response {
    let body = StockList {
        stock_symbols: state.registry.list_symbols(),
    };
    match serde_json::to_value(&body) {
        Ok(json) => (StatusCode::OK, Json(json)).into_response(),
        Err(e) => {
            error!("Error fetching stock symbols: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, LIST_FAILURE_MESSAGE)
        }
    }
}

async fn stock_series(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<SeriesQuery>, QueryRejection>,
) -> Response {
    let Path(symbol) = match path {
        Ok(path) => path,
        Err(rejection) => {
            let err = StockError::Internal(format!("rejected path: {}", rejection.body_text()));
            return series_error_response("<undecodable>", &err);
        }
    };

    let result = query
        .map_err(|rejection| {
            StockError::Internal(format!("rejected query: {}", rejection.body_text()))
        })
        .and_then(|Query(query)| resolve_as_of(query.as_of.as_deref()))
        .and_then(|as_of| state.generator.generate(&symbol, as_of));

    match result {
        Ok(series) => (StatusCode::OK, Json(series.into_points())).into_response(),
        Err(e) => series_error_response(&symbol, &e),
    }
}

fn resolve_as_of(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        None => Ok(Utc::now()),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|as_of| as_of.with_timezone(&Utc))
            .map_err(|e| StockError::Internal(format!("malformed as-of date '{}': {}", raw, e))),
    }
}

fn series_error_response(symbol: &str, err: &StockError) -> Response {
    match err.kind() {
        ErrorKind::UnknownSymbol | ErrorKind::GenerationFailure => {
            warn!("Error fetching stock data for {}: {}", symbol, err);
            error_response(StatusCode::NOT_FOUND, &err.to_string())
        }
        ErrorKind::Internal => {
            error!("Error fetching stock data for {}: {}", symbol, err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, SERIES_FAILURE_MESSAGE)
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    info!(
        "{} {} -> {} ({} ms)",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request as HttpRequest;
    use serde_json::Value;
    use stock_common::{FaultPolicy, GeneratorConfig};
    use tower::ServiceExt;

    fn app(fault_policy: FaultPolicy) -> Router {
        let registry = Arc::new(SymbolRegistry::new(["AAPL", "GOOG", "MSFT"]).unwrap());
        let config = GeneratorConfig {
            window: 10,
            fault_policy,
            seed: Some(42),
            ..GeneratorConfig::default()
        };
        let generator = SeriesGenerator::new(registry, config).unwrap();
        router(
            AppState::new(generator),
            FsPath::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(HttpRequest::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, bytes) = send_get(app, uri).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn lists_symbols() {
        let (status, body) = get_json(app(FaultPolicy::Never), "/stocks").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "stockSymbols": ["AAPL", "GOOG", "MSFT"] }));
    }

    #[tokio::test]
    async fn returns_series_as_point_array() {
        let (status, body) = get_json(
            app(FaultPolicy::Never),
            "/stocks/AAPL?asOf=2024-01-10T00:00:00Z",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let points = body.as_array().unwrap();
        assert_eq!(points.len(), 10);
        assert_eq!(points[9]["timestamp"], "2024-01-10T00:00:00Z");
        assert_eq!(points[0]["timestamp"], "2024-01-01T00:00:00Z");
        assert!(points.iter().all(|p| p["value"].as_f64().unwrap() >= 0.0));
    }

    #[tokio::test]
    async fn seeded_series_are_stable_between_requests() {
        let uri = "/stocks/GOOG?asOf=2024-01-10T00:00:00Z";
        let (_, first) = send_get(app(FaultPolicy::Never), uri).await;
        let (_, second) = send_get(app(FaultPolicy::Never), uri).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn default_as_of_is_now() {
        let before = Utc::now();
        let (status, body) = get_json(app(FaultPolicy::Never), "/stocks/MSFT").await;
        assert_eq!(status, StatusCode::OK);

        let last = body.as_array().unwrap().last().unwrap()["timestamp"]
            .as_str()
            .unwrap()
            .parse::<DateTime<Utc>>()
            .unwrap();
        assert!(last >= before && last <= Utc::now());
    }

    #[tokio::test]
    async fn unknown_symbol_is_404_with_message() {
        let (status, body) = get_json(app(FaultPolicy::Never), "/stocks/ZZZZ").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Unknown stock: ZZZZ" }));
    }

    #[tokio::test]
    async fn generation_failure_is_404_with_message() {
        let (status, body) = get_json(app(FaultPolicy::Always), "/stocks/AAPL").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "Failed to generate stock data" }));
    }

    #[tokio::test]
    async fn malformed_as_of_is_500_without_details() {
        let (status, body) =
            get_json(app(FaultPolicy::Never), "/stocks/AAPL?asOf=yesterday").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Failed to retrieve stock data" }));
    }

    #[tokio::test]
    async fn duplicated_as_of_is_500_without_details() {
        let (status, body) = get_json(
            app(FaultPolicy::Never),
            "/stocks/AAPL?asOf=2024-01-10T00:00:00Z&asOf=2024-01-11T00:00:00Z",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Failed to retrieve stock data" }));
    }

    #[tokio::test]
    async fn undecodable_symbol_is_500_without_details() {
        let (status, body) = get_json(app(FaultPolicy::Never), "/stocks/%FF").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "Failed to retrieve stock data" }));
    }

    #[tokio::test]
    async fn trailing_slash_lists_symbols() {
        let (status, body) = get_json(app(FaultPolicy::Never), "/stocks/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "stockSymbols": ["AAPL", "GOOG", "MSFT"] }));
    }

    #[tokio::test]
    async fn serves_static_chart() {
        let (status, body) = send_get(app(FaultPolicy::Never), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("stockDropdown"));

        let (status, _) = send_get(app(FaultPolicy::Never), "/scripts.js").await;
        assert_eq!(status, StatusCode::OK);
    }
}
