//! Price series data model.
//!
//! A `Series` is an ordered, non-empty run of `PricePoint`s for one symbol. Points are
//! serialized as `{ "timestamp": "<RFC 3339>", "value": <number> }`, which is the wire
//! shape the HTTP API returns and the browser chart reads.
use chrono::{DateTime, TimeDelta, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::registry::Symbol;

/// Spacing between consecutive points of a series.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Interval {
    /// One point per minute.
    Minute,
    /// One point per hour.
    Hour,
    /// One point per day.
    Day,
}

impl Interval {
    /// Length of one step.
    pub fn step(self) -> TimeDelta {
        match self {
            Interval::Minute => TimeDelta::minutes(1),
            Interval::Hour => TimeDelta::hours(1),
            Interval::Day => TimeDelta::days(1),
        }
    }
}

/// One `(timestamp, value)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Absolute point in time (UTC).
    pub timestamp: DateTime<Utc>,
    /// Price, never negative.
    pub value: f64,
}

/// Ordered price points belonging to a single symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    symbol: Symbol,
    points: Vec<PricePoint>,
}

impl Series {
    pub(crate) fn new(symbol: Symbol, points: Vec<PricePoint>) -> Self {
        debug_assert!(!points.is_empty());
        debug_assert!(points.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        Self { symbol, points }
    }

    /// Symbol this series was generated for.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Points in ascending timestamp order.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a series carries at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent point.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Consumes the series, returning its points.
    pub fn into_points(self) -> Vec<PricePoint> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn interval_parses_case_insensitively() {
        assert_eq!("DAY".parse::<Interval>().unwrap(), Interval::Day);
        assert_eq!("hour".parse::<Interval>().unwrap(), Interval::Hour);
        assert!("week".parse::<Interval>().is_err());
        assert_eq!(Interval::Minute.to_string(), "minute");
    }

    #[test]
    fn interval_steps() {
        assert_eq!(Interval::Minute.step(), TimeDelta::seconds(60));
        assert_eq!(Interval::Hour.step(), TimeDelta::seconds(3_600));
        assert_eq!(Interval::Day.step(), TimeDelta::seconds(86_400));
    }

    #[test]
    fn price_point_wire_shape() {
        let point = PricePoint {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
            value: 101.5,
        };
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(json["timestamp"], "2024-01-10T00:00:00Z");
        assert_eq!(json["value"], 101.5);
    }
}
