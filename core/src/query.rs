//! Query model: range tokens, thresholds, and window resolution.

use crate::{
    clock::Clock,
    config::EngineConfig,
    error::{EngineError, EngineResult},
    types::Timestamp,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// The caller-facing relative time range. Resolved to an absolute
/// `[query_start, query_end)` against the injected clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "24h")]
    H24,
    #[serde(rename = "3d")]
    D3,
    #[serde(rename = "7d")]
    D7,
    #[serde(rename = "30d")]
    D30,
    #[serde(rename = "6m")]
    M6,
    #[serde(rename = "1y")]
    Y1,
}

impl TimeRange {
    pub fn parse(token: &str) -> EngineResult<Self> {
        match token {
            "24h" => Ok(TimeRange::H24),
            "3d" => Ok(TimeRange::D3),
            "7d" => Ok(TimeRange::D7),
            "30d" => Ok(TimeRange::D30),
            "6m" => Ok(TimeRange::M6),
            "1y" => Ok(TimeRange::Y1),
            other => Err(EngineError::InvalidQuery {
                reason: format!("unknown time range token '{other}'"),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::H24 => "24h",
            TimeRange::D3 => "3d",
            TimeRange::D7 => "7d",
            TimeRange::D30 => "30d",
            TimeRange::M6 => "6m",
            TimeRange::Y1 => "1y",
        }
    }

    pub fn hours(&self) -> i64 {
        match self {
            TimeRange::H24 => 24,
            TimeRange::D3 => 72,
            TimeRange::D7 => 168,
            TimeRange::D30 => 720,
            TimeRange::M6 => 4320,
            TimeRange::Y1 => 8760,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskQuery {
    pub time_range: TimeRange,
    /// Minimum pass-through count on the sender (metric A).
    pub min_metric_a: u32,
    /// Minimum session-drain count on the sender (metric B).
    pub min_metric_b: u32,
    /// Maximum receiver aggregate (metric C). With the default of 0 the
    /// receiver must have accumulated nothing else in the horizon.
    pub max_metric_c: f64,
}

impl Default for RiskQuery {
    fn default() -> Self {
        Self {
            time_range: TimeRange::H24,
            min_metric_a: 1,
            min_metric_b: 1,
            max_metric_c: 0.0,
        }
    }
}

impl RiskQuery {
    pub fn with_range(time_range: TimeRange) -> Self {
        Self {
            time_range,
            ..Self::default()
        }
    }

    /// Rejected before any feed fetch.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.max_metric_c.is_finite() || self.max_metric_c < 0.0 {
            return Err(EngineError::InvalidQuery {
                reason: format!("max_metric_c must be finite and >= 0, got {}", self.max_metric_c),
            });
        }
        Ok(())
    }
}

/// Absolute bounds for one evaluation.
///
/// `fetch_start` reaches back past `query_start` by the horizon and the
/// widest evidence window, so that an inflow or login just before the
/// queried range still counts as evidence for an in-range outflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub query_start: Timestamp,
    pub query_end: Timestamp,
    pub horizon_start: Timestamp,
    pub fetch_start: Timestamp,
}

impl QueryWindow {
    pub fn resolve(query: &RiskQuery, clock: &dyn Clock, config: &EngineConfig) -> Self {
        let query_end = clock.now();
        let query_start = query_end - Duration::hours(query.time_range.hours());
        let horizon_start = query_end - config.receiver_horizon;
        let fetch_start = query_start.min(horizon_start) - config.drain_window;
        Self {
            query_start,
            query_end,
            horizon_start,
            fetch_start,
        }
    }

    pub fn contains(&self, at: Timestamp) -> bool {
        self.query_start <= at && at < self.query_end
    }

    pub fn in_horizon(&self, at: Timestamp) -> bool {
        self.horizon_start <= at && at < self.query_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    #[test]
    fn range_tokens_round_trip() {
        for token in ["24h", "3d", "7d", "30d", "6m", "1y"] {
            assert_eq!(TimeRange::parse(token).unwrap().as_str(), token);
        }
        assert!(TimeRange::parse("48h").is_err());
    }

    #[test]
    fn fetch_window_covers_horizon_and_evidence_slack() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let config = EngineConfig::default();
        let window = QueryWindow::resolve(
            &RiskQuery::with_range(TimeRange::H24),
            &FixedClock(now),
            &config,
        );
        assert_eq!(window.query_end, now);
        assert_eq!(window.query_start, now - Duration::hours(24));
        assert_eq!(window.horizon_start, now - Duration::days(30));
        // 24h query: the 30-day horizon dominates the fetch bound.
        assert_eq!(window.fetch_start, window.horizon_start - Duration::minutes(5));

        // 1y query: the query range dominates.
        let wide = QueryWindow::resolve(
            &RiskQuery::with_range(TimeRange::Y1),
            &FixedClock(now),
            &config,
        );
        assert_eq!(wide.fetch_start, wide.query_start - Duration::minutes(5));
    }

    #[test]
    fn negative_max_metric_c_rejected() {
        let query = RiskQuery {
            max_metric_c: -1.0,
            ..RiskQuery::default()
        };
        assert!(matches!(
            query.validate(),
            Err(crate::error::EngineError::InvalidQuery { .. })
        ));
    }
}
