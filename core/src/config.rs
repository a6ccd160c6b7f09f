//! Engine tuning knobs. Every window and threshold lives here —
//! evaluators never hard-code a constant per call.

use chrono::Duration;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// A transaction at or above this amount is "large" and eligible
    /// for admission and for signal evidence.
    pub large_amount_threshold: f64,
    /// Pass-through window: a large inflow this close before a large
    /// outflow makes the outflow a round-trip suspect.
    pub pass_through_window: Duration,
    /// Drain window: a login this close before a large outflow makes
    /// the outflow session-triggered.
    pub drain_window: Duration,
    /// Long lookback for receiver aggregation and signal evidence,
    /// independent of the caller's query range.
    pub receiver_horizon: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            large_amount_threshold: 50_000.0,
            pass_through_window: Duration::minutes(2),
            drain_window: Duration::minutes(5),
            receiver_horizon: Duration::days(30),
        }
    }
}
