//! The detection engine — one call in, one ranked result out.
//!
//! PIPELINE (fixed order):
//!   1. Validate the query (before any fetch).
//!   2. Resolve the window against the injected clock.
//!   3. Materialise the three feeds, validate at the boundary.
//!   4. Build the window index.
//!   5. Fan out the three signal evaluators (pure, read-only, joined
//!      before combining).
//!   6. Combine, rank, return.
//!
//! RULES:
//!   - No global state: feed source and clock are constructor arguments.
//!   - All-or-nothing: an error anywhere drops every partial result.
//!   - No retries here; feed failures propagate unchanged.

use crate::{
    candidate::RiskQueryResult,
    clock::Clock,
    combiner,
    config::EngineConfig,
    error::EngineResult,
    feed::{self, FeedSource},
    index::WindowIndex,
    passthrough,
    query::{QueryWindow, RiskQuery},
    receiver, session,
};
use anyhow::anyhow;
use log::{debug, info};

pub struct RiskEngine {
    config: EngineConfig,
    feed: Box<dyn FeedSource>,
    clock: Box<dyn Clock>,
}

impl RiskEngine {
    pub fn new(config: EngineConfig, feed: Box<dyn FeedSource>, clock: Box<dyn Clock>) -> Self {
        Self { config, feed, clock }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate one query. Concurrent calls with different ranges are
    /// independent and must match sequential execution exactly.
    pub fn run(&self, query: &RiskQuery) -> EngineResult<RiskQueryResult> {
        query.validate()?;
        let window = QueryWindow::resolve(query, self.clock.as_ref(), &self.config);
        info!(
            "risk query {}: range [{}, {}), horizon from {}",
            query.time_range.as_str(),
            window.query_start,
            window.query_end,
            window.horizon_start
        );

        let snapshot =
            feed::fetch_snapshot(self.feed.as_ref(), window.fetch_start, window.query_end)?;
        snapshot.validate()?;
        debug!(
            "snapshot: {} accounts, {} logins, {} transactions",
            snapshot.accounts.len(),
            snapshot.logins.len(),
            snapshot.transactions.len()
        );

        let index = WindowIndex::build(&snapshot, &window, &self.config);
        debug!(
            "index: {} senders with large outflows, {} receivers with large inflows, {} accounts with logins",
            index.large_outflows.len(),
            index.large_inflows.len(),
            index.logins.len()
        );

        let pass_window = self.config.pass_through_window;
        let drain_window = self.config.drain_window;
        let (metric_a, metric_b, inbound_sums) = std::thread::scope(|scope| {
            let a = scope.spawn(|| passthrough::evaluate(&index, pass_window));
            let b = scope.spawn(|| session::evaluate(&index, drain_window));
            let c = scope.spawn(|| receiver::evaluate(&index, &window));
            let metric_a = a
                .join()
                .map_err(|_| anyhow!("pass-through evaluator panicked"))?;
            let metric_b = b
                .join()
                .map_err(|_| anyhow!("session-drain evaluator panicked"))?;
            let inbound_sums = c
                .join()
                .map_err(|_| anyhow!("receiver evaluator panicked"))?;
            Ok::<_, crate::error::EngineError>((metric_a, metric_b, inbound_sums))
        })?;
        debug!(
            "signals: {} accounts with pass-through, {} with session drains, {} receivers aggregated",
            metric_a.len(),
            metric_b.len(),
            inbound_sums.len()
        );

        let candidates = combiner::combine(
            &snapshot,
            &window,
            &self.config,
            query,
            &metric_a,
            &metric_b,
            &inbound_sums,
        )?;
        info!("query admitted {} candidates", candidates.len());

        Ok(RiskQueryResult {
            time_range: query.time_range,
            query_start: window.query_start,
            query_end: window.query_end,
            total_count: candidates.len(),
            candidates,
        })
    }
}
