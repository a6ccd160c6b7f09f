//! riskwatch-core — laundering pass-through detection engine.
//!
//! Given three read-only, time-ordered feeds (accounts, logins,
//! transactions) and a query window, compute three independent signals
//! per large transaction and combine them into a ranked candidate list:
//!
//!   - A: pass-through — a large inflow re-sent within 2 minutes;
//!   - B: session-triggered drain — a large outflow within 5 minutes of
//!     the sender's login;
//!   - C: receiver anomaly — the receiver has otherwise accumulated
//!     nothing over the 30-day horizon.
//!
//! The engine owns no storage, opens no sockets and keeps no state
//! between queries. Feed source and clock are injected; everything else
//! (transport, caching, persistence) wraps it from outside.

pub mod candidate;
pub mod clock;
pub mod combiner;
pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod index;
pub mod model;
pub mod passthrough;
pub mod query;
pub mod receiver;
pub mod session;
pub mod store;
pub mod types;

pub use candidate::{AccountSummary, Candidate, RiskLevel, RiskQueryResult};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use engine::RiskEngine;
pub use error::{EngineError, EngineResult};
pub use feed::{FeedSource, MemoryFeed};
pub use model::{Account, AccountType, FeedSnapshot, Login, Transaction, TransactionStatus};
pub use query::{QueryWindow, RiskQuery, TimeRange};
pub use store::SqliteFeed;
