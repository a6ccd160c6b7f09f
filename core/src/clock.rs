//! Clock abstraction — relative range tokens resolve against an injected
//! clock, never an ambient `Utc::now()`, so tests pin time exactly.

use crate::types::Timestamp;
use chrono::Utc;

pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall clock for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock frozen at construction time. Used in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
