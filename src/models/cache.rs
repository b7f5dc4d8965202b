use std::time::Duration;
use tokio::time::Instant;

use super::record::Record;

/// The one cached result and when it was fetched.
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub value: Option<Vec<Record>>,
    pub fetched_at: Instant,
}

impl CachedSnapshot {
    pub fn empty() -> Self {
        Self {
            value: None,
            fetched_at: Instant::now(),
        }
    }

    /// Returns the cached records if present and no older than `ttl`.
    pub fn fresh(&self, ttl: Duration) -> Option<&[Record]> {
        match &self.value {
            Some(records) if self.fetched_at.elapsed() <= ttl => Some(records),
            _ => None,
        }
    }

    pub fn replace(&mut self, records: Vec<Record>) {
        self.value = Some(records);
        self.fetched_at = Instant::now();
    }
}

impl Default for CachedSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
