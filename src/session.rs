//! Server-side linkage between classification and refinement.
//!
//! Classification and refinement arrive as separate interactions. The
//! [`SessionStore`] keeps each interaction's [`ClassificationResult`] under
//! an opaque random [`SessionId`] so refinement can read it without
//! re-running the classifier.
//!
//! Uses a bounded moka LRU + TTL cache. An entry that was never written,
//! was evicted, or has expired is indistinguishable to callers: all three
//! are reported as [`NamecastError::NoClassification`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::telemetry;
use crate::types::ClassificationResult;
use crate::{NamecastError, Result};

/// Opaque identifier of one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = NamecastError;

    /// A malformed id cannot refer to a stored classification.
    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| NamecastError::NoClassification)
    }
}

/// Configuration for the session store.
///
/// ```rust
/// # use namecast::SessionConfig;
/// # use std::time::Duration;
/// let config = SessionConfig::new()
///     .max_entries(500)
///     .ttl(Duration::from_secs(600));
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum number of live sessions. Default: 10,000.
    pub max_entries: u64,
    /// Time-to-live of a session. Default: 1 hour.
    pub ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            ttl: Duration::from_secs(3600),
        }
    }
}

impl SessionConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of live sessions.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the session time-to-live.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Thread-safe store of classification results keyed by session.
pub struct SessionStore {
    entries: Cache<SessionId, ClassificationResult>,
}

impl SessionStore {
    /// Create a store with the given configuration.
    pub fn new(config: &SessionConfig) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { entries }
    }

    /// Store a classification under a new session id.
    pub fn open(&self, classification: ClassificationResult) -> SessionId {
        let id = SessionId::new();
        self.put(id, classification);
        id
    }

    /// Store (or replace) the classification for an existing session.
    pub fn put(&self, id: SessionId, classification: ClassificationResult) {
        debug!(session = %id, name = %classification.name, "linking classification");
        self.entries.insert(id, classification);
    }

    /// The classification linked to `id`.
    ///
    /// Returns [`NamecastError::NoClassification`] when nothing is linked.
    pub fn get(&self, id: &SessionId) -> Result<ClassificationResult> {
        self.entries.get(id).ok_or_else(|| {
            metrics::counter!(telemetry::SESSION_MISSES_TOTAL).increment(1);
            debug!(session = %id, "no classification linked");
            NamecastError::NoClassification
        })
    }

    /// Drop the linkage for `id`.
    pub fn remove(&self, id: &SessionId) {
        self.entries.invalidate(id);
    }

    /// Approximate number of live sessions.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}
