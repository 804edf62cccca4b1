//! Persisted play statistics.
//!
//! Stats live in an external string-keyed persistent store under
//! [`STATS_KEY`], JSON-encoded as `{"played": number, "best": number|null}`.
//! The engine touches them at exactly two points: session start
//! (`played += 1`) and win (`best = min(best, attempts_used)`).
//!
//! Decoding is lenient: an absent or malformed value yields the default
//! `{played: 0, best: null}` and is never fatal.

use serde::{Deserialize, Serialize};

/// Store key for persisted stats.
pub const STATS_KEY: &str = "memory_stats_v1";

/// Lifetime play statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Games started.
    pub played: u64,
    /// Lowest attempt count across won sessions; `None` until the first win.
    pub best: Option<u32>,
}

impl Stats {
    /// Fold a winning score into `best`.
    #[must_use]
    pub fn with_win(self, attempts_used: u32) -> Self {
        let best = match self.best {
            Some(best) => best.min(attempts_used),
            None => attempts_used,
        };
        Self {
            best: Some(best),
            ..self
        }
    }

    /// Decode from a raw stored value.
    ///
    /// Absent or malformed input yields the default; a parse failure is
    /// logged but never surfaced.
    #[must_use]
    pub fn decode(raw: Option<&str>) -> Self {
        match raw {
            None => Self::default(),
            Some(text) => serde_json::from_str(text).unwrap_or_else(|err| {
                tracing::warn!(%err, "discarding malformed persisted stats");
                Self::default()
            }),
        }
    }

    /// Encode to the stored JSON form.
    #[must_use]
    pub fn encode(&self) -> String {
        // Stats contains no maps or non-string keys; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// External persistent store for [`Stats`].
///
/// Implementations wrap whatever key-value persistence the host offers.
/// No concurrent writers are assumed; access is read-modify-write.
pub trait StatsStore {
    /// Read current stats, defaulting when absent or corrupt.
    fn read(&self) -> Stats;

    /// Overwrite stored stats.
    fn write(&mut self, stats: &Stats);

    /// Delete stored stats, restoring the default on next read.
    fn reset(&mut self);
}

/// In-memory store backed by a raw string slot.
///
/// Stores the encoded JSON rather than the struct so the lenient decode
/// path is exercised exactly as with real persistence. Useful for tests
/// and hosts without durable storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStatsStore {
    value: Option<String>,
}

impl MemoryStatsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a raw pre-existing value.
    #[must_use]
    pub fn with_raw(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    /// The raw stored value, as a persistent backend would see it.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl StatsStore for MemoryStatsStore {
    fn read(&self) -> Stats {
        Stats::decode(self.value.as_deref())
    }

    fn write(&mut self, stats: &Stats) {
        self.value = Some(stats.encode());
    }

    fn reset(&mut self) {
        self.value = None;
    }
}
