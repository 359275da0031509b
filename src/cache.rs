//! Track-position lookup cache.
//!
//! Answers "to resume track X inside its proper queue, which playlist and
//! position should the play request reference?" without re-scanning every
//! visible track per playback request. The whole map is rebuilt from a
//! snapshot of (playlist, ordered tracks) pairs whenever the visible set
//! changes; there is no partial invalidation. A stale cache reports every
//! lookup as a miss so callers fall back to a direct by-URI play instead of
//! acting on a possibly-wrong position.
//!
//! Instances are constructed explicitly and passed to whatever composes the
//! playback flow; there is no global cache.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

/// Age after which the cache treats itself as stale and every lookup as a
/// miss. A cold cache degrades playback to "resume from track start", which
/// is the intended fallback.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Snapshot of one playlist used to rebuild the cache.
#[derive(Debug, Clone)]
pub struct ContainerSnapshot {
    pub id: String,
    pub uri: String,
    pub track_keys: Vec<String>,
}

/// Where a track lives: which playlist, and at which position within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackPosition {
    pub container_id: String,
    pub container_uri: String,
    pub position: u32,
}

pub struct TrackPositionCache {
    entries: HashMap<String, TrackPosition>,
    rebuilt_at: Option<Instant>,
    freshness_window: Duration,
}

impl TrackPositionCache {
    pub fn new() -> Self {
        Self::with_freshness_window(DEFAULT_FRESHNESS_WINDOW)
    }

    /// Creates a cache with an explicit freshness window, mainly for tests.
    pub fn with_freshness_window(freshness_window: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            rebuilt_at: None,
            freshness_window,
        }
    }

    /// Replaces the entire map from the given snapshot. Last call wins;
    /// stale entries disappear with the rebuild. A track appearing in more
    /// than one container keeps the position from the last one.
    pub fn rebuild(&mut self, containers: &[ContainerSnapshot]) {
        self.rebuild_at(containers, Instant::now());
    }

    /// Clock-parameterized [`Self::rebuild`].
    pub fn rebuild_at(&mut self, containers: &[ContainerSnapshot], now: Instant) {
        let mut entries = HashMap::new();
        for container in containers {
            for (position, key) in container.track_keys.iter().enumerate() {
                entries.insert(
                    key.clone(),
                    TrackPosition {
                        container_id: container.id.clone(),
                        container_uri: container.uri.clone(),
                        position: position as u32,
                    },
                );
            }
        }

        self.entries = entries;
        self.rebuilt_at = Some(now);
    }

    /// Looks up a track's container and position. Returns `None` for keys
    /// that were never indexed and for every key once the freshness window
    /// has elapsed since the last rebuild.
    pub fn lookup(&self, track_key: &str) -> Option<&TrackPosition> {
        self.lookup_at(track_key, Instant::now())
    }

    /// Clock-parameterized [`Self::lookup`].
    pub fn lookup_at(&self, track_key: &str, now: Instant) -> Option<&TrackPosition> {
        if !self.is_fresh_at(now) {
            return None;
        }
        self.entries.get(track_key)
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Instant::now())
    }

    fn is_fresh_at(&self, now: Instant) -> bool {
        match self.rebuilt_at {
            Some(rebuilt_at) => now.duration_since(rebuilt_at) <= self.freshness_window,
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.rebuilt_at = None;
    }
}

impl Default for TrackPositionCache {
    fn default() -> Self {
        Self::new()
    }
}
