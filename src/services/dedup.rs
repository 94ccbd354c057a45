//! Sliding-window suppression of duplicate events.
//!
//! Event producers (session watchers, webhook handlers) call
//! [`DedupCache::should_process`] with a session/event key before building a
//! notification; a key accepted once is suppressed until its window expires.
//! Stale entries are reaped by [`DedupCache::cleanup`], driven by an explicit
//! periodic task ([`spawn_cleanup_task`]) rather than by the cache itself.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::config::DedupConfig;

pub const DEFAULT_RECENT_THRESHOLD: Duration = Duration::from_secs(5);
pub const DEFAULT_CLEANUP_THRESHOLD: Duration = Duration::from_secs(5 * 60);

/// Per-producer override of the suppression window.
///
/// Producers that need a wider or narrower window implement this next to
/// their event handling and share a single [`DedupCache`] instance.
pub trait DedupPolicy: Send + Sync {
    /// How long to suppress a key after it was last accepted.
    fn recent_threshold(&self) -> Duration {
        DEFAULT_RECENT_THRESHOLD
    }

    /// Extra age beyond the recent threshold before an entry is reaped.
    fn cleanup_threshold(&self) -> Duration {
        DEFAULT_CLEANUP_THRESHOLD
    }
}

/// Policy using the default 5s / 5m thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl DedupPolicy for DefaultPolicy {}

/// Config-backed policy.
#[derive(Debug, Clone, Copy)]
pub struct DedupWindow {
    pub recent: Duration,
    pub cleanup: Duration,
}

impl DedupPolicy for DedupWindow {
    fn recent_threshold(&self) -> Duration {
        self.recent
    }

    fn cleanup_threshold(&self) -> Duration {
        self.cleanup
    }
}

impl From<&DedupConfig> for DedupWindow {
    fn from(config: &DedupConfig) -> Self {
        Self {
            recent: config.recent_threshold(),
            cleanup: config.cleanup_threshold(),
        }
    }
}

/// Concurrent map of event keys to the instant they were last accepted.
///
/// At most one live entry exists per key; an absent key is equivalent to
/// "never seen". The per-key upsert is the unit of atomicity, so
/// `should_process` and `cleanup` may run from arbitrary threads without
/// external locking.
#[derive(Debug, Default)]
pub struct DedupCache {
    entries: DashMap<String, Instant>,
}

impl DedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when `key` was accepted within the policy's recent
    /// threshold, leaving the entry untouched. Otherwise records `key` as
    /// seen now and returns `true`.
    ///
    /// The window is a rolling cool-down: every accepted call resets it.
    pub fn should_process(&self, key: &str, policy: &dyn DedupPolicy) -> bool {
        let now = Instant::now();

        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                if now.saturating_duration_since(*entry.get()) < policy.recent_threshold() {
                    tracing::debug!("There are recent events for key: {}", key);
                    false
                } else {
                    entry.insert(now);
                    true
                }
            }
            Entry::Vacant(entry) => {
                tracing::debug!("No recent events for key: {}", key);
                entry.insert(now);
                true
            }
        }
    }

    /// Removes every entry whose last refresh is older than
    /// `recent_threshold + cleanup_threshold`.
    ///
    /// Idempotent and safe to run concurrently with `should_process`: the
    /// sweep and a refresh contend on the same shard lock, so a key refreshed
    /// mid-sweep is kept.
    pub fn cleanup(&self, policy: &dyn DedupPolicy) {
        let max_age = policy.recent_threshold() + policy.cleanup_threshold();
        let now = Instant::now();

        let before = self.entries.len();
        self.entries
            .retain(|_, last_seen| now.saturating_duration_since(*last_seen) < max_age);

        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::debug!("Reaped {} stale dedup entries", removed);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Spawn the periodic cleanup worker for a shared cache.
///
/// Sweeps every `interval` and exits when `shutdown` fires. Invoking cleanup
/// is a caller responsibility; without this worker the map grows by the
/// number of distinct keys seen.
pub fn spawn_cleanup_task(
    cache: Arc<DedupCache>,
    policy: Arc<dyn DedupPolicy>,
    interval: Duration,
    shutdown: tokio::sync::broadcast::Sender<()>,
) -> tokio::task::JoinHandle<()> {
    let mut shutdown_rx = shutdown.subscribe();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!("Dedup cleanup worker shutting down");
                    break;
                }
                _ = tokio::time::sleep(interval) => {
                    cache.cleanup(policy.as_ref());
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn window(recent_ms: u64, cleanup_ms: u64) -> DedupWindow {
        DedupWindow {
            recent: Duration::from_millis(recent_ms),
            cleanup: Duration::from_millis(cleanup_ms),
        }
    }

    #[test]
    fn first_call_accepts_second_suppresses() {
        let cache = DedupCache::new();
        let policy = DefaultPolicy;

        assert!(cache.should_process("session-1", &policy));
        assert!(!cache.should_process("session-1", &policy));
        assert!(!cache.should_process("session-1", &policy));
    }

    #[test]
    fn distinct_keys_are_independent() {
        let cache = DedupCache::new();
        let policy = DefaultPolicy;

        assert!(cache.should_process("session-1", &policy));
        assert!(cache.should_process("session-2", &policy));
        assert!(!cache.should_process("session-1", &policy));
    }

    #[test]
    fn window_expiry_allows_reprocessing() {
        let cache = DedupCache::new();
        let policy = window(50, 1_000);

        assert!(cache.should_process("session-1", &policy));
        assert!(!cache.should_process("session-1", &policy));

        sleep(Duration::from_millis(80));

        assert!(cache.should_process("session-1", &policy));
        // The accepted call reset the cool-down
        assert!(!cache.should_process("session-1", &policy));
    }

    #[test]
    fn cleanup_keeps_fresh_entries() {
        let cache = DedupCache::new();
        let policy = window(50, 1_000);

        cache.should_process("session-1", &policy);
        cache.cleanup(&policy);

        assert_eq!(cache.len(), 1);
        // Still inside the suppression window
        assert!(!cache.should_process("session-1", &policy));
    }

    #[test]
    fn cleanup_reaps_only_past_max_age() {
        let cache = DedupCache::new();
        let policy = window(30, 90);

        cache.should_process("stale", &policy);
        sleep(Duration::from_millis(40));

        // "stale" is past the recent threshold but not yet past
        // recent + cleanup (120ms), so it must survive.
        cache.cleanup(&policy);
        assert_eq!(cache.len(), 1);

        sleep(Duration::from_millis(110));
        cache.should_process("fresh", &policy);

        cache.cleanup(&policy);
        assert_eq!(cache.len(), 1);
        assert!(!cache.should_process("fresh", &policy));
        // "stale" was forgotten entirely, so it is accepted again
        assert!(cache.should_process("stale", &policy));
    }

    #[test]
    fn policy_overrides_thresholds() {
        struct SessionPolicy;

        impl DedupPolicy for SessionPolicy {
            fn recent_threshold(&self) -> Duration {
                Duration::from_millis(10)
            }
        }

        let cache = DedupCache::new();

        assert!(cache.should_process("session-1", &SessionPolicy));
        assert!(!cache.should_process("session-1", &SessionPolicy));

        sleep(Duration::from_millis(30));

        assert!(cache.should_process("session-1", &SessionPolicy));
        // The default cleanup threshold still applies
        assert_eq!(SessionPolicy.cleanup_threshold(), DEFAULT_CLEANUP_THRESHOLD);
    }

    #[test]
    fn concurrent_calls_accept_exactly_once() {
        let cache = Arc::new(DedupCache::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let cache = cache.clone();
            handles.push(std::thread::spawn(move || {
                cache.should_process("playback-42", &DefaultPolicy)
            }));
        }

        let accepted = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|accepted| *accepted)
            .count();

        // The per-key upsert is atomic, so exactly one thread wins the window.
        assert_eq!(accepted, 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn cleanup_worker_reaps_and_shuts_down() {
        let cache = Arc::new(DedupCache::new());
        let policy = Arc::new(window(10, 10));

        cache.should_process("session-1", policy.as_ref());

        let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);
        let handle = spawn_cleanup_task(
            cache.clone(),
            policy.clone(),
            Duration::from_millis(20),
            shutdown_tx.clone(),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(cache.is_empty());

        shutdown_tx.send(()).unwrap();
        handle.await.unwrap();
    }

    #[test]
    fn default_thresholds_match_contract() {
        assert_eq!(DEFAULT_RECENT_THRESHOLD, Duration::from_secs(5));
        assert_eq!(DEFAULT_CLEANUP_THRESHOLD, Duration::from_secs(300));
    }
}
