use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::types::Team;

/// How long a fetched team list is served without refetching.
pub const STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// How long an unused entry is retained before eviction.
pub const GC_TIME: Duration = Duration::from_secs(30 * 60);

/// In-memory team lists keyed by user id.
pub struct TeamsCache {
    entries: HashMap<String, CachedTeams>,
    stale_time: Duration,
    gc_time: Duration,
}

struct CachedTeams {
    teams: Vec<Team>,
    updated_at: Instant,
    last_used: Instant,
    invalidated: bool,
}

#[derive(Debug, PartialEq)]
pub enum Lookup<'a> {
    Fresh(&'a [Team]),
    Stale(&'a [Team]),
    Missing,
}

impl Default for TeamsCache {
    fn default() -> Self {
        Self::new(STALE_TIME, GC_TIME)
    }
}

impl TeamsCache {
    pub fn new(stale_time: Duration, gc_time: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stale_time,
            gc_time,
        }
    }

    pub fn lookup(&mut self, user_id: &str) -> Lookup<'_> {
        self.evict_expired();

        let now = Instant::now();
        let stale_time = self.stale_time;
        match self.entries.get_mut(user_id) {
            Some(entry) => {
                entry.last_used = now;
                if entry.invalidated || now.duration_since(entry.updated_at) >= stale_time {
                    debug!(user_id, "teams cache stale");
                    Lookup::Stale(&entry.teams)
                } else {
                    debug!(user_id, "teams cache hit");
                    Lookup::Fresh(&entry.teams)
                }
            }
            None => {
                debug!(user_id, "teams cache miss");
                Lookup::Missing
            }
        }
    }

    /// Replace the entry for `user_id`; the latest write wins.
    pub fn store(&mut self, user_id: &str, teams: Vec<Team>) {
        let now = Instant::now();
        self.entries.insert(
            user_id.to_string(),
            CachedTeams {
                teams,
                updated_at: now,
                last_used: now,
                invalidated: false,
            },
        );
    }

    /// Mark every team list stale so the next lookup refetches.
    pub fn invalidate_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.invalidated = true;
        }
    }

    pub fn evict_expired(&mut self) {
        let now = Instant::now();
        let gc_time = self.gc_time;
        self.entries.retain(|user_id, entry| {
            let keep = now.duration_since(entry.last_used) < gc_time;
            if !keep {
                debug!(user_id = user_id.as_str(), "evicting cached teams");
            }
            keep
        });
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams(names: &[&str]) -> Vec<Team> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Team::named(&i.to_string(), name))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_within_stale_time() {
        let mut cache = TeamsCache::default();
        cache.store("u1", teams(&["Alpha"]));

        tokio::time::advance(Duration::from_secs(4 * 60)).await;
        assert!(matches!(cache.lookup("u1"), Lookup::Fresh(t) if t.len() == 1));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_after_five_minutes() {
        let mut cache = TeamsCache::default();
        cache.store("u1", teams(&["Alpha", "Beta"]));

        tokio::time::advance(STALE_TIME).await;
        assert!(matches!(cache.lookup("u1"), Lookup::Stale(t) if t.len() == 2));
    }

    #[tokio::test(start_paused = true)]
    async fn evicted_after_idle_gc_time() {
        let mut cache = TeamsCache::default();
        cache.store("u1", teams(&["Alpha"]));
        cache.store("u2", teams(&["Beta"]));

        tokio::time::advance(Duration::from_secs(20 * 60)).await;
        // Touching u2 keeps it alive for another window
        assert!(matches!(cache.lookup("u2"), Lookup::Stale(_)));

        tokio::time::advance(Duration::from_secs(15 * 60)).await;
        assert_eq!(cache.lookup("u1"), Lookup::Missing);
        assert!(matches!(cache.lookup("u2"), Lookup::Stale(_)));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidate_marks_every_user_stale() {
        let mut cache = TeamsCache::default();
        cache.store("u1", teams(&["Alpha"]));
        cache.store("u2", teams(&["Beta"]));

        cache.invalidate_all();

        assert!(matches!(cache.lookup("u1"), Lookup::Stale(_)));
        assert!(matches!(cache.lookup("u2"), Lookup::Stale(_)));

        cache.store("u1", teams(&["Alpha", "Gamma"]));
        assert!(matches!(cache.lookup("u1"), Lookup::Fresh(t) if t.len() == 2));
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_user_is_missing() {
        let mut cache = TeamsCache::default();
        assert_eq!(cache.lookup("nobody"), Lookup::Missing);
    }
}
