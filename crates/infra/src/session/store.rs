use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};

use stockroom_core::SessionId;
use stockroom_inventory::{Inventory, Notice};

/// What a session's inventory contains when it is first opened.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SessionSeed {
    #[default]
    Seeded,
    Empty,
}

impl SessionSeed {
    fn build(self) -> Inventory {
        match self {
            SessionSeed::Seeded => Inventory::seeded(),
            SessionSeed::Empty => Inventory::new(),
        }
    }
}

/// Bounds on how long and how many sessions are kept.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionLimits {
    /// A session untouched for this long is dropped.
    pub idle_ttl: Duration,
    /// Opening a session beyond this count evicts the least recently seen one.
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::minutes(30),
            max_sessions: 10_000,
        }
    }
}

/// Everything one session owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub inventory: Inventory,
    /// Messages waiting to be shown on the next render.
    pub flash: Vec<Notice>,
}

impl SessionState {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory,
            flash: Vec::new(),
        }
    }

    pub fn take_flash(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.flash)
    }
}

/// Session-isolated state store.
///
/// A session's state is created on first access and lives until `close` or
/// until the store expires it. No call ever observes or mutates another
/// session's state.
pub trait SessionStore: Send + Sync {
    /// Run `f` against the session's state, creating it first if needed.
    ///
    /// The store is locked for the duration of `f`, so one interaction is
    /// fully applied before the next one starts.
    fn with_session<R>(&self, session_id: SessionId, f: impl FnOnce(&mut SessionState) -> R) -> R;

    /// Drop the session's state. Returns whether it existed.
    fn close(&self, session_id: SessionId) -> bool;

    /// Whether the session is live (known and not expired).
    fn contains(&self, session_id: SessionId) -> bool;

    /// Number of live sessions.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
struct Entry {
    state: SessionState,
    last_seen: DateTime<Utc>,
}

/// In-memory session store. State disappears with the process.
///
/// Idle sessions expire after [`SessionLimits::idle_ttl`]; expired entries
/// are swept whenever a new session is opened.
#[derive(Debug)]
pub struct InMemorySessionStore {
    seed: SessionSeed,
    limits: SessionLimits,
    inner: RwLock<HashMap<SessionId, Entry>>,
}

impl InMemorySessionStore {
    pub fn new(seed: SessionSeed) -> Self {
        Self::with_limits(seed, SessionLimits::default())
    }

    pub fn with_limits(seed: SessionSeed, limits: SessionLimits) -> Self {
        Self {
            seed,
            limits,
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn seed(&self) -> SessionSeed {
        self.seed
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    fn is_expired(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now - entry.last_seen >= self.limits.idle_ttl
    }

    /// [`SessionStore::with_session`] with an explicit clock reading.
    pub fn with_session_at<R>(
        &self,
        session_id: SessionId,
        now: DateTime<Utc>,
        f: impl FnOnce(&mut SessionState) -> R,
    ) -> R {
        // A panic inside `f` must not lock every other session out.
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let live = map
            .get(&session_id)
            .is_some_and(|entry| !self.is_expired(entry, now));
        if !live {
            self.sweep_locked(&mut map, now);
            while map.len() >= self.limits.max_sessions.max(1) {
                let Some(oldest) = map
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_seen)
                    .map(|(id, _)| *id)
                else {
                    break;
                };
                map.remove(&oldest);
                tracing::info!(session_id = %oldest, "session evicted (capacity)");
            }
        }

        let entry = map.entry(session_id).or_insert_with(|| {
            tracing::info!(%session_id, seed = ?self.seed, "session opened");
            Entry {
                state: SessionState::new(self.seed.build()),
                last_seen: now,
            }
        });
        entry.last_seen = now;
        f(&mut entry.state)
    }

    /// [`SessionStore::contains`] with an explicit clock reading.
    pub fn contains_at(&self, session_id: SessionId, now: DateTime<Utc>) -> bool {
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.get(&session_id)
            .is_some_and(|entry| !self.is_expired(entry, now))
    }

    /// Drop every expired session. Returns how many were dropped.
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        self.sweep_locked(&mut map, now)
    }

    fn sweep_locked(&self, map: &mut HashMap<SessionId, Entry>, now: DateTime<Utc>) -> usize {
        let before = map.len();
        map.retain(|_, entry| !self.is_expired(entry, now));
        let dropped = before - map.len();
        if dropped > 0 {
            tracing::info!(dropped, "expired sessions swept");
        }
        dropped
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(SessionSeed::default())
    }
}

impl SessionStore for InMemorySessionStore {
    fn with_session<R>(&self, session_id: SessionId, f: impl FnOnce(&mut SessionState) -> R) -> R {
        self.with_session_at(session_id, Utc::now(), f)
    }

    fn close(&self, session_id: SessionId) -> bool {
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let existed = map.remove(&session_id).is_some();
        if existed {
            tracing::info!(%session_id, "session closed");
        }
        existed
    }

    fn contains(&self, session_id: SessionId) -> bool {
        self.contains_at(session_id, Utc::now())
    }

    fn len(&self) -> usize {
        let now = Utc::now();
        let map = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        map.values().filter(|entry| !self.is_expired(entry, now)).count()
    }
}
