//! Session-scoped TTL cache for read-mostly data (conversation lists,
//! message pages).
//!
//! The cache is an optimization layer only: every caller has a correct
//! non-cached path, so a stale or missing entry costs a refetch, never
//! correctness. Values are stored as immutable snapshots behind `Rc`;
//! callers must clone out and never mutate through the cache.
//!
//! Instances are constructed explicitly and handed to the component tree
//! through [`SessionCacheProvider`], so tests can build isolated caches
//! with their own clock.

use jiff::Timestamp;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use yew::prelude::*;

/// Freshness window applied when a caller doesn't specify one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

struct CacheSlot {
    value: Rc<dyn Any>,
    stored_at: Timestamp,
    ttl: Duration,
}

fn is_fresh_at(now: Timestamp, slot: &CacheSlot, max_age: Duration) -> bool {
    let age_ms = now.as_millisecond() - slot.stored_at.as_millisecond();
    age_ms >= 0 && (age_ms as u128) < max_age.as_millis()
}

/// Decides when `set` should sweep out slots that outlived their ttl.
///
/// Sweeping bounds memory; it is not needed for freshness, since reads
/// check slot age independently.
pub trait SweepPolicy {
    fn should_sweep(&self, inserts_since_sweep: u32, len: usize) -> bool;
}

/// Sweep after every `n` inserts. `SweepEveryN(0)` never sweeps.
#[derive(Debug, Clone, Copy)]
pub struct SweepEveryN(pub u32);

impl SweepPolicy for SweepEveryN {
    fn should_sweep(&self, inserts_since_sweep: u32, _len: usize) -> bool {
        self.0 > 0 && inserts_since_sweep >= self.0
    }
}

pub struct SessionCache {
    slots: RefCell<HashMap<String, CacheSlot>>,
    inserts_since_sweep: Cell<u32>,
    policy: Box<dyn SweepPolicy>,
    clock: Rc<dyn Fn() -> Timestamp>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::with_parts(Rc::new(Timestamp::now), Box::new(SweepEveryN(32)))
    }

    /// Build a cache with an injected clock and sweep policy.
    pub fn with_parts(
        clock: Rc<dyn Fn() -> Timestamp>,
        policy: Box<dyn SweepPolicy>,
    ) -> Self {
        Self {
            slots: RefCell::new(HashMap::new()),
            inserts_since_sweep: Cell::new(0),
            policy,
            clock,
        }
    }

    /// Clone out the stored value if it is younger than [`DEFAULT_TTL`].
    pub fn get<T: Clone + 'static>(&self, key: &str) -> Option<T> {
        self.get_within(key, DEFAULT_TTL)
    }

    /// Clone out the stored value if it is younger than `max_age`.
    ///
    /// A slot that fails the age check is left in place; removal is the
    /// sweep policy's job.
    pub fn get_within<T: Clone + 'static>(
        &self,
        key: &str,
        max_age: Duration,
    ) -> Option<T> {
        let slots = self.slots.borrow();
        let slot = slots.get(key)?;
        if !is_fresh_at((self.clock)(), slot, max_age) {
            return None;
        }
        slot.value.downcast_ref::<T>().cloned()
    }

    /// Store a value with the default ttl.
    pub fn set<T: 'static>(&self, key: impl Into<String>, value: T) {
        self.set_for(key, value, DEFAULT_TTL);
    }

    /// Store a value. A zero ttl stores nothing.
    pub fn set_for<T: 'static>(
        &self,
        key: impl Into<String>,
        value: T,
        ttl: Duration,
    ) {
        if ttl.is_zero() {
            return;
        }
        self.slots.borrow_mut().insert(
            key.into(),
            CacheSlot {
                value: Rc::new(value),
                stored_at: (self.clock)(),
                ttl,
            },
        );

        let inserts = self.inserts_since_sweep.get() + 1;
        if self.policy.should_sweep(inserts, self.slots.borrow().len()) {
            self.inserts_since_sweep.set(0);
            self.sweep();
        } else {
            self.inserts_since_sweep.set(inserts);
        }
    }

    pub fn invalidate(&self, key: &str) {
        self.slots.borrow_mut().remove(key);
    }

    /// Remove every slot whose key starts with `prefix`. Used to fan out
    /// invalidation to everything related to a user or conversation after
    /// a mutation.
    pub fn invalidate_prefix(&self, prefix: &str) {
        self.slots
            .borrow_mut()
            .retain(|key, _| !key.starts_with(prefix));
    }

    pub fn clear(&self) {
        self.slots.borrow_mut().clear();
    }

    /// Drop every slot that has outlived the ttl it was stored with.
    pub fn sweep(&self) {
        let now = (self.clock)();
        self.slots
            .borrow_mut()
            .retain(|_, slot| is_fresh_at(now, slot, slot.ttl));
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to one cache instance. Equality is instance identity, so
/// providing the same cache twice doesn't re-render consumers.
#[derive(Clone)]
pub struct SessionCacheHandle(Rc<SessionCache>);

impl SessionCacheHandle {
    pub fn new(cache: SessionCache) -> Self {
        Self(Rc::new(cache))
    }
}

impl PartialEq for SessionCacheHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for SessionCacheHandle {
    type Target = SessionCache;

    fn deref(&self) -> &SessionCache {
        &self.0
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionCacheProviderProps {
    pub children: Children,
}

#[function_component]
pub fn SessionCacheProvider(props: &SessionCacheProviderProps) -> Html {
    let cache = use_state(|| SessionCacheHandle::new(SessionCache::new()));

    html! {
        <ContextProvider<SessionCacheHandle> context={(*cache).clone()}>
            {props.children.clone()}
        </ContextProvider<SessionCacheHandle>>
    }
}

#[hook]
pub fn use_session_cache() -> SessionCacheHandle {
    use_context::<SessionCacheHandle>()
        .expect("use_session_cache must be used within a SessionCacheProvider")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cache driven by a hand-cranked clock so tests never sleep.
    fn test_cache() -> (SessionCache, Rc<Cell<i64>>) {
        let now_ms = Rc::new(Cell::new(1_700_000_000_000));
        let clock_ms = now_ms.clone();
        let cache = SessionCache::with_parts(
            Rc::new(move || {
                Timestamp::from_millisecond(clock_ms.get()).unwrap()
            }),
            Box::new(SweepEveryN(0)),
        );
        (cache, now_ms)
    }

    #[test]
    fn fresh_within_ttl_stale_after() {
        let (cache, now_ms) = test_cache();

        cache.set_for("k", "v".to_string(), Duration::from_secs(1));
        assert_eq!(
            cache.get_within::<String>("k", Duration::from_secs(1)),
            Some("v".to_string())
        );

        now_ms.set(now_ms.get() + 999);
        assert!(
            cache
                .get_within::<String>("k", Duration::from_secs(1))
                .is_some()
        );

        now_ms.set(now_ms.get() + 1);
        assert_eq!(cache.get_within::<String>("k", Duration::from_secs(1)), None);
    }

    #[test]
    fn reader_freshness_window_is_independent_of_stored_ttl() {
        let (cache, now_ms) = test_cache();

        cache.set_for("k", 7u32, Duration::from_secs(60));
        now_ms.set(now_ms.get() + 5_000);

        // A reader demanding tighter freshness misses even though the slot
        // hasn't outlived its own ttl.
        assert_eq!(cache.get_within::<u32>("k", Duration::from_secs(1)), None);
        assert_eq!(
            cache.get_within::<u32>("k", Duration::from_secs(10)),
            Some(7)
        );
    }

    #[test]
    fn prefix_invalidation_fans_out() {
        let (cache, _now) = test_cache();

        cache.set("user:1:a", 1u32);
        cache.set("user:1:b", 2u32);
        cache.set("user:2:a", 3u32);

        cache.invalidate_prefix("user:1:");

        assert_eq!(cache.get::<u32>("user:1:a"), None);
        assert_eq!(cache.get::<u32>("user:1:b"), None);
        assert_eq!(cache.get::<u32>("user:2:a"), Some(3));
    }

    #[test]
    fn invalidate_removes_only_the_key() {
        let (cache, _now) = test_cache();

        cache.set("a", 1u32);
        cache.set("b", 2u32);
        cache.invalidate("a");

        assert_eq!(cache.get::<u32>("a"), None);
        assert_eq!(cache.get::<u32>("b"), Some(2));
    }

    #[test]
    fn zero_ttl_stores_nothing() {
        let (cache, _now) = test_cache();

        cache.set_for("k", 1u32, Duration::ZERO);
        assert!(cache.is_empty());
    }

    #[test]
    fn stale_slot_remains_until_swept() {
        let (cache, now_ms) = test_cache();

        cache.set_for("k", 1u32, Duration::from_secs(1));
        now_ms.set(now_ms.get() + 10_000);

        // Read misses on age but the slot still occupies the map.
        assert_eq!(cache.get::<u32>("k"), None);
        assert_eq!(cache.len(), 1);

        cache.sweep();
        assert!(cache.is_empty());
    }

    #[test]
    fn sweep_policy_runs_during_set() {
        let now_ms = Rc::new(Cell::new(1_700_000_000_000));
        let clock_ms = now_ms.clone();
        let cache = SessionCache::with_parts(
            Rc::new(move || {
                Timestamp::from_millisecond(clock_ms.get()).unwrap()
            }),
            Box::new(SweepEveryN(2)),
        );

        // Insert #1 since the last sweep: the policy doesn't fire yet.
        cache.set_for("old", 1u32, Duration::from_secs(1));
        now_ms.set(now_ms.get() + 10_000);
        assert_eq!(cache.len(), 1);

        // Insert #2 trips SweepEveryN(2) and evicts the expired slot.
        cache.set("fresh", 2u32);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get::<u32>("old"), None);
        assert_eq!(cache.get::<u32>("fresh"), Some(2));
    }

    #[test]
    fn typed_get_requires_matching_type() {
        let (cache, _now) = test_cache();

        cache.set("k", "text".to_string());
        assert_eq!(cache.get::<u32>("k"), None);
        assert_eq!(cache.get::<String>("k"), Some("text".to_string()));
    }

    #[test]
    fn overwrite_refreshes_the_slot() {
        let (cache, now_ms) = test_cache();

        cache.set_for("k", 1u32, Duration::from_secs(1));
        now_ms.set(now_ms.get() + 900);
        cache.set_for("k", 2u32, Duration::from_secs(1));
        now_ms.set(now_ms.get() + 900);

        // 1.8s after the first set, but only 0.9s after the overwrite.
        assert_eq!(
            cache.get_within::<u32>("k", Duration::from_secs(1)),
            Some(2)
        );
    }
}
