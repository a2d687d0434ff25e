use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    fmt,
    rc::{Rc, Weak},
    time::Duration,
};

use futures::future::{self, FutureExt, LocalBoxFuture, Shared};
use leptos::*;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    api::{ApiClient, ApiError, ListResponse, RequestOptions},
    utils::{
        task::Spawner,
        timer::{platform_timer, Timer, TimerHandle},
    },
};

const QUERY_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'?');

/// Canonical request identity: path plus sorted query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestKey {
    path: String,
    params: BTreeMap<String, String>,
}

impl RequestKey {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn canonical(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query = self
            .params
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_ENCODE),
                    utf8_percent_encode(v, QUERY_ENCODE)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

impl From<&str> for RequestKey {
    fn from(raw: &str) -> Self {
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (
                    percent_decode_str(k).decode_utf8_lossy().into_owned(),
                    percent_decode_str(v).decode_utf8_lossy().into_owned(),
                )
            })
            .collect();
        Self {
            path: path.to_string(),
            params,
        }
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// What a subscriber sees for one key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheSnapshot {
    pub data: Option<Value>,
    pub error: Option<ApiError>,
    pub is_loading: bool,
}

impl CacheSnapshot {
    pub fn decode<T: DeserializeOwned>(&self) -> Option<Result<T, ApiError>> {
        self.data.clone().map(|value| {
            serde_json::from_value(value)
                .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
        })
    }

    /// List payload items, empty when absent or undecodable.
    pub fn items<T: DeserializeOwned>(&self) -> Vec<T> {
        match self.data.clone().map(ListResponse::<T>::from_value) {
            Some(Ok(list)) => list.into_items(),
            Some(Err(err)) => {
                log::warn!("Ignoring malformed list payload: {}", err);
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Automatic retries after a failed request.
    pub retry_limit: u32,
    /// How long an entry without subscribers survives.
    pub gc_grace: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            retry_limit: 1,
            gc_grace: Duration::from_secs(300),
        }
    }
}

pub type FetchResult = Result<Value, ApiError>;
pub type Fetcher = Rc<dyn Fn(RequestKey) -> LocalBoxFuture<'static, FetchResult>>;
type Listener = Rc<dyn Fn(&CacheSnapshot)>;
type SharedFetch = Shared<LocalBoxFuture<'static, FetchResult>>;

struct CacheEntry {
    key: RequestKey,
    data: Option<Value>,
    error: Option<ApiError>,
    in_flight: Option<SharedFetch>,
    generation: u64,
    stale: bool,
    listeners: Vec<(u64, Listener)>,
    gc: Option<TimerHandle>,
}

impl CacheEntry {
    fn new(key: RequestKey) -> Self {
        Self {
            key,
            data: None,
            error: None,
            in_flight: None,
            generation: 0,
            stale: false,
            listeners: Vec::new(),
            gc: None,
        }
    }

    fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            data: self.data.clone(),
            error: self.error.clone(),
            is_loading: self.in_flight.is_some(),
        }
    }

    fn needs_fetch(&self) -> bool {
        self.in_flight.is_none() && (self.stale || self.data.is_none())
    }

    fn is_idle(&self) -> bool {
        self.listeners.is_empty() && self.in_flight.is_none()
    }

    fn listeners(&self) -> Vec<Listener> {
        self.listeners.iter().map(|(_, l)| l.clone()).collect()
    }
}

/// Entries live in a slot arena indexed by canonical key.
#[derive(Default)]
struct Arena {
    entries: Vec<Option<CacheEntry>>,
    index: HashMap<String, usize>,
    free: Vec<usize>,
    next_listener: u64,
}

impl Arena {
    fn get(&self, key: &RequestKey) -> Option<&CacheEntry> {
        let slot = *self.index.get(&key.canonical())?;
        self.entries.get(slot)?.as_ref()
    }

    fn get_mut(&mut self, key: &RequestKey) -> Option<&mut CacheEntry> {
        let slot = *self.index.get(&key.canonical())?;
        self.entries.get_mut(slot)?.as_mut()
    }

    fn get_or_insert(&mut self, key: &RequestKey) -> &mut CacheEntry {
        let canonical = key.canonical();
        let slot = match self.index.get(&canonical) {
            Some(&slot) => slot,
            None => {
                let slot = match self.free.pop() {
                    Some(slot) => slot,
                    None => {
                        self.entries.push(None);
                        self.entries.len() - 1
                    }
                };
                self.index.insert(canonical, slot);
                slot
            }
        };
        self.entries[slot].get_or_insert_with(|| CacheEntry::new(key.clone()))
    }

    fn remove(&mut self, key: &RequestKey) -> Option<CacheEntry> {
        let slot = self.index.remove(&key.canonical())?;
        let entry = self.entries.get_mut(slot)?.take();
        self.free.push(slot);
        entry
    }

    fn keys_with_path(&self, path: &str) -> Vec<RequestKey> {
        self.entries
            .iter()
            .flatten()
            .filter(|entry| entry.key.path() == path)
            .map(|entry| entry.key.clone())
            .collect()
    }

    fn next_listener_id(&mut self) -> u64 {
        self.next_listener += 1;
        self.next_listener
    }
}

struct CacheCore {
    arena: RefCell<Arena>,
    fetcher: Fetcher,
    spawner: Spawner,
    timer: Rc<dyn Timer>,
    policy: CachePolicy,
}

impl CacheCore {
    fn notify(&self, key: &RequestKey) {
        let pending = self
            .arena
            .borrow()
            .get(key)
            .map(|entry| (entry.listeners(), entry.snapshot()));
        if let Some((listeners, snapshot)) = pending {
            for listener in listeners {
                listener(&snapshot);
            }
        }
    }

    fn schedule_gc_if_idle(self: &Rc<Self>, key: &RequestKey) {
        let mut arena = self.arena.borrow_mut();
        let Some(entry) = arena.get_mut(key) else {
            return;
        };
        if !entry.is_idle() || entry.gc.is_some() {
            return;
        }
        let core = Rc::downgrade(self);
        let target = key.clone();
        entry.gc = Some(self.timer.schedule(
            self.policy.gc_grace,
            Box::new(move || {
                if let Some(core) = core.upgrade() {
                    core.evict_if_idle(&target);
                }
            }),
        ));
    }

    fn evict_if_idle(&self, key: &RequestKey) {
        let evicted = {
            let mut arena = self.arena.borrow_mut();
            match arena.get(key) {
                Some(entry) if entry.is_idle() => arena.remove(key),
                _ => None,
            }
        };
        if evicted.is_some() {
            log::debug!("Evicted cache entry {}", key);
        }
    }

    fn unsubscribe(self: &Rc<Self>, key: &RequestKey, id: u64) {
        let removed = {
            let mut arena = self.arena.borrow_mut();
            arena.get_mut(key).and_then(|entry| {
                let index = entry.listeners.iter().position(|(lid, _)| *lid == id)?;
                Some(entry.listeners.remove(index))
            })
        };
        drop(removed);
        self.schedule_gc_if_idle(key);
    }
}

async fn fetch_with_retry(fetcher: &Fetcher, key: &RequestKey, retry_limit: u32) -> FetchResult {
    let mut attempt = 0;
    loop {
        match fetcher(key.clone()).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_unauthorized() || attempt >= retry_limit => return Err(err),
            Err(err) => {
                attempt += 1;
                log::debug!("Retrying {} after error: {}", key, err);
            }
        }
    }
}

/// Body of the single in-flight request for `key`.
///
/// An invalidation that lands while the request is running bumps the entry
/// generation; the result is then dropped and the request reissued, so
/// subscribers only ever see post-invalidation data.
async fn run_fetch(core: Weak<CacheCore>, key: RequestKey) -> FetchResult {
    loop {
        let (generation, fetcher, retry_limit) = {
            let Some(core) = core.upgrade() else {
                return Err(ApiError::unknown("Cache was dropped"));
            };
            let generation = core
                .arena
                .borrow()
                .get(&key)
                .map(|entry| entry.generation)
                .unwrap_or_default();
            (generation, core.fetcher.clone(), core.policy.retry_limit)
        };

        let result = fetch_with_retry(&fetcher, &key, retry_limit).await;

        let Some(core) = core.upgrade() else {
            return result;
        };
        {
            let mut arena = core.arena.borrow_mut();
            let Some(entry) = arena.get_mut(&key) else {
                return result;
            };
            if entry.generation != generation {
                log::debug!("{} was invalidated in flight, refetching", key);
                continue;
            }
            entry.in_flight = None;
            match &result {
                Ok(value) => {
                    entry.data = Some(value.clone());
                    entry.error = None;
                    entry.stale = false;
                }
                Err(err) => {
                    entry.error = Some(err.clone());
                    entry.stale = true;
                }
            }
        }
        core.notify(&key);
        core.schedule_gc_if_idle(&key);
        return result;
    }
}

/// Keyed, deduplicating fetch cache shared by list views and selectors.
#[derive(Clone)]
pub struct RemoteCache {
    core: Rc<CacheCore>,
}

impl RemoteCache {
    pub fn new(
        fetcher: impl Fn(RequestKey) -> LocalBoxFuture<'static, FetchResult> + 'static,
        spawner: Spawner,
        timer: Rc<dyn Timer>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            core: Rc::new(CacheCore {
                arena: RefCell::new(Arena::default()),
                fetcher: Rc::new(fetcher),
                spawner,
                timer,
                policy,
            }),
        }
    }

    /// Cache whose fetches are `GET` requests through `client`.
    pub fn for_client(client: ApiClient) -> Self {
        Self::with_client(
            client,
            Spawner::leptos(),
            platform_timer(),
            CachePolicy::default(),
        )
    }

    pub fn with_client(
        client: ApiClient,
        spawner: Spawner,
        timer: Rc<dyn Timer>,
        policy: CachePolicy,
    ) -> Self {
        Self::new(
            move |key: RequestKey| {
                let client = client.clone();
                async move {
                    let options = RequestOptions {
                        query: key.params(),
                        ..RequestOptions::default()
                    };
                    client.execute(Method::GET, key.path(), options).await
                }
                .boxed_local()
            },
            spawner,
            timer,
            policy,
        )
    }

    pub fn snapshot(&self, key: &RequestKey) -> CacheSnapshot {
        self.core
            .arena
            .borrow()
            .get(key)
            .map(CacheEntry::snapshot)
            .unwrap_or_default()
    }

    pub fn contains(&self, key: &RequestKey) -> bool {
        self.core.arena.borrow().get(key).is_some()
    }

    /// Registers `listener` for `key` and fetches if the entry is absent,
    /// stale or failed. Dropping the returned handle unsubscribes.
    pub fn subscribe(
        &self,
        key: RequestKey,
        listener: impl Fn(&CacheSnapshot) + 'static,
    ) -> Subscription {
        let (id, should_fetch, cancelled_gc) = {
            let mut arena = self.core.arena.borrow_mut();
            let id = arena.next_listener_id();
            let entry = arena.get_or_insert(&key);
            entry.listeners.push((id, Rc::new(listener)));
            (id, entry.needs_fetch(), entry.gc.take())
        };
        drop(cancelled_gc);
        if should_fetch {
            self.revalidate(&key);
        }
        Subscription {
            core: Rc::downgrade(&self.core),
            key,
            id,
        }
    }

    /// Revalidates `key`, joining the in-flight request if there is one.
    pub fn fetch(&self, key: &RequestKey) -> LocalBoxFuture<'static, FetchResult> {
        self.start(key).boxed_local()
    }

    /// Cached data when fresh, otherwise [`RemoteCache::fetch`].
    pub fn load(&self, key: &RequestKey) -> LocalBoxFuture<'static, FetchResult> {
        let cached = self
            .core
            .arena
            .borrow()
            .get(key)
            .filter(|entry| !entry.needs_fetch() && entry.in_flight.is_none())
            .and_then(|entry| entry.data.clone());
        match cached {
            Some(value) => future::ready(Ok(value)).boxed_local(),
            None => self.fetch(key),
        }
    }

    /// Manual retry; the request runs detached.
    pub fn revalidate(&self, key: &RequestKey) {
        let _ = self.start(key);
    }

    /// Forces a refetch for current subscribers and marks the entry stale for
    /// future ones.
    pub fn invalidate(&self, key: &RequestKey) {
        let refetch = {
            let mut arena = self.core.arena.borrow_mut();
            match arena.get_mut(key) {
                Some(entry) => {
                    entry.generation += 1;
                    entry.stale = true;
                    entry.in_flight.is_none() && !entry.listeners.is_empty()
                }
                None => false,
            }
        };
        log::debug!("Invalidated {}", key);
        if refetch {
            self.revalidate(key);
        }
    }

    /// Invalidates every key under `path`, whatever its query parameters.
    pub fn invalidate_path(&self, path: &str) {
        let keys = self.core.arena.borrow().keys_with_path(path);
        for key in keys {
            self.invalidate(&key);
        }
    }

    /// Marks every entry stale; used when the signed-in user changes.
    pub fn invalidate_all(&self) {
        let keys: Vec<RequestKey> = self
            .core
            .arena
            .borrow()
            .entries
            .iter()
            .flatten()
            .map(|entry| entry.key.clone())
            .collect();
        for key in keys {
            self.invalidate(&key);
        }
    }

    fn start(&self, key: &RequestKey) -> SharedFetch {
        let (pending, created, cancelled_gc) = {
            let mut arena = self.core.arena.borrow_mut();
            let entry = arena.get_or_insert(key);
            match &entry.in_flight {
                Some(existing) => (existing.clone(), false, None),
                None => {
                    let pending = run_fetch(Rc::downgrade(&self.core), key.clone())
                        .boxed_local()
                        .shared();
                    entry.in_flight = Some(pending.clone());
                    (pending, true, entry.gc.take())
                }
            }
        };
        drop(cancelled_gc);
        if created {
            self.core
                .spawner
                .spawn(pending.clone().map(|_| ()).boxed_local());
            self.core.notify(key);
        }
        pending
    }
}

/// Listener registration; unsubscribes on drop.
pub struct Subscription {
    core: Weak<CacheCore>,
    key: RequestKey,
    id: u64,
}

impl Subscription {
    pub fn key(&self) -> &RequestKey {
        &self.key
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(core) = self.core.upgrade() {
            core.unsubscribe(&self.key, self.id);
        }
    }
}

pub fn use_remote_cache() -> RemoteCache {
    match use_context::<RemoteCache>() {
        Some(cache) => cache,
        None => {
            let client = use_context::<ApiClient>().unwrap_or_default();
            let cache = RemoteCache::for_client(client);
            provide_context(cache.clone());
            cache
        }
    }
}

/// Signal mirroring the cache entry for `key` while the owning scope lives.
pub fn use_cache_snapshot(key: RequestKey) -> ReadSignal<CacheSnapshot> {
    let cache = use_remote_cache();
    let (snapshot, set_snapshot) = create_signal(cache.snapshot(&key));
    let subscription = cache.subscribe(key.clone(), move |next| set_snapshot.set(next.clone()));
    set_snapshot.set(cache.snapshot(&key));
    on_cleanup(move || drop(subscription));
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{task::testing::pool_spawner, timer::ManualTimer};
    use futures::{channel::oneshot, executor::LocalPool};
    use serde_json::json;
    use std::cell::Cell;

    type Pending = Rc<RefCell<Vec<(RequestKey, oneshot::Sender<FetchResult>)>>>;

    struct Harness {
        pool: LocalPool,
        timer: ManualTimer,
        cache: RemoteCache,
        pending: Pending,
    }

    impl Harness {
        /// Every request parks until the test answers it.
        fn scripted() -> Self {
            let pool = LocalPool::new();
            let timer = ManualTimer::new();
            let pending: Pending = Rc::new(RefCell::new(Vec::new()));
            let queue = pending.clone();
            let cache = RemoteCache::new(
                move |key| {
                    let (tx, rx) = oneshot::channel();
                    queue.borrow_mut().push((key, tx));
                    async move {
                        rx.await
                            .unwrap_or_else(|_| Err(ApiError::unknown("request dropped")))
                    }
                    .boxed_local()
                },
                pool_spawner(&pool),
                Rc::new(timer.clone()),
                CachePolicy::default(),
            );
            Self {
                pool,
                timer,
                cache,
                pending,
            }
        }

        fn requests(&self) -> usize {
            self.pending.borrow().len()
        }

        fn answer(&mut self, result: FetchResult) {
            let (_, tx) = self.pending.borrow_mut().remove(0);
            let _ = tx.send(result);
            self.pool.run_until_stalled();
        }

        fn run(&mut self) {
            self.pool.run_until_stalled();
        }
    }

    fn counting_cache(
        pool: &LocalPool,
        timer: &ManualTimer,
        outcomes: Rc<RefCell<Vec<FetchResult>>>,
        calls: Rc<Cell<u32>>,
    ) -> RemoteCache {
        RemoteCache::new(
            move |_key| {
                calls.set(calls.get() + 1);
                let next = if outcomes.borrow().is_empty() {
                    Ok(json!([]))
                } else {
                    outcomes.borrow_mut().remove(0)
                };
                future::ready(next).boxed_local()
            },
            pool_spawner(pool),
            Rc::new(timer.clone()),
            CachePolicy::default(),
        )
    }

    #[test]
    fn request_key_canonical_form_is_sorted_and_encoded() {
        let key = RequestKey::new("/currencies")
            .with_param("name", "us dollar")
            .with_param("limit", "10");
        assert_eq!(key.canonical(), "/currencies?limit=10&name=us%20dollar");
        assert_eq!(RequestKey::new("/assets").canonical(), "/assets");
        assert_eq!(RequestKey::from("/currencies?name=us%20dollar&limit=10"), key);
    }

    #[test]
    fn overlapping_fetches_share_one_request() {
        let mut h = Harness::scripted();
        let key = RequestKey::new("/assets");

        let first = h.cache.fetch(&key);
        let second = h.cache.fetch(&key);
        h.run();
        assert_eq!(h.requests(), 1);
        assert!(h.cache.snapshot(&key).is_loading);

        h.answer(Ok(json!([{"id": 1}])));
        let a = futures::executor::block_on(first).unwrap();
        let b = futures::executor::block_on(second).unwrap();
        assert_eq!(a, b);
        assert_eq!(h.requests(), 0);
        assert!(!h.cache.snapshot(&key).is_loading);
    }

    #[test]
    fn subscribers_attach_to_pending_request_and_observe_same_value() {
        let mut h = Harness::scripted();
        let key = RequestKey::new("/portfolios");
        let seen_a = Rc::new(RefCell::new(Vec::new()));
        let seen_b = Rc::new(RefCell::new(Vec::new()));

        let log_a = seen_a.clone();
        let _sub_a = h
            .cache
            .subscribe(key.clone(), move |snap| log_a.borrow_mut().push(snap.clone()));
        let log_b = seen_b.clone();
        let _sub_b = h
            .cache
            .subscribe(key.clone(), move |snap| log_b.borrow_mut().push(snap.clone()));
        h.run();
        assert_eq!(h.requests(), 1);

        h.answer(Ok(json!({"result": [{"id": 7}], "total": 1})));
        let last_a = seen_a.borrow().last().cloned().unwrap();
        let last_b = seen_b.borrow().last().cloned().unwrap();
        assert_eq!(last_a, last_b);
        assert_eq!(last_a.items::<Value>().len(), 1);
        assert!(!last_a.is_loading);
    }

    #[test]
    fn invalidate_refetches_for_current_subscribers() {
        let mut h = Harness::scripted();
        let key = RequestKey::new("/assets");
        let latest = Rc::new(RefCell::new(CacheSnapshot::default()));
        let sink = latest.clone();
        let _sub = h
            .cache
            .subscribe(key.clone(), move |snap| *sink.borrow_mut() = snap.clone());
        h.run();
        h.answer(Ok(json!([{"id": 1}])));
        assert_eq!(latest.borrow().items::<Value>().len(), 1);

        h.cache.invalidate(&key);
        h.run();
        assert_eq!(h.requests(), 1);
        assert!(latest.borrow().is_loading);
        h.answer(Ok(json!([{"id": 1}, {"id": 2}])));
        assert_eq!(latest.borrow().items::<Value>().len(), 2);
    }

    #[test]
    fn invalidation_during_flight_reissues_without_overlap() {
        let mut h = Harness::scripted();
        let key = RequestKey::new("/assets");
        let waiter = h.cache.fetch(&key);
        h.run();
        assert_eq!(h.requests(), 1);

        h.cache.invalidate(&key);
        h.run();
        // Still a single request outstanding.
        assert_eq!(h.requests(), 1);

        h.answer(Ok(json!(["before mutation"])));
        assert_eq!(h.requests(), 1);
        h.answer(Ok(json!(["after mutation"])));

        let value = futures::executor::block_on(waiter).unwrap();
        assert_eq!(value, json!(["after mutation"]));
        assert_eq!(h.cache.snapshot(&key).data, Some(json!(["after mutation"])));
    }

    #[test]
    fn invalidate_without_subscribers_only_marks_stale() {
        let mut h = Harness::scripted();
        let key = RequestKey::new("/users");
        let load = h.cache.load(&key);
        h.run();
        h.answer(Ok(json!([1])));
        assert_eq!(futures::executor::block_on(load).unwrap(), json!([1]));

        // Fresh data is served without a request.
        let cached = futures::executor::block_on(h.cache.load(&key)).unwrap();
        assert_eq!(cached, json!([1]));
        assert_eq!(h.requests(), 0);

        h.cache.invalidate(&key);
        h.run();
        assert_eq!(h.requests(), 0);

        let reload = h.cache.load(&key);
        h.run();
        assert_eq!(h.requests(), 1);
        h.answer(Ok(json!([1, 2])));
        assert_eq!(futures::executor::block_on(reload).unwrap(), json!([1, 2]));
    }

    #[test]
    fn failures_retry_once_then_surface_error_state() {
        let mut pool = LocalPool::new();
        let timer = ManualTimer::new();
        let calls = Rc::new(Cell::new(0));
        let outcomes = Rc::new(RefCell::new(vec![
            Err(ApiError::request_failed("offline")),
            Err(ApiError::request_failed("still offline")),
        ]));
        let cache = counting_cache(&pool, &timer, outcomes, calls.clone());
        let key = RequestKey::new("/assets");
        let latest = Rc::new(RefCell::new(CacheSnapshot::default()));
        let sink = latest.clone();

        let _sub = cache.subscribe(key.clone(), move |snap| *sink.borrow_mut() = snap.clone());
        pool.run_until_stalled();

        assert_eq!(calls.get(), 2);
        let snapshot = latest.borrow().clone();
        assert_eq!(
            snapshot.error.as_ref().map(|e| e.error.as_str()),
            Some("still offline")
        );
        assert!(snapshot.data.is_none());
        assert!(snapshot.items::<Value>().is_empty());

        // Manual retry recovers.
        cache.revalidate(&key);
        pool.run_until_stalled();
        assert_eq!(calls.get(), 3);
        assert!(latest.borrow().error.is_none());
    }

    #[test]
    fn retry_success_hides_first_failure() {
        let mut pool = LocalPool::new();
        let timer = ManualTimer::new();
        let calls = Rc::new(Cell::new(0));
        let outcomes = Rc::new(RefCell::new(vec![
            Err(ApiError::request_failed("blip")),
            Ok(json!([1])),
        ]));
        let cache = counting_cache(&pool, &timer, outcomes, calls.clone());
        let key = RequestKey::new("/assets");

        let result = pool.run_until(cache.fetch(&key));
        assert_eq!(result.unwrap(), json!([1]));
        assert_eq!(calls.get(), 2);
        assert!(cache.snapshot(&key).error.is_none());
    }

    #[test]
    fn authentication_rejections_are_not_retried() {
        let mut pool = LocalPool::new();
        let timer = ManualTimer::new();
        let calls = Rc::new(Cell::new(0));
        let outcomes = Rc::new(RefCell::new(vec![Err(ApiError::unauthorized("expired"))]));
        let cache = counting_cache(&pool, &timer, outcomes, calls.clone());

        let result = pool.run_until(cache.fetch(&RequestKey::new("/users")));
        assert!(result.unwrap_err().is_unauthorized());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn idle_entries_are_evicted_after_grace_period() {
        let mut pool = LocalPool::new();
        let timer = ManualTimer::new();
        let calls = Rc::new(Cell::new(0));
        let cache = counting_cache(&pool, &timer, Rc::new(RefCell::new(Vec::new())), calls);
        let key = RequestKey::new("/currencies");

        let sub = cache.subscribe(key.clone(), |_| {});
        pool.run_until_stalled();
        drop(sub);
        assert!(cache.contains(&key));

        timer.advance(Duration::from_secs(120));
        // Resubscribing cancels the pending eviction.
        let again = cache.subscribe(key.clone(), |_| {});
        timer.advance(Duration::from_secs(600));
        assert!(cache.contains(&key));

        drop(again);
        timer.advance(CachePolicy::default().gc_grace);
        assert!(!cache.contains(&key));
    }

    #[test]
    fn invalidate_path_covers_every_query_variant() {
        let mut pool = LocalPool::new();
        let timer = ManualTimer::new();
        let calls = Rc::new(Cell::new(0));
        let cache = counting_cache(&pool, &timer, Rc::new(RefCell::new(Vec::new())), calls.clone());

        let _plain = cache.subscribe(RequestKey::new("/assets"), |_| {});
        let _search = cache.subscribe(RequestKey::new("/assets").with_param("search", "btc"), |_| {});
        let _other = cache.subscribe(RequestKey::new("/currencies"), |_| {});
        pool.run_until_stalled();
        assert_eq!(calls.get(), 3);

        cache.invalidate_path("/assets");
        pool.run_until_stalled();
        assert_eq!(calls.get(), 5);
    }
}
