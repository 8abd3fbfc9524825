use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use wasm_bindgen::JsCast;

use crate::error::SiteError;
use crate::observer::Subscription;
use crate::store::{CollectionQuery, Document, DocumentStore};

/// What a live query hands to its subscriber.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum LiveEvent<T> {
    /// The complete, ordered result set.
    Snapshot(Vec<T>),
    Failed(SiteError),
}

type SnapshotCallback = Arc<dyn Fn(LiveEvent<Document>) + Send + Sync>;

struct Entry {
    query: CollectionQuery,
    last: Option<Vec<Document>>,
    /// Issue number of the newest result applied to this entry.
    seq: u64,
    failed: bool,
    callback: SnapshotCallback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    next_seq: u64,
    entries: BTreeMap<u64, Entry>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|p| p.into_inner())
}

#[derive(Default)]
struct Poller {
    timer_id: Option<i32>,
    online: Option<WindowListenerHandle>,
}

/// Live collection queries over a request/response document store.
///
/// Every refresh re-runs the full query and hands the whole result to each
/// subscriber whose last delivered snapshot differs. Refreshes happen when
/// the owner asks (after subscribing, after a write), on a fixed interval,
/// and when the browser comes back online.
#[derive(Clone)]
pub(crate) struct SyncClient {
    store: Arc<dyn DocumentStore>,
    registry: Arc<Mutex<Registry>>,
    poller: Arc<Mutex<Poller>>,
}

impl SyncClient {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            registry: Arc::new(Mutex::new(Registry::default())),
            poller: Arc::new(Mutex::new(Poller::default())),
        }
    }

    /// Registers `callback` for `query`. Nothing is delivered until the next
    /// refresh of that collection; the first one always carries the current set.
    pub fn subscribe(
        &self,
        query: CollectionQuery,
        callback: impl Fn(LiveEvent<Document>) + Send + Sync + 'static,
    ) -> Subscription {
        let id = {
            let mut reg = lock(&self.registry);
            let id = reg.next_id;
            reg.next_id += 1;
            log::debug!("subscribe #{id} to `{}`", query.collection);
            reg.entries.insert(
                id,
                Entry {
                    query,
                    last: None,
                    seq: 0,
                    failed: false,
                    callback: Arc::new(callback),
                },
            );
            id
        };

        let weak: Weak<Mutex<Registry>> = Arc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = weak.upgrade() {
                if lock(&registry).entries.remove(&id).is_some() {
                    log::debug!("unsubscribe #{id}");
                }
            }
        })
    }

    pub fn active_subscriptions(&self) -> usize {
        lock(&self.registry).entries.len()
    }

    /// Re-runs every live query on `collection`.
    pub async fn refresh(&self, collection: &str) {
        let queries = self.distinct_queries(|q| q.collection == collection);
        self.run(queries).await;
    }

    pub async fn refresh_all(&self) {
        let queries = self.distinct_queries(|_| true);
        self.run(queries).await;
    }

    fn distinct_queries(&self, keep: impl Fn(&CollectionQuery) -> bool) -> Vec<CollectionQuery> {
        let reg = lock(&self.registry);
        let mut out: Vec<CollectionQuery> = Vec::new();
        for entry in reg.entries.values() {
            if keep(&entry.query) && !out.contains(&entry.query) {
                out.push(entry.query.clone());
            }
        }
        out
    }

    async fn run(&self, queries: Vec<CollectionQuery>) {
        for query in queries {
            let seq = {
                let mut reg = lock(&self.registry);
                reg.next_seq += 1;
                reg.next_seq
            };
            let result = self.store.query(&query).await;
            match &result {
                Ok(docs) => log::debug!("`{}` returned {} documents", query.collection, docs.len()),
                Err(e) => log::warn!("live query on `{}` failed: {e}", query.collection),
            }
            self.deliver(&query, seq, result);
        }
    }

    /// Results are applied in issue order: one that was overtaken by a
    /// later refresh of the same query is dropped.
    fn deliver(&self, query: &CollectionQuery, seq: u64, result: Result<Vec<Document>, SiteError>) {
        let pending: Vec<(u64, SnapshotCallback, LiveEvent<Document>)> = {
            let mut reg = lock(&self.registry);
            let mut out = Vec::new();
            for (id, entry) in reg.entries.iter_mut() {
                if entry.query != *query {
                    continue;
                }
                if seq <= entry.seq {
                    log::debug!("dropping stale `{}` result for #{id}", query.collection);
                    continue;
                }
                entry.seq = seq;
                match &result {
                    Ok(docs) => {
                        entry.failed = false;
                        if entry.last.as_ref() == Some(docs) {
                            continue;
                        }
                        entry.last = Some(docs.clone());
                        out.push((*id, entry.callback.clone(), LiveEvent::Snapshot(docs.clone())));
                    }
                    Err(e) => {
                        // Report the transition into failure, not every failed poll.
                        if entry.failed {
                            continue;
                        }
                        entry.failed = true;
                        out.push((*id, entry.callback.clone(), LiveEvent::Failed(e.clone())));
                    }
                }
            }
            out
        };

        for (id, callback, event) in pending {
            if !lock(&self.registry).entries.contains_key(&id) {
                continue;
            }
            callback(event);
        }
    }

    /// Starts the interval worker and the `online` listener. Idempotent.
    pub fn start_polling(&self, interval_ms: u32) {
        let mut poller = lock(&self.poller);
        if poller.timer_id.is_some() {
            return;
        }
        let Some(win) = web_sys::window() else {
            return;
        };

        let client = self.clone();
        let tick = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            let client = client.clone();
            spawn_local(async move { client.refresh_all().await });
        }) as Box<dyn FnMut()>);

        let timeout = i32::try_from(interval_ms).unwrap_or(i32::MAX);
        match win.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            timeout,
        ) {
            Ok(id) => poller.timer_id = Some(id),
            Err(e) => {
                log::error!("could not start live sync worker: {e:?}");
                return;
            }
        }
        // Lives for the whole session.
        tick.forget();

        let client = self.clone();
        poller.online = Some(window_event_listener(ev::online, move |_ev: web_sys::Event| {
            log::debug!("back online, refreshing live queries");
            let client = client.clone();
            spawn_local(async move { client.refresh_all().await });
        }));
    }
}

/// View-side cache of one live query: loading until the first snapshot,
/// then exactly the latest snapshot.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum LiveState<T> {
    Loading,
    Ready(Vec<T>),
}

impl<T> Default for LiveState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> LiveState<T> {
    /// Snapshots replace the cached list wholesale. Failures leave it alone,
    /// so a query that never succeeded keeps showing its loading state.
    pub fn apply(&mut self, event: LiveEvent<T>) {
        if let LiveEvent::Snapshot(items) = event {
            *self = Self::Ready(items);
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Loading => &[],
            Self::Ready(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::{FieldValue, Fields};
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    fn fields(title: &str) -> Fields {
        let mut f = Fields::new();
        f.insert("title".to_string(), FieldValue::from(title));
        f
    }

    fn recorder() -> (
        Arc<Mutex<Vec<LiveEvent<Document>>>>,
        impl Fn(LiveEvent<Document>) + Send + Sync + 'static,
    ) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        (seen, move |ev| s.lock().unwrap().push(ev))
    }

    fn ids(ev: &LiveEvent<Document>) -> Vec<String> {
        match ev {
            LiveEvent::Snapshot(docs) => docs.iter().map(|d| d.id.clone()).collect(),
            LiveEvent::Failed(_) => vec!["<failed>".to_string()],
        }
    }

    #[test]
    fn test_first_refresh_delivers_current_set_newest_first() {
        let store = MemoryStore::new();
        store.insert("books", "a", fields("A"));
        store.insert("books", "b", fields("B"));
        let sync = SyncClient::new(Arc::new(store));

        let (seen, cb) = recorder();
        let _sub = sync.subscribe(CollectionQuery::newest_first("books"), cb);
        block_on(sync.refresh("books"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(ids(&seen[0]), vec!["b", "a"]);
    }

    #[test]
    fn test_unchanged_result_is_not_redelivered() {
        let store = MemoryStore::new();
        store.insert("books", "a", fields("A"));
        let sync = SyncClient::new(Arc::new(store.clone()));

        let (seen, cb) = recorder();
        let _sub = sync.subscribe(CollectionQuery::newest_first("books"), cb);
        block_on(sync.refresh("books"));
        block_on(sync.refresh_all());
        assert_eq!(seen.lock().unwrap().len(), 1);

        store.remove("books", "a");
        block_on(sync.refresh_all());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(ids(&seen[1]).is_empty());
    }

    #[test]
    fn test_refresh_only_touches_named_collection() {
        let store = MemoryStore::new();
        let sync = SyncClient::new(Arc::new(store.clone()));

        let (_books, cb1) = recorder();
        let (_ideas, cb2) = recorder();
        let _a = sync.subscribe(CollectionQuery::newest_first("books"), cb1);
        let _b = sync.subscribe(CollectionQuery::newest_first("ideas"), cb2);

        block_on(sync.refresh("books"));
        assert_eq!(store.calls(), vec![crate::store::memory::StoreCall::Query("books".into())]);
    }

    #[test]
    fn test_same_query_is_fetched_once_per_refresh() {
        let store = MemoryStore::new();
        let sync = SyncClient::new(Arc::new(store.clone()));

        let (first, cb1) = recorder();
        let (second, cb2) = recorder();
        let _a = sync.subscribe(CollectionQuery::newest_first("podcasts"), cb1);
        let _b = sync.subscribe(CollectionQuery::newest_first("podcasts"), cb2);
        block_on(sync.refresh("podcasts"));

        assert_eq!(store.query_count(), 1);
        assert_eq!(first.lock().unwrap().len(), 1);
        assert_eq!(second.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_no_callback_after_unsubscribe() {
        let store = MemoryStore::new();
        let sync = SyncClient::new(Arc::new(store.clone()));

        let (seen, cb) = recorder();
        let sub = sync.subscribe(CollectionQuery::newest_first("youtube"), cb);
        sub.unsubscribe();
        store.insert("youtube", "c", fields("C"));
        block_on(sync.refresh_all());

        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(sync.active_subscriptions(), 0);
    }

    #[test]
    fn test_failure_reported_once_then_recovers() {
        let store = MemoryStore::new();
        let sync = SyncClient::new(Arc::new(store.clone()));
        let (seen, cb) = recorder();
        let _sub = sync.subscribe(CollectionQuery::newest_first("ideas"), cb);

        store.fail_queries_with(Some(SiteError::Subscription("permission denied".into())));
        block_on(sync.refresh("ideas"));
        block_on(sync.refresh("ideas"));
        store.fail_queries_with(None);
        block_on(sync.refresh("ideas"));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(matches!(seen[0], LiveEvent::Failed(SiteError::Subscription(_))));
        assert!(matches!(seen[1], LiveEvent::Snapshot(_)));
    }

    /// Holds each query's response until the test releases it.
    struct GatedStore {
        inner: MemoryStore,
        gates: Mutex<Vec<oneshot::Receiver<()>>>,
    }

    #[async_trait::async_trait(?Send)]
    impl DocumentStore for GatedStore {
        async fn query(&self, query: &CollectionQuery) -> Result<Vec<Document>, SiteError> {
            let result = self.inner.query(query).await;
            let gate = self.gates.lock().unwrap().remove(0);
            let _ = gate.await;
            result
        }

        async fn create(&self, collection: &str, fields: Fields) -> Result<String, SiteError> {
            self.inner.create(collection, fields).await
        }

        async fn delete(&self, collection: &str, id: &str) -> Result<(), SiteError> {
            self.inner.delete(collection, id).await
        }

        async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), SiteError> {
            self.inner.update(collection, id, fields).await
        }
    }

    #[test]
    fn test_overtaken_refresh_does_not_replace_newer_snapshot() {
        let inner = MemoryStore::new();
        let (release_first, first_gate) = oneshot::channel::<()>();
        let (release_second, second_gate) = oneshot::channel::<()>();
        let store = GatedStore {
            inner: inner.clone(),
            gates: Mutex::new(vec![first_gate, second_gate]),
        };
        let sync = SyncClient::new(Arc::new(store));
        let (seen, cb) = recorder();
        let _sub = sync.subscribe(CollectionQuery::newest_first("books"), cb);

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        // Poll tick reads the empty collection.
        let s = sync.clone();
        spawner
            .spawn_local(async move { s.refresh("books").await })
            .unwrap();
        pool.run_until_stalled();

        // A write lands and its follow-up refresh reads the new document.
        inner.insert("books", "a", fields("A"));
        let s = sync.clone();
        spawner
            .spawn_local(async move { s.refresh("books").await })
            .unwrap();
        pool.run_until_stalled();

        release_second.send(()).unwrap();
        pool.run_until_stalled();
        release_first.send(()).unwrap();
        pool.run_until_stalled();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(ids(&seen[0]), vec!["a"]);
    }

    #[test]
    fn test_live_state_blind_replace() {
        let mut state: LiveState<&str> = LiveState::default();
        assert!(state.is_loading());

        state.apply(LiveEvent::Snapshot(vec!["a", "b"]));
        state.apply(LiveEvent::Snapshot(vec!["c"]));
        assert_eq!(state.items(), &["c"]);
    }

    #[test]
    fn test_live_state_failure_keeps_loading() {
        let mut state: LiveState<&str> = LiveState::Loading;
        state.apply(LiveEvent::Failed(SiteError::Subscription("offline".into())));
        assert!(state.is_loading());
    }
}
