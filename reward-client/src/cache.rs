//! Client-side query cache
//!
//! One [`QueryCache`] per list (categories, rewards, posts, ...). The
//! server stays the source of truth: after every mutation the whole list
//! is refetched and replaces the cached entries. Refreshes are
//! single-flight, so two panels asking for the same list at the same time
//! share one request.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use shared::models::{Category, ContentItem, Reward};

use crate::error::ClientResult;

/// Entity with a stable id
pub trait Cacheable: Clone + Send + Sync + 'static {
    fn cache_key(&self) -> &str;
}

impl Cacheable for Category {
    fn cache_key(&self) -> &str {
        &self.id
    }
}

impl Cacheable for Reward {
    fn cache_key(&self) -> &str {
        &self.id
    }
}

impl Cacheable for ContentItem {
    fn cache_key(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
struct Entries<T> {
    /// Ids in server order
    order: Vec<String>,
    items: HashMap<String, T>,
    loaded: bool,
}

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            items: HashMap::new(),
            loaded: false,
        }
    }
}

/// List cache keyed by entity id
#[derive(Debug)]
pub struct QueryCache<T> {
    entries: RwLock<Entries<T>>,
    /// Held for the duration of a fetch
    fetch_gate: tokio::sync::Mutex<()>,
    /// Incremented by every refresh request
    tickets: AtomicU64,
    /// Highest ticket answered by a completed fetch
    served: AtomicU64,
    /// Incremented whenever the entries are replaced
    generation: AtomicU64,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            fetch_gate: tokio::sync::Mutex::new(()),
            tickets: AtomicU64::new(0),
            served: AtomicU64::new(0),
            generation: AtomicU64::new(0),
        }
    }
}

impl<T: Cacheable> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refetch the list through `loader`
    ///
    /// A caller that finds a fetch already in flight waits for it. If that
    /// fetch started after this call was made its result is reused,
    /// otherwise one follow-up fetch serves every caller that queued up
    /// meanwhile. On error the cached entries are left untouched.
    pub async fn refresh<F, Fut>(&self, loader: F) -> ClientResult<Vec<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<Vec<T>>>,
    {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let _gate = self.fetch_gate.lock().await;

        if self.served.load(Ordering::SeqCst) >= ticket {
            tracing::trace!(ticket, "Refresh served by a concurrent fetch");
            return Ok(self.snapshot());
        }

        let covers = self.tickets.load(Ordering::SeqCst);
        let items = loader().await?;
        self.replace(items);
        self.served.store(covers, Ordering::SeqCst);
        Ok(self.snapshot())
    }

    /// Return the cached list, fetching it first if it was never loaded
    pub async fn ensure_loaded<F, Fut>(&self, loader: F) -> ClientResult<Vec<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<Vec<T>>>,
    {
        if self.is_loaded() {
            return Ok(self.snapshot());
        }
        self.refresh(loader).await
    }

    /// Replace all entries with a fresh server list
    pub fn replace(&self, items: Vec<T>) {
        let mut entries = self.entries.write();
        entries.order.clear();
        entries.items.clear();
        for item in items {
            let key = item.cache_key().to_string();
            if entries.items.insert(key.clone(), item).is_none() {
                entries.order.push(key);
            }
        }
        entries.loaded = true;
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Cached list in server order
    pub fn snapshot(&self) -> Vec<T> {
        let entries = self.entries.read();
        entries
            .order
            .iter()
            .filter_map(|key| entries.items.get(key).cloned())
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.entries.read().items.get(key).cloned()
    }

    /// Patch one entry in place; `None` if the key is not cached
    pub fn update<R>(&self, key: &str, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.entries.write().items.get_mut(key).map(f)
    }

    pub fn is_loaded(&self) -> bool {
        self.entries.read().loaded
    }

    pub fn len(&self) -> usize {
        self.entries.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Changes every time the entries are replaced
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::oneshot;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        value: u32,
    }

    impl Cacheable for Item {
        fn cache_key(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, value: u32) -> Item {
        Item {
            id: id.to_string(),
            value,
        }
    }

    #[tokio::test]
    async fn test_refresh_keeps_server_order() {
        let cache = QueryCache::new();
        assert!(!cache.is_loaded());
        let items = cache
            .refresh(|| async { Ok(vec![item("b", 1), item("a", 2)]) })
            .await
            .unwrap();
        assert_eq!(items, vec![item("b", 1), item("a", 2)]);
        assert!(cache.is_loaded());
        assert_eq!(cache.get("a"), Some(item("a", 2)));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_entries() {
        let cache = QueryCache::new();
        cache.replace(vec![item("a", 1)]);
        let result = cache
            .refresh(|| async {
                Err(crate::ClientError::InvalidResponse("boom".into()))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.snapshot(), vec![item("a", 1)]);
    }

    #[tokio::test]
    async fn test_update_patches_single_entry() {
        let cache = QueryCache::new();
        cache.replace(vec![item("a", 1), item("b", 1)]);
        let new_value = cache.update("b", |it| {
            it.value += 1;
            it.value
        });
        assert_eq!(new_value, Some(2));
        assert_eq!(cache.update("zzz", |it| it.value), None);
        assert_eq!(cache.get("a"), Some(item("a", 1)));
    }

    #[tokio::test]
    async fn test_refreshes_during_flight_share_one_follow_up() {
        let cache = Arc::new(QueryCache::<Item>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let (release_tx, release_rx) = oneshot::channel::<()>();

        // First refresh blocks until released
        let first = {
            let cache = cache.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                cache
                    .refresh(|| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        let _ = release_rx.await;
                        Ok(vec![item("a", 1)])
                    })
                    .await
            })
        };
        while calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        // Five more callers queue up behind it
        let mut waiters = Vec::new();
        for _ in 0..5 {
            let cache = cache.clone();
            let calls = calls.clone();
            waiters.push(tokio::spawn(async move {
                cache
                    .refresh(|| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(vec![item("a", 2)])
                    })
                    .await
            }));
        }
        while cache.tickets.load(Ordering::SeqCst) < 6 {
            tokio::task::yield_now().await;
        }

        release_tx.send(()).unwrap();
        assert_eq!(first.await.unwrap().unwrap(), vec![item("a", 1)]);
        for waiter in waiters {
            assert_eq!(waiter.await.unwrap().unwrap(), vec![item("a", 2)]);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_ensure_loaded_fetches_once() {
        let cache = QueryCache::new();
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            cache
                .ensure_loaded(|| async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![item("a", 1)])
                })
                .await
                .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
