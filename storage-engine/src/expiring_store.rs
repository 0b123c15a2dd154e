use async_trait::async_trait;
use bytes::Bytes;
use imis::domain::{ListResponse, PutResponse, StoreConfig};
use imis::ports::BlobStore;
use imis::ReadPolicy;
use shared::{Error, Result, TtlMs};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::AbortHandle;
use tracing::debug;

/// A stored object together with the timer that will evict it
struct Entry {
    payload: Bytes,
    // Identifies the write this entry came from; eviction only removes a matching entry
    generation: u64,
    eviction: AbortHandle,
}

struct StoreInner {
    entries: RwLock<HashMap<String, Entry>>,
    next_generation: AtomicU64,
    config: StoreConfig,
}

impl StoreInner {
    /// Remove `key` if it still holds the write identified by `generation`
    async fn evict(&self, key: &str, generation: u64) -> bool {
        let mut entries = self.entries.write().await;

        match entries.get(key) {
            Some(entry) if entry.generation == generation => {
                entries.remove(key);
                debug!("Evicted object '{}' (generation {})", key, generation);
                true
            }
            _ => {
                debug!(
                    "Skipped eviction of '{}' (generation {} superseded or gone)",
                    key, generation
                );
                false
            }
        }
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        for entry in self.entries.get_mut().values() {
            entry.eviction.abort();
        }
    }
}

/// In-memory blob store where every object expires on its own timer.
///
/// All access goes through a single reader/writer lock: `get` and `list`
/// share the read lock, while `put`, one-shot reads and evictions take the
/// write lock. Each `put` arms a tokio task that sleeps for the object's TTL
/// and then evicts it, unless a newer write has replaced it in the meantime.
///
/// Cloning is cheap and yields a handle to the same store.
#[derive(Clone)]
pub struct ExpiringStore {
    inner: Arc<StoreInner>,
}

impl ExpiringStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                entries: RwLock::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
                config,
            }),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Spawn the task that evicts `key` after `delay`.
    /// The task holds only a weak handle so it never keeps a dropped store alive.
    fn schedule_eviction(&self, key: String, generation: u64, delay: Duration) -> AbortHandle {
        let store: Weak<StoreInner> = Arc::downgrade(&self.inner);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = store.upgrade() {
                inner.evict(&key, generation).await;
            }
        })
        .abort_handle()
    }
}

impl Default for ExpiringStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

#[async_trait]
impl BlobStore for ExpiringStore {
    async fn put(&self, key: String, payload: Bytes, ttl: Option<TtlMs>) -> Result<PutResponse> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }
        let expires_in = self.inner.config.expiry.resolve(ttl)?;
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);

        let mut entries = self.inner.entries.write().await;

        // Armed while the write lock is held: the timer cannot observe the map
        // before this entry is in it.
        let eviction = self.schedule_eviction(key.clone(), generation, expires_in);
        let previous = entries.insert(
            key.clone(),
            Entry {
                payload,
                generation,
                eviction,
            },
        );

        if let Some(previous) = &previous {
            previous.eviction.abort();
        }
        drop(entries);

        debug!(
            "Stored object '{}' (generation {}, expires in {}ms, replaced: {})",
            key,
            generation,
            expires_in.as_millis(),
            previous.is_some()
        );

        Ok(PutResponse::new(previous.is_none(), expires_in))
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        match self.inner.config.read_policy {
            ReadPolicy::Idempotent => {
                let entries = self.inner.entries.read().await;
                entries
                    .get(key)
                    .map(|entry| entry.payload.clone())
                    .ok_or(Error::NotFound)
            }
            ReadPolicy::OneShot => {
                let mut entries = self.inner.entries.write().await;
                let entry = entries.remove(key).ok_or(Error::NotFound)?;
                entry.eviction.abort();
                debug!("Consumed object '{}' (generation {})", key, entry.generation);
                Ok(entry.payload)
            }
        }
    }

    async fn list(&self) -> Result<ListResponse> {
        let entries = self.inner.entries.read().await;
        Ok(ListResponse::new(entries.keys().cloned().collect()))
    }

    async fn len(&self) -> usize {
        self.inner.entries.read().await.len()
    }
}

impl Debug for ExpiringStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringStore")
            .field("entries", &"<RwLock<HashMap>>")
            .field("config", &self.inner.config)
            .finish()
    }
}
