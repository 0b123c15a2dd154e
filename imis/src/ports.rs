#![deny(clippy::all)]

use crate::domain::{ListResponse, PutResponse};
use async_trait::async_trait;
use bytes::Bytes;
use shared::{Result, TtlMs};

// Ports are the pluggable extension points for underlying store implementations

/// Port for a self-expiring blob store
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Store `payload` under `key`, replacing any previous object and its
    /// expiry. `ttl` overrides the default time-to-live.
    async fn put(&self, key: String, payload: Bytes, ttl: Option<TtlMs>) -> Result<PutResponse>;

    /// Fetch the payload currently stored under `key`
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Snapshot of every live key
    async fn list(&self) -> Result<ListResponse>;

    /// Number of live objects
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
