use imis::ports::BlobStore;
use std::sync::Arc;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlobStore>,
    /// Shared secret expected in the `Authorization` header of protected routes
    pub token: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn BlobStore>, token: impl Into<Arc<str>>) -> Self {
        Self {
            store,
            token: token.into(),
        }
    }
}
