pub mod domain;
pub mod ports;

pub use domain::{ExpiryPolicy, ListResponse, PutResponse, StoreConfig};
pub use ports::BlobStore;
pub use shared::config::ReadPolicy;
