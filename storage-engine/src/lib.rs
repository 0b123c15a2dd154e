mod expiring_store;

pub use expiring_store::ExpiringStore;
