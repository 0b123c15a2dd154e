// shared/src/lib.rs

use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("payload was empty")]
    EmptyPayload,
    #[error(transparent)]
    InvalidTtl(#[from] TtlError),
    #[error("object not found")]
    NotFound,
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

/// Reasons a caller-supplied TTL override is rejected
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TtlError {
    #[error("ttl should be an integer, got {0:?}")]
    Malformed(String),
    #[error("ttl must be within ({min}, {max}), got {value}")]
    OutOfRange { value: i64, min: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, Error>;

/// A TTL override in milliseconds exactly as the caller sent it.
/// Range checks happen against the store's expiry policy, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlMs(pub i64);

impl FromStr for TtlMs {
    type Err = TtlError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(TtlMs)
            .map_err(|_| TtlError::Malformed(s.to_string()))
    }
}

pub mod config;
