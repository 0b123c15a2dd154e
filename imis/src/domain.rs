use shared::config::{Config, ReadPolicy};
use shared::{Error, Result, TtlError, TtlMs};
use std::time::Duration;

pub mod response {
    use std::collections::BTreeMap;
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct PutResponse {
        /// `false` when an existing object was replaced
        pub created: bool,
        pub expires_in: Duration,
    }

    impl PutResponse {
        pub fn new(created: bool, expires_in: Duration) -> Self {
            Self {
                created,
                expires_in,
            }
        }
    }

    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub struct ListResponse {
        pub keys: Vec<String>,
    }

    impl ListResponse {
        pub fn new(keys: Vec<String>) -> Self {
            Self { keys }
        }

        /// Keys labelled with synthetic positions ("0", "1", ...).
        /// The labels carry no meaning beyond being distinct.
        pub fn indexed(&self) -> BTreeMap<String, String> {
            self.keys
                .iter()
                .enumerate()
                .map(|(i, key)| (i.to_string(), key.clone()))
                .collect()
        }
    }
}

pub use response::{ListResponse, PutResponse};

/// Default TTL plus the inclusive bounds a caller override must fall in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpiryPolicy {
    default_ttl: Duration,
    min_ttl: Duration,
    max_ttl: Duration,
}

impl ExpiryPolicy {
    pub fn new(default_ttl: Duration, min_ttl: Duration, max_ttl: Duration) -> Result<Self> {
        if default_ttl.is_zero() {
            return Err(Error::Config("default ttl must be positive".into()));
        }
        if min_ttl.is_zero() {
            return Err(Error::Config("minimum ttl must be positive".into()));
        }
        if min_ttl > max_ttl {
            return Err(Error::Config(format!(
                "minimum ttl {}ms exceeds maximum ttl {}ms",
                min_ttl.as_millis(),
                max_ttl.as_millis()
            )));
        }

        Ok(Self {
            default_ttl,
            min_ttl,
            max_ttl,
        })
    }

    pub fn from_millis(default_ms: u64, min_ms: u64, max_ms: u64) -> Result<Self> {
        Self::new(
            Duration::from_millis(default_ms),
            Duration::from_millis(min_ms),
            Duration::from_millis(max_ms),
        )
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn min_ttl(&self) -> Duration {
        self.min_ttl
    }

    pub fn max_ttl(&self) -> Duration {
        self.max_ttl
    }

    /// Turn an optional caller override into the delay before eviction
    pub fn resolve(&self, ttl: Option<TtlMs>) -> Result<Duration> {
        let Some(TtlMs(value)) = ttl else {
            return Ok(self.default_ttl);
        };

        let min = self.min_ttl.as_millis() as u64;
        let max = self.max_ttl.as_millis() as u64;

        match u64::try_from(value) {
            Ok(ms) if (min..=max).contains(&ms) => Ok(Duration::from_millis(ms)),
            _ => Err(TtlError::OutOfRange { value, min, max }.into()),
        }
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_millis(Config::DEFAULT_EXPIRES_MS),
            min_ttl: Duration::from_millis(Config::MIN_EXPIRES_MS),
            max_ttl: Duration::from_millis(Config::MAX_EXPIRES_MS),
        }
    }
}

/// Everything a store needs at construction time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub expiry: ExpiryPolicy,
    pub read_policy: ReadPolicy,
}

impl StoreConfig {
    pub fn new(expiry: ExpiryPolicy, read_policy: ReadPolicy) -> Self {
        Self {
            expiry,
            read_policy,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let expiry = ExpiryPolicy::from_millis(
            config.default_expires_ms,
            config.min_expires_ms,
            config.max_expires_ms,
        )?;
        Ok(Self::new(expiry, config.read_policy))
    }

    pub fn with_read_policy(mut self, read_policy: ReadPolicy) -> Self {
        self.read_policy = read_policy;
        self
    }
}
