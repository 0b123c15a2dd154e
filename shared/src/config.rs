use std::time::Duration;
use tracing::warn;

/// Which way a successful read treats the stored object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReadPolicy {
    /// Reads leave the object in place; only its TTL removes it
    #[default]
    Idempotent,
    /// The first successful read removes the object
    OneShot,
}

impl ReadPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "idempotent" => Some(ReadPolicy::Idempotent),
            "one-shot" | "oneshot" | "one_shot" => Some(ReadPolicy::OneShot),
            _ => None,
        }
    }
}

pub struct Config {
    pub host: String,
    pub token: String,
    pub default_expires_ms: u64,
    pub min_expires_ms: u64,
    pub max_expires_ms: u64,
    pub read_policy: ReadPolicy,
    pub request_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Config {
    pub const DEFAULT_HOST: &str = "0.0.0.0:3000";
    pub const DEFAULT_TOKEN: &str = "orange_juice";
    pub const DEFAULT_EXPIRES_MS: u64 = 15_000;
    pub const MIN_EXPIRES_MS: u64 = 1;
    pub const MAX_EXPIRES_MS: u64 = 60_000;
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
    const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let number = |name: &str, default: u64| {
            var(name)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(default)
        };

        let read_policy = match var("IMIS_READ_POLICY") {
            Some(raw) => ReadPolicy::parse(&raw).unwrap_or_else(|| {
                warn!("Unknown IMIS_READ_POLICY '{}', using idempotent reads", raw);
                ReadPolicy::Idempotent
            }),
            None => ReadPolicy::default(),
        };

        Self {
            host: var("IMIS_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            token: var("IMIS_TOKEN").unwrap_or_else(|| {
                warn!("IMIS_TOKEN not set, using default token '{}'", Self::DEFAULT_TOKEN);
                Self::DEFAULT_TOKEN.to_string()
            }),
            default_expires_ms: number("IMIS_DEFAULT_EXPIRES_MS", Self::DEFAULT_EXPIRES_MS),
            min_expires_ms: number("IMIS_MIN_EXPIRES_MS", Self::MIN_EXPIRES_MS),
            max_expires_ms: number("IMIS_MAX_EXPIRES_MS", Self::MAX_EXPIRES_MS),
            read_policy,
            request_timeout: Duration::from_secs(number(
                "IMIS_REQUEST_TIMEOUT_SECS",
                Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            max_body_bytes: number("IMIS_MAX_BODY_BYTES", Self::DEFAULT_MAX_BODY_BYTES as u64)
                as usize,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0:3000");
        assert_eq!(config.token, "orange_juice");
        assert_eq!(config.default_expires_ms, 15_000);
        assert_eq!(config.min_expires_ms, 1);
        assert_eq!(config.max_expires_ms, 60_000);
        assert_eq!(config.read_policy, ReadPolicy::Idempotent);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("IMIS_HOST", "127.0.0.1:9000"),
            ("IMIS_TOKEN", "apple_juice"),
            ("IMIS_DEFAULT_EXPIRES_MS", "200"),
            ("IMIS_MAX_EXPIRES_MS", "1000"),
            ("IMIS_READ_POLICY", "one-shot"),
        ]);
        assert_eq!(config.host, "127.0.0.1:9000");
        assert_eq!(config.token, "apple_juice");
        assert_eq!(config.default_expires_ms, 200);
        assert_eq!(config.max_expires_ms, 1000);
        assert_eq!(config.read_policy, ReadPolicy::OneShot);
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let config = config_with(&[("IMIS_DEFAULT_EXPIRES_MS", "soon")]);
        assert_eq!(config.default_expires_ms, Config::DEFAULT_EXPIRES_MS);
    }

    #[test]
    fn test_read_policy_parse() {
        assert_eq!(ReadPolicy::parse("Idempotent"), Some(ReadPolicy::Idempotent));
        assert_eq!(ReadPolicy::parse("oneshot"), Some(ReadPolicy::OneShot));
        assert_eq!(ReadPolicy::parse("sometimes"), None);
    }
}
