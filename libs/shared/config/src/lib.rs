use std::env;
use std::time::Duration;
use tracing::warn;

const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_service_key: String,
    pub store_timeout_secs: u64,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Missing or
    /// unparsable values fall back to defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            supabase_url: lookup("SUPABASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_service_key: lookup("SUPABASE_SERVICE_KEY")
                .unwrap_or_else(|| {
                    warn!("SUPABASE_SERVICE_KEY not set, using empty value");
                    String::new()
                }),
            store_timeout_secs: parse_timeout_or_default(&lookup),
            port: parse_or_default(&lookup, "PORT", DEFAULT_PORT),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_service_key.is_empty()
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_service_key: String::new(),
            store_timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
            port: DEFAULT_PORT,
        }
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", key, raw, default);
            default
        }),
        None => default,
    }
}

/// A zero timeout would fail every store call, so it is treated as invalid.
fn parse_timeout_or_default<F>(lookup: &F) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    match parse_or_default(lookup, "STORE_TIMEOUT_SECS", DEFAULT_STORE_TIMEOUT_SECS) {
        0 => {
            warn!(
                "STORE_TIMEOUT_SECS must be positive, using default {}",
                DEFAULT_STORE_TIMEOUT_SECS
            );
            DEFAULT_STORE_TIMEOUT_SECS
        }
        secs => secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup_from(&[]));

        assert!(!config.is_configured());
        assert_eq!(config.store_timeout(), Duration::from_secs(10));
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn reads_remote_store_settings() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://clinic.supabase.co/"),
            ("SUPABASE_SERVICE_KEY", "service-key"),
            ("STORE_TIMEOUT_SECS", "3"),
            ("PORT", "9090"),
        ]));

        assert!(config.is_configured());
        assert_eq!(config.supabase_url, "https://clinic.supabase.co");
        assert_eq!(config.store_timeout_secs, 3);
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("STORE_TIMEOUT_SECS", "soon"),
            ("PORT", "-1"),
        ]));

        assert_eq!(config.store_timeout_secs, 10);
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let config = AppConfig::from_lookup(lookup_from(&[("STORE_TIMEOUT_SECS", "0")]));

        assert_eq!(config.store_timeout_secs, 10);
        assert_eq!(config.store_timeout(), Duration::from_secs(10));
    }
}
