use anyhow::{Context, Result, bail};
use std::env;
use std::time::Duration;
use tracing::{info, warn};

/// Bundled config for mobile builds (iOS/Android)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const DEFAULT_REPLY_LATENCY: Duration = Duration::from_millis(1500);

const LATENCY_VAR: &str = "VITALIS_REPLY_LATENCY_MS";
const GREETING_VAR: &str = "VITALIS_GREETING";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Simulated "assistant is typing" delay before each reply.
    pub reply_latency: Duration,
    /// Seed new conversations with the assistant greeting.
    pub greeting: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reply_latency: DEFAULT_REPLY_LATENCY,
            greeting: true,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(LATENCY_VAR) {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{LATENCY_VAR} must be milliseconds, got {raw:?}"))?;
            config.reply_latency = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(GREETING_VAR) {
            config.greeting =
                parse_flag(&raw).with_context(|| format!("invalid {GREETING_VAR}"))?;
        }

        Ok(config)
    }

    /// [`from_env`](Self::from_env), falling back to defaults on bad values.
    pub fn from_env_or_default() -> Self {
        Self::or_default(Self::from_env())
    }

    /// Unwrap a loaded config, logging what the app will run with.
    fn or_default(loaded: Result<Self>) -> Self {
        let config = match loaded {
            Ok(config) => config,
            Err(err) => {
                warn!("invalid configuration, using defaults: {:#}", err);
                Self::default()
            }
        };
        info!(
            reply_latency_ms = config.reply_latency.as_millis() as u64,
            greeting = config.greeting,
            "configuration loaded"
        );
        config
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean flag, got {other:?}"),
    }
}

/// Populate the environment from `.env`, or from the bundled config when
/// there is no `.env` (mobile builds).
#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
pub fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    for (key, value) in bundled_entries(BUNDLED_CONFIG) {
        // Only set if not already set (allow env override)
        if env::var(key).is_err() {
            // SAFETY: We're setting env vars at startup before any threads are spawned
            unsafe {
                env::set_var(key, value);
            }
        }
    }
}

/// KEY=VALUE pairs of an env file, skipping comments and blank lines.
fn bundled_entries(contents: &str) -> impl Iterator<Item = (&str, &str)> {
    contents.lines().filter_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        line.split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
    })
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
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.reply_latency, Duration::from_millis(1500));
        assert!(config.greeting);
    }

    #[test]
    fn test_reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (LATENCY_VAR, " 250 "),
            (GREETING_VAR, "Off"),
        ]))
        .unwrap();
        assert_eq!(config.reply_latency, Duration::from_millis(250));
        assert!(!config.greeting);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(AppConfig::from_lookup(lookup_from(&[(LATENCY_VAR, "fast")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[(LATENCY_VAR, "-5")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[(GREETING_VAR, "maybe")])).is_err());
    }

    #[test]
    fn test_or_default_falls_back_on_error() {
        let loaded = AppConfig::from_lookup(lookup_from(&[(LATENCY_VAR, "soon")]));
        assert_eq!(AppConfig::or_default(loaded), AppConfig::default());

        let custom = AppConfig {
            reply_latency: Duration::from_millis(10),
            greeting: false,
        };
        assert_eq!(AppConfig::or_default(Ok(custom.clone())), custom);
    }

    #[test]
    fn test_bundled_entries() {
        let entries: Vec<_> =
            bundled_entries("# comment\n\nA = 1\nB=two\nnot a pair\n").collect();
        assert_eq!(entries, vec![("A", "1"), ("B", "two")]);
    }

    #[test]
    fn test_bundled_config_is_valid() {
        let pairs: Vec<_> = bundled_entries(BUNDLED_CONFIG).collect();
        assert!(AppConfig::from_lookup(lookup_from(&pairs)).is_ok());
    }
}
