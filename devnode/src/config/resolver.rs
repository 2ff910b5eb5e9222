//! Input resolution: raw inputs to a [`NodeConfig`].

use std::collections::BTreeMap;
use std::time::Duration;

use super::options::{
    FlagShape, DEFAULT_HOST, DEFAULT_MODE, DEFAULT_PORT, DEFAULT_RELEASE_TAG, DEFAULT_TARGET,
    INPUT_FORWARD_OUTPUT, INPUT_HEALTH_CHECK_INTERVAL_MS, INPUT_HEALTH_CHECK_RETRIES,
    INPUT_HEALTH_CHECK_TIMEOUT_MS, INPUT_HEALTH_CHECK_WARMUP_MS, INPUT_HOST, INPUT_MODE,
    INPUT_PORT, INPUT_RELEASE_TAG, INPUT_TARGET, NODE_OPTIONS,
};
use super::record::{HealthCheckSettings, NodeConfig, OptionValue};
use super::source::ConfigSource;

/// Reads every recognized input from a [`ConfigSource`] and applies defaults.
///
/// Resolution is a pure read: it never fails and never validates. Values are
/// trimmed, and an empty value is treated exactly like a missing one. Switches are `true` only for
/// the literal string `"true"`.
pub struct InputResolver<S> {
    source: S,
}

impl<S: ConfigSource> InputResolver<S> {
    /// Create a resolver over the given source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Build the configuration record.
    pub fn resolve(&self) -> NodeConfig {
        let mut options = BTreeMap::new();

        for option in NODE_OPTIONS {
            let value = match option.shape {
                FlagShape::Value | FlagShape::Raw => self.text(option.input).map(OptionValue::Text),
                FlagShape::Switch => Some(OptionValue::Switch(self.switch_or(option.input, false))),
                FlagShape::Repeat => Some(OptionValue::Count(self.count(option.input))),
            };
            if let Some(value) = value {
                options.insert(option.input, value);
            }
        }

        options.insert(
            INPUT_PORT,
            OptionValue::Text(self.text_or(INPUT_PORT, DEFAULT_PORT)),
        );
        options.insert(
            INPUT_HOST,
            OptionValue::Text(self.text_or(INPUT_HOST, DEFAULT_HOST)),
        );

        NodeConfig {
            release_tag: self.text_or(INPUT_RELEASE_TAG, DEFAULT_RELEASE_TAG),
            target: self.text_or(INPUT_TARGET, DEFAULT_TARGET),
            mode: self.text_or(INPUT_MODE, DEFAULT_MODE),
            options,
            forward_output: self.switch_or(INPUT_FORWARD_OUTPUT, false),
            health_check: self.health_check(),
        }
    }

    /// Trimmed, non-empty value of an input.
    fn text(&self, name: &str) -> Option<String> {
        self.source
            .get(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn text_or(&self, name: &str, default: &str) -> String {
        self.text(name).unwrap_or_else(|| default.to_string())
    }

    /// Unset switches take `fallback`; set ones are true only for `"true"`.
    fn switch_or(&self, name: &str, fallback: bool) -> bool {
        match self.text(name) {
            Some(value) => value == "true",
            None => fallback,
        }
    }

    /// Counters that do not parse as a small non-negative integer are 0.
    fn count(&self, name: &str) -> u8 {
        self.text(name)
            .and_then(|value| value.parse::<u8>().ok())
            .unwrap_or(0)
    }

    fn health_check(&self) -> HealthCheckSettings {
        let defaults = HealthCheckSettings::default();
        HealthCheckSettings {
            warmup: self.millis_or(INPUT_HEALTH_CHECK_WARMUP_MS, defaults.warmup),
            interval: self.millis_or(INPUT_HEALTH_CHECK_INTERVAL_MS, defaults.interval),
            retries: self.number_or(INPUT_HEALTH_CHECK_RETRIES, defaults.retries),
            timeout: self.millis_or(INPUT_HEALTH_CHECK_TIMEOUT_MS, defaults.timeout),
        }
    }

    fn millis_or(&self, name: &str, default: Duration) -> Duration {
        let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(self.number_or(name, default_ms))
    }

    fn number_or<N>(&self, name: &str, default: N) -> N
    where
        N: std::str::FromStr + std::fmt::Display + Copy,
    {
        match self.text(name) {
            None => default,
            Some(raw) => match raw.parse::<N>() {
                Ok(value) => value,
                Err(_) => {
                    tracing::warn!(
                        input = name,
                        value = %raw,
                        "Ignoring unparseable input, using default {}",
                        default
                    );
                    default
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfigSource;

    fn resolve(source: MapConfigSource) -> NodeConfig {
        InputResolver::new(source).resolve()
    }

    #[test]
    fn test_defaults_applied_to_empty_source() {
        let config = resolve(MapConfigSource::new());

        assert_eq!(config.release_tag(), "latest");
        assert_eq!(config.target(), "x86_64-unknown-linux-gnu");
        assert_eq!(config.mode(), "run");
        assert_eq!(config.port(), "8011");
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.verbosity(), 0);
        assert!(config.fork_url().is_none());
        assert!(!config.forward_output());
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = resolve(
            MapConfigSource::new()
                .with("releaseTag", "")
                .with("port", "")
                .with("chainId", ""),
        );

        assert_eq!(config.release_tag(), "latest");
        assert_eq!(config.port(), "8011");
        assert!(config.get("chainId").is_none());
    }

    #[test]
    fn test_explicit_values_are_kept() {
        let config = resolve(
            MapConfigSource::new()
                .with("releaseTag", "v0.6.1")
                .with("target", "aarch64-apple-darwin")
                .with("mode", "fork")
                .with("forkUrl", "https://mainnet.era.zksync.io")
                .with("port", "9000")
                .with("chainId", "260"),
        );

        assert_eq!(config.release_tag(), "v0.6.1");
        assert_eq!(config.target(), "aarch64-apple-darwin");
        assert!(config.is_fork());
        assert_eq!(config.fork_url(), Some("https://mainnet.era.zksync.io"));
        assert_eq!(config.port(), "9000");
        assert_eq!(config.text("chainId"), Some("260"));
    }

    #[test]
    fn test_switches_require_literal_true() {
        let config = resolve(
            MapConfigSource::new()
                .with("offline", "true")
                .with("noCors", "TRUE")
                .with("noMining", "yes")
                .with("resetCache", ""),
        );

        assert!(config.switch("offline"));
        assert!(!config.switch("noCors"));
        assert!(!config.switch("noMining"));
        assert!(!config.switch("resetCache"));
        // Unset switches are recorded as false, not absent
        assert_eq!(config.get("autoImpersonate"), Some(&OptionValue::Switch(false)));
    }

    #[test]
    fn test_verbosity_parsing() {
        assert_eq!(resolve(MapConfigSource::new().with("verbosity", "2")).verbosity(), 2);
        assert_eq!(resolve(MapConfigSource::new().with("verbosity", "abc")).verbosity(), 0);
        assert_eq!(resolve(MapConfigSource::new().with("verbosity", "-1")).verbosity(), 0);
    }

    #[test]
    fn test_extra_args_read_from_hyphenated_input() {
        let config = resolve(MapConfigSource::new().with("extra-args", "--foo bar"));
        assert_eq!(config.extra_args(), Some("--foo bar"));
    }

    #[test]
    fn test_health_check_overrides() {
        let config = resolve(
            MapConfigSource::new()
                .with("healthCheckWarmupMs", "100")
                .with("healthCheckIntervalMs", "250")
                .with("healthCheckRetries", "5")
                .with("healthCheckTimeoutMs", "not-a-number"),
        );

        let settings = config.health_check();
        assert_eq!(settings.warmup, Duration::from_millis(100));
        assert_eq!(settings.interval, Duration::from_millis(250));
        assert_eq!(settings.retries, 5);
        assert_eq!(settings.timeout, Duration::from_millis(3000));
    }

    #[test]
    fn test_forward_output_switch() {
        let config = resolve(MapConfigSource::new().with("forwardOutput", "true"));
        assert!(config.forward_output());
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let source = MapConfigSource::new().with("mode", "fork").with("forkUrl", "https://x");
        let resolver = InputResolver::new(&source);
        assert_eq!(resolver.resolve(), resolver.resolve());
    }

    #[test]
    fn test_values_are_trimmed() {
        let config = resolve(
            MapConfigSource::new()
                .with("port", " 8011 ")
                .with("host", "\t0.0.0.0")
                .with("chainId", "   "),
        );

        assert_eq!(config.port(), "8011");
        assert_eq!(config.host(), "0.0.0.0");
        assert_eq!(config.text("chainId"), None);
    }
}
