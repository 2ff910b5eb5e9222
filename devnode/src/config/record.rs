//! The resolved configuration record.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use super::options::{
    NodeMode, INPUT_EXTRA_ARGS, INPUT_FORK_URL, INPUT_HOST, INPUT_PORT, INPUT_VERBOSITY,
};

/// Default delay before the first health check.
pub const DEFAULT_HEALTH_CHECK_WARMUP: Duration = Duration::from_millis(8000);
/// Default delay between health checks.
pub const DEFAULT_HEALTH_CHECK_INTERVAL: Duration = Duration::from_millis(8000);
/// Default number of health check attempts.
pub const DEFAULT_HEALTH_CHECK_RETRIES: u32 = 3;
/// Default per-attempt health check timeout.
pub const DEFAULT_HEALTH_CHECK_TIMEOUT: Duration = Duration::from_millis(3000);

/// A resolved option value.
///
/// Options that were not set have no entry in the record at all, so an
/// absent option, a switch that is `false`, and a text value are three
/// distinct states. Text values are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// A non-empty string value.
    Text(String),
    /// A boolean switch.
    Switch(bool),
    /// A counter such as the verbosity level.
    Count(u8),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Text(value) => f.write_str(value),
            OptionValue::Switch(value) => write!(f, "{}", value),
            OptionValue::Count(value) => write!(f, "{}", value),
        }
    }
}

/// Health check timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthCheckSettings {
    /// Delay before the first attempt.
    pub warmup: Duration,
    /// Delay between attempts.
    pub interval: Duration,
    /// Total number of attempts.
    pub retries: u32,
    /// Timeout of a single attempt.
    pub timeout: Duration,
}

impl Default for HealthCheckSettings {
    fn default() -> Self {
        Self {
            warmup: DEFAULT_HEALTH_CHECK_WARMUP,
            interval: DEFAULT_HEALTH_CHECK_INTERVAL,
            retries: DEFAULT_HEALTH_CHECK_RETRIES,
            timeout: DEFAULT_HEALTH_CHECK_TIMEOUT,
        }
    }
}

/// Immutable configuration of one node launch.
///
/// Built once by [`InputResolver`](super::InputResolver) and only read
/// afterwards. Fields with defaults (`release_tag`, `target`, `mode`, `port`,
/// `host`) always carry a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub(super) release_tag: String,
    pub(super) target: String,
    pub(super) mode: String,
    pub(super) options: BTreeMap<&'static str, OptionValue>,
    pub(super) forward_output: bool,
    pub(super) health_check: HealthCheckSettings,
}

impl NodeConfig {
    /// Release tag of the node binary (`latest` or a concrete tag).
    pub fn release_tag(&self) -> &str {
        &self.release_tag
    }

    /// Platform target used to select a release asset.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Raw launch mode as given.
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Whether the node is launched in fork mode.
    pub fn is_fork(&self) -> bool {
        self.mode == NodeMode::Fork.as_str()
    }

    /// RPC port as given (validated separately).
    pub fn port(&self) -> &str {
        self.text(INPUT_PORT).unwrap_or_default()
    }

    /// RPC host.
    pub fn host(&self) -> &str {
        self.text(INPUT_HOST).unwrap_or_default()
    }

    /// URL to fork from, if any.
    pub fn fork_url(&self) -> Option<&str> {
        self.text(INPUT_FORK_URL)
    }

    /// Verbosity level, 0 when unset.
    pub fn verbosity(&self) -> u8 {
        match self.options.get(INPUT_VERBOSITY) {
            Some(OptionValue::Count(level)) => *level,
            _ => 0,
        }
    }

    /// Free-form extra arguments, if any.
    pub fn extra_args(&self) -> Option<&str> {
        self.text(INPUT_EXTRA_ARGS)
    }

    /// Whether node output is forwarded into the job log.
    pub fn forward_output(&self) -> bool {
        self.forward_output
    }

    /// Health check timing.
    pub fn health_check(&self) -> &HealthCheckSettings {
        &self.health_check
    }

    /// Raw value of an option.
    pub fn get(&self, input: &str) -> Option<&OptionValue> {
        self.options.get(input)
    }

    /// Text value of an option.
    pub fn text(&self, input: &str) -> Option<&str> {
        match self.options.get(input) {
            Some(OptionValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Switch value of an option; unset switches are `false`.
    pub fn switch(&self, input: &str) -> bool {
        matches!(self.options.get(input), Some(OptionValue::Switch(true)))
    }

    /// All resolved entries, launcher settings first, for display.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = vec![
            ("releaseTag".to_string(), self.release_tag.clone()),
            ("target".to_string(), self.target.clone()),
            ("mode".to_string(), self.mode.clone()),
        ];
        entries.extend(
            self.options
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        entries.push(("forwardOutput".to_string(), self.forward_output.to_string()));
        entries.push((
            "healthCheckWarmupMs".to_string(),
            self.health_check.warmup.as_millis().to_string(),
        ));
        entries.push((
            "healthCheckIntervalMs".to_string(),
            self.health_check.interval.as_millis().to_string(),
        ));
        entries.push((
            "healthCheckRetries".to_string(),
            self.health_check.retries.to_string(),
        ));
        entries.push((
            "healthCheckTimeoutMs".to_string(),
            self.health_check.timeout.as_millis().to_string(),
        ));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> NodeConfig {
        let mut options = BTreeMap::new();
        options.insert(INPUT_PORT, OptionValue::Text("8011".to_string()));
        options.insert(INPUT_HOST, OptionValue::Text("127.0.0.1".to_string()));
        options.insert("offline", OptionValue::Switch(false));
        options.insert("noCors", OptionValue::Switch(true));
        options.insert(INPUT_VERBOSITY, OptionValue::Count(2));

        NodeConfig {
            release_tag: "latest".to_string(),
            target: "x86_64-unknown-linux-gnu".to_string(),
            mode: "run".to_string(),
            options,
            forward_output: false,
            health_check: HealthCheckSettings::default(),
        }
    }

    #[test]
    fn test_absent_false_and_text_are_distinct() {
        let config = record();

        assert_eq!(config.get("offline"), Some(&OptionValue::Switch(false)));
        assert_eq!(config.get("chainId"), None);
        assert_eq!(config.text("port"), Some("8011"));
        assert!(!config.switch("offline"));
        assert!(config.switch("noCors"));
        assert!(!config.switch("chainId"));
    }

    #[test]
    fn test_typed_accessors() {
        let config = record();

        assert_eq!(config.port(), "8011");
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.verbosity(), 2);
        assert!(!config.is_fork());
        assert!(config.fork_url().is_none());
        assert!(config.extra_args().is_none());
    }

    #[test]
    fn test_entries_start_with_launcher_settings() {
        let entries = record().entries();
        assert_eq!(entries[0], ("releaseTag".to_string(), "latest".to_string()));
        assert_eq!(entries[2], ("mode".to_string(), "run".to_string()));
        assert!(entries.contains(&("verbosity".to_string(), "2".to_string())));
        assert!(entries.contains(&("healthCheckRetries".to_string(), "3".to_string())));
    }

    #[test]
    fn test_default_health_check_delays_are_equal() {
        let settings = HealthCheckSettings::default();
        assert_eq!(settings.warmup, settings.interval);
        assert_eq!(settings.retries, 3);
        assert_eq!(settings.timeout, Duration::from_secs(3));
    }
}
