//! Sources of raw named inputs.
//!
//! A [`ConfigSource`] is a plain key-value lookup. The resolver asks it for
//! each recognized option by its input name and never cares where the value
//! came from: the CI environment, an INI file, or an in-memory map.

use std::collections::HashMap;
use std::env;
use std::path::Path;

use ini::Ini;

use super::error::ConfigError;

/// Section of an inputs file that holds the option values.
pub const INPUTS_SECTION: &str = "inputs";

/// Key-value lookup of raw configuration inputs.
pub trait ConfigSource {
    /// Look up the raw value of the named input.
    ///
    /// Returns `None` when the input is not set at all. An empty string is
    /// returned as-is; deciding what "empty" means is the resolver's job.
    fn get(&self, name: &str) -> Option<String>;
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Box<S> {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// Reads inputs the way GitHub Actions exposes them to a step.
///
/// An input named `releaseTag` is read from `INPUT_RELEASETAG`; spaces in the
/// name become underscores and everything else (hyphens included) is kept.
/// Values are trimmed of surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionsInputSource;

impl ActionsInputSource {
    /// Create a source backed by the current process environment.
    pub fn new() -> Self {
        Self
    }

    /// Environment variable name carrying the given input.
    pub fn env_key(name: &str) -> String {
        format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
    }
}

impl ConfigSource for ActionsInputSource {
    fn get(&self, name: &str) -> Option<String> {
        env::var(Self::env_key(name))
            .ok()
            .map(|value| value.trim().to_string())
    }
}

/// In-memory inputs, used by tests and programmatic callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapConfigSource {
    values: HashMap<String, String>,
}

impl MapConfigSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input, returning the source for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set an input in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Number of inputs held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no inputs are held.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapConfigSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapConfigSource {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Inputs read from the `[inputs]` section of an INI file.
///
/// Lets a developer reproduce a CI launch locally:
///
/// ```ini
/// [inputs]
/// mode = fork
/// forkUrl = https://mainnet.era.zksync.io
/// port = 8012
/// ```
///
/// Keys are matched exactly as written in the file. Inputs missing from the
/// file fall through to the environment when [`IniConfigSource::with_env_fallback`]
/// is enabled.
#[derive(Debug, Clone, Default)]
pub struct IniConfigSource {
    values: HashMap<String, String>,
    env_fallback: bool,
}

impl IniConfigSource {
    /// Load inputs from a file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::InputsFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_ini(&ini))
    }

    /// Build from already-parsed INI content.
    pub fn from_ini(ini: &Ini) -> Self {
        let values = ini
            .section(Some(INPUTS_SECTION))
            .map(|section| {
                section
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.trim().to_string()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            values,
            env_fallback: false,
        }
    }

    /// Consult the CI environment for inputs the file does not set.
    pub fn with_env_fallback(mut self, enabled: bool) -> Self {
        self.env_fallback = enabled;
        self
    }
}

impl ConfigSource for IniConfigSource {
    fn get(&self, name: &str) -> Option<String> {
        match self.values.get(name) {
            Some(value) => Some(value.clone()),
            None if self.env_fallback => ActionsInputSource.get(name),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_key_uppercases_name() {
        assert_eq!(ActionsInputSource::env_key("releaseTag"), "INPUT_RELEASETAG");
        assert_eq!(ActionsInputSource::env_key("fork url"), "INPUT_FORK_URL");
    }

    #[test]
    fn test_env_key_keeps_hyphens() {
        assert_eq!(ActionsInputSource::env_key("extra-args"), "INPUT_EXTRA-ARGS");
    }

    #[test]
    fn test_actions_source_reads_and_trims() {
        // Unique name so parallel tests never observe it
        std::env::set_var("INPUT_DEVNODESOURCETESTVALUE", "  8012 \n");
        let source = ActionsInputSource::new();
        assert_eq!(
            source.get("devnodeSourceTestValue"),
            Some("8012".to_string())
        );
        assert_eq!(source.get("devnodeSourceTestMissing"), None);
        std::env::remove_var("INPUT_DEVNODESOURCETESTVALUE");
    }

    #[test]
    fn test_map_source_builder_and_collect() {
        let source = MapConfigSource::new().with("mode", "fork").with("port", "");
        assert_eq!(source.get("mode"), Some("fork".to_string()));
        assert_eq!(source.get("port"), Some(String::new()));
        assert_eq!(source.get("host"), None);
        assert_eq!(source.len(), 2);

        let collected: MapConfigSource = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(collected.get("b"), Some("2".to_string()));
    }

    #[test]
    fn test_ini_source_reads_inputs_section() {
        let ini = Ini::load_from_str(
            "[inputs]\nmode = fork\nforkUrl = https://example\n\n[other]\nmode = run\n",
        )
        .unwrap();
        let source = IniConfigSource::from_ini(&ini);

        assert_eq!(source.get("mode"), Some("fork".to_string()));
        assert_eq!(source.get("forkUrl"), Some("https://example".to_string()));
        assert_eq!(source.get("port"), None);
    }

    #[test]
    fn test_ini_source_without_section_is_empty() {
        let ini = Ini::load_from_str("[other]\nmode = run\n").unwrap();
        let source = IniConfigSource::from_ini(&ini);
        assert_eq!(source.get("mode"), None);
    }

    #[test]
    fn test_ini_source_load_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = IniConfigSource::load_from(&temp.path().join("missing.ini"));
        assert!(matches!(result, Err(ConfigError::InputsFile { .. })));
    }

    #[test]
    fn test_ini_source_load_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("devnode.ini");
        std::fs::write(&path, "[inputs]\nport = 9000\n").unwrap();

        let source = IniConfigSource::load_from(&path).unwrap();
        assert_eq!(source.get("port"), Some("9000".to_string()));
    }
}
