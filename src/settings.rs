use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::common::read_optional;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Ceiling on entities processed by one batch execution. Also decides
    /// which rows show the batch cue.
    #[serde(default = "default_max_operands_num")]
    pub max_operands_num: usize,
    /// Cap on fuzzy-ranked rows a plugin returns.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Set of plugin names which should be enabled. If `None`, all registered
    /// plugins are enabled. Plugins that cannot be disabled ignore this.
    #[serde(default)]
    pub enabled_plugins: Option<HashSet<String>>,
    /// User command keys, indexed by the key the plugin declared.
    #[serde(default)]
    pub command_keys: HashMap<String, String>,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// `messages.json` used for command titles.
    #[serde(default)]
    pub messages_path: Option<String>,
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Log to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub plugin_settings: HashMap<String, serde_json::Value>,
}

fn default_max_operands_num() -> usize {
    10
}

fn default_max_results() -> usize {
    crate::matching::MAX_RESULTS
}

fn default_locale() -> String {
    "en".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_operands_num: default_max_operands_num(),
            max_results: default_max_results(),
            enabled_plugins: None,
            command_keys: HashMap::new(),
            locale: default_locale(),
            messages_path: None,
            debug_logging: false,
            log_file: None,
            plugin_settings: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = read_optional(Path::new(path))?;
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn is_plugin_enabled(&self, name: &str) -> bool {
        self.enabled_plugins
            .as_ref()
            .map_or(true, |set| set.contains(name))
    }

    /// Typed view of a plugin's entry in `plugin_settings`. Missing or
    /// malformed entries fall back to the default.
    pub fn plugin_config<T>(&self, plugin: &str) -> T
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match self.plugin_settings.get(plugin) {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|err| {
                tracing::warn!(plugin, "ignoring invalid plugin settings: {err}");
                T::default()
            }),
            None => T::default(),
        }
    }
}
