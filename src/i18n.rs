//! Localized string lookup.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Deserialize;

use crate::common::read_optional;

const DOCUMENT_BASE: &str = "http://oksteward.com/steward-document-";
/// Plugins documented under the `extension/` section of the manual.
const EXTENSION_DOCS: &[&str] = &["wordcard"];

static TEMPLATE_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("valid template regex"));

/// Source of localized display strings.
pub trait Localizer: Send + Sync {
    /// Look up a message. `None` when the key is unknown.
    fn message(&self, key: &str) -> Option<String>;
    /// Active UI locale such as `en` or `zh_CN`.
    fn locale(&self) -> &str;
}

#[derive(Deserialize)]
struct CatalogEntry {
    message: String,
}

/// In-memory catalog in the browser extension `messages.json` layout:
/// `{"openurl_title": {"message": "Open URL"}}`.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    locale: String,
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: HashMap::new(),
        }
    }

    pub fn from_json(locale: impl Into<String>, json: &str) -> anyhow::Result<Self> {
        let raw: HashMap<String, CatalogEntry> = serde_json::from_str(json)?;
        Ok(Self {
            locale: locale.into(),
            messages: raw.into_iter().map(|(k, v)| (k, v.message)).collect(),
        })
    }

    /// Load a catalog file. A missing or empty file gives an empty catalog;
    /// an unreadable one is an error.
    pub fn load(path: impl AsRef<Path>, locale: impl Into<String>) -> anyhow::Result<Self> {
        let content = read_optional(path.as_ref())?;
        if content.trim().is_empty() {
            return Ok(Self::new(locale));
        }
        Self::from_json(locale, &content)
    }

    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Localizer for MessageCatalog {
    fn message(&self, key: &str) -> Option<String> {
        self.messages.get(key).cloned()
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}

/// `<plugin>_<key>_title`
pub fn title_key(plugin: &str, key: &str) -> String {
    format!("{plugin}_{key}_title")
}

/// `<plugin>_<key>_subtitle`
pub fn subtitle_key(plugin: &str, key: &str) -> String {
    format!("{plugin}_{key}_subtitle")
}

/// Resolve `key`, falling back to an empty string.
pub fn message_or_empty(localizer: &dyn Localizer, key: &str) -> String {
    localizer.message(key).unwrap_or_else(|| {
        tracing::debug!(key, "missing localized message");
        String::new()
    })
}

/// Documentation language for a locale: `zh` for any Chinese locale, else `en`.
pub fn lang(locale: &str) -> &'static str {
    if locale.contains("zh") {
        "zh"
    } else {
        "en"
    }
}

/// Help page of a plugin in the user's language.
pub fn document_url(plugin: &str, locale: &str) -> String {
    let base = format!("{DOCUMENT_BASE}{}/plugins", lang(locale));
    if EXTENSION_DOCS.contains(&plugin) {
        format!("{base}/browser/extension/{plugin}.html")
    } else {
        format!("{base}/browser/{plugin}.html")
    }
}

/// Replace `{{name}}` placeholders. Unknown names render as nothing.
pub fn render_template(template: &str, data: &HashMap<&str, String>) -> String {
    TEMPLATE_VAR
        .replace_all(template, |caps: &Captures| {
            data.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}
