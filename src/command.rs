use serde::{Deserialize, Serialize};

use crate::i18n::{message_or_empty, subtitle_key, title_key, Localizer};
use crate::results::ResultItem;

/// How the launcher decides a command is eligible for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    /// Query starts with `"<key> "`.
    #[default]
    Keyword,
    /// Whole query matches the command pattern.
    Regexp,
    /// Receives every query.
    Search,
}

/// Metadata a plugin registers for each of its commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDescriptor {
    pub key: String,
    /// Key the plugin originally declared; survives user overrides of `key`.
    pub orkey: String,
    #[serde(rename = "type")]
    pub kind: CommandType,
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    #[serde(default)]
    pub allow_batch: bool,
    #[serde(default)]
    pub shift_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow: Option<serde_json::Value>,
    #[serde(default = "default_editable")]
    pub editable: bool,
    /// Pattern for [`CommandType::Regexp`] commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

fn default_editable() -> bool {
    true
}

impl CommandDescriptor {
    /// Replace the routing key, keeping `orkey`.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn simple(&self) -> SimpleCommand {
        simple_command(&self.key, &self.orkey)
    }
}

/// Static declaration of one command inside a plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSpec {
    pub key: String,
    /// Name used for message lookup instead of `key`.
    #[serde(default)]
    pub keyname: Option<String>,
    #[serde(default)]
    pub editable: Option<bool>,
    #[serde(default)]
    pub allow_batch: bool,
    #[serde(default)]
    pub shift_key: bool,
    #[serde(default)]
    pub workflow: Option<serde_json::Value>,
    #[serde(default)]
    pub pattern: Option<String>,
}

impl ItemSpec {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn keyname(mut self, keyname: impl Into<String>) -> Self {
        self.keyname = Some(keyname.into());
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    pub fn allow_batch(mut self) -> Self {
        self.allow_batch = true;
        self
    }

    pub fn shift_key(mut self) -> Self {
        self.shift_key = true;
        self
    }

    pub fn workflow(mut self, workflow: serde_json::Value) -> Self {
        self.workflow = Some(workflow);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }
}

/// Build the descriptors of a plugin.
///
/// Titles and subtitles are looked up as `<plugin>_<keyname or key>_title` and
/// `..._subtitle`; missing messages become empty strings. Keys are copied as
/// given and must be unique within the plugin.
pub fn gen_commands(
    plugin: &str,
    icon: &str,
    items: &[ItemSpec],
    kind: CommandType,
    localizer: &dyn Localizer,
) -> Vec<CommandDescriptor> {
    items
        .iter()
        .map(|item| {
            let lookup = item.keyname.as_deref().unwrap_or(&item.key);
            CommandDescriptor {
                key: item.key.clone(),
                orkey: item.key.clone(),
                kind,
                title: message_or_empty(localizer, &title_key(plugin, lookup)),
                subtitle: message_or_empty(localizer, &subtitle_key(plugin, lookup)),
                icon: icon.to_string(),
                allow_batch: item.allow_batch,
                shift_key: item.shift_key,
                workflow: item.workflow.clone(),
                editable: item.editable != Some(false),
                pattern: item.pattern.clone(),
            }
        })
        .collect()
}

/// Persisted form of a command key override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleCommand {
    pub key: String,
    pub orkey: String,
}

pub fn simple_command(key: &str, orkey: &str) -> SimpleCommand {
    SimpleCommand {
        key: key.to_string(),
        orkey: orkey.to_string(),
    }
}

/// Placeholder row shown for a command that matched but was not entered.
pub fn default_result(command: &CommandDescriptor) -> Vec<ResultItem> {
    vec![ResultItem {
        key: command.key.clone(),
        icon: command.icon.clone(),
        title: command.title.clone(),
        desc: command.subtitle.clone(),
        is_default: true,
        ..Default::default()
    }]
}
