use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::batch::decorate_label;
use crate::command::{gen_commands, CommandDescriptor, CommandType, ItemSpec};
use crate::common::read_optional;
use crate::i18n::Localizer;
use crate::launcher::{Focus, Opener};
use crate::matching::match_text;
use crate::plugin::{Capability, EnterContext, InputContext, InputOutcome, Plugin};
use crate::results::ResultItem;

pub const NAME: &str = "viewExtension";
const KEY: &str = "ext";
const ICON: &str = "img/viewext.png";
/// Every row carries the shift hint: shift opens the homepage, it never
/// batches.
const SHIFT_HINT_ROWS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallType {
    #[default]
    Normal,
    Development,
    Sideload,
    Admin,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionIcon {
    pub size: u32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub homepage_url: Option<String>,
    #[serde(default)]
    pub icons: Vec<ExtensionIcon>,
    #[serde(default)]
    pub install_type: InstallType,
}

/// Lists installed extensions.
pub trait ExtensionSource: Send + Sync {
    fn extensions(&self) -> anyhow::Result<Vec<ExtensionInfo>>;
}

/// Extensions exported to a JSON array file.
pub struct JsonExtensionSource {
    path: PathBuf,
}

impl JsonExtensionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ExtensionSource for JsonExtensionSource {
    fn extensions(&self) -> anyhow::Result<Vec<ExtensionInfo>> {
        let content = read_optional(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("reading extensions from {}", self.path.display()))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtensionsSettings {
    /// Name searched for when the query is `/`.
    pub brand: String,
}

impl Default for ExtensionsSettings {
    fn default() -> Self {
        Self {
            brand: "Quick Launcher".into(),
        }
    }
}

pub struct ExtensionsPlugin {
    commands: Vec<CommandDescriptor>,
    source: Arc<dyn ExtensionSource>,
    opener: Arc<dyn Opener>,
    brand: String,
}

impl ExtensionsPlugin {
    pub fn new(
        localizer: &dyn Localizer,
        source: Arc<dyn ExtensionSource>,
        opener: Arc<dyn Opener>,
        settings: ExtensionsSettings,
    ) -> Self {
        let items = [ItemSpec::new(KEY).shift_key().editable(true)];
        Self {
            commands: gen_commands(NAME, ICON, &items, CommandType::Keyword, localizer),
            source,
            opener,
            brand: settings.brand,
        }
    }

    fn rows(&self, list: Vec<ExtensionInfo>, command: &CommandDescriptor) -> Vec<ResultItem> {
        list.into_iter()
            .enumerate()
            .map(|(i, ext)| {
                let desc = if command.shift_key {
                    decorate_label(&ext, i, |e| e.description.as_str(), SHIFT_HINT_ROWS)
                } else {
                    ext.description.clone()
                };
                ResultItem {
                    key: command.key.clone(),
                    icon: ext.icons.first().map(|icon| icon.url.clone()).unwrap_or_default(),
                    desc,
                    is_warn: ext.install_type == InstallType::Development,
                    homepage: ext.homepage_url,
                    title: ext.name,
                    id: Some(ext.id),
                    ..Default::default()
                }
            })
            .collect()
    }
}

#[async_trait]
impl Plugin for ExtensionsPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Browse installed extensions (prefix: `ext`)"
    }

    fn commands(&self) -> Vec<CommandDescriptor> {
        self.commands.clone()
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::Input, Capability::Enter]
    }

    fn can_disable(&self) -> bool {
        false
    }

    fn on_input(
        &self,
        query: &str,
        command: &CommandDescriptor,
        _ctx: InputContext<'_>,
    ) -> anyhow::Result<InputOutcome> {
        if query == "/" {
            return Ok(InputOutcome::Rewrite(format!("{} {}", command.key, self.brand)));
        }
        let query = query.to_lowercase();
        let list: Vec<ExtensionInfo> = self
            .source
            .extensions()?
            .into_iter()
            .filter(|ext| match_text(&query, &ext.name))
            .collect();
        Ok(InputOutcome::Items(self.rows(list, command)))
    }

    async fn on_enter(
        &self,
        item: &ResultItem,
        _command: &CommandDescriptor,
        ctx: EnterContext<'_>,
    ) -> anyhow::Result<()> {
        if ctx.shift_key {
            if let Some(homepage) = item.homepage.as_deref() {
                return self.opener.open(homepage, Focus::Foreground).await;
            }
        }
        let id = item.id.as_deref().context("extension row without id")?;
        self.opener
            .open(&format!("chrome://extensions/?id={id}"), Focus::Foreground)
            .await
    }
}
